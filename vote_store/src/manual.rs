/*!

This is the long-form manual for `vote_store` and `votebox`.

## The vote file

Votes are kept in a plain CSV file with no header. Each row holds a voter id
and the name of the candidate this voter picked:

```text
alice,Bianca
bob,Felicia
"doe, jane",Edward
```

Fields containing a comma, a double quote or a line break are quoted the usual
CSV way. The file is rewritten in full after every vote, sorted by voter id.
Edits made to the file while `votebox` is running are lost on the next vote.

Rows with one field, or with more than two, are skipped when the file is read.
So are rows that are not valid UTF-8. A partially damaged file still loads all
of its valid rows.

If the file does not exist, it is created empty the first time the store is
opened.

## Voting rules

- One vote per voter id. The first vote wins; a second vote with the same id is
 rejected and changes nothing.
- Voter ids are compared exactly, after `votebox` strips surrounding whitespace.
- The store itself accepts any candidate name. `votebox` only accepts names
 from its candidate list.

## Results

Each candidate of the list gets a share of the counted votes, printed with one
decimal:

```text
Bianca: 33.3%
Edward: 66.7%
Felicia: 0.0%
```

Votes for a name that is not in the list (for example after the list changed)
are not counted and are reported separately.

## Configuration

`votebox` works without configuration: it stores votes in `votes.csv` in the
current directory and offers the candidates `Bianca`, `Edward` and `Felicia`.
A JSON file passed with `--config` can change both:

```json
{
  "storePath": "polls/votes.csv",
  "candidates": [{ "name": "Bianca" }, { "name": "Edward" }]
}
```

Both keys are optional. A relative `storePath` is relative to the directory of
the configuration file. The `--store` and `--candidate` flags override the file.

 */
