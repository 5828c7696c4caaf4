/*!

A small, durable record of who voted for whom.

[`VoteStore`] maps each voter id to the candidate this voter chose, accepts at
most one vote per voter, and mirrors every change to a flat CSV file so that
votes survive restarts. [`tally()`] turns the recorded votes into per-candidate
percentages.

```
use vote_store::{tally, VoteStore};
# use vote_store::StoreError;
# let dir = tempfile::tempdir().unwrap();

let mut store = VoteStore::open(dir.path().join("votes.csv"))?;
store.cast_vote("alice", "Bianca")?;
store.cast_vote("bob", "Edward")?;
store.cast_vote("carol", "Edward")?;

let candidates = vec!["Bianca".to_string(), "Edward".to_string(), "Felicia".to_string()];
let res = tally(store.all_votes(), &candidates);
for row in res.rows.iter() {
    println!("{}", row);
}
assert_eq!(res.rows[1].to_string(), "Edward: 66.7%");
# Ok::<(), StoreError>(())
```

See the [manual] for the file format and the voting rules.
*/

mod config;
pub mod manual;
pub mod store;
pub mod tally;

pub use crate::config::*;
pub use crate::store::VoteStore;
pub use crate::tally::tally;
