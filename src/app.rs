use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use vote_store::*;

use std::fmt::Display;
use std::io::{BufRead, Write};

pub mod config_reader;
pub mod summary;

use crate::app::config_reader::Settings;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AppError {
    #[snafu(display("{source}"))]
    Store { source: StoreError },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}: {source}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the results"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing results to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the confirmation"))]
    ReadingConfirmation { source: std::io::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AppResult<T> = Result<T, AppError>;

/// What happened to a submitted vote.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SubmitOutcome {
    Recorded { candidate: String },
    MissingVoterId,
    MissingCandidate,
    UnknownCandidate(String),
    AlreadyVoted,
}

impl SubmitOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, SubmitOutcome::Recorded { .. })
    }
}

impl Display for SubmitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitOutcome::Recorded { candidate } => write!(f, "Vote submitted for {}!", candidate),
            SubmitOutcome::MissingVoterId => write!(f, "Please enter your voter ID."),
            SubmitOutcome::MissingCandidate => write!(f, "Please select a candidate."),
            SubmitOutcome::UnknownCandidate(c) => write!(f, "Unknown candidate: {}.", c),
            SubmitOutcome::AlreadyVoted => write!(f, "Already Voted."),
        }
    }
}

pub const CLEARED_MESSAGE: &str = "All votes have been cleared.";

/// The front desk of the vote: checks what the user typed, then talks to the store.
///
/// All the reads and writes of the vote file go through the session's store,
/// including clearing.
pub struct VotingSession {
    store: VoteStore,
    candidates: Vec<String>,
}

impl VotingSession {
    pub fn new(store: VoteStore, candidates: Vec<String>) -> VotingSession {
        VotingSession { store, candidates }
    }

    pub fn open(settings: &Settings) -> AppResult<VotingSession> {
        info!(
            "Opening vote file {:?} with candidates {:?}",
            settings.store_path, settings.candidates
        );
        let store = VoteStore::open(&settings.store_path).context(StoreSnafu {})?;
        Ok(VotingSession::new(store, settings.candidates.clone()))
    }

    #[cfg(test)]
    pub fn store(&self) -> &VoteStore {
        &self.store
    }

    pub fn has_voted(&self, voter_id: &str) -> bool {
        self.store.has_voted(voter_id.trim())
    }

    /// Validates and records a vote.
    ///
    /// Every rejection is reported as an outcome; only a failure to write the
    /// vote file is an error.
    pub fn submit(&mut self, voter_id: &str, candidate: Option<&str>) -> AppResult<SubmitOutcome> {
        let voter_id = voter_id.trim();
        let outcome = match candidate {
            _ if voter_id.is_empty() => SubmitOutcome::MissingVoterId,
            None => SubmitOutcome::MissingCandidate,
            Some(c) if c.is_empty() => SubmitOutcome::MissingCandidate,
            Some(c) if !self.candidates.iter().any(|name| name == c) => {
                SubmitOutcome::UnknownCandidate(c.to_string())
            }
            Some(c) => {
                if self.store.cast_vote(voter_id, c).context(StoreSnafu {})? {
                    SubmitOutcome::Recorded {
                        candidate: c.to_string(),
                    }
                } else {
                    SubmitOutcome::AlreadyVoted
                }
            }
        };
        debug!("submit: voter {:?}: {:?}", voter_id, outcome);
        Ok(outcome)
    }

    pub fn results(&self) -> TallyResult {
        tally(self.store.all_votes(), &self.candidates)
    }

    pub fn clear(&mut self) -> AppResult<()> {
        self.store.clear().context(StoreSnafu {})
    }
}

/// Asks a yes/no question. Anything but an explicit yes is a no.
pub fn confirm<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> AppResult<bool> {
    write!(output, "{} [y/N] ", question).context(ReadingConfirmationSnafu {})?;
    output.flush().context(ReadingConfirmationSnafu {})?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context(ReadingConfirmationSnafu {})?;
    let answer = line.trim().to_lowercase();
    if answer != "y" && answer != "yes" {
        warn!("confirm: {:?} declined", question);
        return Ok(false);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::{tempdir, TempDir};

    fn ballot() -> Vec<String> {
        ["Bianca", "Edward", "Felicia"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn session_in(dir: &TempDir) -> VotingSession {
        let store = VoteStore::open(dir.path().join("votes.csv")).unwrap();
        VotingSession::new(store, ballot())
    }

    #[test]
    fn submit_records_vote() {
        let dir = tempdir().unwrap();
        let mut session = session_in(&dir);

        let outcome = session.submit("  alice ", Some("Bianca")).unwrap();
        assert!(outcome.is_recorded());
        assert_eq!(outcome.to_string(), "Vote submitted for Bianca!");
        assert!(session.has_voted("alice"));
        assert_eq!(session.store().get("alice"), Some("Bianca"));
    }

    #[test]
    fn submit_rejects_second_vote() {
        let dir = tempdir().unwrap();
        let mut session = session_in(&dir);
        session.submit("alice", Some("Bianca")).unwrap();

        let outcome = session.submit("alice", Some("Edward")).unwrap();
        assert_eq!(outcome, SubmitOutcome::AlreadyVoted);
        assert_eq!(outcome.to_string(), "Already Voted.");
        assert_eq!(session.store().get("alice"), Some("Bianca"));
    }

    #[test]
    fn submit_validates_before_the_store() {
        let dir = tempdir().unwrap();
        let mut session = session_in(&dir);

        let outcome = session.submit("   ", Some("Bianca")).unwrap();
        assert_eq!(outcome.to_string(), "Please enter your voter ID.");
        let outcome = session.submit("", None).unwrap();
        assert_eq!(outcome, SubmitOutcome::MissingVoterId);

        let outcome = session.submit("alice", None).unwrap();
        assert_eq!(outcome.to_string(), "Please select a candidate.");
        let outcome = session.submit("alice", Some("")).unwrap();
        assert_eq!(outcome, SubmitOutcome::MissingCandidate);

        let outcome = session.submit("alice", Some("bianca")).unwrap();
        assert_eq!(outcome.to_string(), "Unknown candidate: bianca.");

        assert!(session.store().is_empty());
        assert_eq!(fs::read_to_string(session.store().path()).unwrap(), "");
    }

    #[test]
    fn results_and_clear() {
        let dir = tempdir().unwrap();
        let mut session = session_in(&dir);
        session.submit("alice", Some("Bianca")).unwrap();
        session.submit("bob", Some("Edward")).unwrap();
        session.submit("carol", Some("Edward")).unwrap();

        let lines: Vec<String> = session
            .results()
            .rows
            .iter()
            .map(|r| r.to_string())
            .collect();
        assert_eq!(lines, vec!["Bianca: 33.3%", "Edward: 66.7%", "Felicia: 0.0%"]);

        session.clear().unwrap();
        assert_eq!(session.results().total, 0);
        assert!(!session.has_voted("alice"));
        let reopened = VoteStore::open(session.store().path()).unwrap();
        assert!(reopened.is_empty());
    }

    #[test]
    fn store_failure_is_an_error() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("polls");
        fs::create_dir(&sub).unwrap();
        let store = VoteStore::open(sub.join("votes.csv")).unwrap();
        let mut session = VotingSession::new(store, ballot());
        fs::remove_dir_all(&sub).unwrap();

        let res = session.submit("alice", Some("Bianca"));
        assert!(matches!(res, Err(AppError::Store { .. })));
        assert!(!session.has_voted("alice"));
    }

    #[test]
    fn confirm_needs_explicit_yes() {
        for (typed, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("\n", false), ("", false)] {
            let mut input = Cursor::new(typed.as_bytes());
            let mut output: Vec<u8> = Vec::new();
            let res = confirm("Are you sure?", &mut input, &mut output).unwrap();
            assert_eq!(res, expected, "answer {:?}", typed);
            assert_eq!(String::from_utf8(output).unwrap(), "Are you sure? [y/N] ");
        }
    }
}
