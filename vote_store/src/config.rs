// ********* Output data structures ***********

use std::fmt::Display;
use std::path::PathBuf;

use snafu::Snafu;

/// The tally of a single candidate.
#[derive(PartialEq, Debug, Clone)]
pub struct TallyRow {
    pub name: String,
    pub count: u64,
    /// Share of the counted votes, between 0 and 100.
    pub percentage: f64,
}

impl Display for TallyRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.1}%", self.name, self.percentage)
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct TallyResult {
    /// One row per candidate, in the order of the candidate list.
    pub rows: Vec<TallyRow>,
    /// Number of votes attributed to a listed candidate.
    pub total: u64,
    /// Votes naming a candidate that is not in the list.
    pub ignored: u64,
}

// ********* Errors **********

/// Errors raised when the vote file cannot be read or written.
///
/// A duplicate vote is not an error: `VoteStore::cast_vote` reports it with `Ok(false)`.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StoreError {
    #[snafu(display("Error opening vote file {}: {}", path.display(), source))]
    OpeningStore {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Error reading vote file {}: {}", path.display(), source))]
    ReadingStore { source: csv::Error, path: PathBuf },
    #[snafu(display("Error creating a temporary file next to {}: {}", path.display(), source))]
    StagingStore {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Error writing vote file {}: {}", path.display(), source))]
    WritingStore { source: csv::Error, path: PathBuf },
    #[snafu(display("Error flushing vote file {}: {}", path.display(), source))]
    FlushingStore {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Error replacing vote file {}: {}", path.display(), source))]
    ReplacingStore {
        source: std::io::Error,
        path: PathBuf,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
