// Reading and writing the vote file.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use snafu::prelude::*;
use tempfile::NamedTempFile;

use crate::config::*;

/// The record of who voted for whom.
///
/// The store owns its file: every successful mutation rewrites the whole file
/// before returning, so the file always mirrors the in-memory mapping.
///
/// The store does not validate voter ids or candidate names. Rejecting an empty
/// voter id or a candidate outside the ballot is the job of the caller.
///
/// ```
/// # use vote_store::{StoreError, VoteStore};
/// # let dir = tempfile::tempdir().unwrap();
/// let mut store = VoteStore::open(dir.path().join("votes.csv"))?;
///
/// assert!(store.cast_vote("alice", "Bianca")?);
/// // First vote wins.
/// assert!(!store.cast_vote("alice", "Edward")?);
/// assert_eq!(store.get("alice"), Some("Bianca"));
/// # Ok::<(), StoreError>(())
/// ```
#[derive(Debug)]
pub struct VoteStore {
    path: PathBuf,
    votes: BTreeMap<String, String>,
}

impl VoteStore {
    /// Opens the vote file at the given location, creating an empty one if it
    /// does not exist yet.
    ///
    /// Rows that do not hold exactly two fields, or that are not valid UTF-8, are
    /// skipped. A partially corrupted file still loads all of its valid rows.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<VoteStore> {
        let mut store = VoteStore {
            path: path.as_ref().to_path_buf(),
            votes: BTreeMap::new(),
        };
        store.load()?;
        info!(
            "VoteStore::open: {} votes loaded from {}",
            store.votes.len(),
            store.path.display()
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_voted(&self, voter_id: &str) -> bool {
        self.votes.contains_key(voter_id)
    }

    /// The candidate recorded for this voter, if any.
    pub fn get(&self, voter_id: &str) -> Option<&str> {
        self.votes.get(voter_id).map(|s| s.as_str())
    }

    /// Records a vote.
    ///
    /// Returns `Ok(false)` without touching anything when the voter has already
    /// voted. If the file cannot be written, the vote is not kept in memory either
    /// and the file keeps its previous content.
    pub fn cast_vote(&mut self, voter_id: &str, candidate: &str) -> StoreResult<bool> {
        if self.has_voted(voter_id) {
            debug!("cast_vote: {:?} has already voted", voter_id);
            return Ok(false);
        }
        self.votes.insert(voter_id.to_string(), candidate.to_string());
        if let Err(e) = self.save() {
            self.votes.remove(voter_id);
            return Err(e);
        }
        info!("cast_vote: recorded vote of {:?}", voter_id);
        Ok(true)
    }

    /// All the recorded votes, keyed by voter id.
    pub fn all_votes(&self) -> &BTreeMap<String, String> {
        &self.votes
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Removes every vote, in memory and on disk.
    pub fn clear(&mut self) -> StoreResult<()> {
        let previous = std::mem::take(&mut self.votes);
        if let Err(e) = self.save() {
            self.votes = previous;
            return Err(e);
        }
        info!(
            "clear: removed {} votes from {}",
            previous.len(),
            self.path.display()
        );
        Ok(())
    }

    fn load(&mut self) -> StoreResult<()> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("load: {} does not exist, creating it", self.path.display());
                return self.save();
            }
            Err(e) => {
                return Err(e).context(OpeningStoreSnafu {
                    path: self.path.clone(),
                })
            }
        };

        // Flexible: rows of the wrong length are filtered below instead of failing the read.
        let rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        for (idx, record_r) in rdr.into_records().enumerate() {
            let recno = idx + 1;
            let record = match record_r {
                Ok(r) => r,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                    warn!("load: skipping record {}: {}", recno, e);
                    continue;
                }
                Err(e) => {
                    return Err(e).context(ReadingStoreSnafu {
                        path: self.path.clone(),
                    })
                }
            };
            if record.len() != 2 {
                warn!(
                    "load: skipping record {} with {} fields: {:?}",
                    recno,
                    record.len(),
                    record
                );
                continue;
            }
            debug!("load: record {}: {:?}", recno, record);
            self.votes.insert(record[0].to_string(), record[1].to_string());
        }
        Ok(())
    }

    // Full rewrite, in key order. Rows go to a temporary file next to the vote
    // file, which then replaces it: a failed write leaves the old file untouched.
    fn save(&self) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir).context(StagingStoreSnafu {
            path: self.path.clone(),
        })?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp);
        for (voter_id, candidate) in self.votes.iter() {
            wtr.write_record([voter_id, candidate])
                .context(WritingStoreSnafu {
                    path: self.path.clone(),
                })?;
        }
        wtr.flush().context(FlushingStoreSnafu {
            path: self.path.clone(),
        })?;
        let tmp = wtr
            .into_inner()
            .map_err(|e| io::Error::new(e.error().kind(), e.to_string()))
            .context(FlushingStoreSnafu {
                path: self.path.clone(),
            })?;
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .context(ReplacingStoreSnafu {
                path: self.path.clone(),
            })?;
        debug!(
            "save: wrote {} votes to {}",
            self.votes.len(),
            self.path.display()
        );
        Ok(())
    }
}
