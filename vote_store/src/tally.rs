use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};

use crate::config::*;

/// Counts the votes for each candidate of the ballot.
///
/// Rows follow the order of `candidates`. Votes for a name outside the ballot
/// are left out of the total and reported in `ignored`.
///
/// ```
/// # use std::collections::BTreeMap;
/// use vote_store::tally;
///
/// let mut votes = BTreeMap::new();
/// votes.insert("alice".to_string(), "Bianca".to_string());
/// votes.insert("bob".to_string(), "Edward".to_string());
///
/// let res = tally(&votes, &["Bianca".to_string(), "Edward".to_string()]);
/// assert_eq!(res.rows[0].to_string(), "Bianca: 50.0%");
/// ```
pub fn tally(votes: &BTreeMap<String, String>, candidates: &[String]) -> TallyResult {
    let mut counts: HashMap<&str, u64> = candidates.iter().map(|c| (c.as_str(), 0)).collect();
    let mut ignored: u64 = 0;
    for (voter_id, candidate) in votes.iter() {
        match counts.get_mut(candidate.as_str()) {
            Some(count) => *count += 1,
            None => {
                warn!(
                    "tally: vote of {:?} for unknown candidate {:?} is not counted",
                    voter_id, candidate
                );
                ignored += 1;
            }
        }
    }

    let total: u64 = counts.values().sum();
    let rows: Vec<TallyRow> = candidates
        .iter()
        .map(|name| {
            let count = counts.get(name.as_str()).cloned().unwrap_or(0);
            let percentage = if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            TallyRow {
                name: name.clone(),
                count,
                percentage,
            }
        })
        .collect();
    debug!("tally: total {} ignored {} rows {:?}", total, ignored, rows);
    TallyResult {
        rows,
        total,
        ignored,
    }
}
