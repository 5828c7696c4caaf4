use crate::app::*;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_PATH: &str = "votes.csv";
pub const DEFAULT_CANDIDATES: [&str; 3] = ["Bianca", "Edward", "Felicia"];

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BallotCandidate {
    pub name: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteboxConfig {
    #[serde(rename = "storePath")]
    pub store_path: Option<String>,
    pub candidates: Option<Vec<BallotCandidate>>,
}

/// The configuration once defaults and command-line overrides are applied.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Settings {
    pub store_path: PathBuf,
    pub candidates: Vec<String>,
}

pub fn read_config(path: &str) -> AppResult<VoteboxConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: content: {:?}", contents);
    let config: VoteboxConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(config)
}

/// Loads the configuration file, if any, and applies the command-line overrides.
pub fn load_settings(
    config_path: Option<&str>,
    store_path: Option<&str>,
    candidates: Option<&[String]>,
) -> AppResult<Settings> {
    let (config, config_dir) = match config_path {
        Some(p) => {
            let config = read_config(p)?;
            info!("config: {:?}", config);
            (config, Path::new(p).parent().map(|d| d.to_path_buf()))
        }
        None => (VoteboxConfig::default(), None),
    };
    make_settings(&config, config_dir.as_deref(), store_path, candidates)
}

pub fn make_settings(
    config: &VoteboxConfig,
    config_dir: Option<&Path>,
    store_path: Option<&str>,
    candidates: Option<&[String]>,
) -> AppResult<Settings> {
    let store_path: PathBuf = match (store_path, &config.store_path) {
        (Some(p), _) => PathBuf::from(p),
        (None, Some(p)) => match config_dir {
            // Relative to the configuration file.
            Some(dir) if Path::new(p).is_relative() => dir.join(p),
            _ => PathBuf::from(p),
        },
        (None, None) => PathBuf::from(DEFAULT_STORE_PATH),
    };

    let candidates: Vec<String> = match (candidates, &config.candidates) {
        (Some(cs), _) => cs.to_vec(),
        (None, Some(cs)) => cs.iter().map(|c| c.name.clone()).collect(),
        (None, None) => DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
    };
    validate_candidates(&candidates)?;

    Ok(Settings {
        store_path,
        candidates,
    })
}

fn validate_candidates(candidates: &[String]) -> AppResult<()> {
    if candidates.is_empty() {
        whatever!("The ballot must have at least one candidate")
    }
    let mut seen: HashSet<&str> = HashSet::new();
    for c in candidates.iter() {
        if c.trim().is_empty() {
            whatever!("Candidate names may not be blank")
        }
        if !seen.insert(c.as_str()) {
            whatever!("Candidate {:?} appears more than once on the ballot", c)
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(cs: &[&str]) -> Vec<String> {
        cs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let s = make_settings(&VoteboxConfig::default(), None, None, None).unwrap();
        assert_eq!(s.store_path, PathBuf::from("votes.csv"));
        assert_eq!(s.candidates, names(&["Bianca", "Edward", "Felicia"]));
    }

    #[test]
    fn parse_config() {
        let js = r#"{"storePath": "polls/votes.csv", "candidates": [{"name": "Ann"}, {"name": "Ben"}]}"#;
        let config: VoteboxConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.store_path, Some("polls/votes.csv".to_string()));

        let s = make_settings(&config, Some(Path::new("/etc/votebox")), None, None).unwrap();
        assert_eq!(s.store_path, PathBuf::from("/etc/votebox/polls/votes.csv"));
        assert_eq!(s.candidates, names(&["Ann", "Ben"]));
    }

    #[test]
    fn empty_config_object() {
        let config: VoteboxConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, VoteboxConfig::default());
    }

    #[test]
    fn command_line_wins() {
        let config = VoteboxConfig {
            store_path: Some("/srv/votes.csv".to_string()),
            candidates: Some(vec![BallotCandidate {
                name: "Ann".to_string(),
            }]),
        };
        let cands = names(&["Zed"]);
        let s = make_settings(&config, None, Some("here.csv"), Some(cands.as_slice())).unwrap();
        assert_eq!(s.store_path, PathBuf::from("here.csv"));
        assert_eq!(s.candidates, cands);

        // Absolute paths are kept as they are.
        let s = make_settings(&config, Some(Path::new("/etc")), None, None).unwrap();
        assert_eq!(s.store_path, PathBuf::from("/srv/votes.csv"));
    }

    #[test]
    fn bad_ballots() {
        let config = VoteboxConfig::default();
        for cands in [names(&[]), names(&["Ann", " "]), names(&["Ann", "Ben", "Ann"])] {
            assert!(make_settings(&config, None, None, Some(cands.as_slice())).is_err());
        }
    }

    #[test]
    fn missing_config_file() {
        let res = load_settings(Some("/nonexistent/votebox.json"), None, None);
        assert!(matches!(res, Err(AppError::OpeningJson { .. })));
    }
}
