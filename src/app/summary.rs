use crate::app::*;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use std::fs;
use text_diff::print_diff;
use vote_store::TallyResult;

use crate::app::config_reader::Settings;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(rename = "storePath")]
    pub store_path: String,
    pub candidates: Vec<String>,
}

fn tally_to_json(res: &TallyResult) -> JSValue {
    let rows: Vec<JSValue> = res
        .rows
        .iter()
        .map(|r| {
            json!({
                "name": r.name,
                "count": r.count.to_string(),
                "percentage": format!("{:.1}", r.percentage),
            })
        })
        .collect();
    json!({
        "total": res.total.to_string(),
        "ignored": res.ignored.to_string(),
        "tally": rows,
    })
}

pub fn build_summary_js(settings: &Settings, res: &TallyResult) -> JSValue {
    let c = OutputConfig {
        store_path: settings.store_path.display().to_string(),
        candidates: settings.candidates.clone(),
    };
    json!({
        "config": c,
        "results": tally_to_json(res) })
}

/// Writes the summary to a file, or to the standard output for `stdout`.
pub fn write_summary(out: &str, summary: &JSValue) -> AppResult<()> {
    let pretty_js = serde_json::to_string_pretty(summary).context(SerializingJsonSnafu {})?;
    if out == "stdout" {
        println!("{}", pretty_js);
    } else {
        info!("write_summary: writing results to {:?}", out);
        fs::write(out, pretty_js).context(WritingSummarySnafu { path: out })?;
    }
    Ok(())
}

pub fn read_summary(path: &str) -> AppResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_summary: content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

/// Compares the results with a reference summary and prints the differences.
///
/// Only the `results` section is compared: the configuration part holds local paths.
pub fn check_reference(reference_path: &str, summary: &JSValue) -> AppResult<()> {
    let reference = read_summary(reference_path)?;
    let pretty_ref =
        serde_json::to_string_pretty(&reference["results"]).context(SerializingJsonSnafu {})?;
    let pretty_res =
        serde_json::to_string_pretty(&summary["results"]).context(SerializingJsonSnafu {})?;
    if pretty_ref != pretty_res {
        warn!("Found differences with the reference results");
        print_diff(pretty_ref.as_str(), pretty_res.as_str(), "\n");
        whatever!("Difference detected between computed results and reference results")
    }
    Ok(())
}
