use log::{debug, info};

use clap::Parser;
use snafu::ErrorCompat;
use std::io::{self, BufRead, Write};

mod app;
mod args;

use crate::app::config_reader::load_settings;
use crate::app::summary::{build_summary_js, check_reference, write_summary};
use crate::app::*;
use crate::args::{Args, Command};

// Returns false when the command ran but the request was turned down.
// The confirmation of `clear` is read from `input` and asked on `output`.
fn run<R: BufRead, W: Write>(args: &Args, input: &mut R, output: &mut W) -> AppResult<bool> {
    let settings = load_settings(
        args.config.as_deref(),
        args.store.as_deref(),
        args.candidates.as_deref(),
    )?;
    debug!("settings: {:?}", settings);

    if let Command::Candidates = args.command {
        for (idx, name) in settings.candidates.iter().enumerate() {
            println!("{}. {}", idx + 1, name);
        }
        return Ok(true);
    }

    let mut session = VotingSession::open(&settings)?;

    match &args.command {
        Command::Vote {
            voter_id,
            candidate,
        } => {
            let outcome = session.submit(
                voter_id.as_deref().unwrap_or(""),
                candidate.as_deref(),
            )?;
            println!("{}", outcome);
            Ok(outcome.is_recorded())
        }
        Command::Status { voter_id } => {
            if session.has_voted(voter_id) {
                println!("{} has voted.", voter_id.trim());
            } else {
                println!("{} has not voted yet.", voter_id.trim());
            }
            Ok(true)
        }
        Command::Results { out, reference } => {
            let res = session.results();
            println!("Vote Counts ({} votes)", res.total);
            for row in res.rows.iter() {
                println!("{}", row);
            }
            if res.ignored > 0 {
                println!("{} votes for candidates not on the ballot were not counted.", res.ignored);
            }
            let summary = build_summary_js(&settings, &res);
            // An empty --out means no JSON output.
            if let Some(out_path) = out.as_deref().filter(|p| !p.is_empty()) {
                write_summary(out_path, &summary)?;
            }
            if let Some(reference_path) = reference {
                check_reference(reference_path, &summary)?;
                info!("Results match the reference {:?}", reference_path);
            }
            Ok(true)
        }
        Command::Clear { yes } => {
            let confirmed = *yes
                || confirm("Are you sure you want to clear all votes?", input, output)?;
            if !confirmed {
                return Ok(false);
            }
            session.clear()?;
            println!("{}", CLEARED_MESSAGE);
            Ok(true)
        }
        Command::Candidates => Ok(true),
    }
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&args, &mut io::stdin().lock(), &mut io::stdout()) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("An error occured: {}", e);
            if let Some(bt) = ErrorCompat::backtrace(&e) {
                eprintln!("trace: {}", bt);
            }
            std::process::exit(1);
        }
    }
}
