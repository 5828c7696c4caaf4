use clap::{Parser, Subcommand};

/// This is a single-machine voting program: one vote per voter id, kept in a CSV file.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the location of the vote file and the list of
    /// candidates. See the manual of the vote_store crate for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, default votes.csv) The vote file. Setting this option overrides the path
    /// that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub store: Option<String>,

    /// (repeatable) A candidate on the ballot. The order of the flags is the order of the
    /// ballot. Setting this option overrides the candidates of the --config option.
    #[clap(long = "candidate", value_parser)]
    pub candidates: Option<Vec<String>>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging.
    #[clap(long, takes_value = false)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Submits a vote.
    Vote {
        /// The id of the voter.
        #[clap(long, value_parser)]
        voter_id: Option<String>,
        /// The chosen candidate. It must be on the ballot.
        #[clap(long, value_parser)]
        candidate: Option<String>,
    },
    /// Tells whether a voter id has already voted.
    Status {
        #[clap(long, value_parser)]
        voter_id: String,
    },
    /// Shows the share of the votes of each candidate.
    Results {
        /// (file path, 'stdout', or empty for none) If specified, the results will also be written in
        /// JSON format to the given location.
        #[clap(short, long, value_parser)]
        out: Option<String>,
        /// (file path) A reference file containing results in JSON format. If provided,
        /// votebox will check that the computed results match the reference.
        #[clap(short, long, value_parser)]
        reference: Option<String>,
    },
    /// Removes all the votes.
    Clear {
        /// Do not ask for confirmation.
        #[clap(short, long, takes_value = false)]
        yes: bool,
    },
    /// Lists the candidates on the ballot.
    Candidates,
}
