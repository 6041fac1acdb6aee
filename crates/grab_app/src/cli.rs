use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

use crate::logging::LogDestination;

/// Submit a bulk image-download job and track it to completion.
#[derive(Debug, Parser)]
#[command(name = "grab", version)]
pub struct Cli {
    /// Search query for the job.
    pub query: String,

    /// Number of images to request (1-50). Kept as raw text so the
    /// submission-time validator owns the rules.
    #[arg(short, long, default_value = grab_core::DEFAULT_COUNT)]
    pub count: String,

    /// Minimum image size selector, passed through to the service.
    #[arg(short = 's', long, default_value = grab_core::DEFAULT_MIN_SIZE)]
    pub min_size: String,

    /// Base URL of the download service.
    #[arg(long, default_value = "http://localhost:5000")]
    pub server: Url,

    /// Directory the finished artifact is saved into.
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Ask the server to open its download folder once the job completes.
    #[arg(long)]
    pub open_folder: bool,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogArg::File)]
    pub log: LogArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogArg {
    File,
    Terminal,
    Both,
}

impl From<LogArg> for LogDestination {
    fn from(arg: LogArg) -> Self {
        match arg {
            LogArg::File => LogDestination::File,
            LogArg::Terminal => LogDestination::Terminal,
            LogArg::Both => LogDestination::Both,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn defaults_match_the_form_defaults() {
        let cli = Cli::parse_from(["grab", "cats"]);
        assert_eq!(cli.query, "cats");
        assert_eq!(cli.count, "20");
        assert_eq!(cli.min_size, "medium");
        assert_eq!(cli.server.as_str(), "http://localhost:5000/");
        assert!(!cli.open_folder);
    }

    #[test]
    fn count_is_passed_through_unparsed() {
        // Validation happens at submission, not at argument parsing.
        let cli = Cli::parse_from(["grab", "cats", "--count", "oops"]);
        assert_eq!(cli.count, "oops");
    }
}
