//! Command-line surface.

use clap::{Parser, Subcommand};

mod handlers;

pub use handlers::handle;

/// AI-assisted customer feedback triage.
#[derive(Parser, Debug)]
#[command(name = "feedback-triage")]
#[command(version = "0.1.0")]
#[command(about = "Collect feedback, auto-draft replies, surface analytics.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a review (prompts interactively for anything omitted)
    Submit {
        /// Rating from 1 (poor) to 5 (excellent)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: Option<u8>,

        /// Review text
        #[arg(long)]
        review: Option<String>,
    },

    /// Show feedback analytics: summary metrics and the latest-first feed
    Dashboard {
        /// Also dump the raw CSV table
        #[arg(long)]
        raw: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rating_is_range_checked_by_the_parser() {
        let submit = |rating: &str| {
            Cli::try_parse_from(["feedback-triage", "submit", "--rating", rating, "--review", "x"])
        };
        assert!(submit("0").is_err());
        assert!(submit("6").is_err());
        assert!(submit("1").is_ok());
        assert!(submit("5").is_ok());
    }
}
