//! Command-line interface for geoscout.

use clap::{Parser, Subcommand};

/// Geoscout - location, weather, events, businesses and movies behind one cache
#[derive(Parser)]
#[command(name = "geoscout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "daemon")]
    Serve,

    /// Write a default config.toml if none exists
    InitConfig,

    /// Resolve a location once and print it as JSON
    #[command(alias = "l")]
    Locate {
        /// Free-text location query
        #[arg(required = true)]
        query: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["geoscout"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn locate_joins_words() {
        let cli = Cli::try_parse_from(["geoscout", "locate", "Seattle,", "WA"]).unwrap();
        match cli.command {
            Some(Commands::Locate { query }) => assert_eq!(query.join(" "), "Seattle, WA"),
            _ => panic!("expected locate"),
        }
    }

    #[test]
    fn locate_requires_a_query() {
        assert!(Cli::try_parse_from(["geoscout", "locate"]).is_err());
    }
}
