use std::time::Duration;

use clap::Parser;

/// Bounds for the per-source fetch timeout, in seconds.
pub const MIN_FETCH_TIMEOUT_SECS: u64 = 10;
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 15;

#[derive(Parser, Debug, Clone)]
#[command(name = "jobscout", about = "Job listing aggregator")]
pub struct Config {
    /// Database connection URL. Without one, listings are kept in memory.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Run database migrations on startup
    #[arg(long, env = "RUN_MIGRATIONS", default_value = "true")]
    pub run_migrations: bool,

    /// Per-source fetch timeout in seconds (clamped to 10..=15)
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value = "10")]
    pub fetch_timeout_secs: u64,

    /// Sources to query, in merge order
    #[arg(long, env = "SOURCES", value_delimiter = ',', default_value = "indeed,linkedin")]
    pub sources: Vec<String>,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the web server (default when no subcommand given)
    Serve {
        /// Listen address
        #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
        listen_addr: String,
    },
    /// Scrape every source once, store the results and print them as JSON
    Search {
        query: String,
        location: String,

        /// Discard per-source progress events
        #[arg(long)]
        quiet: bool,
    },
}

impl Config {
    /// Resolve the command, defaulting to Serve if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        })
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(
            self.fetch_timeout_secs
                .clamp(MIN_FETCH_TIMEOUT_SECS, MAX_FETCH_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["jobscout"]).unwrap();
        assert_eq!(config.sources, vec!["indeed", "linkedin"]);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert!(matches!(config.resolved_command(), Command::Serve { .. }));
    }

    #[test]
    fn timeout_is_clamped() {
        let config = Config::try_parse_from(["jobscout", "--fetch-timeout-secs", "60"]).unwrap();
        assert_eq!(config.fetch_timeout(), Duration::from_secs(15));

        let config = Config::try_parse_from(["jobscout", "--fetch-timeout-secs", "1"]).unwrap();
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn search_subcommand_and_source_list() {
        let config = Config::try_parse_from([
            "jobscout",
            "--sources",
            "linkedin,indeed",
            "search",
            "rust developer",
            "remote",
            "--quiet",
        ])
        .unwrap();

        assert_eq!(config.sources, vec!["linkedin", "indeed"]);
        match config.resolved_command() {
            Command::Search {
                query,
                location,
                quiet,
            } => {
                assert_eq!(query, "rust developer");
                assert_eq!(location, "remote");
                assert!(quiet);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
