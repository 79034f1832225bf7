//! Runtime configuration for the key search.

use std::time::Duration;

use clap::Parser;

use crate::coordinator::SearchMode;
use crate::output::OutputFormat;

/// Yggdrasil key generator: finds keys whose node address packs the most identifier bits
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Search for the best key over --duration seconds instead of taking the first one
    #[arg(long, default_value = "false")]
    pub strong: bool,

    /// Suppress all output except key information
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Print the result as a JSON object
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Length of the strong-mode search in seconds
    #[arg(short = 'd', long, default_value = "5")]
    pub duration: u64,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::NoWorkers);
        }

        if self.strong && self.duration == 0 {
            return Err(ConfigError::ZeroDuration);
        }

        Ok(())
    }

    /// Returns the coordinator mode selected by --strong and --duration
    pub fn search_mode(&self) -> SearchMode {
        if self.strong {
            SearchMode::BestOf(Duration::from_secs(self.duration))
        } else {
            SearchMode::SingleShot
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Plain
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("at least one worker is required")]
    NoWorkers,
    #[error("strong mode needs a duration of at least one second")]
    ZeroDuration,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("ygg-vanity").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert!(!config.strong);
        assert!(!config.quiet);
        assert!(!config.json);
        assert_eq!(config.duration, 5);
        assert_eq!(config.search_mode(), SearchMode::SingleShot);
        assert_eq!(config.output_format(), OutputFormat::Plain);
        assert_eq!(config.worker_count(), num_cpus::get());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strong_mode_uses_duration() {
        let config = parse(&["--strong", "-d", "12", "--json", "-w", "3"]);
        assert_eq!(
            config.search_mode(),
            SearchMode::BestOf(Duration::from_secs(12))
        );
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.worker_count(), 3);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = parse(&["--workers", "0"]);
        assert!(matches!(config.validate(), Err(ConfigError::NoWorkers)));
    }

    #[test]
    fn test_zero_duration_rejected_in_strong_mode() {
        assert!(matches!(
            parse(&["--strong", "--duration", "0"]).validate(),
            Err(ConfigError::ZeroDuration)
        ));
        // Duration is ignored outside strong mode
        assert!(parse(&["--duration", "0"]).validate().is_ok());
    }
}
