pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "feedbell")]
#[command(about = "Announces new feed items to Discord", long_about = None)]
pub struct Cli {
    /// Path to the configuration file (default: ~/.config/feedbell/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to `run`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll all feeds now and then on a fixed interval, until interrupted
    Run {
        /// Poll interval overriding the configuration (e.g., "30m", "1h", "90s")
        #[arg(short, long)]
        interval: Option<String>,

        /// Skip the pass on start
        #[arg(long)]
        no_initial_poll: bool,
    },
    /// Run a single pass and exit
    Once,
    /// List the configured feeds
    Feeds,
    /// Print the image that would accompany an article
    Image {
        /// Article URL
        url: String,

        /// Base URL for root-relative image paths
        #[arg(short, long)]
        base: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["feedbell"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_run_with_interval() {
        let cli = Cli::try_parse_from(["feedbell", "run", "--interval", "5m", "--config", "/tmp/c.toml"])
            .unwrap();
        match cli.command {
            Some(Commands::Run {
                interval,
                no_initial_poll,
            }) => {
                assert_eq!(interval.as_deref(), Some("5m"));
                assert!(!no_initial_poll);
            }
            _ => panic!("expected run"),
        }
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_image_command() {
        let cli = Cli::try_parse_from([
            "feedbell",
            "image",
            "https://example.org/post",
            "--base",
            "https://example.org",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Image { ref url, base: Some(_) }) if url == "https://example.org/post"
        ));
    }

    #[test]
    fn test_feeds_and_once_commands() {
        let cli = Cli::try_parse_from(["feedbell", "feeds"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Feeds)));

        let cli = Cli::try_parse_from(["feedbell", "once"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Once)));
    }
}
