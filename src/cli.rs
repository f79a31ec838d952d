//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};

/// Quote bot - draws a fresh quote, downloads its image and posts it.
#[derive(Parser, Debug)]
#[command(name = "quotebot", version, about)]
pub struct Cli {
    /// What to do. Defaults to `post`.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Bot commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Draw a number, fetch its quote and image, and publish the post.
    Post {
        /// Format and save everything but do not publish; print the post instead.
        #[arg(long)]
        dry_run: bool,
    },
    /// Draw numbers and print them, one per line.
    Draw {
        /// How many numbers to draw.
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },
    /// Show how many numbers have been issued in the current cycle.
    Status,
    /// Forget every issued number and start a new cycle.
    Reset,
}

impl Cli {
    /// The command to run, with `post` as the default.
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Post { dry_run: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_command_defaults_to_post() {
        let cli = Cli::parse_from(["quotebot"]);
        assert_eq!(cli.command(), Command::Post { dry_run: false });
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn post_dry_run() {
        let cli = Cli::parse_from(["quotebot", "post", "--dry-run"]);
        assert_eq!(cli.command(), Command::Post { dry_run: true });
    }

    #[test]
    fn draw_count() {
        let cli = Cli::parse_from(["quotebot", "draw", "-n", "4"]);
        assert_eq!(cli.command(), Command::Draw { count: 4 });

        let cli = Cli::parse_from(["quotebot", "draw"]);
        assert_eq!(cli.command(), Command::Draw { count: 1 });
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["quotebot", "status", "-v", "--config", "bot.toml"]);
        assert_eq!(cli.command(), Command::Status);
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("bot.toml"));
    }

    #[test]
    fn reset_command() {
        assert_eq!(Cli::parse_from(["quotebot", "reset"]).command(), Command::Reset);
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["quotebot", "tweet"]).is_err());
    }
}
