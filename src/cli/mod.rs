pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gator")]
#[command(about = "A terminal RSS aggregator", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/gator/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a user and log in as them
    Register {
        /// Name of the new user
        name: String,
    },
    /// Switch the current user
    Login {
        /// Name of an existing user
        name: String,
    },
    /// List all users
    Users,
    /// Delete every user along with their feeds, follows and posts
    Reset,
    /// Poll feeds forever, one feed per interval
    Agg {
        /// Time between requests (e.g., "30s", "1m", "1h30m")
        interval: String,

        /// Per-fetch timeout, overriding the config file (e.g., "10s")
        #[arg(long)]
        fetch_timeout: Option<String>,
    },
    /// Add a feed and follow it
    Addfeed {
        /// Display name for the feed
        name: String,
        /// URL of the RSS feed
        url: String,
    },
    /// List all feeds
    Feeds,
    /// Follow an existing feed
    Follow {
        /// URL of the feed
        url: String,
    },
    /// List the feeds the current user follows
    Following,
    /// Stop following a feed
    Unfollow {
        /// URL of the feed
        url: String,
    },
    /// Show the newest posts from followed feeds
    Browse {
        /// Number of posts to show
        #[arg(default_value_t = commands::DEFAULT_BROWSE_LIMIT)]
        limit: usize,
    },
}
