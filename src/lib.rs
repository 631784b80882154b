//! # Gator
//!
//! A multi-user RSS aggregator for the terminal.
//!
//! ## Architecture
//!
//! Users register feeds and follow them. `gator agg` runs a polling loop
//! that picks the least recently fetched feed each tick:
//!
//! ```text
//! Scheduler → Store (claim + mark) → Fetcher → Ingestion → Store (posts)
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! gator register alice
//! gator addfeed "Rust Blog" https://blog.rust-lang.org/feed.xml
//! gator agg 1m
//! gator browse 10
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the store,
/// fetcher and configuration.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration file handling.
///
/// Loads from `~/.config/gator/config.toml` and stores the current user.
pub mod config;

/// Core domain models: users, feeds, follows and posts.
pub mod domain;

/// HTTP fetching and RSS parsing.
pub mod fetcher;

/// Turns fetched entries into stored posts.
pub mod ingest;

/// The polling loop behind `gator agg`.
pub mod scheduler;

/// SQLite persistence.
pub mod store;
