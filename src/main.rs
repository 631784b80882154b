use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gator::app::AppContext;
use gator::cli::commands::{self, with_current_user};
use gator::cli::{Cli, Commands};
use gator::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing, defaulting to info so `agg` progress is visible
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_config_path()?,
    };
    let config = Config::load_from(&config_path)?;
    let mut ctx = AppContext::new(config, config_path)?;

    match cli.command {
        Commands::Register { name } => {
            commands::register(&mut ctx, &name)?;
        }
        Commands::Login { name } => {
            commands::login(&mut ctx, &name)?;
        }
        Commands::Users => {
            commands::list_users(&ctx)?;
        }
        Commands::Reset => {
            commands::reset(&ctx)?;
        }
        Commands::Agg {
            interval,
            fetch_timeout,
        } => {
            commands::aggregate(&ctx, &interval, fetch_timeout.as_deref()).await?;
        }
        Commands::Addfeed { name, url } => {
            with_current_user(commands::add_feed)(&ctx, (name, url))?;
        }
        Commands::Feeds => {
            commands::list_feeds(&ctx)?;
        }
        Commands::Follow { url } => {
            with_current_user(commands::follow)(&ctx, url)?;
        }
        Commands::Following => {
            with_current_user(commands::following)(&ctx, ())?;
        }
        Commands::Unfollow { url } => {
            with_current_user(commands::unfollow)(&ctx, url)?;
        }
        Commands::Browse { limit } => {
            with_current_user(commands::browse)(&ctx, limit)?;
        }
    }

    Ok(())
}
