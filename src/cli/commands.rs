use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use crate::app::{AppContext, GatorError, Result};
use crate::domain::User;
use crate::scheduler::{parse_interval, RunSummary, Scheduler};
use crate::store::Store;

pub const DEFAULT_BROWSE_LIMIT: usize = 2;

/// Wrap a handler that needs the logged-in user into one that only needs
/// the context. The user is looked up on every call.
pub fn with_current_user<A, F>(handler: F) -> impl Fn(&AppContext, A) -> Result<()>
where
    F: Fn(&AppContext, &User, A) -> Result<()>,
{
    move |ctx, args| {
        let user = current_user(ctx)?;
        handler(ctx, &user, args)
    }
}

pub fn current_user(ctx: &AppContext) -> Result<User> {
    let name = ctx
        .config
        .current_user_name
        .as_deref()
        .ok_or(GatorError::NotLoggedIn)?;

    ctx.store
        .get_user_by_name(name)?
        .ok_or_else(|| GatorError::UserNotFound(name.to_string()))
}

pub fn register(ctx: &mut AppContext, name: &str) -> Result<User> {
    let user = ctx.store.create_user(name)?;
    ctx.set_current_user(&user.name)?;

    println!("Registered new user {} (id {})", user.name, user.id);
    Ok(user)
}

pub fn login(ctx: &mut AppContext, name: &str) -> Result<()> {
    let user = ctx
        .store
        .get_user_by_name(name)?
        .ok_or_else(|| GatorError::UserNotFound(name.to_string()))?;
    ctx.set_current_user(&user.name)?;

    println!("Logged in as {}", user.name);
    Ok(())
}

pub fn list_users(ctx: &AppContext) -> Result<()> {
    let users = ctx.store.get_users()?;

    if users.is_empty() {
        println!("No users");
        return Ok(());
    }

    let current = ctx.config.current_user_name.as_deref();
    for user in users {
        if Some(user.name.as_str()) == current {
            println!("* {} (current)", user.name);
        } else {
            println!("* {}", user.name);
        }
    }

    Ok(())
}

pub fn reset(ctx: &AppContext) -> Result<()> {
    let deleted = ctx.store.delete_all_users()?;
    println!("Deleted {} users", deleted);
    Ok(())
}

pub fn add_feed(ctx: &AppContext, user: &User, (name, url): (String, String)) -> Result<()> {
    let parsed = Url::parse(&url)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(GatorError::Config(format!(
            "Unsupported URL scheme '{}', expected http or https",
            parsed.scheme()
        )));
    }

    let feed = ctx.store.create_feed(&name, &url, user.id)?;
    println!("Added feed: {} ({})", feed.name, feed.url);

    let follow = ctx.store.create_feed_follow(user.id, feed.id)?;
    println!("{} now follows {}", follow.user_name, follow.feed_name);

    Ok(())
}

pub fn list_feeds(ctx: &AppContext) -> Result<()> {
    let feeds = ctx.store.get_feeds_with_owners()?;

    if feeds.is_empty() {
        println!("No feeds");
        return Ok(());
    }

    for listing in feeds {
        let fetched = listing
            .feed
            .last_fetched_at
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "* {} ({})\n  added by {}, last fetched {}",
            listing.feed.display_title(),
            listing.feed.url,
            listing.owner_name,
            fetched
        );
    }

    Ok(())
}

pub fn follow(ctx: &AppContext, user: &User, url: String) -> Result<()> {
    let feed = ctx
        .store
        .get_feed_by_url(&url)?
        .ok_or(GatorError::FeedNotFound(url))?;

    let follow = ctx.store.create_feed_follow(user.id, feed.id)?;
    println!("{} now follows {}", follow.user_name, follow.feed_name);
    Ok(())
}

pub fn following(ctx: &AppContext, user: &User, _: ()) -> Result<()> {
    let follows = ctx.store.get_follows_for_user(user.id)?;

    if follows.is_empty() {
        println!("{} is not following any feeds", user.name);
        return Ok(());
    }

    for follow in follows {
        println!("* {} ({})", follow.feed_name, follow.feed_url);
    }
    Ok(())
}

pub fn unfollow(ctx: &AppContext, user: &User, url: String) -> Result<()> {
    let feed = ctx
        .store
        .get_feed_by_url(&url)?
        .ok_or(GatorError::FeedNotFound(url))?;

    if !ctx.store.delete_feed_follow(user.id, feed.id)? {
        return Err(GatorError::Other(format!(
            "{} is not following {}",
            user.name, feed.url
        )));
    }

    println!("{} unfollowed {}", user.name, feed.display_title());
    Ok(())
}

pub fn browse(ctx: &AppContext, user: &User, limit: usize) -> Result<()> {
    let posts = ctx.store.get_posts_for_user(user.id, limit)?;

    if posts.is_empty() {
        println!("No posts yet. Run `gator agg <interval>` to collect some");
        return Ok(());
    }

    for listing in posts {
        println!(
            "{} | {} | {}\n  {}\n  {}\n",
            listing.post.published_at.format("%Y-%m-%d"),
            listing.feed_name,
            listing.post.display_title(),
            listing.post.url,
            listing.post.description
        );
    }
    Ok(())
}

/// Run the polling loop until SIGINT/SIGTERM.
pub async fn aggregate(
    ctx: &AppContext,
    interval: &str,
    fetch_timeout: Option<&str>,
) -> Result<RunSummary> {
    let interval = parse_interval(interval)?;
    let mut config = ctx.config.scheduler.to_scheduler_config(interval);
    if let Some(timeout) = fetch_timeout {
        config.fetch_timeout = parse_interval(timeout)?;
    }

    let scheduler = Arc::new(Scheduler::new(
        ctx.store.clone(),
        ctx.fetcher.clone(),
        config,
    ));

    let stopper = scheduler.clone();
    let signals = tokio::spawn(async move {
        wait_for_shutdown().await;
        info!("Received shutdown signal");
        stopper.stop();
    });

    let result = scheduler.run().await;
    signals.abort();

    let summary = result?;
    println!(
        "Aggregation stopped after {} cycles: {} new posts, {} fetch errors",
        summary.cycles, summary.posts_inserted, summary.fetch_failures
    );
    Ok(summary)
}

#[cfg(unix)]
async fn wait_for_shutdown() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = sigterm.recv() => {},
                _ = tokio::signal::ctrl_c() => {},
            }
        }
        Err(e) => {
            warn!("Failed to set up SIGTERM handler: {}", e);
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown() {
    let _ = tokio::signal::ctrl_c().await;
}
