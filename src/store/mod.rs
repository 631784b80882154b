pub mod sqlite;

use chrono::{DateTime, Utc};

use crate::app::Result;
use crate::domain::{Feed, FeedListing, FollowListing, NewPost, Post, PostListing, User};

pub use sqlite::SqliteStore;

pub trait Store {
    // User operations
    fn create_user(&self, name: &str) -> Result<User>;
    fn get_user_by_name(&self, name: &str) -> Result<Option<User>>;
    fn get_users(&self) -> Result<Vec<User>>;
    fn delete_all_users(&self) -> Result<usize>;

    // Feed operations
    fn create_feed(&self, name: &str, url: &str, user_id: i64) -> Result<Feed>;
    fn get_feed(&self, id: i64) -> Result<Option<Feed>>;
    fn get_feed_by_url(&self, url: &str) -> Result<Option<Feed>>;
    fn get_feeds_with_owners(&self) -> Result<Vec<FeedListing>>;

    // Follow operations
    fn create_feed_follow(&self, user_id: i64, feed_id: i64) -> Result<FollowListing>;
    fn get_follows_for_user(&self, user_id: i64) -> Result<Vec<FollowListing>>;
    fn delete_feed_follow(&self, user_id: i64, feed_id: i64) -> Result<bool>;

    // Polling operations
    /// Returns the feed fetched longest ago, never-fetched feeds first and
    /// ties broken by id. Fails with `NoFeeds` on an empty store.
    fn claim_next_feed(&self) -> Result<Feed>;
    fn mark_fetched(&self, feed_id: i64, at: DateTime<Utc>) -> Result<()>;

    // Post operations
    /// Fails with `DuplicatePost` when a post with the same URL exists.
    fn insert_post(&self, post: &NewPost) -> Result<Post>;
    fn get_posts_by_feed(&self, feed_id: i64) -> Result<Vec<Post>>;
    fn get_posts_for_user(&self, user_id: i64, limit: usize) -> Result<Vec<PostListing>>;
}
