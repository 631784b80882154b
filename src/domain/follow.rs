use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedFollow {
    pub id: i64,
    pub user_id: i64,
    pub feed_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A follow joined with the names it links, as shown by `following`.
#[derive(Debug, Clone)]
pub struct FollowListing {
    pub follow: FeedFollow,
    pub feed_name: String,
    pub feed_url: String,
    pub user_name: String,
}
