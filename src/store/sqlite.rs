use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use rusqlite_migration::{Migrations, M};

use crate::app::{GatorError, Result};
use crate::domain::{
    Feed, FeedFollow, FeedListing, FollowListing, NewPost, Post, PostListing, User,
};
use crate::store::Store;

const FEED_COLUMNS: &str =
    "f.id, f.name, f.url, f.user_id, f.last_fetched_at, f.created_at, f.updated_at";
const POST_COLUMNS: &str =
    "p.id, p.feed_id, p.title, p.url, p.description, p.published_at, p.created_at, p.updated_at";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock()?;

        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        migrations
            .to_latest(&mut conn)
            .map_err(|e| GatorError::Other(format!("Migration failed: {}", e)))?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| GatorError::Other(format!("Store lock poisoned: {}", e)))
    }

    /// Claims the next feed and stamps it in one immediate transaction, so
    /// concurrent pollers sharing the database never claim the same feed.
    pub fn claim_and_mark(&self, at: DateTime<Utc>) -> Result<Feed> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut feed = Self::select_next_feed(&tx)?.ok_or(GatorError::NoFeeds)?;
        tx.execute(
            "UPDATE feeds SET last_fetched_at = ?1, updated_at = ?1 WHERE id = ?2",
            params![encode_ts(&at), feed.id],
        )?;
        tx.commit()?;

        feed.last_fetched_at = Some(at);
        feed.updated_at = at;
        Ok(feed)
    }

    fn select_next_feed(conn: &Connection) -> Result<Option<Feed>> {
        // SQLite sorts NULLs first under ASC, so never-fetched feeds lead.
        let feed = conn
            .query_row(
                &format!(
                    "SELECT {FEED_COLUMNS} FROM feeds f
                     ORDER BY f.last_fetched_at ASC, f.id ASC
                     LIMIT 1"
                ),
                [],
                map_feed,
            )
            .optional()?;
        Ok(feed)
    }

    fn select_follow(conn: &Connection, user_id: i64, feed_id: i64) -> Result<FollowListing> {
        let listing = conn.query_row(
            "SELECT ff.id, ff.user_id, ff.feed_id, ff.created_at, ff.updated_at,
                    f.name, f.url, u.name
             FROM feed_follows ff
             JOIN feeds f ON f.id = ff.feed_id
             JOIN users u ON u.id = ff.user_id
             WHERE ff.user_id = ?1 AND ff.feed_id = ?2",
            params![user_id, feed_id],
            map_follow_listing,
        )?;
        Ok(listing)
    }
}

impl Store for SqliteStore {
    fn create_user(&self, name: &str) -> Result<User> {
        let conn = self.lock()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO users (name, created_at, updated_at) VALUES (?1, ?2, ?2)",
            params![name, encode_ts(&now)],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                GatorError::UserExists(name.to_string())
            } else {
                e.into()
            }
        })?;

        Ok(User {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    fn get_user_by_name(&self, name: &str) -> Result<Option<User>> {
        let conn = self.lock()?;

        let user = conn
            .query_row(
                "SELECT id, name, created_at, updated_at FROM users WHERE name = ?1",
                params![name],
                map_user,
            )
            .optional()?;

        Ok(user)
    }

    fn get_users(&self) -> Result<Vec<User>> {
        let conn = self.lock()?;

        let mut stmt =
            conn.prepare("SELECT id, name, created_at, updated_at FROM users ORDER BY name")?;
        let users = stmt
            .query_map([], map_user)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }

    fn delete_all_users(&self) -> Result<usize> {
        let conn = self.lock()?;
        Ok(conn.execute("DELETE FROM users", [])?)
    }

    fn create_feed(&self, name: &str, url: &str, user_id: i64) -> Result<Feed> {
        let conn = self.lock()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO feeds (name, url, user_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![name, url, user_id, encode_ts(&now)],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                GatorError::FeedExists(url.to_string())
            } else {
                e.into()
            }
        })?;

        Ok(Feed {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            url: url.to_string(),
            user_id,
            last_fetched_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn get_feed(&self, id: i64) -> Result<Option<Feed>> {
        let conn = self.lock()?;

        let feed = conn
            .query_row(
                &format!("SELECT {FEED_COLUMNS} FROM feeds f WHERE f.id = ?1"),
                params![id],
                map_feed,
            )
            .optional()?;

        Ok(feed)
    }

    fn get_feed_by_url(&self, url: &str) -> Result<Option<Feed>> {
        let conn = self.lock()?;

        let feed = conn
            .query_row(
                &format!("SELECT {FEED_COLUMNS} FROM feeds f WHERE f.url = ?1"),
                params![url],
                map_feed,
            )
            .optional()?;

        Ok(feed)
    }

    fn get_feeds_with_owners(&self) -> Result<Vec<FeedListing>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {FEED_COLUMNS}, u.name FROM feeds f
             JOIN users u ON u.id = f.user_id
             ORDER BY f.name, f.url"
        ))?;

        let feeds = stmt
            .query_map([], |row| {
                Ok(FeedListing {
                    feed: map_feed(row)?,
                    owner_name: row.get(7)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(feeds)
    }

    fn create_feed_follow(&self, user_id: i64, feed_id: i64) -> Result<FollowListing> {
        let conn = self.lock()?;
        let now = encode_ts(&Utc::now());

        let inserted = conn.execute(
            "INSERT INTO feed_follows (user_id, feed_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)",
            params![user_id, feed_id, now],
        );

        if let Err(e) = inserted {
            if is_unique_violation(&e) {
                let url: String = conn.query_row(
                    "SELECT url FROM feeds WHERE id = ?1",
                    params![feed_id],
                    |row| row.get(0),
                )?;
                return Err(GatorError::AlreadyFollowing(url));
            }
            return Err(e.into());
        }

        Self::select_follow(&conn, user_id, feed_id)
    }

    fn get_follows_for_user(&self, user_id: i64) -> Result<Vec<FollowListing>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT ff.id, ff.user_id, ff.feed_id, ff.created_at, ff.updated_at,
                    f.name, f.url, u.name
             FROM feed_follows ff
             JOIN feeds f ON f.id = ff.feed_id
             JOIN users u ON u.id = ff.user_id
             WHERE ff.user_id = ?1
             ORDER BY f.name, f.url",
        )?;

        let follows = stmt
            .query_map(params![user_id], map_follow_listing)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(follows)
    }

    fn delete_feed_follow(&self, user_id: i64, feed_id: i64) -> Result<bool> {
        let conn = self.lock()?;

        let deleted = conn.execute(
            "DELETE FROM feed_follows WHERE user_id = ?1 AND feed_id = ?2",
            params![user_id, feed_id],
        )?;

        Ok(deleted > 0)
    }

    fn claim_next_feed(&self) -> Result<Feed> {
        let conn = self.lock()?;
        Self::select_next_feed(&conn)?.ok_or(GatorError::NoFeeds)
    }

    fn mark_fetched(&self, feed_id: i64, at: DateTime<Utc>) -> Result<()> {
        let conn = self.lock()?;

        let updated = conn.execute(
            "UPDATE feeds SET last_fetched_at = ?1, updated_at = ?1 WHERE id = ?2",
            params![encode_ts(&at), feed_id],
        )?;

        if updated == 0 {
            return Err(GatorError::FeedNotFound(feed_id.to_string()));
        }
        Ok(())
    }

    fn insert_post(&self, post: &NewPost) -> Result<Post> {
        let conn = self.lock()?;
        let now = Utc::now();

        let inserted = conn.execute(
            "INSERT INTO posts (feed_id, title, url, description, published_at, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             ON CONFLICT(url) DO NOTHING",
            params![
                post.feed_id,
                post.title,
                post.url,
                post.description,
                encode_ts(&post.published_at),
                encode_ts(&now)
            ],
        )?;

        if inserted == 0 {
            return Err(GatorError::DuplicatePost(post.url.clone()));
        }

        Ok(Post {
            id: conn.last_insert_rowid(),
            feed_id: post.feed_id,
            title: post.title.clone(),
            url: post.url.clone(),
            description: post.description.clone(),
            published_at: post.published_at,
            created_at: now,
            updated_at: now,
        })
    }

    fn get_posts_by_feed(&self, feed_id: i64) -> Result<Vec<Post>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {POST_COLUMNS} FROM posts p
             WHERE p.feed_id = ?1
             ORDER BY p.published_at DESC, p.id DESC"
        ))?;

        let posts = stmt
            .query_map(params![feed_id], map_post)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    fn get_posts_for_user(&self, user_id: i64, limit: usize) -> Result<Vec<PostListing>> {
        // A negative LIMIT means unbounded in SQLite
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let conn = self.lock()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {POST_COLUMNS}, f.name FROM posts p
             JOIN feeds f ON f.id = p.feed_id
             JOIN feed_follows ff ON ff.feed_id = p.feed_id
             WHERE ff.user_id = ?1
             ORDER BY p.published_at DESC, p.id DESC
             LIMIT ?2"
        ))?;

        let posts = stmt
            .query_map(params![user_id, limit], |row| {
                Ok(PostListing {
                    post: map_post(row)?,
                    feed_name: row.get(8)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(posts)
    }
}

/// Fixed-width UTC timestamps keep lexical and chronological order equal.
fn encode_ts(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_ts(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn ts_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    decode_ts(idx, &row.get::<_, String>(idx)?)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: ts_column(row, 2)?,
        updated_at: ts_column(row, 3)?,
    })
}

fn map_feed(row: &Row<'_>) -> rusqlite::Result<Feed> {
    let last_fetched_at = match row.get::<_, Option<String>>(4)? {
        Some(s) => Some(decode_ts(4, &s)?),
        None => None,
    };

    Ok(Feed {
        id: row.get(0)?,
        name: row.get(1)?,
        url: row.get(2)?,
        user_id: row.get(3)?,
        last_fetched_at,
        created_at: ts_column(row, 5)?,
        updated_at: ts_column(row, 6)?,
    })
}

fn map_post(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        feed_id: row.get(1)?,
        title: row.get(2)?,
        url: row.get(3)?,
        description: row.get(4)?,
        published_at: ts_column(row, 5)?,
        created_at: ts_column(row, 6)?,
        updated_at: ts_column(row, 7)?,
    })
}

fn map_follow_listing(row: &Row<'_>) -> rusqlite::Result<FollowListing> {
    Ok(FollowListing {
        follow: FeedFollow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            feed_id: row.get(2)?,
            created_at: ts_column(row, 3)?,
            updated_at: ts_column(row, 4)?,
        },
        feed_name: row.get(5)?,
        feed_url: row.get(6)?,
        user_name: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn store_with_user() -> (SqliteStore, User) {
        let store = SqliteStore::in_memory().unwrap();
        let user = store.create_user("alice").unwrap();
        (store, user)
    }

    fn new_post(feed_id: i64, url: &str) -> NewPost {
        NewPost {
            feed_id,
            title: "A post".into(),
            url: url.into(),
            description: "Body".into(),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_create_and_get_user() {
        let (store, user) = store_with_user();

        let found = store.get_user_by_name("alice").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(store.get_user_by_name("bob").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_user_rejected() {
        let (store, _) = store_with_user();

        let err = store.create_user("alice").unwrap_err();
        assert!(matches!(err, GatorError::UserExists(name) if name == "alice"));
    }

    #[test]
    fn test_create_and_get_feed() {
        let (store, user) = store_with_user();
        let feed = store
            .create_feed("Example", "https://example.com/feed.xml", user.id)
            .unwrap();

        let retrieved = store.get_feed(feed.id).unwrap().unwrap();
        assert_eq!(retrieved.url, "https://example.com/feed.xml");
        assert_eq!(retrieved.name, "Example");
        assert!(retrieved.last_fetched_at.is_none());

        let by_url = store
            .get_feed_by_url("https://example.com/feed.xml")
            .unwrap()
            .unwrap();
        assert_eq!(by_url.id, feed.id);
    }

    #[test]
    fn test_duplicate_feed_url_rejected() {
        let (store, user) = store_with_user();
        store
            .create_feed("One", "https://example.com/feed.xml", user.id)
            .unwrap();

        let err = store
            .create_feed("Two", "https://example.com/feed.xml", user.id)
            .unwrap_err();
        assert!(matches!(err, GatorError::FeedExists(_)));
    }

    #[test]
    fn test_claim_on_empty_store() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(matches!(
            store.claim_next_feed().unwrap_err(),
            GatorError::NoFeeds
        ));
    }

    #[test]
    fn test_claim_prefers_never_fetched_then_oldest() {
        let (store, user) = store_with_user();
        let a = store.create_feed("A", "https://a.example/rss", user.id).unwrap();
        let b = store.create_feed("B", "https://b.example/rss", user.id).unwrap();
        let c = store.create_feed("C", "https://c.example/rss", user.id).unwrap();

        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        store.mark_fetched(a.id, t0 + Duration::minutes(5)).unwrap();
        store.mark_fetched(c.id, t0).unwrap();

        // b has never been fetched
        assert_eq!(store.claim_next_feed().unwrap().id, b.id);

        store.mark_fetched(b.id, t0 + Duration::minutes(10)).unwrap();
        assert_eq!(store.claim_next_feed().unwrap().id, c.id);
    }

    #[test]
    fn test_claim_ties_broken_by_id() {
        let (store, user) = store_with_user();
        let a = store.create_feed("A", "https://a.example/rss", user.id).unwrap();
        let b = store.create_feed("B", "https://b.example/rss", user.id).unwrap();

        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        store.mark_fetched(b.id, t).unwrap();
        store.mark_fetched(a.id, t).unwrap();

        assert_eq!(store.claim_next_feed().unwrap().id, a.id);
    }

    #[test]
    fn test_mark_fetched_sets_timestamps() {
        let (store, user) = store_with_user();
        let feed = store.create_feed("A", "https://a.example/rss", user.id).unwrap();

        let at = Utc.with_ymd_and_hms(2024, 3, 4, 5, 6, 7).unwrap();
        store.mark_fetched(feed.id, at).unwrap();

        let retrieved = store.get_feed(feed.id).unwrap().unwrap();
        assert_eq!(retrieved.last_fetched_at, Some(at));
        assert_eq!(retrieved.updated_at, at);
    }

    #[test]
    fn test_mark_fetched_unknown_feed() {
        let store = SqliteStore::in_memory().unwrap();
        let err = store.mark_fetched(42, Utc::now()).unwrap_err();
        assert!(matches!(err, GatorError::FeedNotFound(_)));
    }

    #[test]
    fn test_claim_and_mark_rotates() {
        let (store, user) = store_with_user();
        let a = store.create_feed("A", "https://a.example/rss", user.id).unwrap();
        let b = store.create_feed("B", "https://b.example/rss", user.id).unwrap();

        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let first = store.claim_and_mark(t0).unwrap();
        let second = store.claim_and_mark(t0 + Duration::seconds(1)).unwrap();

        assert_eq!(first.id, a.id);
        assert_eq!(first.last_fetched_at, Some(t0));
        assert_eq!(second.id, b.id);
    }

    #[test]
    fn test_insert_post_and_duplicate() {
        let (store, user) = store_with_user();
        let feed = store.create_feed("A", "https://a.example/rss", user.id).unwrap();

        let post = store
            .insert_post(&new_post(feed.id, "https://a.example/1"))
            .unwrap();
        assert_eq!(post.url, "https://a.example/1");

        let mut dup = new_post(feed.id, "https://a.example/1");
        dup.title = "Different title".into();
        let err = store.insert_post(&dup).unwrap_err();
        assert!(matches!(err, GatorError::DuplicatePost(url) if url == "https://a.example/1"));

        let stored = store.get_posts_by_feed(feed.id).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "A post");
    }

    #[test]
    fn test_post_url_unique_across_feeds() {
        let (store, user) = store_with_user();
        let a = store.create_feed("A", "https://a.example/rss", user.id).unwrap();
        let b = store.create_feed("B", "https://b.example/rss", user.id).unwrap();

        store
            .insert_post(&new_post(a.id, "https://shared.example/post"))
            .unwrap();
        let err = store
            .insert_post(&new_post(b.id, "https://shared.example/post"))
            .unwrap_err();
        assert!(matches!(err, GatorError::DuplicatePost(_)));
    }

    #[test]
    fn test_insert_post_for_missing_feed_is_not_duplicate() {
        let store = SqliteStore::in_memory().unwrap();
        let err = store
            .insert_post(&new_post(999, "https://a.example/1"))
            .unwrap_err();
        assert!(matches!(err, GatorError::Database(_)));
    }

    #[test]
    fn test_follow_and_unfollow() {
        let (store, user) = store_with_user();
        let feed = store.create_feed("A", "https://a.example/rss", user.id).unwrap();

        let listing = store.create_feed_follow(user.id, feed.id).unwrap();
        assert_eq!(listing.feed_name, "A");
        assert_eq!(listing.user_name, "alice");

        let err = store.create_feed_follow(user.id, feed.id).unwrap_err();
        assert!(matches!(err, GatorError::AlreadyFollowing(_)));

        assert_eq!(store.get_follows_for_user(user.id).unwrap().len(), 1);
        assert!(store.delete_feed_follow(user.id, feed.id).unwrap());
        assert!(!store.delete_feed_follow(user.id, feed.id).unwrap());
        assert!(store.get_follows_for_user(user.id).unwrap().is_empty());
    }

    #[test]
    fn test_posts_for_user_only_followed_and_newest_first() {
        let (store, user) = store_with_user();
        let followed = store.create_feed("A", "https://a.example/rss", user.id).unwrap();
        let other = store.create_feed("B", "https://b.example/rss", user.id).unwrap();
        store.create_feed_follow(user.id, followed.id).unwrap();

        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for i in 0..3 {
            let mut post = new_post(followed.id, &format!("https://a.example/{}", i));
            post.published_at = base + Duration::days(i);
            store.insert_post(&post).unwrap();
        }
        store
            .insert_post(&new_post(other.id, "https://b.example/1"))
            .unwrap();

        let posts = store.get_posts_for_user(user.id, 2).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].post.url, "https://a.example/2");
        assert_eq!(posts[1].post.url, "https://a.example/1");
        assert!(posts.iter().all(|p| p.feed_name == "A"));
    }

    #[test]
    fn test_posts_for_user_huge_limit() {
        let (store, user) = store_with_user();
        let feed = store.create_feed("A", "https://a.example/rss", user.id).unwrap();
        store.create_feed_follow(user.id, feed.id).unwrap();
        for i in 0..3 {
            store
                .insert_post(&new_post(feed.id, &format!("https://a.example/{}", i)))
                .unwrap();
        }

        assert_eq!(store.get_posts_for_user(user.id, usize::MAX).unwrap().len(), 3);
        assert!(store.get_posts_for_user(user.id, 0).unwrap().is_empty());
    }

    #[test]
    fn test_delete_all_users_cascades() {
        let (store, user) = store_with_user();
        let feed = store.create_feed("A", "https://a.example/rss", user.id).unwrap();
        store.create_feed_follow(user.id, feed.id).unwrap();
        store
            .insert_post(&new_post(feed.id, "https://a.example/1"))
            .unwrap();

        assert_eq!(store.delete_all_users().unwrap(), 1);

        assert!(store.get_users().unwrap().is_empty());
        assert!(store.get_feed(feed.id).unwrap().is_none());
        assert!(store.get_posts_by_feed(feed.id).unwrap().is_empty());
        assert!(matches!(
            store.claim_next_feed().unwrap_err(),
            GatorError::NoFeeds
        ));
    }

    #[test]
    fn test_feeds_with_owners() {
        let (store, user) = store_with_user();
        store.create_feed("A", "https://a.example/rss", user.id).unwrap();

        let feeds = store.get_feeds_with_owners().unwrap();
        assert_eq!(feeds.len(), 1);
        assert_eq!(feeds[0].owner_name, "alice");
    }
}
