pub mod feed;
pub mod follow;
pub mod post;
pub mod user;

pub use feed::{Feed, FeedListing};
pub use follow::{FeedFollow, FollowListing};
pub use post::{NewPost, Post, PostListing};
pub use user::User;
