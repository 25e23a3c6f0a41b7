//! Headline watcher
//!
//! Polls a news listing, follows headlines that mention any configured
//! keyword and logs the details of each article once. Fetching and HTML
//! extraction belong to the `NewsFeed` implementation supplied by the
//! caller.

pub mod keywords;
pub mod seen;
pub mod watcher;

pub use keywords::KeywordFilter;
pub use seen::SeenStore;
pub use watcher::{Article, Headline, NewsError, NewsFeed, NewsWatcher};
