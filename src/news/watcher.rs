use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::NewsConfig;
use crate::news::{KeywordFilter, SeenStore};

/// Errors raised by a news feed
#[derive(Error, Debug)]
pub enum NewsError {
    #[error("Failed to fetch listing {url}: {message}")]
    Listing { url: String, message: String },

    #[error("Failed to fetch article {link}: {message}")]
    Detail { link: String, message: String },
}

/// A headline on the listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub title: String,
    pub link: String,
}

/// Details of one article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub authors: Vec<String>,
    pub title: String,
    pub annotation: String,
}

/// Source of headlines and article details
pub trait NewsFeed {
    /// Current (title, link) pairs on the listing page at `url`
    fn listing(&mut self, url: &str) -> Result<Vec<Headline>, NewsError>;

    /// Article behind a link, `None` when the page lacks a title or annotation
    fn detail(&mut self, link: &str) -> Result<Option<Article>, NewsError>;
}

/// Polls a feed and logs each new article whose headline matches a keyword
pub struct NewsWatcher {
    listing_url: String,
    filter: KeywordFilter,
    seen: SeenStore,
    poll_interval: Duration,
    run_timeout: Duration,
}

impl NewsWatcher {
    pub fn new(
        listing_url: &str,
        filter: KeywordFilter,
        poll_interval: Duration,
        run_timeout: Duration,
    ) -> Self {
        NewsWatcher {
            listing_url: listing_url.to_string(),
            filter,
            seen: SeenStore::new(),
            poll_interval,
            run_timeout,
        }
    }

    pub fn from_config(config: &NewsConfig) -> Self {
        Self::new(
            &config.listing_url,
            KeywordFilter::new(&config.keywords),
            Duration::from_secs(config.poll_interval_seconds),
            Duration::from_secs(config.run_timeout_seconds),
        )
    }

    pub fn listing_url(&self) -> &str {
        &self.listing_url
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn run_timeout(&self) -> Duration {
        self.run_timeout
    }

    pub fn seen(&self) -> &SeenStore {
        &self.seen
    }

    /// Fetch the listing once and log every unseen matching article
    ///
    /// Returns the articles handled in this poll. A fetch error aborts the
    /// poll; headlines not yet handled are retried on the next one.
    pub fn poll_once<F: NewsFeed>(&mut self, feed: &mut F) -> Result<Vec<Article>, NewsError> {
        let mut handled = Vec::new();

        for headline in feed.listing(&self.listing_url)? {
            log::debug!("Headline: {} - {}", headline.title, headline.link);

            if self.seen.contains(&headline.title) || !self.filter.matches(&headline.title) {
                continue;
            }

            if let Some(article) = feed.detail(&headline.link)? {
                log::info!(
                    "authors={:?} title={} annotation={}",
                    article.authors,
                    article.title,
                    article.annotation
                );
                handled.push(article);
            }
            self.seen.insert(&headline.title);
        }

        Ok(handled)
    }

    /// Poll until the run timeout elapses or `running` is cleared
    ///
    /// Returns the number of polls made.
    pub fn run<F: NewsFeed>(&mut self, feed: &mut F, running: &AtomicBool) -> usize {
        let started = Instant::now();
        let mut polls = 0;

        while running.load(Ordering::SeqCst) {
            if let Err(e) = self.poll_once(feed) {
                log::error!("{}", e);
            }
            polls += 1;

            Self::sleep_while_running(self.poll_interval, running);

            if started.elapsed() >= self.run_timeout {
                log::info!("Run timeout reached after {} poll(s)", polls);
                break;
            }
        }

        polls
    }

    fn sleep_while_running(interval: Duration, running: &AtomicBool) {
        let step = Duration::from_millis(100);
        let deadline = Instant::now() + interval;

        while running.load(Ordering::SeqCst) {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            std::thread::sleep(step.min(deadline - now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockFeed {
        listings: Vec<Result<Vec<Headline>, NewsError>>,
        details_fetched: Vec<String>,
        urls_requested: Vec<String>,
        fail_detail: bool,
    }

    impl MockFeed {
        fn new(listings: Vec<Result<Vec<Headline>, NewsError>>) -> Self {
            MockFeed {
                listings,
                details_fetched: Vec::new(),
                urls_requested: Vec::new(),
                fail_detail: false,
            }
        }
    }

    impl NewsFeed for MockFeed {
        fn listing(&mut self, url: &str) -> Result<Vec<Headline>, NewsError> {
            self.urls_requested.push(url.to_string());
            if self.listings.is_empty() {
                return Ok(Vec::new());
            }
            self.listings.remove(0)
        }

        fn detail(&mut self, link: &str) -> Result<Option<Article>, NewsError> {
            if self.fail_detail {
                return Err(NewsError::Detail {
                    link: link.to_string(),
                    message: "connection refused".to_string(),
                });
            }
            self.details_fetched.push(link.to_string());
            if link.ends_with("empty") {
                return Ok(None);
            }
            Ok(Some(Article {
                authors: vec!["Staff".to_string()],
                title: format!("Article at {}", link),
                annotation: "Summary".to_string(),
            }))
        }
    }

    fn headline(title: &str, link: &str) -> Headline {
        Headline {
            title: title.to_string(),
            link: link.to_string(),
        }
    }

    fn watcher() -> NewsWatcher {
        NewsWatcher::new(
            "https://news.example/latest",
            KeywordFilter::new(["senate"]),
            Duration::ZERO,
            Duration::ZERO,
        )
    }

    #[test]
    fn test_from_config_uses_news_section() {
        let config = NewsConfig {
            listing_url: "https://news.example/short".to_string(),
            keywords: vec!["Сенат".to_string()],
            poll_interval_seconds: 5,
            run_timeout_seconds: 30,
        };
        let mut watcher = NewsWatcher::from_config(&config);
        assert_eq!(watcher.listing_url(), "https://news.example/short");
        assert_eq!(watcher.poll_interval(), Duration::from_secs(5));
        assert_eq!(watcher.run_timeout(), Duration::from_secs(30));

        let mut feed = MockFeed::new(vec![Ok(vec![
            headline("Сенат утвердил бюджет", "/a"),
            headline("Погода", "/b"),
        ])]);
        let handled = watcher.poll_once(&mut feed).unwrap();

        assert_eq!(feed.urls_requested, vec!["https://news.example/short"]);
        assert_eq!(handled.len(), 1);
        assert_eq!(feed.details_fetched, vec!["/a"]);
    }

    #[test]
    fn test_default_config_polls_original_listing() {
        let watcher = NewsWatcher::from_config(&NewsConfig::default());
        assert_eq!(watcher.listing_url(), "https://www.rbc.ru/short_news");
        assert_eq!(watcher.poll_interval(), Duration::from_secs(60));
        assert_eq!(watcher.run_timeout(), Duration::from_secs(4 * 60 * 60));
    }

    #[test]
    fn test_only_matching_headlines_followed() {
        let mut feed = MockFeed::new(vec![Ok(vec![
            headline("Senate passes bill", "/a"),
            headline("Local weather", "/b"),
        ])]);
        let mut watcher = watcher();

        let handled = watcher.poll_once(&mut feed).unwrap();
        assert_eq!(handled.len(), 1);
        assert_eq!(feed.details_fetched, vec!["/a"]);
        assert!(watcher.seen().contains("Senate passes bill"));
        assert!(!watcher.seen().contains("Local weather"));
    }

    #[test]
    fn test_seen_headlines_skipped() {
        let listing = vec![headline("Senate recess", "/a")];
        let mut feed = MockFeed::new(vec![Ok(listing.clone()), Ok(listing)]);
        let mut watcher = watcher();

        assert_eq!(watcher.poll_once(&mut feed).unwrap().len(), 1);
        assert!(watcher.poll_once(&mut feed).unwrap().is_empty());
        assert_eq!(feed.details_fetched.len(), 1);
    }

    #[test]
    fn test_article_without_details_still_marked_seen() {
        let mut feed = MockFeed::new(vec![Ok(vec![headline("Senate", "/empty")])]);
        let mut watcher = watcher();

        assert!(watcher.poll_once(&mut feed).unwrap().is_empty());
        assert!(watcher.seen().contains("Senate"));
    }

    #[test]
    fn test_detail_failure_leaves_headline_unseen() {
        let mut feed = MockFeed::new(vec![Ok(vec![headline("Senate", "/a")])]);
        feed.fail_detail = true;
        let mut watcher = watcher();

        assert!(matches!(
            watcher.poll_once(&mut feed),
            Err(NewsError::Detail { .. })
        ));
        assert!(watcher.seen().is_empty());
    }

    #[test]
    fn test_run_stops_at_timeout_despite_errors() {
        let mut feed = MockFeed::new(vec![Err(NewsError::Listing {
            url: "https://news.example".to_string(),
            message: "timeout".to_string(),
        })]);
        let mut watcher = watcher();
        let running = AtomicBool::new(true);

        assert_eq!(watcher.run(&mut feed, &running), 1);
    }

    #[test]
    fn test_run_respects_stop_flag() {
        let mut feed = MockFeed::new(Vec::new());
        let mut watcher = watcher();
        let running = AtomicBool::new(false);

        assert_eq!(watcher.run(&mut feed, &running), 0);
    }
}
