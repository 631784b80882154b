//! End-to-end tests for the polling loop: a real HTTP fetcher against a
//! mock server, feeding an in-memory SQLite store.

use std::sync::Arc;
use std::time::Duration;

use gator::app::GatorError;
use gator::domain::User;
use gator::fetcher::HttpFetcher;
use gator::scheduler::{CycleOutcome, Scheduler, SchedulerConfig};
use gator::store::{SqliteStore, Store};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rss(items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(link, date)| {
            format!(
                "<item><title>Post {link}</title><link>{link}</link>\
                 <description>About {link}</description><pubDate>{date}</pubDate></item>"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Test</title>
<link>https://example.com</link><description>Test feed</description>{items}</channel></rss>"#
    )
}

async fn serve(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn setup(feeds: &[(&str, String)]) -> (Arc<SqliteStore>, User) {
    let store = SqliteStore::in_memory().unwrap();
    let user = store.create_user("alice").unwrap();
    for (name, url) in feeds {
        let feed = store.create_feed(name, url, user.id).unwrap();
        store.create_feed_follow(user.id, feed.id).unwrap();
    }
    (Arc::new(store), user)
}

fn scheduler(store: Arc<SqliteStore>, config: SchedulerConfig) -> Scheduler<SqliteStore> {
    Scheduler::new(store, Arc::new(HttpFetcher::new().unwrap()), config)
}

// ============================================================================
// Single cycles
// ============================================================================

#[tokio::test]
async fn test_rotation_collects_posts_from_every_feed() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/a.xml",
        rss(&[
            ("https://a.example/1", "Mon, 01 Jan 2024 10:00:00 +0000"),
            ("https://a.example/2", "Tue, 02 Jan 2024 10:00:00 +0000"),
        ]),
    )
    .await;
    serve(
        &server,
        "/b.xml",
        rss(&[("https://b.example/1", "Wed, 03 Jan 2024 10:00:00 GMT")]),
    )
    .await;

    let (store, user) = setup(&[
        ("A", format!("{}/a.xml", server.uri())),
        ("B", format!("{}/b.xml", server.uri())),
    ]);
    let sched = scheduler(store.clone(), SchedulerConfig::new(Duration::from_secs(60)));

    sched.run_cycle().await;
    sched.run_cycle().await;

    let posts = store.get_posts_for_user(user.id, 10).unwrap();
    let urls: Vec<_> = posts.iter().map(|p| p.post.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://b.example/1", "https://a.example/2", "https://a.example/1"]
    );
    assert_eq!(posts[0].feed_name, "B");
    assert!(store
        .get_feeds_with_owners()
        .unwrap()
        .iter()
        .all(|l| l.feed.last_fetched_at.is_some()));
}

#[tokio::test]
async fn test_second_rotation_stores_no_duplicates() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/a.xml",
        rss(&[
            ("https://a.example/1", "Mon, 01 Jan 2024 10:00:00 +0000"),
            ("https://a.example/2", "Tue, 02 Jan 2024 10:00:00 +0000"),
        ]),
    )
    .await;

    let (store, _) = setup(&[("A", format!("{}/a.xml", server.uri()))]);
    let sched = scheduler(store.clone(), SchedulerConfig::new(Duration::from_secs(60)));

    sched.run_cycle().await;
    let outcome = sched.run_cycle().await;

    match outcome {
        CycleOutcome::Ingested { report, .. } => {
            assert_eq!(report.inserted, 0);
            assert_eq!(report.duplicate, 2);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    let feed = store.claim_next_feed().unwrap();
    assert_eq!(store.get_posts_by_feed(feed.id).unwrap().len(), 2);
}

#[tokio::test]
async fn test_broken_feed_does_not_block_the_rest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    serve(
        &server,
        "/good.xml",
        rss(&[("https://good.example/1", "Mon, 01 Jan 2024 10:00:00 +0000")]),
    )
    .await;

    let (store, user) = setup(&[
        ("Broken", format!("{}/broken.xml", server.uri())),
        ("Good", format!("{}/good.xml", server.uri())),
    ]);
    let sched = scheduler(store.clone(), SchedulerConfig::new(Duration::from_secs(60)));

    let first = sched.run_cycle().await;
    assert!(matches!(
        first,
        CycleOutcome::FetchFailed { error: GatorError::HttpStatus(500), .. }
    ));

    let second = sched.run_cycle().await;
    assert!(matches!(second, CycleOutcome::Ingested { .. }));
    assert_eq!(store.get_posts_for_user(user.id, 10).unwrap().len(), 1);

    // The broken feed was stamped first, so it is due again before the good one
    let next = store.claim_next_feed().unwrap();
    assert_eq!(next.name, "Broken");
}

#[tokio::test]
async fn test_entries_with_bad_dates_are_skipped() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/a.xml",
        rss(&[
            ("https://a.example/1", "Mon, 01 Jan 2024 10:00:00 +0000"),
            ("https://a.example/2", "yesterday-ish"),
            ("https://a.example/3", "Wed, 03 Jan 2024 10:00:00 EST"),
        ]),
    )
    .await;

    let (store, user) = setup(&[("A", format!("{}/a.xml", server.uri()))]);
    let sched = scheduler(store.clone(), SchedulerConfig::new(Duration::from_secs(60)));

    match sched.run_cycle().await {
        CycleOutcome::Ingested { report, .. } => {
            assert_eq!(report.inserted, 2);
            assert_eq!(report.parse_failed, 1);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    let posts = store.get_posts_for_user(user.id, 10).unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].post.published_at.to_rfc3339(), "2024-01-03T15:00:00+00:00");
}

#[tokio::test]
async fn test_slow_feed_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(rss(&[]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let (store, _) = setup(&[("Slow", format!("{}/slow.xml", server.uri()))]);
    let mut config = SchedulerConfig::new(Duration::from_secs(60));
    config.fetch_timeout = Duration::from_millis(200);
    let sched = scheduler(store, config);

    let outcome = sched.run_cycle().await;
    assert!(matches!(
        outcome,
        CycleOutcome::FetchFailed { error: GatorError::Timeout(_), .. }
    ));
}

// ============================================================================
// Full loop
// ============================================================================

#[tokio::test]
async fn test_run_polls_until_stopped() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/a.xml",
        rss(&[("https://a.example/1", "Mon, 01 Jan 2024 10:00:00 +0000")]),
    )
    .await;

    let (store, user) = setup(&[("A", format!("{}/a.xml", server.uri()))]);
    let sched = Arc::new(scheduler(
        store.clone(),
        SchedulerConfig::new(Duration::from_millis(50)),
    ));

    let stopper = sched.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        stopper.stop();
    });

    let summary = sched.run().await.unwrap();

    assert!(summary.cycles >= 2, "only {} cycles ran", summary.cycles);
    assert_eq!(summary.posts_inserted, 1);
    assert_eq!(summary.fetch_failures, 0);
    assert_eq!(store.get_posts_for_user(user.id, 10).unwrap().len(), 1);
}
