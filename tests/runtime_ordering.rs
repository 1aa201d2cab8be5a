//! Overlapping fetches driven through the async runtime.

mod common;

use std::sync::Arc;

use common::{attach, feed_page, fragment, ScriptedTransport};
use gigfeed::controller::FetchOutcome;
use gigfeed::page::PageEvent;
use gigfeed::runtime::FeedRuntime;

#[tokio::test]
async fn slow_older_response_never_overwrites_newer_one() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond("genres=jazz", &fragment(7, &[]), 150);
    transport.respond("genres=jazz&genres=punk", &fragment(2, &[]), 10);

    let page = feed_page("");
    let mut runtime = FeedRuntime::new(attach(&page), Arc::clone(&transport));

    let event = page.click_genre("jazz").unwrap();
    runtime.dispatch(event).unwrap();
    let event = page.click_genre("punk").unwrap();
    runtime.dispatch(event).unwrap();
    assert_eq!(runtime.in_flight(), 2);

    let outcomes = runtime.settle().await;
    assert_eq!(
        outcomes,
        vec![FetchOutcome::Applied { count: 2 }, FetchOutcome::Stale]
    );

    let snap = page.snapshot();
    assert_eq!(snap.count_text.as_deref(), Some("2 events"));
    assert_eq!(snap.url(), "/?genres=jazz&genres=punk");
    assert!(!snap.loading);
    assert_eq!(runtime.in_flight(), 0);
}

#[tokio::test]
async fn fast_older_response_is_still_discarded() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond("genres=jazz", &fragment(7, &[]), 0);
    transport.respond("genres=jazz&genres=punk", &fragment(2, &[]), 100);

    let page = feed_page("");
    let mut runtime = FeedRuntime::new(attach(&page), Arc::clone(&transport));

    let event = page.click_genre("jazz").unwrap();
    runtime.dispatch(event).unwrap();
    let event = page.click_genre("punk").unwrap();
    runtime.dispatch(event).unwrap();

    let outcomes = runtime.settle().await;
    assert_eq!(
        outcomes,
        vec![FetchOutcome::Stale, FetchOutcome::Applied { count: 2 }]
    );
    assert_eq!(page.snapshot().count_text.as_deref(), Some("2 events"));
}

#[tokio::test]
async fn every_fetch_carries_the_partial_marker() {
    let transport = Arc::new(ScriptedTransport::new());
    let page = feed_page("");
    let mut runtime = FeedRuntime::new(attach(&page), Arc::clone(&transport));

    runtime.dispatch(PageEvent::PresetClicked {
        token: "tonight".into(),
    });
    runtime.refresh();
    runtime.settle().await;

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    for url in requests {
        assert_eq!(url.query(), Some("date_range=tonight&partial=1"));
    }
}

#[tokio::test]
async fn failed_fetch_through_runtime_keeps_list() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.fail("genres=techno", 503);

    let initial = fragment(3, &["techno"]);
    let page = feed_page(&initial);
    let mut runtime = FeedRuntime::new(attach(&page), Arc::clone(&transport));

    runtime
        .dispatch(PageEvent::ChipClicked {
            slug: "techno".into(),
        })
        .unwrap();
    let outcomes = runtime.settle().await;

    assert_eq!(outcomes, vec![FetchOutcome::Failed]);
    let snap = page.snapshot();
    assert_eq!(snap.feed_html, Some(initial));
    assert!(!snap.loading);
    assert_eq!(snap.checked_genres(), vec!["techno"]);
}

#[tokio::test]
async fn gestures_that_fetch_nothing_spawn_nothing() {
    let transport = Arc::new(ScriptedTransport::new());
    let page = feed_page("");
    let mut runtime = FeedRuntime::new(attach(&page), Arc::clone(&transport));

    assert!(runtime.dispatch(PageEvent::DrawerToggled).is_none());
    assert!(runtime
        .dispatch(PageEvent::ChipClicked {
            slug: "jazz".into()
        })
        .is_none());
    assert_eq!(runtime.in_flight(), 0);
    assert!(runtime.settle().await.is_empty());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn run_fetch_applies_inline() {
    let transport = ScriptedTransport::new();
    transport.respond("genres=doom-metal", &fragment(5, &["doom-metal"]), 0);
    let page = feed_page("");
    let mut controller = attach(&page);

    let event = page.click_genre("doom-metal").unwrap();
    let ticket = controller.handle(event).unwrap();
    let outcome = controller.run_fetch(ticket, &transport).await;

    assert_eq!(outcome, FetchOutcome::Applied { count: 5 });
    assert_eq!(page.snapshot().count_text.as_deref(), Some("5 events"));
    assert!(controller.rendered().has_chip("doom-metal"));
}

#[tokio::test]
async fn cancel_abandons_outstanding_fetches() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond("genres=jazz", &fragment(2, &[]), 30_000);
    transport.respond("genres=jazz&genres=punk", &fragment(1, &[]), 0);

    let initial = fragment(4, &[]);
    let page = feed_page(&initial);
    let mut runtime = FeedRuntime::new(attach(&page), Arc::clone(&transport));

    let event = page.click_genre("jazz").unwrap();
    runtime.dispatch(event).unwrap();
    let event = page.click_genre("punk").unwrap();
    runtime.dispatch(event).unwrap();
    tokio::task::yield_now().await;

    assert_eq!(runtime.cancel(), 2);
    assert_eq!(runtime.in_flight(), 0);
    let outcomes = tokio::time::timeout(std::time::Duration::from_secs(1), runtime.settle())
        .await
        .expect("nothing left to settle");
    assert!(outcomes.is_empty());
    assert_eq!(page.snapshot().feed_html, Some(initial));
}
