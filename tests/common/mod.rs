//! Shared test utilities: page builders, fragments and a scripted transport.

#![allow(dead_code, unused_imports)]

pub mod mock_feed;

use async_trait::async_trait;
use gigfeed::controller::{ControllerOptions, FilterController};
use gigfeed::page::MemoryPage;
use gigfeed::transport::{FeedTransport, FetchError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

pub const GENRES: &[&str] = &["doom-metal", "jazz", "punk", "techno"];
pub const PRESETS: &[&str] = &["tonight", "this-week", "this-weekend"];

pub fn options() -> ControllerOptions {
    ControllerOptions {
        base_url: Url::parse("http://gigs.test").unwrap(),
        narrow_viewport_px: 768,
    }
}

/// A fragment with `cards` event cards; card `i` carries a chip for
/// `chips[i % chips.len()]` when chips are given.
pub fn fragment(cards: usize, chips: &[&str]) -> String {
    let mut html = String::new();
    for i in 0..cards {
        html.push_str(&format!(
            "<article class=\"event-card\"><h3>Show {}</h3>",
            i + 1
        ));
        if !chips.is_empty() {
            let slug = chips[i % chips.len()];
            html.push_str(&format!(
                "<a href=\"?genres={0}\" class=\"genre-chip\" data-genre=\"{0}\">{0}</a>",
                slug
            ));
        }
        html.push_str("</article>\n");
    }
    html
}

/// Feed page at `/` with the standard genres and presets, a drawer, and
/// `initial` as the event list.
pub fn feed_page(initial: &str) -> MemoryPage {
    MemoryPage::new("/")
        .with_filter_form(GENRES, PRESETS)
        .with_feed(initial)
        .with_drawer()
}

pub fn attach(page: &MemoryPage) -> FilterController {
    FilterController::attach(page.handles(), page.browser(), options())
        .expect("feed page should attach")
}

#[derive(Debug, Clone)]
enum Scripted {
    Html { body: String, delay_ms: u64 },
    Status(u16),
}

/// Transport answering from a table keyed by filter query (the query
/// string without `partial=1`). Unknown queries get an empty list.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<HashMap<String, Scripted>>,
    requests: Mutex<Vec<Url>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, query: &str, body: &str, delay_ms: u64) {
        self.responses.lock().unwrap().insert(
            query.to_string(),
            Scripted::Html {
                body: body.to_string(),
                delay_ms,
            },
        );
    }

    pub fn fail(&self, query: &str, status: u16) {
        self.responses
            .lock()
            .unwrap()
            .insert(query.to_string(), Scripted::Status(status));
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    async fn answer(&self, url: &Url) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.clone());
        let key = filter_query(url);
        let scripted = self.responses.lock().unwrap().get(&key).cloned();
        match scripted {
            Some(Scripted::Html { body, delay_ms }) => {
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Ok(body)
            }
            Some(Scripted::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
            None => Ok(String::new()),
        }
    }
}

#[async_trait]
impl FeedTransport for ScriptedTransport {
    async fn fetch_fragment(&self, url: &Url) -> Result<String, FetchError> {
        self.answer(url).await
    }

    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        self.answer(url).await
    }
}

/// Query string of `url` with the `partial=1` marker removed.
pub fn filter_query(url: &Url) -> String {
    url.query()
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty() && *pair != "partial=1")
        .collect::<Vec<_>>()
        .join("&")
}
