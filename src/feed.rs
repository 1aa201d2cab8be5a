//! The event list currently shown on the page.

use crate::markup;
use crate::page::markers::{CHIP_GENRE_ATTR, EVENT_CARD_CLASS, GENRE_CHIP_CLASS};

/// A genre tag link inside an event card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreChip {
    pub slug: String,
}

/// Contents of the event-list container, derived from one fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFeed {
    html: String,
    card_count: usize,
    chips: Vec<GenreChip>,
}

impl RenderedFeed {
    pub fn from_fragment(html: impl Into<String>) -> Self {
        let html = html.into();
        let mut card_count = 0;
        let mut chips = Vec::new();
        for tag in markup::tags(&html) {
            if tag.has_class(EVENT_CARD_CLASS) {
                card_count += 1;
            }
            if tag.has_class(GENRE_CHIP_CLASS) {
                if let Some(slug) = tag.attr(CHIP_GENRE_ATTR).filter(|s| !s.is_empty()) {
                    chips.push(GenreChip {
                        slug: slug.to_string(),
                    });
                }
            }
        }
        Self {
            html,
            card_count,
            chips,
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn card_count(&self) -> usize {
        self.card_count
    }

    pub fn chips(&self) -> &[GenreChip] {
        &self.chips
    }

    pub fn has_chip(&self, slug: &str) -> bool {
        self.chips.iter().any(|chip| chip.slug == slug)
    }

    pub fn count_label(&self) -> String {
        count_label(self.card_count)
    }
}

/// "1 event", "12 events".
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 event".to_string()
    } else {
        format!("{} events", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r#"
        <article class="event-card">
          <h3>Sleep</h3>
          <a href="?genres=doom-metal" class="genre-chip" data-genre="doom-metal">Doom Metal</a>
        </article>
        <article class="event-card">
          <h3>Bad Religion</h3>
          <a href="?genres=punk" class="genre-chip" data-genre="punk">Punk</a>
          <a href="?genres=hardcore" class="genre-chip" data-genre="hardcore">Hardcore</a>
        </article>
        <p class="event-card-footer">end</p>
    "#;

    #[test]
    fn counts_only_event_cards() {
        let feed = RenderedFeed::from_fragment(FRAGMENT);
        assert_eq!(feed.card_count(), 2);
        assert_eq!(feed.count_label(), "2 events");
    }

    #[test]
    fn collects_chips_in_document_order() {
        let feed = RenderedFeed::from_fragment(FRAGMENT);
        let slugs: Vec<_> = feed.chips().iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["doom-metal", "punk", "hardcore"]);
        assert!(feed.has_chip("punk"));
        assert!(!feed.has_chip("jazz"));
    }

    #[test]
    fn chip_without_slug_is_not_bound() {
        let feed = RenderedFeed::from_fragment(r#"<a class="genre-chip">?</a>"#);
        assert!(feed.chips().is_empty());
    }

    #[test]
    fn empty_fragment_reads_zero_events() {
        let feed = RenderedFeed::from_fragment("<p class=\"empty\">No upcoming events.</p>");
        assert_eq!(feed.count_label(), "0 events");
    }

    #[test]
    fn commented_out_cards_and_chips_are_ignored() {
        let feed = RenderedFeed::from_fragment(
            r#"<!-- <article class="event-card">draft
                <a class="genre-chip" data-genre="jazz">Jazz</a></article> -->
            <p class="empty">No upcoming events.</p>"#,
        );
        assert_eq!(feed.card_count(), 0);
        assert_eq!(feed.count_label(), "0 events");
        assert!(!feed.has_chip("jazz"));
    }

    #[test]
    fn chip_slug_with_numeric_reference_matches_checkbox_value() {
        let feed = RenderedFeed::from_fragment(
            r#"<a class="genre-chip" data-genre="r&#38;b">R&amp;B</a>"#,
        );
        assert!(feed.has_chip("r&b"));
    }

    #[test]
    fn singular_label() {
        assert_eq!(count_label(1), "1 event");
        assert_eq!(count_label(12), "12 events");
    }
}
