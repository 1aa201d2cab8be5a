//! Filter controller.
//!
//! Keeps the filter form, the address bar and the event list consistent.
//! User gestures come in as [`PageEvent`]s, are reduced to a new
//! [`FilterState`], and every state change issues a [`FetchTicket`] for
//! the matching partial fragment. Only the response to the newest ticket
//! is ever written to the page.

mod ticket;

pub use ticket::{FetchOutcome, FetchTicket};

use url::Url;

use crate::feed::RenderedFeed;
use crate::filter::query::{address_bar_url, fetch_url};
use crate::filter::{DatePreset, FilterIntent, FilterReducer, FilterState};
use crate::mvi::Reducer;
use crate::page::{
    Browser, CountDisplay, DrawerToggle, FeedContainer, FilterForm, FilterSidebar, PageEvent,
    PageHandles,
};
use crate::transport::{FeedTransport, FetchError};

/// Settings the controller needs besides the page handles.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Site root the current path is resolved against.
    pub base_url: Url,
    /// Chip clicks below this viewport width open the filter drawer.
    pub narrow_viewport_px: u32,
}

struct Drawer {
    sidebar: Box<dyn FilterSidebar>,
    toggle: Option<Box<dyn DrawerToggle>>,
}

pub struct FilterController {
    form: Box<dyn FilterForm>,
    feed: Box<dyn FeedContainer>,
    count: Box<dyn CountDisplay>,
    drawer: Option<Drawer>,
    browser: Box<dyn Browser>,
    page_url: Url,
    path: String,
    narrow_viewport_px: u32,
    state: FilterState,
    rendered: RenderedFeed,
    /// Generation of the newest issued fetch.
    generation: u64,
}

impl FilterController {
    /// Binds to the page.
    ///
    /// Returns `None` when the filter form, the event list or the count
    /// display is missing: the page is not a feed page and nothing is bound.
    pub fn attach(
        handles: PageHandles,
        browser: Box<dyn Browser>,
        options: ControllerOptions,
    ) -> Option<Self> {
        let PageHandles {
            form,
            feed,
            count,
            toggle,
            sidebar,
        } = handles;

        let (Some(form), Some(feed), Some(count)) = (form, feed, count) else {
            tracing::debug!("Feed filter elements not present, controller not attached");
            return None;
        };

        let path = browser.location().path;
        let page_url = match options.base_url.join(&path) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(%path, error = %e, "Cannot resolve page URL, controller not attached");
                return None;
            }
        };

        let drawer = sidebar.map(|sidebar| Drawer { sidebar, toggle });

        let mut controller = Self {
            form,
            feed,
            count,
            drawer,
            browser,
            page_url,
            path,
            narrow_viewport_px: options.narrow_viewport_px,
            state: FilterState::default(),
            rendered: RenderedFeed::default(),
            generation: 0,
        };
        controller.state = controller.read_filter_state();
        controller.bind_genre_chip_links();

        tracing::debug!(
            path = %controller.path,
            genres = controller.state.genres.len(),
            chips = controller.rendered.chips().len(),
            "Filter controller attached"
        );
        Some(controller)
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn rendered(&self) -> &RenderedFeed {
        &self.rendered
    }

    /// Generation of the newest issued fetch (0 before the first one).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Reads the selection shown by the form controls: checked genre boxes
    /// in document order and the date-range input.
    pub fn read_filter_state(&self) -> FilterState {
        let genres = self
            .form
            .genre_checkboxes()
            .into_iter()
            .filter(|checkbox| checkbox.checked)
            .map(|checkbox| checkbox.slug)
            .collect();
        let date_range = self
            .form
            .date_range_value()
            .and_then(|value| DatePreset::from_token(&value));
        FilterState { date_range, genres }
    }

    /// Handles one user gesture or browser event. Returns the ticket of the
    /// fetch it started, if any.
    pub fn handle(&mut self, event: PageEvent) -> Option<FetchTicket> {
        match event {
            PageEvent::GenreToggled { slug, checked } => {
                Some(self.dispatch(FilterIntent::ToggleGenre { slug, checked }))
            }
            PageEvent::PresetClicked { token } => match DatePreset::from_token(&token) {
                Some(preset) => Some(self.dispatch(FilterIntent::SetDateRange { preset })),
                None => {
                    tracing::warn!(%token, "Ignoring unknown date preset");
                    None
                }
            },
            PageEvent::ClearGenresClicked => Some(self.dispatch(FilterIntent::ClearGenres)),
            PageEvent::ClearDateClicked => Some(self.dispatch(FilterIntent::ClearDateRange)),
            PageEvent::ChipClicked { slug } => self.click_chip(&slug),
            PageEvent::DrawerToggled => {
                self.toggle_drawer();
                None
            }
            PageEvent::PopState => Some(self.on_pop_state()),
        }
    }

    /// Reduces `intent`, writes the result into the form and applies it.
    pub fn dispatch(&mut self, intent: FilterIntent) -> FetchTicket {
        self.state = FilterReducer::reduce(std::mem::take(&mut self.state), intent);
        self.write_form();
        self.apply_filters()
    }

    /// Shows the current selection in the address bar and fetches the
    /// matching fragment.
    pub fn apply_filters(&mut self) -> FetchTicket {
        let url = address_bar_url(&self.path, &self.state);
        self.browser.push_state(&url);
        self.refresh()
    }

    /// Fetches the fragment for the current selection without touching
    /// history.
    pub fn refresh(&mut self) -> FetchTicket {
        self.feed.set_loading(true);
        self.generation += 1;
        let ticket = FetchTicket::new(self.generation, fetch_url(&self.page_url, &self.state));
        tracing::debug!(generation = ticket.generation(), url = %ticket.url(), "Issuing feed fetch");
        ticket
    }

    /// Applies the result of a fetch.
    ///
    /// Results of any ticket but the newest are dropped without touching
    /// the page. A failed newest fetch clears the loading state and keeps
    /// the feed that was shown before.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<String, FetchError>,
    ) -> FetchOutcome {
        if ticket.generation() != self.generation {
            tracing::debug!(
                generation = ticket.generation(),
                newest = self.generation,
                "Discarding stale feed response"
            );
            return FetchOutcome::Stale;
        }

        self.feed.set_loading(false);
        match result {
            Ok(html) => {
                self.feed.replace_inner_html(&html);
                self.bind_genre_chip_links();
                let count = self.rendered.card_count();
                self.count.set_text(&self.rendered.count_label());
                FetchOutcome::Applied { count }
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), error = %e, "Feed refresh failed, keeping current list");
                FetchOutcome::Failed
            }
        }
    }

    /// Fetches `ticket` through `transport` and applies the result.
    pub async fn run_fetch(
        &mut self,
        ticket: FetchTicket,
        transport: &dyn FeedTransport,
    ) -> FetchOutcome {
        let result = transport.fetch_fragment(ticket.url()).await;
        self.complete(&ticket, result)
    }

    /// Re-scans the event list for genre chips. Only chips found here
    /// respond to clicks, so this runs after every list replacement.
    /// Returns the number of chips bound.
    pub fn bind_genre_chip_links(&mut self) -> usize {
        self.rendered = RenderedFeed::from_fragment(self.feed.inner_html());
        self.rendered.chips().len()
    }

    /// A genre chip in the list acts like checking that genre's box.
    fn click_chip(&mut self, slug: &str) -> Option<FetchTicket> {
        if !self.rendered.has_chip(slug) {
            tracing::debug!(%slug, "Chip not bound in current list");
            return None;
        }
        if !self.form.set_genre_checked(slug, true) {
            tracing::debug!(%slug, "No genre checkbox for chip");
            return None;
        }
        if self.browser.viewport_width() < self.narrow_viewport_px && !self.drawer_open() {
            self.set_drawer_open(true);
        }
        Some(self.dispatch(FilterIntent::SelectGenre {
            slug: slug.to_string(),
        }))
    }

    /// History moved: the URL is the source of truth, not the form.
    fn on_pop_state(&mut self) -> FetchTicket {
        let query = self.browser.location().query;
        self.state = FilterReducer::reduce(
            std::mem::take(&mut self.state),
            FilterIntent::Navigate { query },
        );
        self.write_form();
        self.refresh()
    }

    pub fn toggle_drawer(&mut self) {
        if self.drawer.is_some() {
            let open = !self.drawer_open();
            self.set_drawer_open(open);
        }
    }

    pub fn drawer_open(&self) -> bool {
        self.drawer
            .as_ref()
            .is_some_and(|drawer| drawer.sidebar.is_open())
    }

    fn set_drawer_open(&mut self, open: bool) {
        if let Some(drawer) = self.drawer.as_mut() {
            drawer.sidebar.set_open(open);
            if let Some(toggle) = drawer.toggle.as_mut() {
                toggle.set_aria_expanded(open);
            }
        }
    }

    /// Makes the form controls show `self.state`.
    fn write_form(&mut self) {
        for checkbox in self.form.genre_checkboxes() {
            let checked = self.state.genres.contains(&checkbox.slug);
            if checked != checkbox.checked {
                self.form.set_genre_checked(&checkbox.slug, checked);
            }
        }
        let token = self.state.date_range.map(DatePreset::token);
        self.form.set_date_range_value(token.unwrap_or(""));
        self.form.set_active_preset(token);
    }
}
