//! The page the filter controller drives.
//!
//! Every DOM element the controller touches is reached through one of the
//! handle traits below, so the controller can run against a browser
//! binding, the in-memory [`MemoryPage`], or a test double.

pub mod markers;
mod memory;

pub use memory::{MemoryPage, PageSnapshot};

/// A genre checkbox in the filter form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCheckbox {
    pub slug: String,
    pub checked: bool,
}

/// A `.date-preset` button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetButton {
    pub token: String,
    pub active: bool,
}

/// Path and query of the address bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    /// Query string without the leading `?`.
    pub query: String,
}

impl Location {
    /// Splits `/path?query` into its parts.
    pub fn parse(url: &str) -> Self {
        match url.split_once('?') {
            Some((path, query)) => Self {
                path: path.to_string(),
                query: query.to_string(),
            },
            None => Self {
                path: url.to_string(),
                query: String::new(),
            },
        }
    }
}

/// The filter form: genre checkboxes, date-range input and preset buttons.
pub trait FilterForm {
    /// Checkboxes in document order.
    fn genre_checkboxes(&self) -> Vec<GenreCheckbox>;

    /// Returns false if no checkbox carries `slug`.
    fn set_genre_checked(&mut self, slug: &str, checked: bool) -> bool;

    /// `None` when the form has no date-range input.
    fn date_range_value(&self) -> Option<String>;

    fn set_date_range_value(&mut self, value: &str);

    /// Marks the button carrying `token` active and every other one
    /// inactive. `None` deactivates all of them.
    fn set_active_preset(&mut self, token: Option<&str>);
}

/// The event-list container.
pub trait FeedContainer {
    fn inner_html(&self) -> String;

    fn replace_inner_html(&mut self, html: &str);

    fn set_loading(&mut self, loading: bool);
}

/// The results-count element.
pub trait CountDisplay {
    fn set_text(&mut self, text: &str);
}

/// The mobile filter-toggle button.
pub trait DrawerToggle {
    fn set_aria_expanded(&mut self, expanded: bool);
}

/// The collapsible filter sidebar.
pub trait FilterSidebar {
    fn is_open(&self) -> bool;

    fn set_open(&mut self, open: bool);
}

/// Address bar, history and viewport.
pub trait Browser {
    fn location(&self) -> Location;

    /// Adds a history entry for `url` and shows it without navigating.
    fn push_state(&mut self, url: &str);

    fn viewport_width(&self) -> u32;
}

/// Element handles found on the page. Required ones may be missing when
/// the controller is loaded on a page without a feed.
#[derive(Default)]
pub struct PageHandles {
    pub form: Option<Box<dyn FilterForm>>,
    pub feed: Option<Box<dyn FeedContainer>>,
    pub count: Option<Box<dyn CountDisplay>>,
    pub toggle: Option<Box<dyn DrawerToggle>>,
    pub sidebar: Option<Box<dyn FilterSidebar>>,
}

/// A user gesture or browser event on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A genre checkbox changed. The box already shows `checked`.
    GenreToggled { slug: String, checked: bool },
    PresetClicked { token: String },
    ClearGenresClicked,
    ClearDateClicked,
    /// A genre chip inside the event list was clicked.
    ChipClicked { slug: String },
    DrawerToggled,
    /// History moved (back/forward); the address bar already shows the
    /// target URL.
    PopState,
}
