//! In-memory page used by the headless shell and by tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::markup;

use super::markers::{
    ACTIVE_CLASS, CLEAR_GENRES_ID, DATE_PRESET_CLASS, DATE_RANGE_INPUT_ID, EVENT_LIST_ID,
    FILTER_FORM_ID, FILTER_SIDEBAR_ID, FILTER_TOGGLE_ID, GENRE_CHECKBOX_NAME, OPEN_CLASS,
    PRESET_TOKEN_ATTR, RESULTS_COUNT_ID,
};
use super::{
    Browser, CountDisplay, DrawerToggle, FeedContainer, FilterForm, FilterSidebar, GenreCheckbox,
    Location, PageEvent, PageHandles, PresetButton,
};

pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

/// Everything the page currently shows. `None` fields are elements the
/// page does not have.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    pub has_form: bool,
    pub genres: Vec<GenreCheckbox>,
    pub date_range_value: Option<String>,
    pub presets: Vec<PresetButton>,
    pub has_clear_genres: bool,
    pub feed_html: Option<String>,
    pub loading: bool,
    pub count_text: Option<String>,
    pub toggle_expanded: Option<bool>,
    pub sidebar_open: Option<bool>,
    pub history: Vec<String>,
    pub history_index: usize,
    pub viewport_width: u32,
}

impl PageSnapshot {
    pub fn url(&self) -> &str {
        self.history
            .get(self.history_index)
            .map(String::as_str)
            .unwrap_or("/")
    }

    pub fn checked_genres(&self) -> Vec<&str> {
        self.genres
            .iter()
            .filter(|g| g.checked)
            .map(|g| g.slug.as_str())
            .collect()
    }

    pub fn active_presets(&self) -> Vec<&str> {
        self.presets
            .iter()
            .filter(|p| p.active)
            .map(|p| p.token.as_str())
            .collect()
    }
}

type Shared = Rc<RefCell<PageSnapshot>>;

/// A single-document page with its own history stack.
///
/// Cloning shares the document: handles given to the controller and the
/// `MemoryPage` the caller keeps see the same state.
#[derive(Clone)]
pub struct MemoryPage {
    doc: Shared,
}

impl MemoryPage {
    /// A blank page at `url` with none of the filter elements.
    pub fn new(url: &str) -> Self {
        let snapshot = PageSnapshot {
            history: vec![url.to_string()],
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            ..PageSnapshot::default()
        };
        Self {
            doc: Rc::new(RefCell::new(snapshot)),
        }
    }

    /// Adds a filter form with one checkbox per genre, a date-range input
    /// and one button per preset token.
    pub fn with_filter_form(self, genres: &[&str], presets: &[&str]) -> Self {
        {
            let mut doc = self.doc.borrow_mut();
            doc.has_form = true;
            doc.genres = genres
                .iter()
                .map(|slug| GenreCheckbox {
                    slug: slug.to_string(),
                    checked: false,
                })
                .collect();
            doc.date_range_value = Some(String::new());
            doc.presets = presets
                .iter()
                .map(|token| PresetButton {
                    token: token.to_string(),
                    active: false,
                })
                .collect();
            doc.has_clear_genres = true;
        }
        self
    }

    /// Adds the event-list container and the results-count element.
    pub fn with_feed(self, html: &str) -> Self {
        {
            let mut doc = self.doc.borrow_mut();
            doc.feed_html = Some(html.to_string());
            doc.count_text = Some(String::new());
        }
        self
    }

    /// Adds the mobile toggle button and a collapsed sidebar.
    pub fn with_drawer(self) -> Self {
        {
            let mut doc = self.doc.borrow_mut();
            doc.toggle_expanded = Some(false);
            doc.sidebar_open = Some(false);
        }
        self
    }

    pub fn with_viewport_width(self, width: u32) -> Self {
        self.doc.borrow_mut().viewport_width = width;
        self
    }

    /// Builds the page from a full server-rendered document.
    pub fn from_document(html: &str, url: &str) -> Self {
        let page = Self::new(url);
        {
            let mut doc = page.doc.borrow_mut();

            if markup::find_by_id(html, FILTER_FORM_ID).is_some() {
                doc.has_form = true;
                let scope = markup::inner_html(html, FILTER_FORM_ID).unwrap_or(html);
                for tag in markup::tags(scope) {
                    if tag.name == "input" && tag.attr("name") == Some(GENRE_CHECKBOX_NAME) {
                        if let Some(slug) = tag.attr("value") {
                            doc.genres.push(GenreCheckbox {
                                slug: slug.to_string(),
                                checked: tag.has_attr("checked"),
                            });
                        }
                    } else if tag.id() == Some(DATE_RANGE_INPUT_ID) {
                        doc.date_range_value = Some(tag.attr("value").unwrap_or("").to_string());
                    } else if tag.has_class(DATE_PRESET_CLASS) {
                        if let Some(token) = tag.attr(PRESET_TOKEN_ATTR) {
                            doc.presets.push(PresetButton {
                                token: token.to_string(),
                                active: tag.has_class(ACTIVE_CLASS),
                            });
                        }
                    } else if tag.id() == Some(CLEAR_GENRES_ID) {
                        doc.has_clear_genres = true;
                    }
                }
            }

            if markup::find_by_id(html, EVENT_LIST_ID).is_some() {
                let inner = markup::inner_html(html, EVENT_LIST_ID).unwrap_or("");
                doc.feed_html = Some(inner.trim().to_string());
            }
            if markup::find_by_id(html, RESULTS_COUNT_ID).is_some() {
                let inner = markup::inner_html(html, RESULTS_COUNT_ID).unwrap_or("");
                doc.count_text = Some(inner.trim().to_string());
            }
            if let Some(toggle) = markup::find_by_id(html, FILTER_TOGGLE_ID) {
                doc.toggle_expanded = Some(toggle.attr("aria-expanded") == Some("true"));
            }
            if let Some(sidebar) = markup::find_by_id(html, FILTER_SIDEBAR_ID) {
                doc.sidebar_open = Some(sidebar.has_class(OPEN_CLASS));
            }
        }
        page
    }

    /// Handles for every element present on the page.
    pub fn handles(&self) -> PageHandles {
        let doc = self.doc.borrow();
        PageHandles {
            form: doc
                .has_form
                .then(|| Box::new(MemoryForm(self.doc.clone())) as Box<dyn FilterForm>),
            feed: doc
                .feed_html
                .is_some()
                .then(|| Box::new(MemoryFeed(self.doc.clone())) as Box<dyn FeedContainer>),
            count: doc
                .count_text
                .is_some()
                .then(|| Box::new(MemoryCount(self.doc.clone())) as Box<dyn CountDisplay>),
            toggle: doc
                .toggle_expanded
                .is_some()
                .then(|| Box::new(MemoryToggle(self.doc.clone())) as Box<dyn DrawerToggle>),
            sidebar: doc
                .sidebar_open
                .is_some()
                .then(|| Box::new(MemorySidebar(self.doc.clone())) as Box<dyn FilterSidebar>),
        }
    }

    pub fn browser(&self) -> Box<dyn Browser> {
        Box::new(MemoryBrowser(self.doc.clone()))
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.doc.borrow().clone()
    }

    /// User clicks a genre checkbox: the box flips, then `change` fires.
    pub fn click_genre(&self, slug: &str) -> Option<PageEvent> {
        let mut doc = self.doc.borrow_mut();
        let checkbox = doc.genres.iter_mut().find(|g| g.slug == slug)?;
        checkbox.checked = !checkbox.checked;
        Some(PageEvent::GenreToggled {
            slug: slug.to_string(),
            checked: checkbox.checked,
        })
    }

    /// Browser back button. `None` at the start of history.
    pub fn back(&self) -> Option<PageEvent> {
        let mut doc = self.doc.borrow_mut();
        if doc.history_index == 0 {
            return None;
        }
        doc.history_index -= 1;
        Some(PageEvent::PopState)
    }

    /// Browser forward button. `None` at the end of history.
    pub fn forward(&self) -> Option<PageEvent> {
        let mut doc = self.doc.borrow_mut();
        if doc.history_index + 1 >= doc.history.len() {
            return None;
        }
        doc.history_index += 1;
        Some(PageEvent::PopState)
    }
}

struct MemoryForm(Shared);

impl FilterForm for MemoryForm {
    fn genre_checkboxes(&self) -> Vec<GenreCheckbox> {
        self.0.borrow().genres.clone()
    }

    fn set_genre_checked(&mut self, slug: &str, checked: bool) -> bool {
        let mut doc = self.0.borrow_mut();
        match doc.genres.iter_mut().find(|g| g.slug == slug) {
            Some(checkbox) => {
                checkbox.checked = checked;
                true
            }
            None => false,
        }
    }

    fn date_range_value(&self) -> Option<String> {
        self.0.borrow().date_range_value.clone()
    }

    fn set_date_range_value(&mut self, value: &str) {
        let mut doc = self.0.borrow_mut();
        if let Some(input) = doc.date_range_value.as_mut() {
            *input = value.to_string();
        }
    }

    fn set_active_preset(&mut self, token: Option<&str>) {
        for button in self.0.borrow_mut().presets.iter_mut() {
            button.active = Some(button.token.as_str()) == token;
        }
    }
}

struct MemoryFeed(Shared);

impl FeedContainer for MemoryFeed {
    fn inner_html(&self) -> String {
        self.0.borrow().feed_html.clone().unwrap_or_default()
    }

    fn replace_inner_html(&mut self, html: &str) {
        self.0.borrow_mut().feed_html = Some(html.to_string());
    }

    fn set_loading(&mut self, loading: bool) {
        self.0.borrow_mut().loading = loading;
    }
}

struct MemoryCount(Shared);

impl CountDisplay for MemoryCount {
    fn set_text(&mut self, text: &str) {
        self.0.borrow_mut().count_text = Some(text.to_string());
    }
}

struct MemoryToggle(Shared);

impl DrawerToggle for MemoryToggle {
    fn set_aria_expanded(&mut self, expanded: bool) {
        self.0.borrow_mut().toggle_expanded = Some(expanded);
    }
}

struct MemorySidebar(Shared);

impl FilterSidebar for MemorySidebar {
    fn is_open(&self) -> bool {
        self.0.borrow().sidebar_open.unwrap_or(false)
    }

    fn set_open(&mut self, open: bool) {
        self.0.borrow_mut().sidebar_open = Some(open);
    }
}

struct MemoryBrowser(Shared);

impl Browser for MemoryBrowser {
    fn location(&self) -> Location {
        Location::parse(self.0.borrow().url())
    }

    fn push_state(&mut self, url: &str) {
        let mut doc = self.0.borrow_mut();
        let keep = doc.history_index + 1;
        doc.history.truncate(keep);
        doc.history.push(url.to_string());
        doc.history_index = doc.history.len() - 1;
    }

    fn viewport_width(&self) -> u32 {
        self.0.borrow().viewport_width
    }
}
