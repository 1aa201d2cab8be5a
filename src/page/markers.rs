//! Ids, classes and attributes the server-rendered page provides.

pub const FILTER_FORM_ID: &str = "filter-form";
pub const EVENT_LIST_ID: &str = "event-list";
pub const RESULTS_COUNT_ID: &str = "results-count";
pub const FILTER_TOGGLE_ID: &str = "filter-toggle";
pub const FILTER_SIDEBAR_ID: &str = "filter-sidebar";
pub const DATE_RANGE_INPUT_ID: &str = "date-range-input";
pub const CLEAR_GENRES_ID: &str = "clear-genres";

pub const DATE_PRESET_CLASS: &str = "date-preset";
pub const PRESET_TOKEN_ATTR: &str = "data-range";
pub const GENRE_CHECKBOX_NAME: &str = "genres";

pub const EVENT_CARD_CLASS: &str = "event-card";
pub const GENRE_CHIP_CLASS: &str = "genre-chip";
pub const CHIP_GENRE_ATTR: &str = "data-genre";

/// Request header marking script-driven fetches.
pub const AJAX_HEADER: &str = "X-Requested-With";
pub const AJAX_HEADER_VALUE: &str = "XMLHttpRequest";

/// Class carried by the active preset button.
pub const ACTIVE_CLASS: &str = "active";
/// Class carried by the sidebar while the drawer is expanded.
pub const OPEN_CLASS: &str = "open";
