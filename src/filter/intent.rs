//! Intents for the filter form.

use crate::mvi::Intent;

use super::state::DatePreset;

/// Typed filter changes dispatched to [`super::FilterReducer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterIntent {
    /// A date-preset button was picked. Replaces any previous preset.
    SetDateRange { preset: DatePreset },

    ClearDateRange,

    /// A genre checkbox changed to `checked`.
    ToggleGenre { slug: String, checked: bool },

    /// Check a genre without unchecking it if already selected
    /// (genre chips inside the feed).
    SelectGenre { slug: String },

    ClearGenres,

    /// Browser history moved to a URL with this query string.
    /// The whole state is replaced by what the URL says.
    Navigate { query: String },
}

impl Intent for FilterIntent {}
