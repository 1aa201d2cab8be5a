//! Mapping between [`FilterState`] and URL query strings.
//!
//! The address bar carries `date_range=<token>` followed by one
//! `genres=<slug>` per selected genre. The fetch URL carries the same pairs
//! plus `partial=1`, which never reaches the address bar.

use url::form_urlencoded::{self, Serializer, Target};
use url::Url;

use super::state::{DatePreset, FilterState};

pub const DATE_RANGE_PARAM: &str = "date_range";
pub const GENRES_PARAM: &str = "genres";
pub const PARTIAL_PARAM: &str = "partial";

/// Serializes `state` to a query string without the leading `?`.
pub fn to_query(state: &FilterState) -> String {
    let mut serializer = Serializer::new(String::new());
    append_state(&mut serializer, state);
    serializer.finish()
}

/// Rebuilds a [`FilterState`] from a query string (leading `?` optional).
///
/// Unknown parameters, `partial`, empty genre values and unknown date
/// tokens are ignored. Repeated genres collapse to one.
pub fn from_query(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = FilterState::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            DATE_RANGE_PARAM => state.date_range = DatePreset::from_token(&value),
            GENRES_PARAM if !value.is_empty() => {
                state.genres.insert(value.into_owned());
            }
            _ => {}
        }
    }
    state
}

/// URL shown in the address bar: `path` alone when unfiltered.
pub fn address_bar_url(path: &str, state: &FilterState) -> String {
    let query = to_query(state);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

/// URL the partial fragment is fetched from: `page_url` with its query
/// replaced by the filter pairs and `partial=1`.
pub fn fetch_url(page_url: &Url, state: &FilterState) -> Url {
    let mut url = page_url.clone();
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        append_state(&mut pairs, state);
        pairs.append_pair(PARTIAL_PARAM, "1");
    }
    url
}

fn append_state<T: Target>(serializer: &mut Serializer<'_, T>, state: &FilterState) {
    if let Some(preset) = state.date_range {
        serializer.append_pair(DATE_RANGE_PARAM, preset.token());
    }
    for slug in state.genres.iter() {
        serializer.append_pair(GENRES_PARAM, slug);
    }
}
