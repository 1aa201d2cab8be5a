//! Filter selection state.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::mvi::UiState;

/// Named date window offered by the feed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePreset {
    Tonight,
    ThisWeek,
    ThisWeekend,
}

impl DatePreset {
    pub const ALL: [DatePreset; 3] = [Self::Tonight, Self::ThisWeek, Self::ThisWeekend];

    /// Token used in `date_range=` and on `.date-preset` buttons.
    pub fn token(self) -> &'static str {
        match self {
            Self::Tonight => "tonight",
            Self::ThisWeek => "this-week",
            Self::ThisWeekend => "this-weekend",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tonight => "Tonight",
            Self::ThisWeek => "This Week",
            Self::ThisWeekend => "This Weekend",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.token() == token)
    }

    /// Inclusive local-time window the server filters on for this preset.
    ///
    /// The week runs Monday to Sunday. The weekend is the Saturday of the
    /// current week, or today when today is Saturday; on Sunday it rolls
    /// forward to the next Saturday.
    pub fn window(self, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        let today = now.date();
        let weekday = today.weekday().num_days_from_monday() as i64;
        match self {
            Self::Tonight => (start_of(today), end_of(today)),
            Self::ThisWeek => {
                let monday = today - Duration::days(weekday);
                (start_of(monday), end_of(monday + Duration::days(6)))
            }
            Self::ThisWeekend => {
                let saturday = today + Duration::days((5 - weekday).rem_euclid(7));
                (start_of(saturday), end_of(saturday + Duration::days(1)))
            }
        }
    }
}

fn start_of(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(time) => time,
    None => panic!("invalid end-of-day time"),
};

fn end_of(day: NaiveDate) -> NaiveDateTime {
    day.and_time(END_OF_DAY)
}

/// Selected genre slugs.
///
/// Behaves as a set (no duplicates, order-independent equality) but keeps
/// the order in which slugs were added so the query string follows the
/// order the user checked them.
#[derive(Debug, Clone, Default)]
pub struct GenreSelection {
    slugs: Vec<String>,
}

impl GenreSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `slug` at the end. Returns false if it was already selected.
    pub fn insert(&mut self, slug: impl Into<String>) -> bool {
        let slug = slug.into();
        if self.contains(&slug) {
            return false;
        }
        self.slugs.push(slug);
        true
    }

    pub fn remove(&mut self, slug: &str) -> bool {
        let before = self.slugs.len();
        self.slugs.retain(|s| s != slug);
        self.slugs.len() != before
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.iter().any(|s| s == slug)
    }

    pub fn clear(&mut self) {
        self.slugs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    /// Slugs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slugs.iter().map(String::as_str)
    }
}

impl PartialEq for GenreSelection {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|slug| other.contains(slug))
    }
}

impl Eq for GenreSelection {}

impl<S: Into<String>> FromIterator<S> for GenreSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for slug in iter {
            selection.insert(slug);
        }
        selection
    }
}

/// What the user is currently filtering the feed by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub date_range: Option<DatePreset>,
    pub genres: GenreSelection,
}

impl UiState for FilterState {}

impl FilterState {
    pub fn is_unfiltered(&self) -> bool {
        self.date_range.is_none() && self.genres.is_empty()
    }
}
