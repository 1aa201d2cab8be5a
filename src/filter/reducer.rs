use crate::mvi::Reducer;

use super::intent::FilterIntent;
use super::query::from_query;
use super::state::FilterState;

/// Pure state transitions for the filter form.
///
/// Writing the form controls, pushing history and fetching are done by the
/// controller after dispatch.
pub struct FilterReducer;

impl Reducer for FilterReducer {
    type State = FilterState;
    type Intent = FilterIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FilterIntent::SetDateRange { preset } => {
                state.date_range = Some(preset);
                state
            }
            FilterIntent::ClearDateRange => {
                state.date_range = None;
                state
            }
            FilterIntent::ToggleGenre { slug, checked: true } => {
                state.genres.insert(slug);
                state
            }
            FilterIntent::ToggleGenre {
                slug,
                checked: false,
            } => {
                state.genres.remove(&slug);
                state
            }
            FilterIntent::SelectGenre { slug } => {
                state.genres.insert(slug);
                state
            }
            FilterIntent::ClearGenres => {
                state.genres.clear();
                state
            }
            FilterIntent::Navigate { query } => from_query(&query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::DatePreset;

    #[test]
    fn set_date_range_replaces_previous_preset() {
        let state = FilterReducer::reduce(
            FilterState::default(),
            FilterIntent::SetDateRange {
                preset: DatePreset::ThisWeekend,
            },
        );
        let state = FilterReducer::reduce(
            state,
            FilterIntent::SetDateRange {
                preset: DatePreset::Tonight,
            },
        );
        assert_eq!(state.date_range, Some(DatePreset::Tonight));
    }

    #[test]
    fn select_genre_is_not_a_toggle() {
        let state = FilterReducer::reduce(
            FilterState::default(),
            FilterIntent::SelectGenre {
                slug: "jazz".into(),
            },
        );
        let state = FilterReducer::reduce(
            state,
            FilterIntent::SelectGenre {
                slug: "jazz".into(),
            },
        );
        assert!(state.genres.contains("jazz"));
        assert_eq!(state.genres.len(), 1);
    }

    #[test]
    fn navigate_replaces_everything() {
        let mut state = FilterState::default();
        state.genres.insert("punk");
        state.date_range = Some(DatePreset::ThisWeek);

        let state = FilterReducer::reduce(
            state,
            FilterIntent::Navigate {
                query: "genres=jazz".into(),
            },
        );
        assert_eq!(state.date_range, None);
        assert_eq!(state.genres.iter().collect::<Vec<_>>(), vec!["jazz"]);
    }
}
