//! Filter feature: what is selected and how it maps to URLs.
//!
//! - `state.rs` - selected date preset and genres
//! - `intent.rs` - typed filter changes
//! - `reducer.rs` - state transitions (pure, no side effects)
//! - `query.rs` - query-string serialization for the address bar and fetches

mod intent;
pub mod query;
mod reducer;
mod state;

pub use intent::FilterIntent;
pub use reducer::FilterReducer;
pub use state::{DatePreset, FilterState, GenreSelection};
