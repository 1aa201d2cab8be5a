//! Model-View-Intent primitives shared by the filter feature.
//!
//! ```text
//! PageEvent ──→ Intent ──→ Reducer ──→ State ──→ form / URL / fetch
//!                 ↑                                    │
//!                 └──────── popstate, chip clicks ─────┘
//! ```
//!
//! - **State**: plain value describing what the user has selected
//! - **Intent**: a typed user gesture or browser event
//! - **Reducer**: pure function from (State, Intent) to State

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
