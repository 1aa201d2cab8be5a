/// Marker trait for intent objects.
///
/// Intents are typed gestures (checking a genre, picking a date preset)
/// or browser events (history navigation). Reducers turn them into new
/// state; the controller performs the side effects afterwards.
pub trait Intent: Send + 'static {}
