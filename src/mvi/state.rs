/// Marker trait for state objects driven by a reducer.
///
/// States are cloned to produce new states and compared to detect
/// changes, so they carry no handles or I/O.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
