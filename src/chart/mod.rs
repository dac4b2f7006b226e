// ============================================================================
// Module : chart
// ============================================================================
// Logique des graphiques, indépendante du terminal :
// - series : projection lignes -> série (x, y)
// - controller : state machine prix / volume
// - viewport : fenêtre de zoom pilotée au clavier
// ============================================================================

pub mod controller;
pub mod series;
pub mod viewport;

pub use controller::{ChartController, ViewportEvent, ZoomState, VOLUME_AXIS_TITLE};
pub use series::{to_series, SeriesConfig};
pub use viewport::Viewport;
