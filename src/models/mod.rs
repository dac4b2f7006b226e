// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module public (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod field;     // PriceField / SeriesField
pub mod price_row; // Une ligne du CSV
pub mod selection; // Tickers + prix sélectionnés
pub mod series;    // Series et Figure prêtes à dessiner

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use stocktracker::models::price_row::PriceRow;
// On peut faire : use stocktracker::models::PriceRow;
pub use field::{PriceField, SeriesField, UnknownField};
pub use price_row::{PriceRow, DATE_FORMAT};
pub use selection::SelectionState;
pub use series::{join_tickers, Figure, LineShape, RenderKind, Series, XAxis, YAxis};
