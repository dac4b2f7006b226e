// ============================================================================
// Module : data
// ============================================================================
// Chargement et filtrage du dataset de prix (remplace l'accès réseau :
// la seule source de données est un CSV statique lu au démarrage)
// ============================================================================

pub mod dataset; // Table immuable des lignes
pub mod error;   // Erreurs de chargement
pub mod filter;  // Filtre ticker + intervalle de dates
pub mod loader;  // Lecture du CSV

pub use dataset::Dataset;
pub use error::DatasetError;
pub use filter::filter_by_date;
pub use loader::{load_csv, read_csv, REQUIRED_COLUMNS};
