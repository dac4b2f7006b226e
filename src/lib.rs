// ============================================================================
// Stock Tracker - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod app;    // État de l'application
pub mod chart;  // Series Builder, Chart Controller, Viewport
pub mod config; // Arguments de ligne de commande
pub mod data;   // Dataset, chargement CSV, filtre par dates
pub mod models; // Structures de données
pub mod ui;     // Interface utilisateur
