// ============================================================================
// Erreurs de chargement du dataset
// ============================================================================
// Toute erreur ici est fatale au démarrage : le message d'origine (csv,
// chrono, io) est conservé tel quel pour être affiché à l'utilisateur.
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Erreur levée pendant la lecture du CSV de prix
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Impossible d'ouvrir le fichier
    #[error("impossible d'ouvrir '{path}' : {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Colonne obligatoire absente de l'en-tête
    #[error("colonne obligatoire absente : '{0}'")]
    MissingColumn(&'static str),

    /// Ligne illisible (nombre invalide, date invalide, champ manquant...)
    #[error("CSV invalide : {0}")]
    Csv(#[from] csv::Error),
}
