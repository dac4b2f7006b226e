// ============================================================================
// Chargement du CSV de prix
// ============================================================================
// Lit le fichier une seule fois au démarrage et construit le Dataset
//
// CONCEPTS RUST :
// 1. Generics : read_csv<R: Read> fonctionne sur un fichier ou un buffer
// 2. Serde + csv : chaque ligne est désérialisée par nom de colonne
// 3. Fail fast : la première ligne invalide arrête tout
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::data::{Dataset, DatasetError};
use crate::models::PriceRow;

/// Colonnes obligatoires de l'en-tête (ordre libre, colonnes en plus ignorées)
pub const REQUIRED_COLUMNS: [&str; 7] = ["date", "ticker", "open", "high", "low", "close", "volume"];

/// Charge le dataset depuis un fichier CSV
///
/// # Erreurs
/// Fichier introuvable, colonne manquante, nombre ou date illisible :
/// l'erreur d'origine est conservée dans `DatasetError`.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Opening price CSV");

    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = read_csv(file)?;
    info!(
        path = %path.display(),
        rows = dataset.len(),
        tickers = dataset.tickers().len(),
        "Price dataset loaded"
    );
    Ok(dataset)
}

/// Construit le dataset depuis n'importe quelle source CSV
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Vérifie l'en-tête avant de lire la moindre ligne
    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn(column));
        }
    }

    // CONCEPT RUST : collect() sur un itérateur de Result
    // - Vec<Result<T, E>> -> Result<Vec<T>, E>
    // - S'arrête à la première erreur
    let rows = reader
        .deserialize::<PriceRow>()
        .collect::<Result<Vec<_>, _>>()?;

    // Les lignes restent dans l'ordre du fichier, on signale seulement
    // les tickers dont les dates reculent
    let dataset = Dataset::from_rows(rows);
    for ticker in unordered_tickers(&dataset) {
        warn!(ticker = %ticker, "Price rows are not date-ordered for this ticker");
    }

    Ok(dataset)
}

/// Tickers dont les lignes ne sont pas en ordre chronologique
fn unordered_tickers(dataset: &Dataset) -> Vec<&str> {
    dataset
        .tickers()
        .iter()
        .map(String::as_str)
        .filter(|ticker| {
            let dates: Vec<_> = dataset.rows_for(ticker).map(|r| r.date).collect();
            !dates.windows(2).all(|w| w[0] <= w[1])
        })
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================
