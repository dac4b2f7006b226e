// ============================================================================
// Date-Range Filter
// ============================================================================
// Réduit le dataset à un ticker et un intervalle de dates inclusif
//
// CONCEPTS RUST :
// 1. Lifetimes : le résultat emprunte les lignes du Dataset ('a)
// 2. Option<NaiveDate> : borne absente = borne globale du dataset
// 3. Fonction pure : pas d'effet de bord, appelable depuis plusieurs threads
// ============================================================================

use chrono::NaiveDate;

use crate::data::Dataset;
use crate::models::PriceRow;

/// Lignes de `ticker` dont la date est dans `[start, end]`, ordre conservé
///
/// - Borne omise : min/max global du dataset
/// - Ticker inconnu : résultat vide (pas une erreur)
/// - `start > end` : résultat vide
pub fn filter_by_date<'a>(
    dataset: &'a Dataset,
    ticker: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<&'a PriceRow> {
    // Dataset vide : pas de bornes par défaut, et de toute façon aucune ligne
    let (start, end) = match (start.or(dataset.min_date()), end.or(dataset.max_date())) {
        (Some(start), Some(end)) => (start, end),
        _ => return Vec::new(),
    };

    if start > end {
        return Vec::new();
    }

    dataset
        .rows_for(ticker)
        .filter(|row| row.date >= start && row.date <= end)
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================
