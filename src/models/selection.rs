// ============================================================================
// Structure : SelectionState
// ============================================================================
// Ce que l'utilisateur a choisi à un instant donné (jamais persisté)
//
// CONCEPT : Ensemble ordonné
// - Les tickers gardent l'ordre de sélection (ordre des séries et du titre)
// - Pas de doublons : toggle ajoute ou retire
// ============================================================================

use chrono::NaiveDate;

use crate::models::PriceField;

/// Sélection courante : tickers, prix affiché, plage visible
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    /// Tickers sélectionnés, dans l'ordre de sélection
    pub tickers: Vec<String>,

    /// Prix affiché sur le graphique des prix
    pub price_field: PriceField,

    /// Plage visible du graphique des prix (None = tout)
    pub visible_range: Option<(NaiveDate, NaiveDate)>,
}

impl SelectionState {
    /// Crée une sélection avec les tickers donnés (doublons retirés)
    pub fn new(tickers: Vec<String>, price_field: PriceField) -> Self {
        let mut selection = Self {
            tickers: Vec::with_capacity(tickers.len()),
            price_field,
            visible_range: None,
        };
        for ticker in tickers {
            if !selection.contains(&ticker) {
                selection.tickers.push(ticker);
            }
        }
        selection
    }

    /// Vérifie si un ticker est sélectionné
    pub fn contains(&self, ticker: &str) -> bool {
        self.tickers.iter().any(|t| t == ticker)
    }

    /// Ajoute ou retire un ticker ; retourne true s'il est maintenant sélectionné
    pub fn toggle(&mut self, ticker: &str) -> bool {
        if let Some(pos) = self.tickers.iter().position(|t| t == ticker) {
            self.tickers.remove(pos);
            false
        } else {
            self.tickers.push(ticker.to_string());
            true
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dedups() {
        let selection = SelectionState::new(
            vec!["AAPL".to_string(), "MSFT".to_string(), "AAPL".to_string()],
            PriceField::Close,
        );
        assert_eq!(selection.tickers, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_toggle() {
        let mut selection = SelectionState::default();
        assert!(selection.is_empty());

        assert!(selection.toggle("AAPL"));
        assert!(selection.toggle("MSFT"));
        assert_eq!(selection.tickers, vec!["AAPL", "MSFT"]);

        assert!(!selection.toggle("AAPL"));
        assert_eq!(selection.tickers, vec!["MSFT"]);
        assert!(!selection.contains("AAPL"));
    }
}
