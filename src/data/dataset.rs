// ============================================================================
// Structure : Dataset
// ============================================================================
// Table immuable des lignes de prix, chargée une seule fois au démarrage
//
// CONCEPTS RUST :
// 1. Immutabilité : aucun &mut self après construction
// 2. Arc<Dataset> : partage en lecture seule, sans Mutex
// 3. Slices : on prête des &[PriceRow], on ne copie jamais les lignes
// ============================================================================

use chrono::NaiveDate;

use crate::models::PriceRow;

/// Dataset de prix historiques, en lecture seule pour toute la durée du process
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Lignes dans l'ordre de chargement
    rows: Vec<PriceRow>,

    /// Date minimale sur toutes les lignes (None si vide)
    min_date: Option<NaiveDate>,

    /// Date maximale sur toutes les lignes (None si vide)
    max_date: Option<NaiveDate>,

    /// Tickers distincts, dans l'ordre de première apparition
    tickers: Vec<String>,
}

impl Dataset {
    /// Construit le dataset à partir de lignes déjà parsées
    ///
    /// L'ordre des lignes est conservé tel quel.
    pub fn from_rows(rows: Vec<PriceRow>) -> Self {
        let min_date = rows.iter().map(|r| r.date).min();
        let max_date = rows.iter().map(|r| r.date).max();

        let mut tickers: Vec<String> = Vec::new();
        for row in &rows {
            if !tickers.iter().any(|t| t == &row.ticker) {
                tickers.push(row.ticker.clone());
            }
        }

        Self {
            rows,
            min_date,
            max_date,
            tickers,
        }
    }

    /// Toutes les lignes, dans l'ordre de chargement
    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    /// Nombre de lignes
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.min_date
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.max_date
    }

    /// (min, max) des dates, None si le dataset est vide
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.min_date.zip(self.max_date)
    }

    /// Tickers distincts (ordre de première apparition)
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Vérifie si le ticker existe dans le dataset
    pub fn has_ticker(&self, ticker: &str) -> bool {
        self.tickers.iter().any(|t| t == ticker)
    }

    /// Itère sur les lignes d'un ticker, dans l'ordre
    pub fn rows_for<'a, 't>(&'a self, ticker: &'t str) -> impl Iterator<Item = &'a PriceRow> + 't
    where
        'a: 't,
    {
        self.rows.iter().filter(move |r| r.ticker == ticker)
    }

    /// Dates distinctes triées pour un ensemble de tickers
    ///
    /// Sert d'axe de navigation au zoom du graphique des prix.
    pub fn dates_for<S: AsRef<str>>(&self, tickers: &[S]) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .rows
            .iter()
            .filter(|r| tickers.iter().any(|t| t.as_ref() == r.ticker))
            .map(|r| r.date)
            .collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    fn sample() -> Dataset {
        Dataset::from_rows(vec![
            PriceRow::new("AAPL", day(2), 1.0, 1.0, 1.0, 100.0, 10),
            PriceRow::new("MSFT", day(1), 1.0, 1.0, 1.0, 200.0, 5),
            PriceRow::new("AAPL", day(3), 1.0, 1.0, 1.0, 105.0, 20),
        ])
    }

    #[test]
    fn test_bounds_and_tickers() {
        let dataset = sample();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.date_bounds(), Some((day(1), day(3))));
        assert_eq!(dataset.tickers(), &["AAPL".to_string(), "MSFT".to_string()]);
        assert!(dataset.has_ticker("MSFT"));
        assert!(!dataset.has_ticker("GOOG"));
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::from_rows(Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.date_bounds(), None);
        assert!(dataset.tickers().is_empty());
    }

    #[test]
    fn test_dates_for() {
        let dataset = sample();
        assert_eq!(dataset.dates_for(&["AAPL"]), vec![day(2), day(3)]);
        assert_eq!(dataset.dates_for(&["AAPL", "MSFT"]), vec![day(1), day(2), day(3)]);
        assert!(dataset.dates_for::<&str>(&[]).is_empty());
    }
}
