// ============================================================================
// Structure : PriceRow
// ============================================================================
// Une ligne du fichier de prix historiques : un ticker, un jour, OHLC + volume
//
// CONCEPTS RUST :
// 1. NaiveDate : date calendaire de chrono (sans heure ni timezone)
// 2. f64 : floating point 64 bits pour les prix
// 3. u64 : unsigned 64 bits pour le volume (toujours positif)
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{PriceField, SeriesField};

/// Format fixe des dates dans le CSV
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Désérialise une date "YYYY-MM-DD" depuis une cellule texte
///
/// CONCEPT RUST : deserialize_with
/// - serde appelle cette fonction à la place du Deserialize par défaut
/// - L'erreur chrono est convertie en erreur serde (message conservé)
fn string_to_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| {
        serde::de::Error::custom(format!("date invalide '{}' : {}", s, e))
    })
}

/// Une ligne de prix pour un ticker à une date donnée
///
/// Les lignes sont immuables une fois chargées : le Dataset ne donne
/// que des références `&PriceRow`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Symbole du ticker (ex: "AAPL")
    pub ticker: String,

    /// Jour de cotation
    #[serde(deserialize_with = "string_to_date")]
    pub date: NaiveDate,

    /// Prix d'ouverture (Open)
    pub open: f64,

    /// Prix le plus haut (High)
    pub high: f64,

    /// Prix le plus bas (Low)
    pub low: f64,

    /// Prix de clôture (Close)
    pub close: f64,

    /// Volume échangé
    pub volume: u64,
}

impl PriceRow {
    /// Constructeur : crée une nouvelle ligne de prix
    pub fn new(
        ticker: impl Into<String>,
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Retourne le prix demandé
    pub fn price(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
        }
    }

    /// Retourne la valeur d'un champ sous forme de f64 (volume inclus)
    ///
    /// CONCEPT RUST : Cast avec `as`
    /// - u64 -> f64 : exact jusqu'à 2^53, largement suffisant pour un volume
    pub fn value(&self, field: SeriesField) -> f64 {
        match field {
            SeriesField::Price(price) => self.price(price),
            SeriesField::Volume => self.volume as f64,
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> PriceRow {
        let date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        PriceRow::new("AAPL", date, 100.0, 110.0, 95.0, 105.0, 1000)
    }

    #[test]
    fn test_price_fields() {
        let row = row();
        assert_eq!(row.price(PriceField::Open), 100.0);
        assert_eq!(row.price(PriceField::High), 110.0);
        assert_eq!(row.price(PriceField::Low), 95.0);
        assert_eq!(row.price(PriceField::Close), 105.0);
    }

    #[test]
    fn test_value_volume() {
        let row = row();
        assert_eq!(row.value(SeriesField::Volume), 1000.0);
        assert_eq!(row.value(SeriesField::Price(PriceField::Close)), 105.0);
    }
}
