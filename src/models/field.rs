// ============================================================================
// Enums : PriceField / SeriesField
// ============================================================================
// Champ numérique projeté sur l'axe Y d'une série
//
// CONCEPT : Prix vs Volume
// - PriceField : les 4 prix sélectionnables (open, high, low, close)
// - SeriesField : un prix OU le volume (le graphique de volume)
// - Le type de rendu (ligne / barres) découle du champ, pas des données
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Erreur de parsing d'un nom de champ
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("champ inconnu '{0}' (attendu : open, high, low, close, volume)")]
pub struct UnknownField(pub String);

/// Prix sélectionnable pour le graphique des prix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    /// Prix d'ouverture
    Open,
    /// Plus haut
    High,
    /// Plus bas
    Low,
    /// Clôture
    Close,
}

impl PriceField {
    /// Nom en minuscules, identique à l'en-tête CSV (utilisé dans les titres)
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceField::Open => "open",
            PriceField::High => "high",
            PriceField::Low => "low",
            PriceField::Close => "close",
        }
    }

    /// Label pour l'affichage (boutons radio)
    pub fn label(&self) -> &'static str {
        match self {
            PriceField::Open => "Open",
            PriceField::High => "High",
            PriceField::Low => "Low",
            PriceField::Close => "Close",
        }
    }

    /// Retourne tous les champs (pour UI de sélection)
    pub fn all() -> [PriceField; 4] {
        [
            PriceField::Open,
            PriceField::High,
            PriceField::Low,
            PriceField::Close,
        ]
    }

    /// Retourne le champ suivant (cycle)
    pub fn next(&self) -> PriceField {
        match self {
            PriceField::Open => PriceField::High,
            PriceField::High => PriceField::Low,
            PriceField::Low => PriceField::Close,
            PriceField::Close => PriceField::Open, // Boucle
        }
    }

    /// Retourne le champ précédent (cycle)
    pub fn previous(&self) -> PriceField {
        match self {
            PriceField::Open => PriceField::Close, // Boucle
            PriceField::High => PriceField::Open,
            PriceField::Low => PriceField::High,
            PriceField::Close => PriceField::Low,
        }
    }
}

impl Default for PriceField {
    /// Clôture par défaut, comme le bouton radio initial du dashboard
    fn default() -> Self {
        PriceField::Close
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(PriceField::Open),
            "high" => Ok(PriceField::High),
            "low" => Ok(PriceField::Low),
            "close" => Ok(PriceField::Close),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

/// Champ projeté par le Series Builder : un prix ou le volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesField {
    /// Un des quatre prix
    Price(PriceField),
    /// Volume échangé
    Volume,
}

impl SeriesField {
    /// Vrai pour le volume (rendu en barres)
    pub fn is_volume(&self) -> bool {
        matches!(self, SeriesField::Volume)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesField::Price(price) => price.as_str(),
            SeriesField::Volume => "volume",
        }
    }
}

impl From<PriceField> for SeriesField {
    fn from(price: PriceField) -> Self {
        SeriesField::Price(price)
    }
}

impl fmt::Display for SeriesField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeriesField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("volume") {
            return Ok(SeriesField::Volume);
        }
        s.parse::<PriceField>().map(SeriesField::Price)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_field_cycle() {
        assert_eq!(PriceField::Open.next(), PriceField::High);
        assert_eq!(PriceField::Close.next(), PriceField::Open); // Boucle
        assert_eq!(PriceField::Open.previous(), PriceField::Close);

        for field in PriceField::all() {
            assert_eq!(field.next().previous(), field);
        }
    }

    #[test]
    fn test_parse_fields() {
        assert_eq!("close".parse::<PriceField>(), Ok(PriceField::Close));
        assert_eq!(" High ".parse::<PriceField>(), Ok(PriceField::High));
        assert!("volume".parse::<PriceField>().is_err());

        assert_eq!("volume".parse::<SeriesField>(), Ok(SeriesField::Volume));
        assert_eq!(
            "low".parse::<SeriesField>(),
            Ok(SeriesField::Price(PriceField::Low))
        );
        assert_eq!(
            "adj_close".parse::<SeriesField>(),
            Err(UnknownField("adj_close".to_string()))
        );
    }

    #[test]
    fn test_default_is_close() {
        assert_eq!(PriceField::default(), PriceField::Close);
        assert_eq!(PriceField::default().to_string(), "close");
    }
}
