// ============================================================================
// Series Builder
// ============================================================================
// Projette un sous-ensemble de lignes sur un champ : x = dates, y = valeurs
//
// CONCEPT : Une seule configuration au lieu de trois variantes
// - smoothing : lignes lissées à l'affichage (les valeurs ne changent pas)
// - date_filter_enabled : le volume suit le zoom du graphique des prix
// ============================================================================

use serde::Serialize;

use crate::models::{LineShape, PriceRow, RenderKind, Series, SeriesField};

/// Options de construction des séries et du contrôleur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesConfig {
    /// Lignes de prix dessinées lissées (spline)
    pub smoothing: bool,

    /// Le graphique de volume suit la plage visible du graphique des prix
    pub date_filter_enabled: bool,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            smoothing: false,
            date_filter_enabled: true,
        }
    }
}

/// Construit la série d'un ticker à partir de ses lignes filtrées
///
/// CONCEPT RUST : Iterator + unzip implicite
/// - Deux map() sur le même slice gardent x et y alignés
/// - len(x) == len(y) == len(subset) par construction
pub fn to_series(
    subset: &[&PriceRow],
    ticker: &str,
    field: SeriesField,
    config: &SeriesConfig,
) -> Series {
    let render_kind = if field.is_volume() {
        RenderKind::Bar
    } else {
        RenderKind::Line
    };

    let shape = match render_kind {
        RenderKind::Line if config.smoothing => LineShape::Spline,
        _ => LineShape::Linear,
    };

    Series {
        name: ticker.to_string(),
        x: subset.iter().map(|row| row.date).collect(),
        y: subset.iter().map(|row| row.value(field)).collect(),
        render_kind,
        shape,
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
