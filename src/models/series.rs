// ============================================================================
// Structures : Series et Figure
// ============================================================================
// Données prêtes à dessiner, indépendantes du widget de rendu
//
// CONCEPTS :
// - Series : une trace nommée (x = dates, y = valeurs)
// - Figure : un titre, des séries, la configuration des axes
// - Sérialisable en JSON (forme proche d'une figure plotly)
// ============================================================================

use chrono::NaiveDate;
use serde::Serialize;

/// Type de rendu d'une série (indication de présentation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    /// Ligne (prix)
    Line,
    /// Barres (volume)
    Bar,
}

/// Forme de la ligne : brute ou lissée à l'affichage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineShape {
    #[default]
    Linear,
    Spline,
}

/// Une série (x, y) nommée par son ticker
///
/// Invariant : `x.len() == y.len()`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Nom de la série (le ticker), utilisé comme légende
    pub name: String,

    /// Dates, dans l'ordre des lignes filtrées
    pub x: Vec<NaiveDate>,

    /// Valeurs du champ projeté, même ordre que x
    pub y: Vec<f64>,

    #[serde(rename = "type")]
    pub render_kind: RenderKind,

    pub shape: LineShape,
}

impl Series {
    /// Nombre de points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Itère sur les points (date, valeur)
    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Configuration de l'axe X
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub autorange: bool,

    /// Plage fixée (zoom), None en autorange pur
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<(NaiveDate, NaiveDate)>,
}

impl XAxis {
    /// Axe en autorange, sans plage fixée
    pub fn auto(title: Option<String>) -> Self {
        Self {
            title,
            autorange: true,
            range: None,
        }
    }
}

/// Configuration de l'axe Y
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxis {
    pub autorange: bool,
}

/// Une figure complète : titre, séries, axes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: String,

    #[serde(rename = "data")]
    pub series: Vec<Series>,

    #[serde(rename = "xaxis")]
    pub x_axis: XAxis,

    #[serde(rename = "yaxis")]
    pub y_axis: YAxis,
}

impl Figure {
    /// Plage de dates couverte par les séries, None si tout est vide
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.series
            .iter()
            .flat_map(|s| s.x.iter().copied())
            .fold(None, |acc, d| match acc {
                None => Some((d, d)),
                Some((min, max)) => Some((min.min(d), max.max(d))),
            })
    }
}

/// Concatène les tickers pour un titre : "AAPL & MSFT"
///
/// Une sélection vide donne une chaîne vide (cas dégénéré accepté).
pub fn join_tickers<S: AsRef<str>>(tickers: &[S]) -> String {
    tickers
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" & ")
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

    #[test]
    fn test_join_tickers() {
        assert_eq!(join_tickers(&["AAPL"]), "AAPL");
        assert_eq!(join_tickers(&["AAPL", "MSFT"]), "AAPL & MSFT");
        assert_eq!(join_tickers::<&str>(&[]), "");
    }

    #[test]
    fn test_figure_date_bounds() {
        let series = Series {
            name: "AAPL".to_string(),
            x: vec![day(1), day(2), day(3)],
            y: vec![105.0, 100.0, 110.0],
            render_kind: RenderKind::Line,
            shape: LineShape::Linear,
        };
        assert_eq!(series.len(), 3);

        let figure = Figure {
            title: String::new(),
            series: vec![series],
            x_axis: XAxis::auto(None),
            y_axis: YAxis { autorange: true },
        };
        assert_eq!(figure.date_bounds(), Some((day(1), day(3))));
    }

    #[test]
    fn test_figure_json_shape() {
        let figure = Figure {
            title: "Trading Volume (AAPL)".to_string(),
            series: vec![Series {
                name: "AAPL".to_string(),
                x: vec![day(1)],
                y: vec![10.0],
                render_kind: RenderKind::Bar,
                shape: LineShape::Linear,
            }],
            x_axis: XAxis {
                title: Some("Trading Volume by Date".to_string()),
                autorange: true,
                range: Some((day(1), day(1))),
            },
            y_axis: YAxis { autorange: true },
        };

        let json = serde_json::to_value(&figure).unwrap();
        assert_eq!(json["data"][0]["type"], "bar");
        assert_eq!(json["data"][0]["x"][0], "2020-01-01");
        assert_eq!(json["xaxis"]["range"][1], "2020-01-01");
        assert_eq!(json["yaxis"]["autorange"], true);
    }
}
