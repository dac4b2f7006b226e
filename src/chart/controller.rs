// ============================================================================
// Chart Controller
// ============================================================================
// Recalcule les deux figures à partir du Dataset et de la sélection courante
//
// CONCEPT : State Machine
// - Idle : pas de zoom appliqué au volume (toute la plage, autorange)
// - Zoomed : le volume est filtré sur la plage visible des prix
// - Chaque événement recalcule tout : le dernier événement gagne
//
//   Idle ──(viewport avec 2 bornes valides)──▶ Zoomed
//   Zoomed ──(viewport sans borne / borne illisible)──▶ Idle
// ============================================================================

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::chart::series::{to_series, SeriesConfig};
use crate::data::{filter_by_date, Dataset};
use crate::models::{join_tickers, Figure, PriceField, SeriesField, XAxis, YAxis};

/// Titre de l'axe X du graphique de volume
pub const VOLUME_AXIS_TITLE: &str = "Trading Volume by Date";

/// Formats acceptés pour les bornes d'un événement de viewport
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// État du graphique de volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomState {
    /// Toute la plage de dates, autorange
    #[default]
    Idle,
    /// Plage fixée par le zoom du graphique des prix
    Zoomed { start: NaiveDate, end: NaiveDate },
}

/// Événement de changement de plage visible émis par le graphique des prix
///
/// Une borne absente signifie "reset / autoscale".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewportEvent {
    pub lower: Option<String>,
    pub upper: Option<String>,
}

impl ViewportEvent {
    /// Événement de zoom avec les deux bornes
    pub fn range(lower: impl Into<String>, upper: impl Into<String>) -> Self {
        Self {
            lower: Some(lower.into()),
            upper: Some(upper.into()),
        }
    }

    /// Événement de reset (aucune borne)
    pub fn reset() -> Self {
        Self::default()
    }

    /// Bornes parsées, None si une borne manque ou est illisible
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let lower = parse_lower_bound(self.lower.as_deref()?)?;
        let upper = parse_upper_bound(self.upper.as_deref()?)?;
        Some((lower, upper))
    }
}

impl<S: Into<String>> From<Option<(S, S)>> for ViewportEvent {
    fn from(range: Option<(S, S)>) -> Self {
        match range {
            Some((lower, upper)) => Self::range(lower, upper),
            None => Self::reset(),
        }
    }
}

/// Parse une borne "YYYY-MM-DD" ou "YYYY-MM-DD HH:MM[:SS[.fff]]"
fn parse_bound(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Borne basse : un horodatage après minuit exclut le jour lui-même
///
/// Une fenêtre contenue dans un seul jour donne donc start > end :
/// le volume est vide et la plage fixée reste telle quelle.
fn parse_lower_bound(value: &str) -> Option<NaiveDate> {
    let datetime = parse_bound(value)?;
    if datetime.time() == NaiveTime::MIN {
        Some(datetime.date())
    } else {
        datetime.date().succ_opt()
    }
}

/// Borne haute : tout horodatage du jour inclut le jour
fn parse_upper_bound(value: &str) -> Option<NaiveDate> {
    parse_bound(value).map(|datetime| datetime.date())
}

/// Contrôleur des deux graphiques (prix et volume)
///
/// CONCEPT RUST : Arc<Dataset>
/// - Le dataset est injecté, jamais global
/// - Plusieurs contrôleurs (sessions) peuvent partager le même Arc
#[derive(Debug, Clone)]
pub struct ChartController {
    dataset: Arc<Dataset>,
    config: SeriesConfig,
    state: ZoomState,
}

impl ChartController {
    pub fn new(dataset: Arc<Dataset>, config: SeriesConfig) -> Self {
        Self {
            dataset,
            config,
            state: ZoomState::Idle,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    /// État courant du graphique de volume
    pub fn state(&self) -> ZoomState {
        self.state
    }

    /// Figure des prix : une ligne par ticker, sur tout le dataset
    ///
    /// Sans état : ne dépend que du dataset et des arguments, le zoom
    /// n'est jamais appliqué ici.
    pub fn on_ticker_or_field_change<S: AsRef<str>>(&self, tickers: &[S], field: PriceField) -> Figure {
        debug!(tickers = tickers.len(), field = %field, "Rebuilding price figure");

        let series = tickers
            .iter()
            .map(|ticker| {
                let ticker = ticker.as_ref();
                let rows = filter_by_date(&self.dataset, ticker, None, None);
                to_series(&rows, ticker, SeriesField::Price(field), &self.config)
            })
            .collect();

        Figure {
            title: format!("Stock Price - {} ({})", field, join_tickers(tickers)),
            series,
            x_axis: XAxis::auto(None),
            y_axis: YAxis { autorange: true },
        }
    }

    /// Figure de volume avant tout événement de viewport : aucune barre
    pub fn initial_volume_figure<S: AsRef<str>>(&self, tickers: &[S]) -> Figure {
        Figure {
            title: volume_title(tickers),
            series: Vec::new(),
            x_axis: XAxis::auto(None),
            y_axis: YAxis { autorange: true },
        }
    }

    /// Traite un événement de viewport et retourne la figure de volume
    pub fn on_viewport_change<S: AsRef<str>>(&mut self, tickers: &[S], event: &ViewportEvent) -> Figure {
        let bounds = if self.config.date_filter_enabled {
            event.bounds()
        } else {
            None
        };

        self.state = match bounds {
            Some((start, end)) => ZoomState::Zoomed { start, end },
            None => ZoomState::Idle,
        };
        debug!(state = ?self.state, ?event, "Viewport changed");

        self.volume_figure(tickers)
    }

    /// Figure de volume pour l'état courant
    pub fn volume_figure<S: AsRef<str>>(&self, tickers: &[S]) -> Figure {
        let (start, end, x_axis) = match self.state {
            ZoomState::Zoomed { start, end } => (
                Some(start),
                Some(end),
                XAxis {
                    title: Some(VOLUME_AXIS_TITLE.to_string()),
                    autorange: false,
                    range: Some((start, end)),
                },
            ),
            ZoomState::Idle => (None, None, XAxis::auto(Some(VOLUME_AXIS_TITLE.to_string()))),
        };

        let series = tickers
            .iter()
            .map(|ticker| {
                let ticker = ticker.as_ref();
                let rows = filter_by_date(&self.dataset, ticker, start, end);
                to_series(&rows, ticker, SeriesField::Volume, &self.config)
            })
            .collect();

        Figure {
            title: volume_title(tickers),
            series,
            x_axis,
            y_axis: YAxis { autorange: true },
        }
    }
}

fn volume_title<S: AsRef<str>>(tickers: &[S]) -> String {
    format!("Trading Volume ({})", join_tickers(tickers))
}

// ============================================================================
// Tests unitaires
// ============================================================================
