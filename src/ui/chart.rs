// ============================================================================
// Chart - Rendu d'une Figure
// ============================================================================
// Dessine une Figure (prix en lignes, volume en barres) avec le widget Chart
//
// CONCEPTS RUST :
// 1. Iterator chaining : transformer les séries en points (x, y)
// 2. Lifetimes : les Dataset ratatui empruntent les points
// 3. Fonctions pures testables (bornes, lissage, format des labels)
//
// CONCEPTS RATATUI :
// 1. Chart widget : plusieurs Dataset sur les mêmes axes
// 2. GraphType::Line : les barres de volume sont des segments verticaux
// 3. Axis : bornes et labels en dates
// ============================================================================

use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::models::{Figure, LineShape, RenderKind, Series, DATE_FORMAT};

/// Couleurs des séries, dans l'ordre de sélection
const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
];

/// Couleur d'une série selon sa position
pub fn series_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Convertit une date en abscisse (jours depuis l'an 1)
fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Inverse de date_to_x pour les labels
fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

// ============================================================================
// Fonction principale de rendu
// ============================================================================

/// Dessine une figure dans la zone donnée
///
/// `view_range` : plage visible imposée par le zoom (graphique des prix).
/// Une plage fixée dans la figure (volume zoomé) est prioritaire.
pub fn render_figure(
    frame: &mut Frame,
    figure: &Figure,
    view_range: Option<(NaiveDate, NaiveDate)>,
    empty_message: &str,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(format!(" {} ", figure.title));

    let Some((x_min, x_max)) = figure.x_axis.range.or(view_range).or_else(|| figure.date_bounds()) else {
        render_no_data(frame, block, empty_message, area);
        return;
    };

    // Points visibles de chaque série
    // CONCEPT RUST : Vec<Vec<_>> qui vit plus longtemps que les Dataset
    let points: Vec<Vec<(f64, f64)>> = figure
        .series
        .iter()
        .map(|series| {
            let points = visible_points(series, x_min, x_max);
            match series.render_kind {
                RenderKind::Bar => bar_segments(&points),
                RenderKind::Line => points,
            }
        })
        .collect();

    let Some((y_min, y_max)) = y_bounds(&points, figure.series.iter().any(|s| s.render_kind == RenderKind::Bar)) else {
        render_no_data(frame, block, empty_message, area);
        return;
    };

    let datasets: Vec<Dataset> = figure
        .series
        .iter()
        .zip(points.iter())
        .enumerate()
        .map(|(i, (series, points))| {
            Dataset::default()
                .name(series.name.as_str())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series_color(i)))
                .data(points)
        })
        .collect();

    let x_lo = date_to_x(x_min);
    // Une seule date : on élargit pour que l'axe ait une largeur
    let x_hi = date_to_x(x_max).max(x_lo + 1.0);

    let x_axis = Axis::default()
        .title(figure.x_axis.title.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Gray))
        .bounds([x_lo, x_hi])
        .labels(date_labels(x_lo, x_hi));

    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format_value(y_min)),
            Span::raw(format_value((y_min + y_max) / 2.0)),
            Span::raw(format_value(y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

// ============================================================================
// Calculs (purs, testés)
// ============================================================================

/// Points (x, y) d'une série dans [x_min, x_max], lissés si demandé
pub fn visible_points(series: &Series, x_min: NaiveDate, x_max: NaiveDate) -> Vec<(f64, f64)> {
    let points: Vec<(f64, f64)> = series
        .points()
        .filter(|(date, _)| *date >= x_min && *date <= x_max)
        .map(|(date, value)| (date_to_x(date), value))
        .collect();

    match series.shape {
        LineShape::Spline => smooth_points(&points),
        LineShape::Linear => points,
    }
}

/// Barres dessinées en ligne : 0 → valeur → 0 pour chaque point
///
/// Les retours à 0 entre deux barres forment la ligne de base.
pub fn bar_segments(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    points
        .iter()
        .flat_map(|&(x, y)| [(x, 0.0), (x, y), (x, 0.0)])
        .collect()
}

/// Moyenne mobile centrée sur 3 points (les extrémités sont conservées)
pub fn smooth_points(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut smoothed = Vec::with_capacity(points.len());
    smoothed.push(points[0]);
    for window in points.windows(3) {
        let y = (window[0].1 + window[1].1 + window[2].1) / 3.0;
        smoothed.push((window[1].0, y));
    }
    smoothed.push(points[points.len() - 1]);
    smoothed
}

/// Bornes Y avec une marge de 5% ; les barres partent de 0
pub fn y_bounds(points: &[Vec<(f64, f64)>], has_bars: bool) -> Option<(f64, f64)> {
    let (min, max) = points
        .iter()
        .flatten()
        .fold(None, |acc: Option<(f64, f64)>, &(_, y)| match acc {
            None => Some((y, y)),
            Some((min, max)) => Some((min.min(y), max.max(y))),
        })?;

    if has_bars {
        return Some((0.0, if max > 0.0 { max * 1.05 } else { 1.0 }));
    }

    let margin = if max > min { (max - min) * 0.05 } else { max.abs().max(1.0) * 0.05 };
    Some(((min - margin).max(0.0), max + margin))
}

/// Trois labels de dates : début, milieu, fin
fn date_labels(x_lo: f64, x_hi: f64) -> Vec<Span<'static>> {
    [x_lo, (x_lo + x_hi) / 2.0, x_hi]
        .into_iter()
        .map(|x| {
            let label = x_to_date(x)
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default();
            Span::raw(label)
        })
        .collect()
}

/// Format compact d'une valeur d'axe (prix ou volume)
pub fn format_value(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("{:.1}G", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{:.2}", value)
    }
}

// ============================================================================
// Helper : Message quand pas de données
// ============================================================================

/// Affiche un message à la place du graphique
fn render_no_data(frame: &mut Frame, block: Block, message: &str, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================
