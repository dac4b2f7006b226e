// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Une seule vue : la sélection à gauche, les deux graphiques à droite
//
// ┌ Stock Tracker ───────────────────────────────────────────┐
// ├ Tickers ──────┬ Stock Price - close (AAPL) ──────────────┤
// │ [x] AAPL      │  ⠤⠒⠉⠉⠒⠤ ...                              │
// │ [ ] MSFT      ├ Trading Volume (AAPL) ───────────────────┤
// ├ Price ────────┤  ▁▃▅▇ ...                                │
// │ ( ) Open ...  │                                          │
// └───────────────┴──────────────────────────────────────────┘
//
// CONCEPTS RATATUI :
// 1. Layout imbriqués : vertical puis horizontal puis vertical
// 2. List : tickers avec le curseur en REVERSED
// 3. Le rendu ne modifie jamais App (&App)
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::chart::ZoomState;
use crate::models::PriceField;
use crate::ui::chart::{render_figure, series_color};

/// Dessine l'interface complète
pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Contenu
            Constraint::Length(3), // Footer
        ])
        .split(frame.size())
        .to_vec();

    render_header(frame, app, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(0)])
        .split(rows[1])
        .to_vec();

    render_sidebar(frame, app, columns[0]);
    render_charts(frame, app, columns[1]);
    render_footer(frame, app, rows[2]);
}

// ============================================================================
// Header
// ============================================================================

/// Titre + état du zoom
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Stock Tracker ")
        .title_alignment(Alignment::Center);

    let zoom = match app.controller().state() {
        ZoomState::Idle => Span::styled("Plage complète", Style::default().fg(Color::Gray)),
        ZoomState::Zoomed { start, end } => Span::styled(
            format!("Zoom : {} → {}", start, end),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    };

    let dataset = app.controller().dataset();
    let bounds = dataset
        .date_bounds()
        .map(|(min, max)| format!("{} lignes, {} → {}", dataset.len(), min, max))
        .unwrap_or_else(|| "Dataset vide".to_string());

    let mut spans = vec![
        Span::styled(bounds, Style::default().fg(Color::Green)),
        Span::raw("   "),
        zoom,
    ];

    // Options de rendu actives (--smoothing, --no-date-filter)
    let config = app.controller().config();
    if config.smoothing {
        spans.push(Span::styled("   lissage", Style::default().fg(Color::Magenta)));
    }
    if !config.date_filter_enabled {
        spans.push(Span::styled("   volume non filtré", Style::default().fg(Color::Magenta)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Sidebar : tickers et prix
// ============================================================================

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(6)])
        .split(area)
        .to_vec();

    render_ticker_list(frame, app, chunks[0]);
    render_field_selector(frame, app, chunks[1]);
}

/// Liste des tickers : [x] si sélectionné, couleur de sa série
fn render_ticker_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Tickers ");

    if app.tickers.is_empty() {
        let paragraph = Paragraph::new(Span::styled("Aucun ticker", Style::default().fg(Color::Gray)))
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .tickers
        .iter()
        .enumerate()
        .map(|(index, ticker)| {
            let position = app.selection.tickers.iter().position(|t| t == ticker);
            let (mark, style) = match position {
                Some(i) => ("[x]", Style::default().fg(series_color(i))),
                None => ("[ ]", Style::default().fg(Color::Gray)),
            };

            let mut style = style;
            if index == app.cursor {
                style = style.add_modifier(Modifier::BOLD).add_modifier(Modifier::REVERSED);
            }
            ListItem::new(format!(" {} {}", mark, ticker)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Boutons radio du prix affiché
fn render_field_selector(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Price ");

    let lines: Vec<Line> = PriceField::all()
        .into_iter()
        .map(|field| {
            if field == app.selection.price_field {
                Line::from(Span::styled(
                    format!(" (•) {}", field.label()),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!(" ( ) {}", field.label()))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// Graphiques
// ============================================================================

fn render_charts(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area)
        .to_vec();

    let price_message = if app.selection.is_empty() {
        "Sélectionnez un ticker"
    } else {
        "Aucune donnée pour cette sélection"
    };

    // Le graphique des prix garde toute la série, le zoom ne fait que cadrer
    render_figure(
        frame,
        &app.price_figure,
        app.selection.visible_range,
        price_message,
        chunks[0],
    );

    render_figure(
        frame,
        &app.volume_figure,
        None,
        "Zoomez sur le graphique des prix [+] pour afficher le volume",
        chunks[1],
    );
}

// ============================================================================
// Footer : raccourcis
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            key("[q]"),
            Span::raw(" Quit  "),
            key("[↑↓ / j k]"),
            Span::raw(" Navigate  "),
            key("[Space]"),
            Span::raw(" Select  "),
            key("[Tab]"),
            Span::raw(" Price  "),
            key("[+ -]"),
            Span::raw(" Zoom  "),
            key("[← → / h l]"),
            Span::raw(" Pan  "),
            key("[r]"),
            Span::raw(" Reset"),
        ])
    };

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
