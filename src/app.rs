// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Composition : App possède le contrôleur, la sélection et le viewport
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Après chaque modification, les figures sont recalculées en entier
// ============================================================================

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::chart::{ChartController, Viewport};
use crate::config::AppConfig;
use crate::data::Dataset;
use crate::models::{Figure, PriceField, SelectionState};

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// CONCEPT : Two-step quit pour éviter les sorties accidentelles
    /// - Première pression de 'q' : confirm_quit = true
    /// - Deuxième pression de 'q' : running = false (quit réel)
    /// - N'importe quelle autre touche : confirm_quit = false (annulation)
    pub confirm_quit: bool,

    /// Tickers disponibles (liste de gauche)
    pub tickers: Vec<String>,

    /// Position du curseur dans la liste des tickers
    pub cursor: usize,

    /// Tickers et prix sélectionnés
    pub selection: SelectionState,

    /// Fenêtre de zoom du graphique des prix
    pub viewport: Viewport,

    /// Figure du graphique des prix (toujours sur toute la plage)
    pub price_figure: Figure,

    /// Figure du graphique de volume
    pub volume_figure: Figure,

    /// Vrai dès qu'un événement de viewport a été publié
    /// (avant cela, le graphique de volume reste vide)
    volume_started: bool,

    controller: ChartController,
}

impl App {
    /// Crée l'application à partir du dataset chargé et de la configuration
    pub fn new(dataset: Arc<Dataset>, config: &AppConfig) -> Self {
        let tickers = dataset.tickers().to_vec();

        // Sélection initiale : celle demandée, sinon le premier ticker du fichier
        let initial = if config.initial_tickers.is_empty() {
            tickers.iter().take(1).cloned().collect()
        } else {
            for ticker in &config.initial_tickers {
                if !dataset.has_ticker(ticker) {
                    warn!(ticker = %ticker, "Requested ticker not found in dataset");
                }
            }
            config.initial_tickers.clone()
        };
        let selection = SelectionState::new(initial, config.price_field);

        let controller = ChartController::new(dataset.clone(), config.series);
        let viewport = Viewport::new(dataset.dates_for(&selection.tickers));

        let price_figure = controller.on_ticker_or_field_change(&selection.tickers, selection.price_field);
        let volume_figure = controller.initial_volume_figure(&selection.tickers);

        let mut app = Self {
            running: true,
            confirm_quit: false,
            tickers,
            cursor: 0,
            selection,
            viewport,
            price_figure,
            volume_figure,
            volume_started: config.volume_on_start,
            controller,
        };

        if app.volume_started {
            app.refresh_volume();
        }
        app
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Demande la confirmation de quitter
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn controller(&self) -> &ChartController {
        &self.controller
    }

    /// Les deux figures courantes, pour l'export JSON (--print-json)
    ///
    /// Format : `{"price": Figure, "volume": Figure}`
    pub fn figures_json(&self) -> serde_json::Value {
        serde_json::json!({
            "price": self.price_figure,
            "volume": self.volume_figure,
        })
    }

    // ========================================================================
    // Liste des tickers
    // ========================================================================

    /// Navigue vers le haut dans la liste des tickers
    ///
    /// CONCEPT RUST : Saturating arithmetic
    /// - saturating_sub() ne descend pas en dessous de 0
    pub fn navigate_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Navigue vers le bas dans la liste des tickers
    pub fn navigate_down(&mut self) {
        let max_index = self.tickers.len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(max_index);
    }

    /// Ticker sous le curseur
    pub fn ticker_under_cursor(&self) -> Option<&str> {
        self.tickers.get(self.cursor).map(String::as_str)
    }

    /// Sélectionne / désélectionne le ticker sous le curseur
    pub fn toggle_ticker(&mut self) {
        let Some(ticker) = self.ticker_under_cursor().map(str::to_string) else {
            return;
        };
        let selected = self.selection.toggle(&ticker);
        info!(ticker = %ticker, selected, "Ticker selection changed");

        self.viewport
            .set_dates(self.controller.dataset().dates_for(&self.selection.tickers));
        self.selection.visible_range = self.viewport.visible_range();

        self.refresh_price();
        self.refresh_volume();
    }

    // ========================================================================
    // Prix affiché
    // ========================================================================

    /// Passe au prix suivant (open → high → low → close)
    pub fn next_field(&mut self) {
        self.set_field(self.selection.price_field.next());
    }

    /// Passe au prix précédent
    pub fn previous_field(&mut self) {
        self.set_field(self.selection.price_field.previous());
    }

    fn set_field(&mut self, field: PriceField) {
        info!(field = %field, "Price field changed");
        self.selection.price_field = field;
        self.refresh_price();
    }

    // ========================================================================
    // Zoom du graphique des prix
    // ========================================================================

    pub fn zoom_in(&mut self) {
        if self.viewport.zoom_in() {
            self.publish_viewport();
        }
    }

    pub fn zoom_out(&mut self) {
        if self.viewport.zoom_out() {
            self.publish_viewport();
        }
    }

    pub fn pan_left(&mut self) {
        if self.viewport.pan_left() {
            self.publish_viewport();
        }
    }

    pub fn pan_right(&mut self) {
        if self.viewport.pan_right() {
            self.publish_viewport();
        }
    }

    /// Autoscale : publie un événement sans bornes
    pub fn reset_zoom(&mut self) {
        self.viewport.reset();
        self.publish_viewport();
    }

    /// Publie la plage visible au contrôleur (comme un graphique interactif)
    fn publish_viewport(&mut self) {
        self.selection.visible_range = self.viewport.visible_range();
        self.volume_started = true;
        debug!(range = ?self.selection.visible_range, "Publishing viewport event");
        self.refresh_volume();
    }

    // ========================================================================
    // Recalcul des figures
    // ========================================================================

    fn refresh_price(&mut self) {
        self.price_figure = self
            .controller
            .on_ticker_or_field_change(&self.selection.tickers, self.selection.price_field);
    }

    fn refresh_volume(&mut self) {
        self.volume_figure = if self.volume_started {
            let event = self.viewport.range_event();
            self.controller.on_viewport_change(&self.selection.tickers, &event)
        } else {
            self.controller.initial_volume_figure(&self.selection.tickers)
        };
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{SeriesConfig, ZoomState};
    use crate::models::PriceRow;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    fn dataset() -> Arc<Dataset> {
        let mut rows = Vec::new();
        for d in 1..=8 {
            rows.push(PriceRow::new("AAPL", day(d), 1.0, 1.0, 1.0, 100.0 + d as f64, d as u64 * 10));
            rows.push(PriceRow::new("MSFT", day(d), 1.0, 1.0, 1.0, 200.0 + d as f64, d as u64));
        }
        Arc::new(Dataset::from_rows(rows))
    }

    fn config() -> AppConfig {
        AppConfig {
            data_path: PathBuf::from("prices.csv"),
            initial_tickers: Vec::new(),
            price_field: PriceField::Close,
            series: SeriesConfig::default(),
            volume_on_start: false,
            log_dir: PathBuf::from("./logs"),
            print_json: false,
        }
    }

    #[test]
    fn test_app_creation() {
        let app = App::new(dataset(), &config());
        assert!(app.is_running());
        assert_eq!(app.tickers, vec!["AAPL", "MSFT"]);
        assert_eq!(app.selection.tickers, vec!["AAPL"]);
        assert_eq!(app.price_figure.title, "Stock Price - close (AAPL)");
        // Pas encore d'événement de viewport : volume vide
        assert!(app.volume_figure.series.is_empty());
    }

    #[test]
    fn test_volume_on_start() {
        let config = AppConfig {
            volume_on_start: true,
            ..config()
        };
        let app = App::new(dataset(), &config);
        assert_eq!(app.volume_figure.series.len(), 1);
        assert_eq!(app.volume_figure.series[0].len(), 8);
    }

    #[test]
    fn test_app_quit() {
        let mut app = App::new(dataset(), &config());
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());
        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_navigation_and_toggle() {
        let mut app = App::new(dataset(), &config());

        app.navigate_down();
        app.navigate_down(); // Reste sur le dernier
        assert_eq!(app.ticker_under_cursor(), Some("MSFT"));

        app.toggle_ticker();
        assert_eq!(app.selection.tickers, vec!["AAPL", "MSFT"]);
        assert_eq!(app.price_figure.series.len(), 2);
        assert_eq!(app.price_figure.title, "Stock Price - close (AAPL & MSFT)");

        app.navigate_up();
        app.toggle_ticker();
        assert_eq!(app.selection.tickers, vec!["MSFT"]);
    }

    #[test]
    fn test_zoom_updates_volume_only() {
        let mut app = App::new(dataset(), &config());
        let price_before = app.price_figure.clone();

        app.zoom_in();
        assert_eq!(app.selection.visible_range, Some((day(3), day(6))));
        assert_eq!(
            app.controller().state(),
            ZoomState::Zoomed { start: day(3), end: day(6) }
        );
        assert_eq!(app.volume_figure.series[0].y, vec![30.0, 40.0, 50.0, 60.0]);
        assert_eq!(app.price_figure, price_before);

        app.reset_zoom();
        assert_eq!(app.controller().state(), ZoomState::Idle);
        assert_eq!(app.volume_figure.series[0].len(), 8);
        assert!(app.volume_figure.x_axis.autorange);
    }

    #[test]
    fn test_toggle_keeps_zoom() {
        let mut app = App::new(dataset(), &config());
        app.zoom_in();

        app.navigate_down();
        app.toggle_ticker();
        assert_eq!(app.volume_figure.series.len(), 2);
        assert_eq!(app.volume_figure.series[1].x, vec![day(3), day(4), day(5), day(6)]);
    }

    #[test]
    fn test_figures_json() {
        let config = AppConfig {
            volume_on_start: true,
            ..config()
        };
        let json = App::new(dataset(), &config).figures_json();

        assert_eq!(json["price"]["title"], "Stock Price - close (AAPL)");
        assert_eq!(json["price"]["data"][0]["type"], "line");
        assert_eq!(json["price"]["data"][0]["x"][0], "2020-01-01");
        assert_eq!(json["price"]["xaxis"]["autorange"], true);

        assert_eq!(json["volume"]["title"], "Trading Volume (AAPL)");
        assert_eq!(json["volume"]["data"][0]["type"], "bar");
        assert_eq!(json["volume"]["data"][0]["y"][7], 80.0);
        assert_eq!(json["volume"]["xaxis"]["title"], "Trading Volume by Date");
        assert!(json["volume"]["xaxis"].get("range").is_none());
    }

    #[test]
    fn test_figures_json_before_zoom() {
        let json = App::new(dataset(), &config()).figures_json();
        assert_eq!(json["volume"]["data"], serde_json::json!([]));
    }

    #[test]
    fn test_field_cycle() {
        let mut app = App::new(dataset(), &config());
        app.next_field();
        assert_eq!(app.selection.price_field, PriceField::Open);
        assert_eq!(app.price_figure.title, "Stock Price - open (AAPL)");
        app.previous_field();
        assert_eq!(app.selection.price_field, PriceField::Close);
    }
}
