// ============================================================================
// Tests d'intégration : du fichier CSV aux figures
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use stocktracker::app::App;
use stocktracker::chart::{ChartController, SeriesConfig, ViewportEvent, ZoomState, VOLUME_AXIS_TITLE};
use stocktracker::config::AppConfig;
use stocktracker::data::{load_csv, Dataset};
use stocktracker::models::{LineShape, PriceField, RenderKind};

const PRICES: &str = "\
date,ticker,open,high,low,close,volume
2020-01-01,AAPL,99,101,98,100,10
2020-01-02,AAPL,100,106,99,105,20
2020-01-01,MSFT,199,201,198,200,5
";

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
}

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn load_dataset() -> Arc<Dataset> {
    let file = write_csv(PRICES);
    Arc::new(load_csv(file.path()).unwrap())
}

#[test]
fn price_figure_for_one_ticker() {
    let controller = ChartController::new(load_dataset(), SeriesConfig::default());

    let figure = controller.on_ticker_or_field_change(&["AAPL"], PriceField::Close);

    assert_eq!(figure.title, "Stock Price - close (AAPL)");
    assert_eq!(figure.series.len(), 1);
    let series = &figure.series[0];
    assert_eq!(series.render_kind, RenderKind::Line);
    assert_eq!(series.x, vec![day(1), day(2)]);
    assert_eq!(series.y, vec![100.0, 105.0]);
}

#[test]
fn zoom_on_a_single_day_fixes_the_volume_range() {
    let mut controller = ChartController::new(load_dataset(), SeriesConfig::default());

    let event = ViewportEvent::range("2020-01-01", "2020-01-01");
    let figure = controller.on_viewport_change(&["AAPL"], &event);

    assert_eq!(controller.state(), ZoomState::Zoomed { start: day(1), end: day(1) });
    assert_eq!(figure.series.len(), 1);
    assert_eq!(figure.series[0].render_kind, RenderKind::Bar);
    assert_eq!(figure.series[0].x, vec![day(1)]);
    assert_eq!(figure.series[0].y, vec![10.0]);
    assert!(!figure.x_axis.autorange);
    assert_eq!(figure.x_axis.range, Some((day(1), day(1))));
    assert_eq!(figure.x_axis.title.as_deref(), Some(VOLUME_AXIS_TITLE));
}

#[test]
fn reset_event_shows_the_whole_volume() {
    let mut controller = ChartController::new(load_dataset(), SeriesConfig::default());

    controller.on_viewport_change(&["AAPL"], &ViewportEvent::range("2020-01-01", "2020-01-01"));
    let figure = controller.on_viewport_change(&["AAPL"], &ViewportEvent::reset());

    assert_eq!(controller.state(), ZoomState::Idle);
    assert_eq!(figure.series[0].x, vec![day(1), day(2)]);
    assert_eq!(figure.series[0].y, vec![10.0, 20.0]);
    assert!(figure.x_axis.autorange);
    assert_eq!(figure.x_axis.range, None);
}

#[test]
fn empty_selection_gives_empty_figure() {
    let controller = ChartController::new(load_dataset(), SeriesConfig::default());
    let none: Vec<String> = Vec::new();

    let figure = controller.on_ticker_or_field_change(&none, PriceField::Close);

    assert!(figure.series.is_empty());
    assert_eq!(figure.title, "Stock Price - close ()");
}

#[test]
fn same_inputs_give_same_figures() {
    let mut controller = ChartController::new(load_dataset(), SeriesConfig::default());
    let tickers = ["AAPL", "MSFT"];

    let first = controller.on_ticker_or_field_change(&tickers, PriceField::High);
    let second = controller.on_ticker_or_field_change(&tickers, PriceField::High);
    assert_eq!(first, second);

    let event = ViewportEvent::range("2020-01-01 12:00:00", "2020-01-02");
    let first = controller.on_viewport_change(&tickers, &event);
    let second = controller.on_viewport_change(&tickers, &event);
    assert_eq!(first, second);

    // Borne basse avec une heure : arrondie au jour suivant
    assert_eq!(controller.state(), ZoomState::Zoomed { start: day(2), end: day(2) });
    assert_eq!(first.title, "Trading Volume (AAPL & MSFT)");
}

#[test]
fn smoothing_only_changes_the_line_shape() {
    let dataset = load_dataset();
    let config = SeriesConfig { smoothing: true, date_filter_enabled: true };
    let mut controller = ChartController::new(dataset, config);

    let price = controller.on_ticker_or_field_change(&["AAPL"], PriceField::Close);
    assert_eq!(price.series[0].shape, LineShape::Spline);
    assert_eq!(price.series[0].y, vec![100.0, 105.0]);

    let volume = controller.on_viewport_change(&["AAPL"], &ViewportEvent::reset());
    assert_eq!(volume.series[0].shape, LineShape::Linear);
}

#[test]
fn app_starts_on_the_first_ticker_with_an_empty_volume_chart() {
    let config = AppConfig {
        data_path: PathBuf::from("prices.csv"),
        initial_tickers: Vec::new(),
        price_field: PriceField::Close,
        series: SeriesConfig::default(),
        volume_on_start: false,
        log_dir: PathBuf::from("./logs"),
        print_json: false,
    };

    let mut app = App::new(load_dataset(), &config);

    assert_eq!(app.selection.tickers, vec!["AAPL".to_string()]);
    assert_eq!(app.price_figure.series.len(), 1);
    assert!(app.volume_figure.series.is_empty());

    // Le premier zoom remplit le graphique de volume
    app.zoom_in();
    assert!(!app.volume_figure.series.is_empty());
}

#[test]
fn dataset_keeps_file_order() {
    let dataset = load_dataset();
    let tickers: Vec<&str> = dataset.rows().iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["AAPL", "AAPL", "MSFT"]);
    assert_eq!(dataset.rows()[1].date, day(2));
}

#[test]
fn figures_export_as_json() {
    let config = AppConfig {
        data_path: PathBuf::from("prices.csv"),
        initial_tickers: vec!["AAPL".to_string(), "MSFT".to_string()],
        price_field: PriceField::Close,
        series: SeriesConfig::default(),
        volume_on_start: true,
        log_dir: PathBuf::from("./logs"),
        print_json: true,
    };

    let json = App::new(load_dataset(), &config).figures_json();

    assert_eq!(json["price"]["title"], "Stock Price - close (AAPL & MSFT)");
    assert_eq!(json["price"]["data"][1]["name"], "MSFT");
    assert_eq!(json["price"]["data"][1]["y"][0], 200.0);
    assert_eq!(json["volume"]["data"][0]["type"], "bar");
    assert_eq!(json["volume"]["data"][0]["x"][1], "2020-01-02");
    assert_eq!(json["volume"]["xaxis"]["autorange"], true);
}

#[test]
fn invalid_csv_is_reported() {
    let file = write_csv("date,ticker,open,high,low,close\n2020-01-01,AAPL,1,1,1,1\n");

    let err = load_csv(file.path()).unwrap_err();
    assert!(err.to_string().contains("volume"));
}
