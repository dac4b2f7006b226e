// ============================================================================
// Stock Tracker - Point d'entrée
// ============================================================================
// Charge le CSV de prix puis lance le tableau de bord TUI
// (ou imprime les figures en JSON avec --print-json)
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. Arc : le dataset est chargé une fois puis partagé en lecture seule
// 4. Cleanup : restauration du terminal même en cas d'erreur
// ============================================================================

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use stocktracker::app::App;
use stocktracker::config::{AppConfig, Cli, APP_NAME};
use stocktracker::data::load_csv;
use stocktracker::ui::events::{
    is_down_event, is_next_field_event, is_pan_left_event, is_pan_right_event,
    is_previous_field_event, is_quit_event, is_reset_event, is_toggle_event, is_up_event,
    is_zoom_in_event, is_zoom_out_event,
};
use stocktracker::ui::{render, Event, EventHandler};

// ============================================================================
// Logging
// ============================================================================

/// Initialise le logging dans un fichier à rotation quotidienne
///
/// Le TUI occupe stdout : les logs vont uniquement dans le fichier.
fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    // Format : stocktracker.log.2024-01-15
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, format!("{APP_NAME}.log"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            // RUST_LOG prioritaire, sinon debug pour nous et info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{APP_NAME}=debug,info").into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let config = AppConfig::from(Cli::parse());

    init_logging(&config.log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(data = ?config.data_path, "Stock Tracker starting up");

    // Pas de CSV : rien à afficher, on s'arrête avec l'erreur
    let dataset = load_csv(&config.data_path)
        .with_context(|| format!("Impossible de charger {}", config.data_path.display()))?;
    let dataset = Arc::new(dataset);

    let app = App::new(dataset, &config);

    if config.print_json {
        return print_figures(&app);
    }

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, app, &events);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    if let Err(ref e) = result {
        error!(error = ?e, "Application error");
        eprintln!("Error: {}", e);
    } else {
        info!("Stock Tracker shutting down normally");
    }

    result
}

/// Imprime les deux figures initiales en JSON sur stdout
fn print_figures(app: &App) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&app.figures_json())?);
    info!("Figures printed as JSON");
    Ok(())
}

// ============================================================================
// Event loop
// ============================================================================

/// Boucle principale : render puis attente d'un événement
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|frame| render(frame, &app))?;

        let event = events.next()?;
        handle_event(&mut app, &event);
    }
    Ok(())
}

/// Applique un événement clavier à l'état de l'application
fn handle_event(app: &mut App, event: &Event) {
    if matches!(event, Event::Tick) {
        return;
    }

    // Two-step quit : 'q' puis 'q', toute autre touche annule
    if app.is_awaiting_quit_confirmation() {
        if is_quit_event(event) {
            info!("User confirmed quit");
            app.quit();
        } else {
            debug!("Quit cancelled");
            app.cancel_quit();
        }
        return;
    }

    match event {
        e if is_quit_event(e) => {
            debug!("Quit requested, awaiting confirmation");
            app.request_quit();
        }
        e if is_up_event(e) => app.navigate_up(),
        e if is_down_event(e) => app.navigate_down(),
        e if is_toggle_event(e) => app.toggle_ticker(),
        e if is_next_field_event(e) => app.next_field(),
        e if is_previous_field_event(e) => app.previous_field(),
        e if is_zoom_in_event(e) => app.zoom_in(),
        e if is_zoom_out_event(e) => app.zoom_out(),
        e if is_pan_left_event(e) => app.pan_left(),
        e if is_pan_right_event(e) => app.pan_right(),
        e if is_reset_event(e) => app.reset_zoom(),
        _ => {}
    }
}

// ============================================================================
// Terminal
// ============================================================================

/// Passe le terminal en raw mode sur l'écran alternatif
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
