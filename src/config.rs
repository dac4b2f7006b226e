// ============================================================================
// Configuration : arguments de ligne de commande
// ============================================================================
// CONCEPT : Clap derive
// - La struct Cli décrit les arguments, clap génère le parser et --help
// - AppConfig est la forme validée, utilisée par le reste du programme
// ============================================================================

use std::path::PathBuf;

use clap::Parser;

use crate::chart::SeriesConfig;
use crate::models::PriceField;

/// Nom de l'application (répertoire de logs, filtre RUST_LOG par défaut)
pub const APP_NAME: &str = "stocktracker";

/// Arguments de la ligne de commande
#[derive(Debug, Clone, Parser)]
#[command(name = APP_NAME, version, about = "Stock Tracker : prix et volumes historiques depuis un CSV")]
pub struct Cli {
    /// Fichier CSV (colonnes date,ticker,open,high,low,close,volume)
    #[arg(long, default_value = "prices.csv")]
    pub data: PathBuf,

    /// Tickers sélectionnés au démarrage, séparés par des virgules,
    /// écrits comme dans le CSV (par défaut : le premier ticker du fichier)
    #[arg(long, value_delimiter = ',')]
    pub tickers: Vec<String>,

    /// Prix affiché au démarrage
    #[arg(long, default_value = "close")]
    pub field: PriceField,

    /// Lignes de prix lissées
    #[arg(long)]
    pub smoothing: bool,

    /// Le volume ne suit pas le zoom du graphique des prix
    #[arg(long)]
    pub no_date_filter: bool,

    /// Affiche le volume sur toute la plage dès le démarrage
    #[arg(long)]
    pub volume_on_start: bool,

    /// Répertoire des fichiers de logs
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Écrit les deux figures en JSON sur stdout et quitte (pas de TUI)
    #[arg(long)]
    pub print_json: bool,
}

/// Configuration validée de l'application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub initial_tickers: Vec<String>,
    pub price_field: PriceField,
    pub series: SeriesConfig,
    pub volume_on_start: bool,
    pub log_dir: PathBuf,
    pub print_json: bool,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        let initial_tickers = cli
            .tickers
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        Self {
            data_path: cli.data,
            initial_tickers,
            price_field: cli.field,
            series: SeriesConfig {
                smoothing: cli.smoothing,
                date_filter_enabled: !cli.no_date_filter,
            },
            volume_on_start: cli.volume_on_start,
            log_dir: cli.log_dir.unwrap_or_else(default_log_dir),
            print_json: cli.print_json,
        }
    }
}

/// Répertoire de logs par défaut
///
/// - Linux : ~/.local/share/stocktracker/logs
/// - macOS : ~/Library/Application Support/stocktracker/logs
/// - Sinon : ./logs
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_NAME).join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

// ============================================================================
// Tests unitaires
// ============================================================================
