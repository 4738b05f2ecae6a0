// ============================================================================
// CryptoFetch - Point d'entrée
// ============================================================================
// Récupère les N premières cryptomonnaies depuis CoinMarketCap et les
// affiche sous forme de tableau sur stdout.
//
// Déroulé :
// 1. Logging vers fichier (stdout est réservé au tableau)
// 2. Chargement du .env puis résolution de la configuration
// 3. Un seul appel HTTP
// 4. Formatage + affichage, ou message d'erreur
// ============================================================================

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use cryptofetch::api::CoinMarketCapClient;
use cryptofetch::cli::Args;
use cryptofetch::config::{load_env_file, Config, API_KEY_ENV};
use cryptofetch::display::{render_report, render_summary};
use cryptofetch::models::FormattedRow;
use cryptofetch::FetchError;

// ============================================================================
// Initialisation du logging
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans :
/// - Linux : ~/.local/share/cryptofetch/logs/cryptofetch.log
/// - macOS : ~/Library/Application Support/cryptofetch/logs/cryptofetch.log
/// - Windows : C:\Users\<user>\AppData\Local\cryptofetch\logs\cryptofetch.log
/// - sinon : ./logs/cryptofetch.log
///
/// # Utilisation
/// ```bash
/// RUST_LOG=debug cryptofetch --limit 20
/// RUST_LOG=cryptofetch=trace cryptofetch
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = dirs::data_local_dir()
        .map(|dir| dir.join("cryptofetch").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("./logs"));

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "cryptofetch.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cryptofetch=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("CryptoFetch starting up");

    // CONCEPT RUST : Exécuter du code async dans du code sync
    // - Un seul appel réseau : un runtime courant suffit
    // - .block_on() attend la fin de la future
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            println!("Error: failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args)) {
        Ok(()) => {
            info!("CryptoFetch finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "CryptoFetch failed");
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Exécute une récupération complète
///
/// Rien n'est affiché du tableau tant que toutes les lignes ne sont pas
/// formatées : en cas d'erreur, aucun résultat partiel.
async fn run(args: Args) -> std::result::Result<(), FetchError> {
    load_env_file(args.env_file.as_deref());

    let config = Config::from_args(args)?;
    let client = CoinMarketCapClient::from_config(&config)?;

    println!("Fetching top {} cryptocurrencies...", config.limit);
    let rows = client.fetch_listings(config.limit, &config.convert).await?;

    let formatted: Vec<FormattedRow> = rows.iter().map(FormattedRow::from).collect();
    print!("{}", render_report(&formatted));
    print!("{}", render_summary(formatted.len()));
    Ok(())
}

/// Affiche un message adapté au type d'erreur
fn report_error(err: &FetchError) {
    if err.is_configuration() {
        println!("Configuration Error: {}", err);
        println!("\nTo use this program, you need a CoinMarketCap API key.");
        println!("1. Get your free API key from: https://coinmarketcap.com/api/");
        println!(
            "2. Set it as an environment variable: export {}='your-api-key'",
            API_KEY_ENV
        );
        println!("3. Or create a .env file with: {}=your-api-key", API_KEY_ENV);
    } else {
        println!("Error: {}", err);
    }
}
