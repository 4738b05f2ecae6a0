//! Arguments de la ligne de commande (clap derive).

use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_BASE_URL;

/// Affiche les N premières cryptomonnaies par capitalisation (CoinMarketCap)
#[derive(Debug, Parser)]
#[command(name = "cryptofetch", version, about, long_about = None)]
pub struct Args {
    /// Nombre de cryptomonnaies à récupérer
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=5000))]
    pub limit: u32,

    /// Devise de conversion des prix (ex: USD, EUR, BTC)
    #[arg(short, long, default_value = "USD")]
    pub convert: String,

    /// Clé API CoinMarketCap (sinon lue dans COINMARKETCAP_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// URL de base de l'API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Fichier .env à charger avant la lecture de l'environnement
    #[arg(long)]
    pub env_file: Option<PathBuf>,
}
