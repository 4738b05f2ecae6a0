// ============================================================================
// Module : config
// ============================================================================
// Résolution unique de la configuration au démarrage
//
// Ordre de résolution de la clé API :
// 1. argument explicite (--api-key)
// 2. variable d'environnement COINMARKETCAP_API_KEY
//    (éventuellement chargée depuis un fichier .env au préalable)
//
// Le Config résolu est une donnée simple, injectée dans le client HTTP.
// ============================================================================

use std::fmt;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::cli::Args;
use crate::error::{FetchError, Result};

/// Variable d'environnement contenant la clé API
pub const API_KEY_ENV: &str = "COINMARKETCAP_API_KEY";

/// URL de base de l'API CoinMarketCap Pro
pub const DEFAULT_BASE_URL: &str = "https://pro-api.coinmarketcap.com/v1";

/// Configuration résolue d'une exécution
#[derive(Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub limit: NonZeroU32,
    pub convert: String,
}

/// La clé API ne doit jamais apparaître dans les logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("limit", &self.limit)
            .field("convert", &self.convert)
            .finish()
    }
}

impl Config {
    /// Résout la configuration depuis les arguments et l'environnement du processus
    pub fn from_args(args: Args) -> Result<Self> {
        Self::resolve(args, std::env::var(API_KEY_ENV).ok())
    }

    /// Résout la configuration avec une valeur d'environnement fournie
    ///
    /// Séparé de `from_args` pour être testable sans toucher à l'environnement.
    pub fn resolve(args: Args, env_api_key: Option<String>) -> Result<Self> {
        let api_key = resolve_api_key(args.api_key, env_api_key)?;
        let limit = NonZeroU32::new(args.limit).ok_or_else(|| {
            FetchError::Configuration("limit must be a positive integer.".to_string())
        })?;

        let config = Self {
            api_key,
            base_url: args.base_url.trim_end_matches('/').to_string(),
            limit,
            convert: args.convert.trim().to_uppercase(),
        };
        debug!(?config, "Configuration resolved");
        Ok(config)
    }
}

/// Choisit la première clé non vide entre l'argument explicite et l'environnement
pub fn resolve_api_key(explicit: Option<String>, env_value: Option<String>) -> Result<String> {
    explicit
        .into_iter()
        .chain(env_value)
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or_else(missing_api_key)
}

pub(crate) fn missing_api_key() -> FetchError {
    FetchError::Configuration(format!(
        "API key is required. Set {} environment variable or pass it with --api-key.",
        API_KEY_ENV
    ))
}

/// Charge un fichier .env dans l'environnement du processus
///
/// - `Some(path)` : charge ce fichier précis
/// - `None` : cherche `.env` dans le répertoire courant puis ses parents
///
/// Un fichier absent n'est pas une erreur : on retourne simplement None.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    let loaded = match path {
        Some(p) => dotenvy::from_filename(p),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(p) => {
            debug!(path = %p.display(), "Loaded env file");
            Some(p)
        }
        Err(e) if e.not_found() => {
            debug!("No env file found");
            None
        }
        Err(e) => {
            warn!(error = %e, "Failed to load env file");
            None
        }
    }
}
