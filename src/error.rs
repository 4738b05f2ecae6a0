// ============================================================================
// Module : error
// ============================================================================
// Taxonomie des erreurs de la bibliothèque
//
// CONCEPT RUST : thiserror
// - #[derive(Error)] génère l'implémentation de std::error::Error
// - #[error("...")] génère Display
// - #[source] chaîne l'erreur sous-jacente (visible avec {:#} côté anyhow)
// ============================================================================

use thiserror::Error;

/// Résultat spécialisé de la bibliothèque
pub type Result<T> = std::result::Result<T, FetchError>;

/// Erreurs possibles lors de la récupération des cotations
#[derive(Debug, Error)]
pub enum FetchError {
    /// Clé API absente (ni argument, ni variable d'environnement)
    #[error("{0}")]
    Configuration(String),

    /// Échec réseau ou statut HTTP non-succès
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Erreur applicative signalée par le fournisseur (status.error_code != 0)
    #[error("API Error: {0}")]
    Api(String),

    /// Réponse mal formée (JSON invalide, devise absente d'une cotation, ...)
    #[error("Malformed response: {0}")]
    Data(String),
}

/// Erreurs de transport HTTP
#[derive(Debug, Error)]
pub enum TransportError {
    /// DNS, connexion refusée, timeout, ...
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Le serveur a répondu avec un statut hors 2xx
    #[error("Request failed: HTTP {status}{}", describe(.message))]
    Status {
        status: u16,
        message: Option<String>,
    },
}

fn describe(message: &Option<String>) -> String {
    match message {
        Some(msg) => format!(" ({})", msg),
        None => String::new(),
    }
}

impl FetchError {
    /// true pour les erreurs de configuration (message de remédiation côté CLI)
    pub fn is_configuration(&self) -> bool {
        matches!(self, FetchError::Configuration(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(TransportError::Request(err))
    }
}
