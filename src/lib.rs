// ============================================================================
// CryptoFetch - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests d'intégration
// ============================================================================

pub mod api;       // Client API CoinMarketCap
pub mod cli;       // Arguments de la ligne de commande
pub mod config;    // Résolution de la configuration
pub mod display;   // Rendu du tableau
pub mod error;     // Taxonomie des erreurs
pub mod format;    // Formatage des nombres
pub mod models;    // Structures de données

pub use error::{FetchError, Result, TransportError};
