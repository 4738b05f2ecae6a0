// ============================================================================
// Module : api
// ============================================================================
// Clients API pour récupérer les données de marché
// ============================================================================

pub mod coinmarketcap;  // Client API CoinMarketCap

// Re-export du client principal
pub use coinmarketcap::CoinMarketCapClient;
