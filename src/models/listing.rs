// ============================================================================
// Structures : Listing, Quote, Row
// ============================================================================
// Listing : un actif tel que renvoyé par /cryptocurrency/listings/latest
// Row     : la même donnée aplatie pour UNE devise de conversion
//
// CONCEPTS RUST :
// 1. Option<f64> : toutes les valeurs numériques peuvent être null côté API
// 2. HashMap<String, Quote> : les cotations sont indexées par code devise
// 3. #[serde(default)] : un champ absent du JSON prend sa valeur par défaut
// ============================================================================

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{FetchError, Result};

/// Un actif dans la réponse "latest listings"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Identifiant CoinMarketCap
    #[serde(default)]
    pub id: Option<u64>,

    /// Rang par capitalisation
    #[serde(rename = "cmc_rank")]
    pub rank: u32,

    /// Nom complet (ex: "Bitcoin")
    pub name: String,

    /// Symbole (ex: "BTC")
    pub symbol: String,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub circulating_supply: Option<f64>,

    #[serde(default)]
    pub total_supply: Option<f64>,

    #[serde(default)]
    pub max_supply: Option<f64>,

    #[serde(default, deserialize_with = "lenient_datetime")]
    pub last_updated: Option<DateTime<Utc>>,

    /// Cotations par devise (ex: "USD" -> Quote)
    #[serde(default)]
    pub quote: HashMap<String, Quote>,
}

/// Cotation d'un actif dans une devise donnée
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub volume_24h: Option<f64>,

    #[serde(default)]
    pub market_cap: Option<f64>,

    #[serde(default)]
    pub percent_change_1h: Option<f64>,

    #[serde(default)]
    pub percent_change_24h: Option<f64>,

    #[serde(default)]
    pub percent_change_7d: Option<f64>,

    #[serde(default, deserialize_with = "lenient_datetime")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Ligne aplatie, encore numérique, pour une devise cible
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub rank: u32,
    pub name: String,
    pub symbol: String,
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub percent_change_1h: Option<f64>,
    pub percent_change_24h: Option<f64>,
    pub percent_change_7d: Option<f64>,
    pub circulating_supply: Option<f64>,
    /// Horodatage de la cotation (à défaut, celui du listing)
    pub last_updated: Option<DateTime<Utc>>,
}

/// Horodatage RFC 3339, ou None si le fournisseur envoie autre chose
///
/// Un horodatage illisible ne doit pas faire échouer toute la récupération.
fn lenient_datetime<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

impl Row {
    /// Extrait la ligne d'un listing pour la devise `currency`
    ///
    /// CONCEPT RUST : Ownership
    /// - `listing` est consommé : name et symbol sont déplacés, pas copiés
    /// - Le listing n'existe plus après la conversion
    ///
    /// # Erreurs
    /// `FetchError::Data` si le listing n'a pas de cotation pour `currency`
    pub fn from_listing(mut listing: Listing, currency: &str) -> Result<Self> {
        let quote = listing.quote.remove(currency).ok_or_else(|| {
            FetchError::Data(format!(
                "no {} quote for {} (rank {})",
                currency, listing.symbol, listing.rank
            ))
        })?;

        Ok(Self {
            rank: listing.rank,
            name: listing.name,
            symbol: listing.symbol,
            price: quote.price,
            market_cap: quote.market_cap,
            volume_24h: quote.volume_24h,
            percent_change_1h: quote.percent_change_1h,
            percent_change_24h: quote.percent_change_24h,
            percent_change_7d: quote.percent_change_7d,
            circulating_supply: listing.circulating_supply,
            last_updated: quote.last_updated.or(listing.last_updated),
        })
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
