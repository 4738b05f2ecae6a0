// ============================================================================
// API Client : CoinMarketCap
// ============================================================================
// Récupère les dernières cotations depuis /cryptocurrency/listings/latest
//
// CONCEPTS RUST :
// 1. async/await : un seul appel HTTP non-bloquant
// 2. Erreurs typées : FetchError distingue transport / API / données
// 3. Serde en deux temps : enveloppe (status) d'abord, données ensuite
// ============================================================================

use std::num::NonZeroU32;

use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::config::{missing_api_key, resolve_api_key, Config, API_KEY_ENV, DEFAULT_BASE_URL};
use crate::error::{FetchError, Result, TransportError};
use crate::models::{Listing, Row};

/// En-tête d'authentification de l'API Pro
pub const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

// ============================================================================
// Structures pour parser la réponse JSON
// ============================================================================
// Toute réponse de l'API (succès ou erreur) a la forme :
// { "status": { "error_code": 0, "error_message": null, ... }, "data": [...] }
//
// `data` est gardé en serde_json::Value : on ne le décode qu'une fois le
// status vérifié, pour qu'une erreur API ne soit jamais masquée par un
// problème de format des données.
// ============================================================================

#[derive(Debug, Deserialize)]
struct Envelope {
    status: Status,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    elapsed: Option<u64>,
    #[serde(default)]
    credit_count: Option<u64>,
}

// ============================================================================
// Client
// ============================================================================

/// Client de l'API CoinMarketCap
///
/// Possède la clé API et un `reqwest::Client` réutilisable.
pub struct CoinMarketCapClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl CoinMarketCapClient {
    /// Crée un client pointant sur l'URL de production
    ///
    /// # Erreurs
    /// `FetchError::Configuration` si la clé est vide
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Crée un client pointant sur une URL de base arbitraire (sandbox, tests)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(missing_api_key());
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("cryptofetch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Crée un client avec la clé explicite, sinon celle de COINMARKETCAP_API_KEY
    pub fn from_env(api_key: Option<String>) -> Result<Self> {
        let api_key = resolve_api_key(api_key, std::env::var(API_KEY_ENV).ok())?;
        Self::new(api_key)
    }

    /// Crée un client depuis une configuration résolue
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(config.api_key.clone(), config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Construit la requête "latest listings"
    ///
    /// Les paramètres passent par `.query()` : reqwest les encode, un code
    /// devise contenant `&`, `=` ou `#` ne peut pas modifier la requête.
    fn listings_request(&self, limit: NonZeroU32, convert: &str) -> Result<reqwest::Request> {
        let request = self
            .http
            .get(format!("{}/cryptocurrency/listings/latest", self.base_url))
            .query(&[("limit", limit.to_string()), ("convert", convert.to_string())])
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .build()?;
        Ok(request)
    }

    /// Récupère les `limit` premiers actifs, cotés dans la devise `convert`
    ///
    /// Les lignes sont retournées dans l'ordre du fournisseur (déjà trié par
    /// rang). Aucun retry : toute erreur remonte à l'appelant.
    ///
    /// # Erreurs
    /// - `Transport` : échec réseau ou statut HTTP hors 2xx
    /// - `Api` : status.error_code != 0
    /// - `Data` : JSON invalide ou cotation `convert` absente d'un listing
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_listings(&self, limit: NonZeroU32, convert: &str) -> Result<Vec<Row>> {
        let request = self.listings_request(limit, convert)?;
        debug!(url = %request.url(), "Built listings request");

        debug!("Sending HTTP request to CoinMarketCap");
        let response = self.http.execute(request).await.map_err(|e| {
            error!(error = %e, "HTTP request failed");
            FetchError::from(e)
        })?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            // Le corps d'une réponse 4xx/5xx contient souvent l'enveloppe status.
            // S'il est illisible, on garde quand même le code HTTP.
            let message = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<Envelope>(&body).ok())
                .and_then(|envelope| envelope.status.error_message);
            error!(status = %status, message = ?message, "CoinMarketCap returned error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body = response.text().await?;
        let rows = parse_listings_response(&body, convert)?;
        info!(
            rows = rows.len(),
            newest_quote = ?rows.iter().filter_map(|r| r.last_updated).max(),
            "Successfully fetched listings"
        );
        Ok(rows)
    }
}

/// Décode le corps d'une réponse 2xx et extrait une Row par listing
///
/// CONCEPT RUST : collect::<Result<Vec<_>>>()
/// - S'arrête à la première erreur et la retourne
/// - Aucun résultat partiel n'est produit
pub fn parse_listings_response(body: &str, convert: &str) -> Result<Vec<Row>> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| FetchError::Data(format!("invalid response body: {}", e)))?;

    let status = envelope.status;
    debug!(
        timestamp = ?status.timestamp,
        elapsed_ms = ?status.elapsed,
        "Response status"
    );

    if status.error_code != 0 {
        let message = status
            .error_message
            .unwrap_or_else(|| "unknown error".to_string());
        error!(code = status.error_code, message = %message, "CoinMarketCap API error");
        return Err(FetchError::Api(message));
    }

    let listings: Vec<Listing> = serde_json::from_value(envelope.data)
        .map_err(|e| FetchError::Data(format!("invalid listings data: {}", e)))?;

    if listings.is_empty() {
        warn!("CoinMarketCap returned no listings");
    }
    info!(
        listings = listings.len(),
        credits = ?status.credit_count,
        "CoinMarketCap credits used"
    );

    listings
        .into_iter()
        .map(|listing| Row::from_listing(listing, convert))
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn limit(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_listings_request_url() {
        let client = CoinMarketCapClient::new("k").unwrap();
        let request = client.listings_request(limit(10), "USD").unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://pro-api.coinmarketcap.com/v1/cryptocurrency/listings/latest?limit=10&convert=USD"
        );
        assert_eq!(request.headers()[API_KEY_HEADER], "k");
        assert_eq!(request.headers()[ACCEPT], "application/json");
    }

    #[test]
    fn test_listings_request_encodes_currency() {
        let client = CoinMarketCapClient::new("k").unwrap();
        let request = client.listings_request(limit(1), "USD&limit=5000").unwrap();

        assert_eq!(request.url().query(), Some("limit=1&convert=USD%26limit%3D5000"));
        let limits: Vec<String> = request
            .url()
            .query_pairs()
            .filter(|(key, _)| key == "limit")
            .map(|(_, value)| value.into_owned())
            .collect();
        assert_eq!(limits, ["1"]);
    }

    #[test]
    fn test_new_rejects_empty_key() {
        let err = CoinMarketCapClient::new("").err().unwrap();
        assert!(err.is_configuration());

        let err = CoinMarketCapClient::new("  ").err().unwrap();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_from_env_prefers_explicit_key() {
        let client = CoinMarketCapClient::from_env(Some("explicit".to_string())).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = CoinMarketCapClient::with_base_url("k", "http://localhost:1234/v1/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/v1");
    }

    #[test]
    fn test_parse_preserves_provider_order() {
        let body = r#"{
            "status": {"error_code": 0, "error_message": null, "credit_count": 1},
            "data": [
                {"cmc_rank": 2, "name": "Ethereum", "symbol": "ETH", "quote": {"USD": {"price": 3000.0}}},
                {"cmc_rank": 1, "name": "Bitcoin", "symbol": "BTC", "quote": {"USD": {"price": 45000.0}}}
            ]
        }"#;

        let rows = parse_listings_response(body, "USD").unwrap();
        let symbols: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["ETH", "BTC"]);
    }

    #[test]
    fn test_parse_api_error() {
        let body = r#"{
            "status": {"error_code": 1001, "error_message": "Invalid API Key"}
        }"#;

        match parse_listings_response(body, "USD") {
            Err(FetchError::Api(message)) => assert_eq!(message, "Invalid API Key"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_api_error_wins_over_bad_data() {
        let body = r#"{
            "status": {"error_code": 1008, "error_message": "Rate limit reached"},
            "data": "not a list"
        }"#;

        assert!(matches!(
            parse_listings_response(body, "USD"),
            Err(FetchError::Api(_))
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_listings_response("<html>oops</html>", "USD"),
            Err(FetchError::Data(_))
        ));
    }

    #[test]
    fn test_parse_missing_currency() {
        let body = r#"{
            "status": {"error_code": 0},
            "data": [{"cmc_rank": 1, "name": "Bitcoin", "symbol": "BTC", "quote": {"USD": {}}}]
        }"#;

        assert!(matches!(
            parse_listings_response(body, "EUR"),
            Err(FetchError::Data(_))
        ));
    }

    #[test]
    fn test_parse_empty_data() {
        let body = r#"{"status": {"error_code": 0}, "data": []}"#;
        assert!(parse_listings_response(body, "USD").unwrap().is_empty());
    }
}
