//! The seam between the pricing engine and carrier integrations.
//!
//! Carrier clients are black boxes to the engine: anything that can answer
//! "what does it cost to ship this bracket to this country" implements
//! [`ProviderClient`]. The engine owns timeouts and partial-failure handling;
//! a client only reports its own outcome.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Short lowercase carrier identifier, e.g. `"shipentegra"`, `"ups"`.
pub type ProviderId = String;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    #[error("provider rate limited")]
    RateLimited,
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
}

/// A single rate quote as a carrier reported it.
///
/// Every field is optional because carrier payloads disagree about which
/// ones exist; `domain::normalize_quote` decides what is usable. Prices are
/// integer minor-currency units straight from the carrier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProviderQuote {
    pub service_code: Option<String>,
    pub service_name: Option<String>,
    pub display_name: Option<String>,
    pub base_cents: Option<i64>,
    pub surcharge_cents: Option<i64>,
    pub total_cents: Option<i64>,
    pub delivery_estimate: Option<String>,
    pub service_type: Option<String>,
}

/// One carrier pricing integration.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Fetches raw rate quotes for a destination country and billable weight.
    ///
    /// One attempt per call; the engine treats any error (or a timeout it
    /// imposes itself) as reduced coverage, not a failed pricing request.
    async fn fetch_quotes(
        &self,
        destination_country: &str,
        weight_kg: f64,
    ) -> Result<Vec<RawProviderQuote>, ProviderError>;
}
