//! The rate-shopping pipeline: validate the package, fan out to every
//! configured carrier, normalize whatever comes back, apply the user's
//! markup, and hand the caller a sorted option list.
//!
//! Failures are graded: a bad package fails before any carrier is contacted,
//! a failing or slow carrier only shrinks the option list, and only "no
//! usable rate from anyone" fails the request.

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::PricingConfig;
use crate::domain::{
    normalize_quote, select_best, Dimensions, InvalidDimensions, OptionSort, PriceOption,
    SelectOptions,
};
use crate::infra::provider::{ProviderClient, ProviderId, RawProviderQuote};

#[derive(Debug, Error)]
pub enum PricingError {
    #[error(transparent)]
    InvalidPackageDimensions(#[from] InvalidDimensions),
    #[error("multiplier must be a positive finite number, got {value}")]
    InvalidMultiplier { value: f64 },
    #[error("no shipping rates available for destination {destination}")]
    NoRatesAvailable { destination: String },
}

/// One pricing request: package, destination, and the user's price factor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PricingRequest {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// ISO country code, e.g. "DE".
    pub destination_country: String,
    /// Per-user markup factor applied to carrier cost prices.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Admin/cost views set this to see raw carrier prices.
    #[serde(default)]
    pub skip_multiplier: bool,
    /// Display cap; `None` falls back to the configured maximum.
    #[serde(default)]
    pub limit: Option<usize>,
}

fn default_multiplier() -> f64 {
    1.0
}

/// Outcome of a pricing request. Never an `Err`: callers in the shipment
/// flow and the quote UI branch on `success` and show `error` verbatim.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PricingResponse {
    pub success: bool,
    /// Cheapest-first; empty when `success` is false.
    pub options: Vec<PriceOption>,
    pub best_option_id: Option<String>,
    pub currency: String,
    pub error: Option<String>,
}

impl PricingResponse {
    fn failure(currency: &str, error: String) -> Self {
        Self {
            success: false,
            options: Vec::new(),
            best_option_id: None,
            currency: currency.to_string(),
            error: Some(error),
        }
    }
}

/// Stateless rate-shopping engine over a fixed set of carrier clients.
///
/// Every call runs independently; the engine holds no per-request state and
/// is safe to share across concurrent requests.
pub struct PricingEngine {
    config: PricingConfig,
    providers: Vec<Arc<dyn ProviderClient>>,
}

impl PricingEngine {
    pub fn new(config: PricingConfig, providers: Vec<Arc<dyn ProviderClient>>) -> Self {
        Self { config, providers }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Prices a package against every configured carrier.
    pub async fn calculate(&self, request: PricingRequest) -> PricingResponse {
        match self.try_calculate(&request).await {
            Ok(options) => {
                // Options arrive cheapest-first, so the head is the best.
                let best_option_id = options.first().map(|option| option.id.clone());
                PricingResponse {
                    success: true,
                    options,
                    best_option_id,
                    currency: self.config.currency.clone(),
                    error: None,
                }
            }
            Err(error) => PricingResponse::failure(&self.config.currency, error.to_string()),
        }
    }

    async fn try_calculate(
        &self,
        request: &PricingRequest,
    ) -> Result<Vec<PriceOption>, PricingError> {
        // Validate before any carrier is contacted.
        let dims = Dimensions::new(
            request.length_cm,
            request.width_cm,
            request.height_cm,
            request.weight_kg,
        )?;
        // The effective factor must be sane before any money math sees it: a
        // NaN multiplier would cast to 0-cent prices, a negative one to
        // negative prices.
        let multiplier = if request.skip_multiplier {
            1.0
        } else {
            request.multiplier
        };
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(PricingError::InvalidMultiplier { value: multiplier });
        }

        let chargeable = dims.chargeable_weight(self.config.volumetric_divisor);
        let bracket = self.config.brackets.bracket_for(chargeable);
        debug!(
            destination = %request.destination_country,
            chargeable_kg = chargeable,
            bracket_kg = bracket,
            "pricing request"
        );

        let mut options = Vec::new();
        for (provider, quotes) in self
            .collect_quotes(&request.destination_country, bracket)
            .await
        {
            for raw in &quotes {
                match normalize_quote(raw, &provider) {
                    Ok(option) => options.push(option.with_markup(multiplier)),
                    Err(err) => {
                        // One bad quote must not sink its siblings.
                        warn!(provider = %provider, %err, "dropping malformed quote");
                    }
                }
            }
        }

        if options.is_empty() {
            return Err(PricingError::NoRatesAvailable {
                destination: request.destination_country.clone(),
            });
        }

        Ok(select_best(
            options,
            &SelectOptions {
                limit: request.limit.or(self.config.max_options),
                sort: OptionSort::TotalPrice,
            },
        ))
    }

    /// Concurrent fan-out to all carriers, fan-in once each has answered,
    /// errored, or exhausted the per-provider budget. A failed or slow
    /// carrier is logged and skipped; partial coverage beats no answer.
    async fn collect_quotes(
        &self,
        destination_country: &str,
        weight_kg: f64,
    ) -> Vec<(ProviderId, Vec<RawProviderQuote>)> {
        let budget = self.config.fetch_timeout();
        let fetches = self.providers.iter().map(|client| {
            let client = Arc::clone(client);
            async move {
                let provider = client.id();
                match timeout(budget, client.fetch_quotes(destination_country, weight_kg)).await {
                    Ok(Ok(quotes)) => {
                        debug!(provider = %provider, count = quotes.len(), "carrier answered");
                        Some((provider, quotes))
                    }
                    Ok(Err(err)) => {
                        warn!(provider = %provider, %err, "carrier fetch failed");
                        None
                    }
                    Err(_) => {
                        warn!(provider = %provider, ?budget, "carrier timed out");
                        None
                    }
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }
}
