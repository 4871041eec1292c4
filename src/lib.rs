//! Rate-shopping and price-normalization core for the MoogShip platform.
//!
//! Given a package's dimensions, weight and destination, the engine queries
//! every configured carrier concurrently, normalizes their heterogeneous
//! rate payloads into a common option shape, applies the user's markup and
//! returns the candidates cheapest-first. Carrier-specific request shaping,
//! label purchase, customs handling and the web/UI layers live elsewhere;
//! they consume [`PricingEngine::calculate`] and the [`ProviderClient`] seam.

pub mod config;
pub mod domain;
pub mod engine;
pub mod infra;

pub use config::{ConfigError, PricingConfig};
pub use domain::{
    normalize_quote, select_best, BracketTable, Dimensions, InvalidBrackets, InvalidDimensions,
    MalformedQuote, OptionSort, PriceOption, SelectOptions,
};
pub use engine::{PricingEngine, PricingError, PricingRequest, PricingResponse};
pub use infra::{HttpProviderClient, ProviderClient, ProviderError, ProviderId, RawProviderQuote};
