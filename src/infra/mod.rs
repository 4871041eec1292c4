//! Carrier-facing integration layer.

pub mod http;
pub mod provider;

pub use http::HttpProviderClient;
pub use provider::{ProviderClient, ProviderError, ProviderId, RawProviderQuote};
