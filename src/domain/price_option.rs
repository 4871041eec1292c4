//! Normalized price options and markup arithmetic.
//!
//! All money is integer minor-currency units (cents). The only place a float
//! touches a price is the single multiplier application, which rounds each
//! component back to cents immediately.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::infra::provider::{ProviderId, RawProviderQuote};

#[derive(Debug, Error, PartialEq)]
pub enum MalformedQuote {
    #[error("quote from {provider} is missing a service code")]
    MissingServiceCode { provider: ProviderId },
    #[error("quote {service} from {provider} carries no price")]
    MissingPrice {
        provider: ProviderId,
        service: String,
    },
    #[error("quote {service} from {provider} has a negative price component")]
    NegativePrice {
        provider: ProviderId,
        service: String,
    },
}

/// A carrier rate quote normalized into the common MoogShip shape.
///
/// Constructed fresh on every pricing request; it has no identity beyond the
/// request and is never persisted by this crate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceOption {
    /// Fresh per-request id, used by callers to reference a chosen option.
    pub id: String,
    pub provider: ProviderId,
    pub service_name: String,
    pub display_name: String,
    pub base_cents: i64,
    pub surcharge_cents: i64,
    /// Invariant: `total_cents == base_cents + surcharge_cents`.
    pub total_cents: i64,
    pub delivery_estimate: Option<String>,
    pub service_type: Option<String>,
    /// Stable `provider:code` routing key. A later label purchase must target
    /// exactly the service that was quoted, so this survives normalization
    /// untouched.
    pub provider_service_code: String,
    pub original_base_cents: i64,
    pub original_surcharge_cents: i64,
    pub original_total_cents: i64,
    /// Exact factor applied to the original prices (1.0 when none).
    pub applied_multiplier: f64,
}

impl PriceOption {
    /// Returns a marked-up copy of this option; `self` is never mutated.
    ///
    /// Each component is rounded separately and the total is the sum of the
    /// rounded parts, so the base/surcharge breakdown shown to the customer
    /// always adds up. The `original_*` fields carry the pre-markup prices of
    /// this option, so cost and customer price stay recoverable from one
    /// value. Markup is applied once per option per request, never compounded.
    pub fn with_markup(&self, multiplier: f64) -> PriceOption {
        let base = scale_cents(self.base_cents, multiplier);
        let surcharge = scale_cents(self.surcharge_cents, multiplier);
        PriceOption {
            base_cents: base,
            surcharge_cents: surcharge,
            total_cents: base + surcharge,
            original_base_cents: self.base_cents,
            original_surcharge_cents: self.surcharge_cents,
            original_total_cents: self.total_cents,
            applied_multiplier: multiplier,
            ..self.clone()
        }
    }
}

fn scale_cents(cents: i64, multiplier: f64) -> i64 {
    (cents as f64 * multiplier).round() as i64
}

/// Maps a raw carrier quote onto the common option shape.
///
/// Field coverage is uneven across carriers: a missing surcharge is zero, a
/// missing display name falls back to the service name, and a quote that only
/// carries a total is treated as all-base. The total is always recomputed as
/// base + surcharge rather than trusted from the payload. Quotes without a
/// service code are rejected: without the routing key a later label purchase
/// could land on a different service than the one quoted.
pub fn normalize_quote(
    raw: &RawProviderQuote,
    provider: &ProviderId,
) -> Result<PriceOption, MalformedQuote> {
    let service_code =
        raw.service_code
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .ok_or_else(|| MalformedQuote::MissingServiceCode {
                provider: provider.clone(),
            })?;

    let service_name = raw
        .service_name
        .clone()
        .unwrap_or_else(|| service_code.to_string());

    let (base, surcharge) = match (raw.base_cents, raw.surcharge_cents, raw.total_cents) {
        (Some(base), surcharge, _) => (base, surcharge.unwrap_or(0)),
        (None, _, Some(total)) => (total, 0),
        (None, _, None) => {
            return Err(MalformedQuote::MissingPrice {
                provider: provider.clone(),
                service: service_name,
            })
        }
    };

    if base < 0 || surcharge < 0 {
        return Err(MalformedQuote::NegativePrice {
            provider: provider.clone(),
            service: service_name,
        });
    }

    let total = base + surcharge;
    Ok(PriceOption {
        id: Uuid::new_v4().to_string(),
        provider: provider.clone(),
        display_name: raw
            .display_name
            .clone()
            .unwrap_or_else(|| service_name.clone()),
        service_name,
        base_cents: base,
        surcharge_cents: surcharge,
        total_cents: total,
        delivery_estimate: raw.delivery_estimate.clone(),
        service_type: raw.service_type.clone(),
        provider_service_code: format!("{provider}:{service_code}"),
        original_base_cents: base,
        original_surcharge_cents: surcharge,
        original_total_cents: total,
        applied_multiplier: 1.0,
    })
}
