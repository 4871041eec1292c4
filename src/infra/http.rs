//! Generic JSON rate-endpoint client.
//!
//! Carrier-specific request shaping lives in the carrier integrations; this
//! adapter covers the transport they share: a GET against a pricing endpoint
//! with destination/weight query parameters, responding with a JSON envelope
//! of rate entries. Field names across carriers are papered over with serde
//! aliases on the DTO.

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use super::provider::{ProviderClient, ProviderError, ProviderId, RawProviderQuote};

const USER_AGENT: &str = "moogship-pricing/0.1.0";

/// HTTP-backed [`ProviderClient`] for carriers exposing a JSON rate endpoint.
#[derive(Clone)]
pub struct HttpProviderClient {
    id: ProviderId,
    http: Client,
    rates_url: Url,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: String,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RateQuoteDto {
    #[serde(default, alias = "code", alias = "serviceCode")]
    service_code: Option<String>,
    #[serde(default, alias = "service", alias = "serviceName")]
    service_name: Option<String>,
    #[serde(default, alias = "displayName", alias = "label")]
    display_name: Option<String>,
    #[serde(default, alias = "baseCents", alias = "base_price_cents")]
    base_cents: Option<i64>,
    #[serde(default, alias = "fuelCents", alias = "fuel_surcharge_cents")]
    surcharge_cents: Option<i64>,
    #[serde(default, alias = "totalCents", alias = "total_price_cents")]
    total_cents: Option<i64>,
    #[serde(default, alias = "deliveryEstimate", alias = "transit_time")]
    delivery_estimate: Option<String>,
    #[serde(default, alias = "serviceType")]
    service_type: Option<String>,
}

impl From<RateQuoteDto> for RawProviderQuote {
    fn from(dto: RateQuoteDto) -> Self {
        Self {
            service_code: dto.service_code,
            service_name: dto.service_name,
            display_name: dto.display_name,
            base_cents: dto.base_cents,
            surcharge_cents: dto.surcharge_cents,
            total_cents: dto.total_cents,
            delivery_estimate: dto.delivery_estimate,
            service_type: dto.service_type,
        }
    }
}

impl HttpProviderClient {
    pub fn new(id: impl Into<ProviderId>, rates_url: &str) -> Result<Self, ProviderError> {
        let rates_url = Url::parse(rates_url)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            id: id.into(),
            http,
            rates_url,
        })
    }

    fn quote_url(&self, destination_country: &str, weight_kg: f64) -> Url {
        let mut url = self.rates_url.clone();
        url.query_pairs_mut()
            .append_pair("country", destination_country)
            .append_pair("weight", &format!("{weight_kg}"));
        url
    }
}

#[async_trait::async_trait]
impl ProviderClient for HttpProviderClient {
    fn id(&self) -> ProviderId {
        self.id.clone()
    }

    async fn fetch_quotes(
        &self,
        destination_country: &str,
        weight_kg: f64,
    ) -> Result<Vec<RawProviderQuote>, ProviderError> {
        let url = self.quote_url(destination_country, weight_kg);
        debug!(provider = %self.id, %url, "requesting carrier rates");

        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        let response = response.error_for_status()?;

        let envelope: ApiEnvelope<Vec<RateQuoteDto>> = response.json().await?;
        let ApiEnvelope {
            status,
            data,
            message,
        } = envelope;

        if status.eq_ignore_ascii_case("ok") {
            let quotes = data
                .ok_or_else(|| ProviderError::Api("response missing data".into()))?
                .into_iter()
                .map(RawProviderQuote::from)
                .collect();
            Ok(quotes)
        } else {
            Err(ProviderError::Api(message.unwrap_or(status)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_url_carries_destination_and_weight() {
        let client = HttpProviderClient::new("ups", "https://rates.example.com/v1/rates").unwrap();
        let url = client.quote_url("DE", 0.5);
        assert_eq!(
            url.as_str(),
            "https://rates.example.com/v1/rates?country=DE&weight=0.5"
        );
    }

    #[test]
    fn dto_aliases_cover_carrier_field_spellings() {
        let json = r#"{
            "serviceCode": "eco",
            "label": "Economy",
            "baseCents": 600,
            "fuelCents": 51,
            "deliveryEstimate": "5-9 days"
        }"#;
        let dto: RateQuoteDto = serde_json::from_str(json).unwrap();
        let raw = RawProviderQuote::from(dto);
        assert_eq!(raw.service_code.as_deref(), Some("eco"));
        assert_eq!(raw.display_name.as_deref(), Some("Economy"));
        assert_eq!(raw.base_cents, Some(600));
        assert_eq!(raw.surcharge_cents, Some(51));
    }

    #[test]
    fn envelope_error_status_maps_to_api_error() {
        let json = r#"{"status": "error", "data": null, "message": "bad country"}"#;
        let envelope: ApiEnvelope<Vec<RateQuoteDto>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.status, "error");
        assert_eq!(envelope.message.as_deref(), Some("bad country"));
        assert!(envelope.data.is_none());
    }
}
