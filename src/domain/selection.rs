//! Ordering and truncation of normalized price options.

use serde::{Deserialize, Serialize};

use super::price_option::PriceOption;

/// Sorting options for the customer-facing option list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionSort {
    /// Cheapest first, the default for quote display.
    #[default]
    TotalPrice,
    BasePrice,
    ServiceName,
}

#[derive(Clone, Debug, Default)]
pub struct SelectOptions {
    /// Keeps at most this many options after sorting; `None` keeps all.
    pub limit: Option<usize>,
    pub sort: OptionSort,
}

/// Sorts the options by the requested key and applies the limit.
///
/// The sort is stable, so ties keep the original provider arrival order and
/// the output is deterministic for identical input. An oversize limit returns
/// everything; empty input returns empty; "no rates at all" is the engine's
/// failure to report, not this function's.
pub fn select_best(mut options: Vec<PriceOption>, opts: &SelectOptions) -> Vec<PriceOption> {
    options.sort_by(|a, b| match opts.sort {
        OptionSort::TotalPrice => a.total_cents.cmp(&b.total_cents),
        OptionSort::BasePrice => a.base_cents.cmp(&b.base_cents),
        OptionSort::ServiceName => a
            .service_name
            .cmp(&b.service_name)
            .then(a.total_cents.cmp(&b.total_cents)),
    });
    if let Some(limit) = opts.limit {
        options.truncate(limit);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(provider: &str, service: &str, base: i64, surcharge: i64) -> PriceOption {
        PriceOption {
            id: format!("{provider}-{service}"),
            provider: provider.to_string(),
            service_name: service.to_string(),
            display_name: service.to_string(),
            base_cents: base,
            surcharge_cents: surcharge,
            total_cents: base + surcharge,
            delivery_estimate: None,
            service_type: None,
            provider_service_code: format!("{provider}:{service}"),
            original_base_cents: base,
            original_surcharge_cents: surcharge,
            original_total_cents: base + surcharge,
            applied_multiplier: 1.0,
        }
    }

    #[test]
    fn default_sort_is_ascending_total() {
        let options = vec![
            option("ups", "express", 2200, 300),
            option("afs", "eco", 600, 51),
            option("dhl", "standard", 900, 100),
        ];
        let sorted = select_best(options, &SelectOptions::default());
        let totals: Vec<i64> = sorted.iter().map(|o| o.total_cents).collect();
        assert_eq!(totals, vec![651, 1000, 2500]);
    }

    #[test]
    fn ties_keep_provider_arrival_order() {
        let options = vec![
            option("shipentegra", "eco", 600, 51),
            option("afs", "economy", 600, 51),
            option("ups", "saver", 600, 51),
        ];
        let sorted = select_best(options.clone(), &SelectOptions::default());
        let providers: Vec<&str> = sorted.iter().map(|o| o.provider.as_str()).collect();
        assert_eq!(providers, vec!["shipentegra", "afs", "ups"]);

        // Same input, same output.
        let again = select_best(options, &SelectOptions::default());
        assert_eq!(sorted, again);
    }

    #[test]
    fn limit_truncates_and_oversize_limit_keeps_all() {
        let options = vec![
            option("ups", "express", 2200, 300),
            option("afs", "eco", 600, 51),
            option("dhl", "standard", 900, 100),
        ];
        let top_two = select_best(
            options.clone(),
            &SelectOptions {
                limit: Some(2),
                ..Default::default()
            },
        );
        assert_eq!(top_two.len(), 2);
        assert_eq!(top_two[0].total_cents, 651);

        let all = select_best(
            options,
            &SelectOptions {
                limit: Some(99),
                ..Default::default()
            },
        );
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(select_best(Vec::new(), &SelectOptions::default()).is_empty());
    }

    #[test]
    fn service_name_sort_breaks_ties_by_total() {
        let options = vec![
            option("ups", "saver", 900, 0),
            option("dhl", "saver", 600, 0),
        ];
        let sorted = select_best(
            options,
            &SelectOptions {
                limit: None,
                sort: OptionSort::ServiceName,
            },
        );
        assert_eq!(sorted[0].provider, "dhl");
    }
}
