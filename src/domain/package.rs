//! Package weight normalization: volumetric weight and bracket lookup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InvalidDimensions {
    #[error("package {field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

/// Validated package dimensions in centimeters/kilograms.
///
/// Construction is the write boundary: once a `Dimensions` exists, every
/// downstream weight computation is guaranteed finite and positive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    length_cm: f64,
    width_cm: f64,
    height_cm: f64,
    weight_kg: f64,
}

impl Dimensions {
    pub fn new(
        length_cm: f64,
        width_cm: f64,
        height_cm: f64,
        weight_kg: f64,
    ) -> Result<Self, InvalidDimensions> {
        for (field, value) in [
            ("length", length_cm),
            ("width", width_cm),
            ("height", height_cm),
            ("weight", weight_kg),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidDimensions::NonPositive { field, value });
            }
        }
        Ok(Self {
            length_cm,
            width_cm,
            height_cm,
            weight_kg,
        })
    }

    pub fn length_cm(&self) -> f64 {
        self.length_cm
    }

    pub fn width_cm(&self) -> f64 {
        self.width_cm
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Volumetric (dimensional) weight for a carrier divisor.
    /// Carriers commonly publish 4000, 5000 or 6000; the divisor is config data.
    pub fn volumetric_weight(&self, divisor: f64) -> f64 {
        (self.length_cm * self.width_cm * self.height_cm) / divisor
    }

    /// Billable weight: the greater of actual and volumetric weight.
    pub fn chargeable_weight(&self, divisor: f64) -> f64 {
        self.weight_kg.max(self.volumetric_weight(divisor))
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("brackets must be a non-empty ascending list of positive weights")]
pub struct InvalidBrackets;

/// Ascending list of published weight ceilings (kg).
///
/// Deserialization funnels through [`TryFrom`], so a table that exists is
/// always non-empty, sorted and positive, however it was built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct BracketTable(Vec<f64>);

impl BracketTable {
    /// Builds a table from an ascending list of ceilings.
    /// Returns `None` for an empty, non-positive or unsorted list.
    pub fn new(brackets: Vec<f64>) -> Option<Self> {
        if brackets.is_empty() {
            return None;
        }
        let valid = brackets.windows(2).all(|pair| pair[0] < pair[1])
            && brackets.iter().all(|b| b.is_finite() && *b > 0.0);
        valid.then_some(Self(brackets))
    }

    /// The smallest published ceiling that covers `weight_kg`.
    ///
    /// Weights above the largest bracket clamp to the largest bracket:
    /// carriers bill overweight parcels at their top published tier, so an
    /// out-of-range weight is a clamp, not an error.
    pub fn bracket_for(&self, weight_kg: f64) -> f64 {
        self.0
            .iter()
            .copied()
            .find(|ceiling| *ceiling >= weight_kg)
            .unwrap_or_else(|| self.max_bracket())
    }

    pub fn max_bracket(&self) -> f64 {
        *self.0.last().expect("table is never empty")
    }

    pub fn ceilings(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for BracketTable {
    type Error = InvalidBrackets;

    fn try_from(brackets: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(brackets).ok_or(InvalidBrackets)
    }
}

impl Default for BracketTable {
    /// Half-kilo steps up to 30 kg, the tier list observed across carriers.
    fn default() -> Self {
        Self((1..=60).map(|i| f64::from(i) * 0.5).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_and_non_finite_inputs() {
        assert!(Dimensions::new(0.0, 8.0, 4.0, 0.43).is_err());
        assert!(Dimensions::new(56.0, -8.0, 4.0, 0.43).is_err());
        assert!(Dimensions::new(56.0, 8.0, f64::NAN, 0.43).is_err());
        assert!(Dimensions::new(56.0, 8.0, 4.0, f64::INFINITY).is_err());
        assert!(Dimensions::new(56.0, 8.0, 4.0, 0.43).is_ok());
    }

    #[test]
    fn chargeable_weight_is_max_of_actual_and_volumetric() {
        let dims = Dimensions::new(56.0, 8.0, 4.0, 0.43).unwrap();
        assert!((dims.volumetric_weight(5000.0) - 0.3584).abs() < 1e-9);
        assert_eq!(dims.chargeable_weight(5000.0), 0.43);

        // Bulky but light: volumetric wins.
        let bulky = Dimensions::new(60.0, 40.0, 40.0, 2.0).unwrap();
        assert!(bulky.chargeable_weight(5000.0) > 2.0);
        assert_eq!(
            bulky.chargeable_weight(5000.0),
            bulky.volumetric_weight(5000.0)
        );
    }

    #[test]
    fn chargeable_weight_dominates_both_components() {
        let cases = [
            (10.0, 10.0, 10.0, 0.2),
            (56.0, 8.0, 4.0, 0.43),
            (120.0, 80.0, 60.0, 12.0),
        ];
        for (l, w, h, kg) in cases {
            let dims = Dimensions::new(l, w, h, kg).unwrap();
            let chargeable = dims.chargeable_weight(5000.0);
            assert!(chargeable >= kg);
            assert!(chargeable >= dims.volumetric_weight(5000.0));
        }
    }

    #[test]
    fn divisor_is_data_not_a_constant() {
        let dims = Dimensions::new(50.0, 40.0, 30.0, 1.0).unwrap();
        assert_eq!(dims.volumetric_weight(5000.0), 12.0);
        assert_eq!(dims.volumetric_weight(6000.0), 10.0);
        assert_eq!(dims.volumetric_weight(4000.0), 15.0);
    }

    #[test]
    fn bracket_lookup_picks_smallest_covering_ceiling() {
        let table = BracketTable::default();
        assert_eq!(table.bracket_for(0.43), 0.5);
        assert_eq!(table.bracket_for(0.5), 0.5);
        assert_eq!(table.bracket_for(0.51), 1.0);
        assert_eq!(table.bracket_for(29.7), 30.0);
    }

    #[test]
    fn bracket_lookup_clamps_above_the_top_tier() {
        let table = BracketTable::default();
        assert_eq!(table.bracket_for(30.0), 30.0);
        assert_eq!(table.bracket_for(45.0), 30.0);
        assert_eq!(table.bracket_for(1_000.0), 30.0);
    }

    #[test]
    fn bracket_lookup_is_non_decreasing() {
        let table = BracketTable::default();
        let mut previous = 0.0;
        let mut step = 0.05;
        while step < 35.0 {
            let bracket = table.bracket_for(step);
            assert!(bracket >= previous, "bracket regressed at {step}");
            previous = bracket;
            step += 0.05;
        }
    }

    #[test]
    fn bracket_table_rejects_unsorted_or_empty_input() {
        assert!(BracketTable::new(vec![]).is_none());
        assert!(BracketTable::new(vec![1.0, 0.5]).is_none());
        assert!(BracketTable::new(vec![-1.0, 2.0]).is_none());
        assert!(BracketTable::new(vec![2.0, 5.0, 10.0]).is_some());
    }

    #[test]
    fn deserialization_cannot_bypass_table_validation() {
        assert!(serde_json::from_str::<BracketTable>("[]").is_err());
        assert!(serde_json::from_str::<BracketTable>("[1.0, 0.5]").is_err());
        assert!(serde_json::from_str::<BracketTable>("[-1.0, 2.0]").is_err());

        let table: BracketTable = serde_json::from_str("[2.0, 5.0, 10.0]").unwrap();
        assert_eq!(table.max_bracket(), 10.0);
        assert_eq!(table.bracket_for(3.0), 5.0);
    }
}
