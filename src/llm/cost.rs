//! Exact decimal cost accounting.
//!
//! Prices are per-token decimals parsed from string literals; all arithmetic
//! stays in `Decimal` so computed costs reconcile exactly with provider
//! billing formulas. Costs serialize as plain fixed-point strings with
//! trailing zeros stripped, never floats or scientific notation.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::Usage;
use crate::catalog::ModelEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Costs {
    #[serde(serialize_with = "decimal_string")]
    pub input_token_cost: Decimal,
    #[serde(serialize_with = "decimal_string")]
    pub output_token_cost: Decimal,
    #[serde(serialize_with = "decimal_string")]
    pub input_cost: Decimal,
    #[serde(serialize_with = "decimal_string")]
    pub output_cost: Decimal,
    #[serde(serialize_with = "decimal_string")]
    pub total_cost: Decimal,
}

fn decimal_string<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.normalize().to_string())
}

pub fn compute(usage: &Usage, entry: &ModelEntry) -> Costs {
    let input_cost = Decimal::from(usage.input_tokens) * entry.input_price;
    let output_cost = Decimal::from(usage.output_tokens) * entry.output_price;

    Costs {
        input_token_cost: entry.input_price,
        output_token_cost: entry.output_price,
        input_cost,
        output_cost,
        total_cost: input_cost + output_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(input: &str, output: &str) -> ModelEntry {
        ModelEntry {
            model_id: "test-model".to_string(),
            input_price: input.parse().unwrap(),
            output_price: output.parse().unwrap(),
            input_price_cached: None,
            structured_outputs: false,
            json_mode: false,
        }
    }

    fn usage(input_tokens: u32, output_tokens: u32) -> Usage {
        Usage {
            input_tokens,
            output_tokens,
        }
    }

    #[test]
    fn test_anthropic_email_scenario() {
        // 100 input @ 0.000003 + 50 output @ 0.000015
        let costs = compute(&usage(100, 50), &entry("0.000003", "0.000015"));
        assert_eq!(costs.input_cost, "0.0003".parse().unwrap());
        assert_eq!(costs.output_cost, "0.00075".parse().unwrap());
        assert_eq!(costs.total_cost, "0.00105".parse().unwrap());
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let cases = [
            (0u32, 0u32, "0.000003", "0.000015"),
            (1, 1, "0.00000025", "0.00000125"),
            (123_456, 654_321, "0.0000025", "0.00001"),
            (7, 13, "0.000000000001", "0.000000000003"),
        ];
        for (input, output, ip, op) in cases {
            let costs = compute(&usage(input, output), &entry(ip, op));
            assert_eq!(costs.total_cost, costs.input_cost + costs.output_cost);
            assert_eq!(
                costs.input_cost,
                Decimal::from(input) * costs.input_token_cost
            );
            assert_eq!(
                costs.output_cost,
                Decimal::from(output) * costs.output_token_cost
            );
        }
    }

    #[test]
    fn test_exact_at_twelve_fractional_digits() {
        let costs = compute(&usage(999_999, 0), &entry("0.000000000001", "0.000000000001"));
        assert_eq!(costs.input_cost, "0.000000999999".parse().unwrap());
    }

    #[test]
    fn test_zero_usage_costs_zero() {
        let costs = compute(&usage(0, 0), &entry("0.000003", "0.000015"));
        assert_eq!(costs.input_cost, Decimal::ZERO);
        assert_eq!(costs.output_cost, Decimal::ZERO);
        assert_eq!(costs.total_cost, Decimal::ZERO);
    }

    #[test]
    fn test_serializes_as_trimmed_decimal_strings() {
        let costs = compute(&usage(100, 50), &entry("0.000003", "0.000015"));
        let value = serde_json::to_value(&costs).unwrap();
        assert_eq!(value["input_token_cost"], "0.000003");
        assert_eq!(value["output_token_cost"], "0.000015");
        assert_eq!(value["input_cost"], "0.0003");
        assert_eq!(value["output_cost"], "0.00075");
        assert_eq!(value["total_cost"], "0.00105");
    }

    #[test]
    fn test_serialization_never_scientific_notation() {
        let costs = compute(&usage(1, 0), &entry("0.000000000001", "0.1"));
        let value = serde_json::to_value(&costs).unwrap();
        for field in [
            "input_token_cost",
            "output_token_cost",
            "input_cost",
            "output_cost",
            "total_cost",
        ] {
            let rendered = value[field].as_str().unwrap();
            assert!(
                !rendered.contains('e') && !rendered.contains('E'),
                "{field}: {rendered}"
            );
        }
        assert_eq!(value["input_cost"], "0.000000000001");
    }

    #[test]
    fn test_whole_number_costs_drop_the_point() {
        let costs = compute(&usage(1_000_000, 0), &entry("0.000003", "0.000015"));
        let value = serde_json::to_value(&costs).unwrap();
        assert_eq!(value["input_cost"], "3");
    }
}
