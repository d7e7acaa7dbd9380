//! Token-efficiency metrics attached to assistant turns

use serde::{Deserialize, Serialize};

/// Before/after token cost estimate for one query
///
/// Built by [`crate::metrics::compute_metrics`]; the constructor enforces the
/// clamping rules so a metrics value is always displayable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetrics {
    /// Cost if every tool definition had to be sent in full
    pub cost_without_offload: u64,
    /// Cost when only terse descriptors are offloaded to the client
    pub cost_with_offload: u64,
    /// `without - with`, never negative
    pub savings: u64,
    /// Percentage saved, one decimal place; 0 when the baseline is 0
    pub savings_percent: f64,
}

impl TokenMetrics {
    /// Derive savings from the two costs
    pub fn from_costs(cost_without_offload: u64, cost_with_offload: u64) -> Self {
        let savings = cost_without_offload.saturating_sub(cost_with_offload);
        let savings_percent = if cost_without_offload == 0 {
            0.0
        } else {
            round_one_decimal(savings as f64 * 100.0 / cost_without_offload as f64)
        };

        Self {
            cost_without_offload,
            cost_with_offload,
            savings,
            savings_percent,
        }
    }

    /// Percent formatted for display, e.g. `"85.7"`
    pub fn savings_percent_label(&self) -> String {
        format!("{:.1}", self.savings_percent)
    }

    /// Width of the "with offload" bar relative to the baseline bar (0.0 - 1.0)
    pub fn offload_ratio(&self) -> f64 {
        if self.cost_without_offload == 0 {
            return 0.0;
        }
        (self.cost_with_offload as f64 / self.cost_without_offload as f64).min(1.0)
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_costs() {
        let metrics = TokenMetrics::from_costs(350, 50);
        assert_eq!(metrics.savings, 300);
        assert_eq!(metrics.savings_percent, 85.7);
        assert_eq!(metrics.savings_percent_label(), "85.7");
    }

    #[test]
    fn test_zero_baseline_reports_zero_percent() {
        let metrics = TokenMetrics::from_costs(0, 0);
        assert_eq!(metrics.savings_percent, 0.0);
        assert_eq!(metrics.savings_percent_label(), "0.0");
        assert_eq!(metrics.offload_ratio(), 0.0);

        let metrics = TokenMetrics::from_costs(0, 42);
        assert_eq!(metrics.savings, 0);
        assert_eq!(metrics.savings_percent, 0.0);
    }

    #[test]
    fn test_savings_never_negative() {
        let metrics = TokenMetrics::from_costs(10, 25);
        assert_eq!(metrics.savings, 0);
        assert_eq!(metrics.savings_percent, 0.0);
        assert_eq!(metrics.offload_ratio(), 1.0);
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = serde_json::to_string(&TokenMetrics::from_costs(100, 20)).unwrap();
        assert!(json.contains("\"costWithoutOffload\":100"));
        assert!(json.contains("\"costWithOffload\":20"));
        assert!(json.contains("\"savingsPercent\":80.0"));
    }
}
