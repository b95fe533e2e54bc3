use serde::{Deserialize, Serialize};
use std::fmt;

/// A prospecting package: how many prospects are contacted per month and what it costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProspectTier {
    pub prospect_count: u32,
    /// Monthly retainer in GBP.
    pub monthly_cost: u32,
    pub label: &'static str,
    pub description: &'static str,
}

impl ProspectTier {
    pub fn cost_per_prospect(&self) -> f64 {
        if self.prospect_count == 0 {
            return 0.0;
        }
        self.monthly_cost as f64 / self.prospect_count as f64
    }
}

/// How well the offer converts prospects into meetings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OfferStrength {
    pub label: &'static str,
    pub prospects_per_lead: u32,
}

impl OfferStrength {
    /// Leads per prospect, always in (0, 1].
    pub fn conversion_rate(&self) -> f64 {
        1.0 / self.prospects_per_lead as f64
    }

    pub fn display_label(&self) -> String {
        format!(
            "{} (1 lead per {} prospects)",
            self.label, self.prospects_per_lead
        )
    }
}

/// Raw calculator state as typed by the user. Numeric fields stay free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorInputs {
    pub selected_tier_index: usize,
    pub monthly_revenue_per_customer: String,
    pub retention_months: String,
    pub close_rate_percent: String,
    pub selected_offer_strength_index: usize,
    pub gross_profit_margin_percent: String,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            selected_tier_index: 0,
            monthly_revenue_per_customer: String::new(),
            retention_months: String::new(),
            close_rate_percent: "33".to_string(),
            selected_offer_strength_index: 0,
            gross_profit_margin_percent: "70".to_string(),
        }
    }
}

/// LTV:CAC or LTGP:CAC, rounded to a whole number of "x:1".
///
/// `Undefined` when CAC is zero, i.e. no customers were acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "Option<i64>")]
pub enum CacRatio {
    Finite(i64),
    Undefined,
}

impl CacRatio {
    pub fn value(&self) -> Option<i64> {
        match self {
            CacRatio::Finite(v) => Some(*v),
            CacRatio::Undefined => None,
        }
    }
}

impl From<CacRatio> for Option<i64> {
    fn from(ratio: CacRatio) -> Self {
        ratio.value()
    }
}

impl fmt::Display for CacRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacRatio::Finite(v) => write!(f, "{}:1", v),
            CacRatio::Undefined => write!(f, "N/A"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Assessment {
    Favorable,
    Unfavorable,
}

impl Assessment {
    pub fn is_favorable(&self) -> bool {
        matches!(self, Assessment::Favorable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedMetrics {
    pub monthly_meetings: i64,
    pub new_customers: i64,
    pub new_monthly_revenue: i64,
    pub ltv: i64,
    pub ltgp: i64,
    pub cac: i64,
    pub roi_percent: i64,
    pub ltv_cac_ratio: CacRatio,
    pub ltgp_cac_ratio: CacRatio,
}

impl DerivedMetrics {
    pub fn roi_assessment(&self) -> Assessment {
        if self.roi_percent >= 0 {
            Assessment::Favorable
        } else {
            Assessment::Unfavorable
        }
    }

    pub fn ltv_cac_assessment(&self) -> Assessment {
        ratio_assessment(self.ltv_cac_ratio)
    }

    pub fn ltgp_cac_assessment(&self) -> Assessment {
        ratio_assessment(self.ltgp_cac_ratio)
    }
}

fn ratio_assessment(ratio: CacRatio) -> Assessment {
    match ratio {
        CacRatio::Finite(v) if v >= 1 => Assessment::Favorable,
        _ => Assessment::Unfavorable,
    }
}

/// A named set of inputs, as listed in a scenario file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub inputs: CalculatorInputs,
}

/// One evaluated scenario, flattened for tabular export.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario: String,
    pub tier: &'static str,
    pub offer_strength: &'static str,
    pub monthly_revenue_per_customer: String,
    pub retention_months: String,
    pub close_rate_percent: String,
    pub gross_profit_margin_percent: String,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

/// Everything produced by the transform step, ready to be written out.
#[derive(Debug, Clone)]
pub struct ReportBundle {
    pub results: Vec<ScenarioResult>,
    pub csv_output: String,
    pub tsv_output: String,
    pub json_output: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics_with(roi: i64, ltv_cac: CacRatio, ltgp_cac: CacRatio) -> DerivedMetrics {
        DerivedMetrics {
            monthly_meetings: 0,
            new_customers: 0,
            new_monthly_revenue: 0,
            ltv: 0,
            ltgp: 0,
            cac: 0,
            roi_percent: roi,
            ltv_cac_ratio: ltv_cac,
            ltgp_cac_ratio: ltgp_cac,
        }
    }

    #[test]
    fn test_roi_threshold_is_zero() {
        assert!(metrics_with(0, CacRatio::Undefined, CacRatio::Undefined)
            .roi_assessment()
            .is_favorable());
        assert_eq!(
            metrics_with(-1, CacRatio::Undefined, CacRatio::Undefined).roi_assessment(),
            Assessment::Unfavorable
        );
    }

    #[test]
    fn test_ratio_threshold_is_one() {
        let m = metrics_with(0, CacRatio::Finite(1), CacRatio::Finite(0));
        assert_eq!(m.ltv_cac_assessment(), Assessment::Favorable);
        assert_eq!(m.ltgp_cac_assessment(), Assessment::Unfavorable);
    }

    #[test]
    fn test_undefined_ratio_is_unfavorable() {
        let m = metrics_with(0, CacRatio::Undefined, CacRatio::Undefined);
        assert_eq!(m.ltv_cac_assessment(), Assessment::Unfavorable);
        assert_eq!(m.ltgp_cac_assessment(), Assessment::Unfavorable);
    }

    #[test]
    fn test_ratio_display() {
        assert_eq!(CacRatio::Finite(2).to_string(), "2:1");
        assert_eq!(CacRatio::Undefined.to_string(), "N/A");
    }

    #[test]
    fn test_ratio_serializes_as_nullable_number() {
        let m = metrics_with(5, CacRatio::Finite(3), CacRatio::Undefined);
        let json = serde_json::to_value(m).unwrap();
        assert_eq!(json["ltv_cac_ratio"], serde_json::json!(3));
        assert!(json["ltgp_cac_ratio"].is_null());
    }

    #[test]
    fn test_offer_strength_label_and_rate() {
        let s = OfferStrength {
            label: "Great",
            prospects_per_lead: 350,
        };
        assert_eq!(s.display_label(), "Great (1 lead per 350 prospects)");
        assert!((s.conversion_rate() - 1.0 / 350.0).abs() < f64::EPSILON);
    }
}
