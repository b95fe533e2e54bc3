use crate::core::parse::parse_number_or_default;
use crate::domain::catalog::{offer_strength, prospect_tier, OFFER_STRENGTHS, PROSPECT_TIERS};
use crate::domain::model::{
    CacRatio, CalculatorInputs, DerivedMetrics, OfferStrength, ProspectTier, Scenario,
    ScenarioResult,
};
use crate::utils::error::{Result, RoiError};

/// Half away from zero, saturating at the `i64` bounds.
fn round(value: f64) -> i64 {
    value.round() as i64
}

fn ratio_over_cac(numerator: i64, cac: i64) -> CacRatio {
    if cac == 0 {
        return CacRatio::Undefined;
    }
    CacRatio::Finite(round(numerator as f64 / cac as f64))
}

/// Derives every sales metric from one set of inputs.
///
/// Pure: the result depends only on the arguments. Every intermediate is
/// rounded before it feeds the next step.
pub fn compute(
    inputs: &CalculatorInputs,
    tier: &ProspectTier,
    strength: &OfferStrength,
) -> DerivedMetrics {
    let monthly_revenue = parse_number_or_default(&inputs.monthly_revenue_per_customer, 0.0);
    let retention = parse_number_or_default(&inputs.retention_months, 0.0);
    let close_rate = parse_number_or_default(&inputs.close_rate_percent, 0.0);
    let gross_margin = parse_number_or_default(&inputs.gross_profit_margin_percent, 0.0);

    let monthly_meetings = round(tier.prospect_count as f64 * strength.conversion_rate());
    let new_customers = round(monthly_meetings as f64 * (close_rate / 100.0));
    let new_monthly_revenue = round(new_customers as f64 * monthly_revenue);
    let ltv = round(monthly_revenue * retention);
    let ltgp = round(ltv as f64 * (gross_margin / 100.0));

    let cac = if new_customers > 0 {
        round(tier.monthly_cost as f64 / new_customers as f64)
    } else {
        0
    };

    let roi_percent = if cac > 0 {
        round((ltv as f64 - cac as f64) / cac as f64 * 100.0)
    } else {
        0
    };

    let metrics = DerivedMetrics {
        monthly_meetings,
        new_customers,
        new_monthly_revenue,
        ltv,
        ltgp,
        cac,
        roi_percent,
        ltv_cac_ratio: ratio_over_cac(ltv, cac),
        ltgp_cac_ratio: ratio_over_cac(ltgp, cac),
    };

    tracing::trace!(?metrics, tier = tier.description, strength = strength.label, "computed metrics");
    metrics
}

/// Metrics for every tier under the same inputs and offer strength.
pub fn compare_tiers(
    inputs: &CalculatorInputs,
    strength: &OfferStrength,
) -> Vec<(&'static ProspectTier, DerivedMetrics)> {
    PROSPECT_TIERS
        .iter()
        .map(|tier| (tier, compute(inputs, tier, strength)))
        .collect()
}

fn lookup_tier(index: usize) -> Result<&'static ProspectTier> {
    prospect_tier(index).ok_or(RoiError::SelectionOutOfRange {
        kind: "tier",
        index,
        len: PROSPECT_TIERS.len(),
    })
}

fn lookup_offer_strength(index: usize) -> Result<&'static OfferStrength> {
    offer_strength(index).ok_or(RoiError::SelectionOutOfRange {
        kind: "offer strength",
        index,
        len: OFFER_STRENGTHS.len(),
    })
}

/// The calculator session: current inputs plus catalog lookups.
///
/// Indices are validated on the way in, so lookups never fail afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calculator {
    inputs: CalculatorInputs,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_inputs(inputs: CalculatorInputs) -> Result<Self> {
        lookup_tier(inputs.selected_tier_index)?;
        lookup_offer_strength(inputs.selected_offer_strength_index)?;
        Ok(Self { inputs })
    }

    pub fn inputs(&self) -> &CalculatorInputs {
        &self.inputs
    }

    pub fn select_tier(&mut self, index: usize) -> Result<()> {
        lookup_tier(index)?;
        self.inputs.selected_tier_index = index;
        Ok(())
    }

    pub fn select_offer_strength(&mut self, index: usize) -> Result<()> {
        lookup_offer_strength(index)?;
        self.inputs.selected_offer_strength_index = index;
        Ok(())
    }

    pub fn set_monthly_revenue_per_customer(&mut self, text: impl Into<String>) {
        self.inputs.monthly_revenue_per_customer = text.into();
    }

    pub fn set_retention_months(&mut self, text: impl Into<String>) {
        self.inputs.retention_months = text.into();
    }

    pub fn set_close_rate_percent(&mut self, text: impl Into<String>) {
        self.inputs.close_rate_percent = text.into();
    }

    pub fn set_gross_profit_margin_percent(&mut self, text: impl Into<String>) {
        self.inputs.gross_profit_margin_percent = text.into();
    }

    pub fn selected_tier(&self) -> &'static ProspectTier {
        &PROSPECT_TIERS[self.inputs.selected_tier_index]
    }

    pub fn selected_offer_strength(&self) -> &'static OfferStrength {
        &OFFER_STRENGTHS[self.inputs.selected_offer_strength_index]
    }

    /// Recomputed on every call.
    pub fn metrics(&self) -> DerivedMetrics {
        compute(
            &self.inputs,
            self.selected_tier(),
            self.selected_offer_strength(),
        )
    }

    pub fn compare_tiers(&self) -> Vec<(&'static ProspectTier, DerivedMetrics)> {
        compare_tiers(&self.inputs, self.selected_offer_strength())
    }
}

/// Runs one named scenario, rejecting catalog indices that do not exist.
pub fn evaluate(scenario: &Scenario) -> Result<ScenarioResult> {
    let calculator = Calculator::from_inputs(scenario.inputs.clone())?;
    let inputs = calculator.inputs();

    Ok(ScenarioResult {
        scenario: scenario.name.clone(),
        tier: calculator.selected_tier().description,
        offer_strength: calculator.selected_offer_strength().label,
        monthly_revenue_per_customer: inputs.monthly_revenue_per_customer.clone(),
        retention_months: inputs.retention_months.clone(),
        close_rate_percent: inputs.close_rate_percent.clone(),
        gross_profit_margin_percent: inputs.gross_profit_margin_percent.clone(),
        metrics: calculator.metrics(),
    })
}
