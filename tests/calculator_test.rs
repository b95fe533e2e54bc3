use roi_calc::{
    compare_tiers, compute, Assessment, CacRatio, Calculator, CalculatorInputs, OFFER_STRENGTHS,
    PROSPECT_TIERS,
};

fn inputs(revenue: &str, retention: &str, close: &str) -> CalculatorInputs {
    CalculatorInputs {
        monthly_revenue_per_customer: revenue.to_string(),
        retention_months: retention.to_string(),
        close_rate_percent: close.to_string(),
        ..CalculatorInputs::default()
    }
}

#[test]
fn test_scenario_one_through_public_api() {
    let mut calc = Calculator::new();
    calc.set_monthly_revenue_per_customer("100");
    calc.set_retention_months("12");

    let m = calc.metrics();
    assert_eq!(
        (m.monthly_meetings, m.new_customers, m.new_monthly_revenue),
        (4, 1, 100)
    );
    assert_eq!((m.ltv, m.ltgp, m.cac, m.roi_percent), (1200, 840, 2000, -40));
    assert_eq!(m.ltv_cac_ratio.to_string(), "1:1");
    assert_eq!(m.ltgp_cac_ratio.to_string(), "0:1");

    assert_eq!(m.roi_assessment(), Assessment::Unfavorable);
    assert_eq!(m.ltv_cac_assessment(), Assessment::Favorable);
    assert_eq!(m.ltgp_cac_assessment(), Assessment::Unfavorable);
}

#[test]
fn test_scenario_two_blank_revenue() {
    let m = compute(&inputs("", "12", "33"), &PROSPECT_TIERS[0], &OFFER_STRENGTHS[0]);
    assert_eq!((m.ltv, m.ltgp, m.new_monthly_revenue), (0, 0, 0));
    assert_eq!(m.roi_percent, -100);
}

#[test]
fn test_scenario_three_undefined_ratios() {
    let m = compute(&inputs("100", "12", "0"), &PROSPECT_TIERS[0], &OFFER_STRENGTHS[0]);
    assert_eq!(m.new_customers, 0);
    assert_eq!(m.cac, 0);
    assert_eq!(m.roi_percent, 0);
    assert_eq!(m.ltv_cac_ratio, CacRatio::Undefined);
    assert_eq!(m.ltgp_cac_ratio, CacRatio::Undefined);
    assert_eq!(m.ltv_cac_ratio.to_string(), "N/A");
    assert_eq!(m.ltv_cac_assessment(), Assessment::Unfavorable);
}

#[test]
fn test_profitable_campaign_is_favorable() {
    let rows = compare_tiers(&inputs("500", "24", "40"), &OFFER_STRENGTHS[3]);
    let (tier, m) = rows[1];

    assert_eq!(tier.prospect_count, 3500);
    // 35 meetings, 14 customers, 3000 / 14 = 214.3
    assert_eq!(m.monthly_meetings, 35);
    assert_eq!(m.new_customers, 14);
    assert_eq!(m.cac, 214);
    assert_eq!(m.ltv, 12000);
    assert_eq!(m.ltv_cac_ratio, CacRatio::Finite(56));
    assert!(m.roi_assessment().is_favorable());
    assert!(m.ltgp_cac_assessment().is_favorable());
}

#[test]
fn test_selection_changes_are_validated() {
    let mut calc = Calculator::new();
    assert!(calc.select_tier(2).is_ok());
    assert!(calc.select_offer_strength(1).is_ok());
    assert!(calc.select_tier(99).is_err());

    assert_eq!(calc.selected_tier().monthly_cost, 4000);
    assert_eq!(calc.selected_offer_strength().label, "Great");
}
