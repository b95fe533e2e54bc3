use crate::core::format::Formatter;
use crate::domain::catalog::{OFFER_STRENGTHS, PROSPECT_TIERS};
use crate::domain::model::{
    CacRatio, CalculatorInputs, DerivedMetrics, OfferStrength, ProspectTier, ScenarioResult,
};
use crate::utils::error::{Result, RoiError};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DISCLAIMER: &str = "Note: This calculator provides estimates for educational purposes only. \
Actual results may vary depending on various factors including market conditions, industry, \
target audience, and campaign execution.";

pub const EXPORT_HEADERS: [&str; 16] = [
    "scenario",
    "tier",
    "offer_strength",
    "monthly_revenue_per_customer",
    "retention_months",
    "close_rate_percent",
    "gross_profit_margin_percent",
    "monthly_meetings",
    "new_customers",
    "new_monthly_revenue",
    "ltv",
    "ltgp",
    "cac",
    "roi_percent",
    "ltv_cac_ratio",
    "ltgp_cac_ratio",
];

const LABEL_WIDTH: usize = 26;

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}

/// Whole pounds with thousands separators, e.g. `£12,500` or `-£800`.
pub fn format_currency(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}£{}", sign, group_thousands(amount.unsigned_abs()))
}

pub fn format_cost_per_prospect(tier: &ProspectTier) -> String {
    format!("£{:.2}/prospect", tier.cost_per_prospect())
}

fn line(label: &str, value: &str) -> String {
    format!("  {:<width$}{}", label, value, width = LABEL_WIDTH)
}

/// The "ROI Analysis" panel, one labeled line per metric.
pub fn render_panel(metrics: &DerivedMetrics, formatter: &Formatter) -> String {
    let mut lines = vec![formatter.header("ROI Analysis")];

    lines.push(line("Meetings per Month", &metrics.monthly_meetings.to_string()));
    lines.push(line("New Customers per Month", &metrics.new_customers.to_string()));
    lines.push(line(
        "New Monthly Revenue",
        &format_currency(metrics.new_monthly_revenue),
    ));
    lines.push(line("LTV", &format_currency(metrics.ltv)));
    lines.push(line("LTGP", &format_currency(metrics.ltgp)));
    lines.push(line("CAC", &format_currency(metrics.cac)));

    lines.push(formatter.assessed(
        &line("ROI", &format!("{}%", metrics.roi_percent)),
        metrics.roi_assessment(),
    ));
    lines.push(formatter.assessed(
        &line("LTV:CAC Ratio", &metrics.ltv_cac_ratio.to_string()),
        metrics.ltv_cac_assessment(),
    ));
    lines.push(formatter.assessed(
        &line("LTGP:CAC Ratio", &metrics.ltgp_cac_ratio.to_string()),
        metrics.ltgp_cac_assessment(),
    ));

    lines.join("\n")
}

/// Echo of the selection and the parsed-as-typed business metrics.
pub fn render_selection(
    tier: &ProspectTier,
    strength: &OfferStrength,
    inputs: &CalculatorInputs,
    formatter: &Formatter,
) -> String {
    let blank_as_dash = |s: &str| {
        if s.trim().is_empty() {
            "-".to_string()
        } else {
            s.to_string()
        }
    };

    [
        formatter.header("Your Business Metrics"),
        line(
            "Prospect Tier",
            &format!(
                "{} ({}, {})",
                tier.description,
                tier.label,
                format_cost_per_prospect(tier)
            ),
        ),
        line("Offer Strength", &strength.display_label()),
        line(
            "Monthly Revenue/Customer",
            &blank_as_dash(&inputs.monthly_revenue_per_customer),
        ),
        line("Retention (months)", &blank_as_dash(&inputs.retention_months)),
        line("Close Rate (%)", &blank_as_dash(&inputs.close_rate_percent)),
        line(
            "Gross Profit Margin (%)",
            &blank_as_dash(&inputs.gross_profit_margin_percent),
        ),
    ]
    .join("\n")
}

/// Side-by-side view of every tier under one offer strength.
pub fn render_tier_table(
    rows: &[(&'static ProspectTier, DerivedMetrics)],
    strength: &OfferStrength,
    formatter: &Formatter,
) -> String {
    let mut lines = vec![formatter.header(&format!(
        "Tier Comparison: {}",
        strength.display_label()
    ))];
    lines.push(formatter.bold(&format!(
        "  {:<18}{:<15}{:<17}{:>9}{:>11}{:>10}{:>9}{:>9}",
        "Prospects", "Retainer", "Per Prospect", "Meetings", "Customers", "CAC", "ROI", "LTV:CAC"
    )));

    for (tier, metrics) in rows {
        let row = format!(
            "  {:<18}{:<15}{:<17}{:>9}{:>11}{:>10}{:>9}{:>9}",
            tier.description,
            tier.label,
            format_cost_per_prospect(tier),
            metrics.monthly_meetings,
            metrics.new_customers,
            format_currency(metrics.cac),
            format!("{}%", metrics.roi_percent),
            metrics.ltv_cac_ratio.to_string(),
        );
        lines.push(formatter.assessed(&row, metrics.roi_assessment()));
    }

    lines.join("\n")
}

/// Both static catalogs with their indices, for `--list-catalog`.
pub fn render_catalog(formatter: &Formatter) -> String {
    let mut lines = vec![formatter.header("Prospect Tiers")];
    for (index, tier) in PROSPECT_TIERS.iter().enumerate() {
        lines.push(format!(
            "  [{}] {} - {} ({})",
            index,
            tier.description,
            tier.label,
            format_cost_per_prospect(tier)
        ));
    }
    lines.push(String::new());
    lines.push(formatter.header("Offer Strengths"));
    for (index, strength) in OFFER_STRENGTHS.iter().enumerate() {
        lines.push(format!("  [{}] {}", index, strength.display_label()));
    }
    lines.join("\n")
}

fn export_record(result: &ScenarioResult) -> Vec<String> {
    let m = &result.metrics;
    let ratio_cell = |r: CacRatio| {
        r.value().map(|v| v.to_string()).unwrap_or_default()
    };

    vec![
        result.scenario.clone(),
        result.tier.to_string(),
        result.offer_strength.to_string(),
        result.monthly_revenue_per_customer.clone(),
        result.retention_months.clone(),
        result.close_rate_percent.clone(),
        result.gross_profit_margin_percent.clone(),
        m.monthly_meetings.to_string(),
        m.new_customers.to_string(),
        m.new_monthly_revenue.to_string(),
        m.ltv.to_string(),
        m.ltgp.to_string(),
        m.cac.to_string(),
        m.roi_percent.to_string(),
        ratio_cell(m.ltv_cac_ratio),
        ratio_cell(m.ltgp_cac_ratio),
    ]
}

/// Delimited export, one row per scenario. Undefined ratios are empty cells.
pub fn to_delimited(results: &[ScenarioResult], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for result in results {
        writer.write_record(export_record(result))?;
    }

    let bytes = writer.into_inner().map_err(|e| RoiError::ProcessingError {
        message: format!("Failed to flush delimited output: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| RoiError::ProcessingError {
        message: format!("Delimited output is not valid UTF-8: {}", e),
    })
}

pub fn to_csv(results: &[ScenarioResult]) -> Result<String> {
    to_delimited(results, b',')
}

pub fn to_tsv(results: &[ScenarioResult]) -> Result<String> {
    to_delimited(results, b'\t')
}

#[derive(Serialize)]
struct JsonReport<'a> {
    report: &'a str,
    generated_at: String,
    scenarios: &'a [ScenarioResult],
}

pub fn to_json(
    report_name: &str,
    results: &[ScenarioResult],
    generated_at: DateTime<Utc>,
) -> Result<String> {
    let report = JsonReport {
        report: report_name,
        generated_at: generated_at.to_rfc3339(),
        scenarios: results,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::evaluate;
    use crate::domain::model::Scenario;
    use chrono::TimeZone;

    fn scenario(name: &str, revenue: &str, close: &str) -> Scenario {
        Scenario {
            name: name.to_string(),
            inputs: CalculatorInputs {
                monthly_revenue_per_customer: revenue.to_string(),
                retention_months: "12".to_string(),
                close_rate_percent: close.to_string(),
                ..CalculatorInputs::default()
            },
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "£0");
        assert_eq!(format_currency(840), "£840");
        assert_eq!(format_currency(1200), "£1,200");
        assert_eq!(format_currency(1_000_000), "£1,000,000");
        assert_eq!(format_currency(-2050), "-£2,050");
    }

    #[test]
    fn test_cost_per_prospect_label() {
        assert_eq!(format_cost_per_prospect(&PROSPECT_TIERS[0]), "£1.00/prospect");
        assert_eq!(format_cost_per_prospect(&PROSPECT_TIERS[1]), "£0.86/prospect");
    }

    #[test]
    fn test_panel_lists_metrics_in_order() {
        let result = evaluate(&scenario("base", "100", "33")).unwrap();
        let panel = render_panel(&result.metrics, &Formatter::plain());
        let lines: Vec<&str> = panel.lines().collect();

        assert_eq!(lines[0], "ROI Analysis");
        assert!(lines[1].starts_with("  Meetings per Month") && lines[1].ends_with('4'));
        assert!(lines[4].ends_with("£1,200"));
        assert!(lines[6].ends_with("£2,000"));
        assert!(lines[7].ends_with("-40%"));
        assert!(lines[8].ends_with("1:1"));
        assert!(lines[9].ends_with("0:1"));
    }

    #[test]
    fn test_panel_shows_na_without_customers() {
        let result = evaluate(&scenario("none", "100", "0")).unwrap();
        let panel = render_panel(&result.metrics, &Formatter::plain());
        assert!(panel
            .lines()
            .any(|l| l.trim_start().starts_with("LTV:CAC Ratio") && l.ends_with("N/A")));
    }

    #[test]
    fn test_tier_table_has_a_row_per_tier() {
        let rows = crate::core::engine::compare_tiers(
            &CalculatorInputs::default(),
            &OFFER_STRENGTHS[0],
        );
        let table = render_tier_table(&rows, &OFFER_STRENGTHS[0], &Formatter::plain());
        assert_eq!(table.lines().count(), 2 + PROSPECT_TIERS.len());
        assert!(table.contains("7,000 prospects"));
    }

    #[test]
    fn test_catalog_lists_indices() {
        let text = render_catalog(&Formatter::plain());
        assert!(text.contains("[2] 7,000 prospects - £4,000/month"));
        assert!(text.contains("[3] Outstanding (1 lead per 100 prospects)"));
    }

    #[test]
    fn test_csv_export() {
        let results = vec![
            evaluate(&scenario("base", "100", "33")).unwrap(),
            evaluate(&scenario("no-close", "100", "0")).unwrap(),
        ];
        let csv = to_csv(&results).unwrap();
        let rows: Vec<&str> = csv.lines().collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("scenario,tier,offer_strength"));
        assert!(rows[1].starts_with("base,\"2,000 prospects\",Good,100,12,33,70,4,1,100,1200,840,2000,-40,1,0"));
        assert!(rows[2].ends_with(",0,0,,"));
    }

    #[test]
    fn test_tsv_export_uses_tabs() {
        let results = vec![evaluate(&scenario("base", "100", "33")).unwrap()];
        let tsv = to_tsv(&results).unwrap();
        assert!(tsv.lines().next().unwrap().contains("scenario\ttier\t"));
        assert!(tsv.contains("base\t2,000 prospects\tGood"));
    }

    #[test]
    fn test_json_export() {
        let results = vec![evaluate(&scenario("no-close", "100", "0")).unwrap()];
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&to_json("Q1", &results, at).unwrap()).unwrap();

        assert_eq!(json["report"], "Q1");
        assert_eq!(json["generated_at"], "2024-01-02T03:04:05+00:00");
        let first = &json["scenarios"][0];
        assert_eq!(first["scenario"], "no-close");
        assert_eq!(first["cac"], 0);
        assert!(first["ltv_cac_ratio"].is_null());
        assert_eq!(results[0].metrics.ltgp_cac_ratio, CacRatio::Undefined);
    }
}
