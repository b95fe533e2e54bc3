pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::format::ColorMode;
#[cfg(feature = "cli")]
use crate::domain::catalog::{OFFER_STRENGTHS, PROSPECT_TIERS};
#[cfg(feature = "cli")]
use crate::domain::model::CalculatorInputs;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_index, validate_one_of, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
pub const OUTPUT_FORMATS: [&str; 4] = ["text", "json", "csv", "tsv"];

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "roi-calc")]
#[command(about = "Retainer ROI calculator: meetings, customers, LTV, CAC and ROI")]
pub struct CliConfig {
    /// Prospect tier index (see --list-catalog)
    #[arg(long, default_value_t = 0)]
    pub tier: usize,

    /// Offer strength index (see --list-catalog)
    #[arg(long, default_value_t = 0)]
    pub offer_strength: usize,

    /// Monthly revenue per customer in GBP
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    pub monthly_revenue: String,

    /// Average customer retention in months
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    pub retention_months: String,

    /// Expected close rate (%)
    #[arg(long, default_value = "33", allow_hyphen_values = true)]
    pub close_rate: String,

    /// Gross profit margin (%)
    #[arg(long, default_value = "70", allow_hyphen_values = true)]
    pub gross_margin: String,

    /// Show every tier side by side for the chosen offer strength
    #[arg(long)]
    pub compare_tiers: bool,

    /// Output format: text, json, csv or tsv
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Color output: auto, always or never
    #[arg(long, default_value = "auto")]
    pub color: String,

    /// Print the tier and offer strength catalogs and exit
    #[arg(long)]
    pub list_catalog: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn inputs(&self) -> CalculatorInputs {
        CalculatorInputs {
            selected_tier_index: self.tier,
            monthly_revenue_per_customer: self.monthly_revenue.clone(),
            retention_months: self.retention_months.clone(),
            close_rate_percent: self.close_rate.clone(),
            selected_offer_strength_index: self.offer_strength,
            gross_profit_margin_percent: self.gross_margin.clone(),
        }
    }

    pub fn color_mode(&self) -> ColorMode {
        ColorMode::parse(&self.color).unwrap_or(ColorMode::Auto)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_index("tier", self.tier, PROSPECT_TIERS.len())?;
        validate_index("offer strength", self.offer_strength, OFFER_STRENGTHS.len())?;
        validate_one_of("format", &self.format, &OUTPUT_FORMATS)?;
        validate_one_of("color", &self.color.to_lowercase(), &ColorMode::NAMES)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_calculator_defaults() {
        let config = CliConfig::parse_from(["roi-calc"]);
        assert_eq!(config.inputs(), CalculatorInputs::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.color_mode(), ColorMode::Auto);
    }

    #[test]
    fn test_flags_map_to_inputs() {
        let config = CliConfig::parse_from([
            "roi-calc",
            "--tier",
            "2",
            "--offer-strength",
            "3",
            "--monthly-revenue",
            "250",
            "--retention-months",
            "18",
            "--close-rate",
            "-5",
        ]);
        let inputs = config.inputs();
        assert_eq!(inputs.selected_tier_index, 2);
        assert_eq!(inputs.selected_offer_strength_index, 3);
        assert_eq!(inputs.monthly_revenue_per_customer, "250");
        assert_eq!(inputs.close_rate_percent, "-5");
        assert_eq!(inputs.gross_profit_margin_percent, "70");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad_tier = CliConfig::parse_from(["roi-calc", "--tier", "3"]);
        assert!(bad_tier.validate().is_err());

        let bad_format = CliConfig::parse_from(["roi-calc", "--format", "xml"]);
        assert!(bad_format.validate().is_err());

        let bad_color = CliConfig::parse_from(["roi-calc", "--color", "rainbow"]);
        assert!(bad_color.validate().is_err());
    }
}
