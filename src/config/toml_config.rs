use crate::core::{ConfigProvider, Scenario};
use crate::domain::catalog::{OFFER_STRENGTHS, PROSPECT_TIERS};
use crate::domain::model::CalculatorInputs;
use crate::utils::error::{Result, RoiError};
use crate::utils::validation::{
    validate_index, validate_non_empty_string, validate_one_of, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

pub const EXPORT_FORMATS: [&str; 3] = ["csv", "tsv", "json"];

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub report: ReportConfig,
    #[serde(default, rename = "scenario")]
    pub scenarios: Vec<ScenarioConfig>,
    pub export: ExportConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub name: String,
    pub description: Option<String>,
}

/// A calculator field as written in TOML: either free text or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl InputValue {
    pub fn to_text(&self) -> String {
        match self {
            InputValue::Text(s) => s.clone(),
            InputValue::Integer(i) => i.to_string(),
            InputValue::Float(f) => f.to_string(),
        }
    }
}

impl Default for InputValue {
    fn default() -> Self {
        InputValue::Text(String::new())
    }
}

fn default_close_rate() -> InputValue {
    InputValue::Text("33".to_string())
}

fn default_gross_margin() -> InputValue {
    InputValue::Text("70".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub tier: usize,
    #[serde(default)]
    pub offer_strength: usize,
    #[serde(default)]
    pub monthly_revenue: InputValue,
    #[serde(default)]
    pub retention_months: InputValue,
    #[serde(default = "default_close_rate")]
    pub close_rate: InputValue,
    #[serde(default = "default_gross_margin")]
    pub gross_margin: InputValue,
}

impl ScenarioConfig {
    pub fn to_scenario(&self) -> Scenario {
        Scenario {
            name: self.name.clone(),
            inputs: CalculatorInputs {
                selected_tier_index: self.tier,
                monthly_revenue_per_customer: self.monthly_revenue.to_text(),
                retention_months: self.retention_months.to_text(),
                close_rate_percent: self.close_rate.to_text(),
                selected_offer_strength_index: self.offer_strength,
                gross_profit_margin_percent: self.gross_margin.to_text(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: String,
    pub formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub csv: Option<String>,
    pub tsv: Option<String>,
    pub json: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RoiError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RoiError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("report.name", &self.report.name)?;

        if self.scenarios.is_empty() {
            return Err(RoiError::MissingConfigError {
                field: "scenario".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            validate_non_empty_string("scenario.name", &scenario.name)?;
            if !seen.insert(scenario.name.as_str()) {
                return Err(RoiError::InvalidConfigValueError {
                    field: "scenario.name".to_string(),
                    value: scenario.name.clone(),
                    reason: "Scenario names must be unique".to_string(),
                });
            }
            validate_index("tier", scenario.tier, PROSPECT_TIERS.len())?;
            validate_index("offer strength", scenario.offer_strength, OFFER_STRENGTHS.len())?;
        }

        validate_path("export.output_path", &self.export.output_path)?;

        if self.export.formats.is_empty() {
            return Err(RoiError::MissingConfigError {
                field: "export.formats".to_string(),
            });
        }
        for format in &self.export.formats {
            validate_one_of("export.formats", format, &EXPORT_FORMATS)?;
        }

        if let Some(compression) = &self.export.compression {
            if compression.enabled {
                validate_path("export.compression.filename", &compression.filename)?;
            }
        }

        Ok(())
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn report_name(&self) -> &str {
        &self.report.name
    }

    fn scenarios(&self) -> Vec<Scenario> {
        self.scenarios.iter().map(ScenarioConfig::to_scenario).collect()
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.export.formats
    }

    fn bundle_filename(&self) -> Option<&str> {
        self.export
            .compression
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.filename.as_str())
    }

    fn filename_for(&self, format: &str) -> String {
        let custom = self.export.filenames.as_ref().and_then(|f| match format {
            "csv" => f.csv.clone(),
            "tsv" => f.tsv.clone(),
            "json" => f.json.clone(),
            _ => None,
        });
        custom.unwrap_or_else(|| format!("roi_report.{}", format))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
