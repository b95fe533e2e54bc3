use anyhow::Context;
use clap::Parser;
use roi_calc::core::format::Formatter;
use roi_calc::core::report::{self, DISCLAIMER};
use roi_calc::domain::model::{Scenario, ScenarioResult};
use roi_calc::utils::{logger, validation::Validate};
use roi_calc::{evaluate, Calculator, CliConfig};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let formatter = Formatter::new(config.color_mode());
    tracing::debug!("Color output: {}", formatter.uses_color());

    if config.list_catalog {
        println!("{}", report::render_catalog(&formatter));
        return Ok(());
    }

    let calculator =
        Calculator::from_inputs(config.inputs()).context("invalid calculator selection")?;

    match config.format.as_str() {
        "text" => print_text(&calculator, &config, &formatter),
        format => print_export(&calculator, &config, format)?,
    }

    Ok(())
}

fn print_text(calculator: &Calculator, config: &CliConfig, formatter: &Formatter) {
    let metrics = calculator.metrics();
    tracing::info!(
        "Computed ROI {}% for {} at {}",
        metrics.roi_percent,
        calculator.selected_tier().description,
        calculator.selected_offer_strength().label
    );

    println!(
        "{}",
        report::render_selection(
            calculator.selected_tier(),
            calculator.selected_offer_strength(),
            calculator.inputs(),
            formatter,
        )
    );
    println!();
    println!("{}", report::render_panel(&metrics, formatter));

    if config.compare_tiers {
        println!();
        println!(
            "{}",
            report::render_tier_table(
                &calculator.compare_tiers(),
                calculator.selected_offer_strength(),
                formatter,
            )
        );
    }

    println!();
    println!("{}", formatter.dim(DISCLAIMER));
}

fn print_export(calculator: &Calculator, config: &CliConfig, format: &str) -> anyhow::Result<()> {
    let results = if config.compare_tiers {
        let mut results = Vec::new();
        for (index, tier) in roi_calc::PROSPECT_TIERS.iter().enumerate() {
            let mut inputs = calculator.inputs().clone();
            inputs.selected_tier_index = index;
            results.push(evaluate(&Scenario {
                name: tier.description.to_string(),
                inputs,
            })?);
        }
        results
    } else {
        vec![evaluate(&Scenario {
            name: "cli".to_string(),
            inputs: calculator.inputs().clone(),
        })?]
    };

    let output = render_export(&results, format).context("failed to render report")?;
    print!("{}", output);
    if format == "json" {
        println!();
    }
    Ok(())
}

fn render_export(results: &[ScenarioResult], format: &str) -> roi_calc::Result<String> {
    match format {
        "json" => report::to_json("roi-calc", results, chrono::Utc::now()),
        "tsv" => report::to_tsv(results),
        _ => report::to_csv(results),
    }
}
