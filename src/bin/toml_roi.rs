use clap::Parser;
use roi_calc::config::toml_config::TomlConfig;
use roi_calc::core::format::{ColorMode, Formatter};
use roi_calc::core::report;
use roi_calc::core::ConfigProvider;
use roi_calc::utils::{logger, validation::Validate};
use roi_calc::{Calculator, LocalStorage, ReportPipeline, RoiRunner};

#[derive(Parser)]
#[command(name = "toml-roi")]
#[command(about = "Evaluate ROI scenarios from a TOML file and export the report")]
struct Args {
    /// Path to TOML scenario file
    #[arg(short, long, default_value = "roi-scenarios.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override export.output_path from the config
    #[arg(short, long)]
    output: Option<String>,

    /// Dry run - print each scenario's panel without writing files
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logging() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose || config.verbose_logging());
    }

    tracing::info!("🚀 Starting TOML-based ROI report");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Some(output) = &args.output {
        config.export.output_path = output.clone();
        tracing::info!("🔧 Output path overridden to: {}", output);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        if let Err(e) = perform_dry_run(&config) {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ReportPipeline::new(storage, config);
    let runner = RoiRunner::new(pipeline);

    match runner.run() {
        Ok(output_path) => {
            println!("✅ ROI report completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ ROI report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Report: {}", config.report.name);
    if let Some(description) = &config.report.description {
        println!("  Description: {}", description);
    }
    println!("  Scenarios: {}", config.scenarios.len());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.export.formats.join(", "));
    if let Some(bundle) = config.bundle_filename() {
        println!("  Bundle: {} (ZIP)", bundle);
    }
    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
    println!();
}

fn perform_dry_run(config: &TomlConfig) -> roi_calc::Result<()> {
    let formatter = Formatter::new(ColorMode::Auto);

    for scenario in config.scenarios() {
        let calculator = Calculator::from_inputs(scenario.inputs)?;

        println!("{}", formatter.bold(&format!("▶ {}", scenario.name)));
        println!(
            "{}",
            report::render_selection(
                calculator.selected_tier(),
                calculator.selected_offer_strength(),
                calculator.inputs(),
                &formatter,
            )
        );
        println!("{}", report::render_panel(&calculator.metrics(), &formatter));
        println!();
    }

    println!("💾 Would write:");
    match config.bundle_filename() {
        Some(bundle) => println!("  {}/{}", config.output_path(), bundle),
        None => {
            for format in &config.export.formats {
                println!("  {}/{}", config.output_path(), config.filename_for(format));
            }
        }
    }
    println!();
    println!("✅ Dry run complete. Use --verbose for more details during an actual run.");
    Ok(())
}

