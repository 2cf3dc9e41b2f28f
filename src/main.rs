use clap::Parser;
use morsel_etl::domain::model::RunSummary;
use morsel_etl::domain::ports::ConfigProvider;
use morsel_etl::utils::error::ErrorSeverity;
use morsel_etl::utils::{logger, validation::Validate};
use morsel_etl::{CliConfig, EtlEngine, LocalStorage, SalesPipeline, TomlConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting morsel-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let verbose = config.verbose;
    let monitor_enabled = config.monitor;

    let result = if let Some(config_path) = config.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", config_path);
        let toml_config = match TomlConfig::from_file(&config_path) {
            Ok(toml_config) => toml_config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", config_path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML");
                std::process::exit(1);
            }
        };
        let monitor = monitor_enabled || toml_config.monitoring_enabled();
        run_pipeline(toml_config, monitor).await
    } else {
        run_pipeline(config, monitor_enabled).await
    };

    match result {
        Ok(summary) => {
            tracing::info!("✅ ETL process completed successfully!");
            println!("✅ ETL process completed successfully!");
            println!("📁 Output saved to: {}", summary.output_path);

            let report = &summary.report;
            println!(
                "📊 {} files read, {} rows written, {} rows skipped",
                report.files_read,
                report.rows_written,
                report.skipped_rows.total()
            );
            if verbose {
                println!("{}", serde_json::to_string_pretty(report)?);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run_pipeline<C>(config: C, monitor_enabled: bool) -> morsel_etl::Result<RunSummary>
where
    C: ConfigProvider + Validate + 'static,
{
    config.validate()?;

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    tracing::info!(
        "Consolidating '{}' sales from '{}' into '{}'",
        config.target_product(),
        config.input_dir(),
        config.output_path()
    );

    let storage = LocalStorage::new(".".to_string());
    let pipeline = SalesPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    engine.run().await
}
