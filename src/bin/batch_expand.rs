use clap::Parser;
use query_symbols::core::output::render_dry_run;
use query_symbols::core::ConfigProvider;
use query_symbols::utils::{logger, validation::Validate};
use query_symbols::{BatchConfig, BatchPipeline, ExpansionEngine, LocalStorage};

#[derive(Parser)]
#[command(name = "batch-expand")]
#[command(about = "Expand shorthand symbols for a batch of queries described in TOML")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "query-symbols.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override output formats from config (comma separated)
    #[arg(long, value_delimiter = ',')]
    formats: Option<Vec<String>>,

    /// Dry run - show the expansions without writing any file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match BatchConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        let level = if args.verbose { "debug" } else { config.log_level() };
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(args.verbose || config.log_level() == "debug");
    }

    tracing::info!("Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(formats) = args.formats {
        tracing::info!("Output formats overridden to: {}", formats.join(", "));
        config.output.formats = formats;
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    let pipeline = BatchPipeline::new(LocalStorage::default(), config);

    if args.dry_run {
        tracing::info!("DRY RUN MODE - No files will be written");
        let expanded = pipeline.dry_run().await?;
        print!("{}", render_dry_run(&expanded));
        return Ok(());
    }

    let engine = ExpansionEngine::new(pipeline);

    match engine.run().await {
        Ok(written) => {
            println!("✅ Expanded batch '{}'", engine.pipeline().config().batch.name);
            for path in written {
                println!("📁 {}", path);
            }
        }
        Err(e) => {
            tracing::error!("Batch failed: {} (Severity: {:?})", e, e.severity());
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &BatchConfig) {
    tracing::info!("Batch: {}", config.batch.name);
    if let Some(description) = &config.batch.description {
        tracing::info!("Description: {}", description);
    }
    if let Some(path) = config.input_path() {
        tracing::info!("Input file: {}", path);
    }
    tracing::info!("Inline queries: {}", config.inline_queries().len());
    tracing::info!("Output: {} ({})", config.output_path(), config.output_formats().join(", "));
}
