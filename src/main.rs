use clap::Parser;
use query_symbols::core::input::read_queries;
use query_symbols::core::output::render_symbol_table;
use query_symbols::utils::{logger, validation::Validate};
use query_symbols::{transform, BatchPipeline, CliConfig, ExpansionEngine, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    if config.list_symbols {
        print!("{}", render_symbol_table());
        return Ok(());
    }

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.input.is_none() {
        let queries = if config.queries.is_empty() {
            tracing::debug!("Reading queries from stdin");
            read_queries(tokio::io::stdin()).await?
        } else {
            config.queries.clone()
        };

        for query in &queries {
            println!("{}", transform(&query.query));
        }
        return Ok(());
    }

    let storage = LocalStorage::default();
    let pipeline = BatchPipeline::new(storage, config);
    let engine = ExpansionEngine::new(pipeline);

    match engine.run().await {
        Ok(written) => {
            for path in written {
                println!("📁 {}", path);
            }
        }
        Err(e) => {
            tracing::error!("Expansion failed: {} (Severity: {:?})", e, e.severity());
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}
