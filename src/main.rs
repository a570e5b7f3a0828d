use clap::Parser;
use dump_ch2::utils::{logger, validation::Validate};
use dump_ch2::{ChannelPipeline, CliConfig, DumpEngine, DumpError, LocalStorage};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting dump-ch2");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Channel file generation failed: {} (Category: {:?})",
            e,
            e.category()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: &CliConfig) -> Result<(), DumpError> {
    // 設定錯誤必須在任何網路請求之前被發現
    let config = cli.resolve()?;
    config.validate()?;
    tracing::info!(
        "BonDriver type: {}, output: {}, normalize: {}, strip: {}",
        config.driver_type,
        config.output_path,
        config.normalize_names,
        config.strip_disabled
    );

    let pipeline = ChannelPipeline::new(LocalStorage::new(), config)?;
    let engine = DumpEngine::new(pipeline);

    let output_path = engine.run().await?;
    println!("✅ Wrote {}", output_path);
    Ok(())
}
