use clap::Parser;
use zoo_etl::utils::error::ErrorCategory;
use zoo_etl::utils::logger;
use zoo_etl::{run_arts, ArtsArgs, EtlError};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = ArtsArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let source = match args.source() {
        Ok(source) => source,
        Err(e) => fail(e),
    };
    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    tracing::debug!("Arts config: {:?}, source: {:?}", config, source);

    // 個別動物園失敗不影響退出碼
    if let Err(e) = run_arts(&source, config).await {
        fail(e);
    }
}

fn fail(e: EtlError) -> ! {
    tracing::error!("❌ Arts run failed: {} (Category: {:?})", e, e.category());
    tracing::debug!("💡 {}", e.recovery_suggestion());

    match e.category() {
        ErrorCategory::EmptyResult => eprintln!("{}", e),
        _ => eprintln!("Error: {}", e),
    }
    std::process::exit(e.exit_code());
}
