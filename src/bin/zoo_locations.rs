use clap::Parser;
use zoo_etl::utils::error::ErrorCategory;
use zoo_etl::utils::logger;
use zoo_etl::{run_locations, EtlError, LocationsArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = LocationsArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    tracing::debug!("Locations config: {:?}", config);

    match run_locations(config).await {
        Ok(report) => {
            println!("Wrote {} rows to {}", report.rows, report.output_path);
        }
        Err(e) => fail(e),
    }
}

fn fail(e: EtlError) -> ! {
    tracing::error!("❌ Locations run failed: {} (Category: {:?})", e, e.category());
    tracing::debug!("💡 {}", e.recovery_suggestion());

    match e.category() {
        ErrorCategory::Http => eprintln!("HTTP error: {}", e),
        ErrorCategory::EmptyResult => eprintln!("{}", e),
        _ => eprintln!("Error: {}", e),
    }
    std::process::exit(e.exit_code());
}
