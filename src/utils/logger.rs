use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 沒有設定 RUST_LOG 時使用的過濾條件，只調整本 crate 的層級
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "zoo_etl=debug"
    } else {
        "zoo_etl=info"
    }
}

pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // stdout 留給進度輸出，日誌一律寫到 stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
