use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool, configured: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    match (verbose, configured) {
        (true, _) => EnvFilter::new("salud_admin=debug,info"),
        (false, Some(level)) => EnvFilter::new(format!("salud_admin={}", level)),
        (false, None) => EnvFilter::new("salud_admin=info"),
    }
}

/// `configured` 來自設定檔的 `[logging] level`，`RUST_LOG` 優先
pub fn init_cli_logger(verbose: bool, configured: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, configured))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(configured: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(false, configured))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(), // 供非互動環境收集
        )
        .init();
}
