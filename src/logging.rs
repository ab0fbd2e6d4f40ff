use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor `MD4SUM_LOG` is set.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

pub fn init_tracing(verbose: u8) {
    // Priority order:
    // 1) RUST_LOG
    // 2) MD4SUM_LOG
    // 3) the -v level
    let fallback = default_directive(verbose);
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .or_else(|| std::env::var("MD4SUM_LOG").ok())
        .unwrap_or_else(|| fallback.to_string());

    let filter = EnvFilter::try_new(env_filter).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init();
}
