use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "OPENCODE_LOMBOK_LOG";

/// Filter used when neither `OPENCODE_LOMBOK_LOG` nor `RUST_LOG` is set:
/// 0 = warn, 1 = info, 2+ = debug.
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "opencode_lombok=warn",
        1 => "opencode_lombok=info",
        _ => "opencode_lombok=debug",
    }
}

/// Logs go to stderr so stdout stays clean for values the host captures.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
