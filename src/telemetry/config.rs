use std::sync::OnceLock;

static JSON_MODE: OnceLock<bool> = OnceLock::new();

pub fn set_json_mode(v: bool) {
    let _ = JSON_MODE.set(v);
}

/// Whether one-shot commands print a JSON envelope instead of text.
pub fn json_mode() -> bool {
    *JSON_MODE.get().unwrap_or(&false)
}

pub fn logs_are_json() -> bool {
    matches!(std::env::var("TRAD_LOG_FORMAT").as_deref(), Ok("json"))
}

/// Initialize tracing/logging according to RUST_LOG and TRAD_LOG_FORMAT.
/// - Falls back to `default_level` if `RUST_LOG` is unset
/// - Supports `TRAD_LOG_FORMAT=json` for JSON logs (stderr)
pub fn init_tracing(default_level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let builder = tracing_subscriber::registry().with(filter);

    if logs_are_json() {
        let _ = builder.with(fmt_layer.json().flatten_event(true)).try_init();
    } else {
        let _ = builder.with(fmt_layer.compact()).try_init();
    }
}
