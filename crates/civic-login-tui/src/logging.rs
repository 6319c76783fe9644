//! Log filter setup

use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_DIRECTIVES: &str = "civic_login=warn,civic_login_tui=warn";

/// Filter from `RUST_LOG`, falling back to [`DEFAULT_DIRECTIVES`]
pub fn env_filter() -> EnvFilter {
    filter_from(std::env::var("RUST_LOG").ok().as_deref())
}

/// Filter from explicit directives; `None` or garbage yields the defaults
pub fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}
