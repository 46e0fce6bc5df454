use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CAFE_ETL_LOG";

/// Stderr logging so stdout carries only the run summary. `CAFE_ETL_LOG`
/// overrides the default level.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "cafe_etl=info" } else { "cafe_etl=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
