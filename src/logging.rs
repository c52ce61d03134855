use log::LevelFilter;

/// Initialise the global logger.
///
/// `level` overrides `RUST_LOG` when given ("error", "warn", "info",
/// "debug", "trace"); unknown names fall back to `info`. Calling this more
/// than once is harmless.
pub fn init_logging(level: Option<&str>) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level {
        builder.filter_level(parse_level(level));
    }
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}

fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}
