use log::LevelFilter;

/// Map repeated `-v` flags to a default filter
pub(crate) fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install `env_logger` on stderr. `RUST_LOG`, when set, overrides the verbosity flags.
pub(crate) fn setup_logging(verbose: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(verbose));
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format_timestamp(None).target(env_logger::Target::Stderr);

    // Fails only when a logger is already installed
    let _ = builder.try_init();
}
