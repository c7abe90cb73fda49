use log::LevelFilter;

/// Initialize logging for the CLI.
///
/// Level is `Info` by default and `Debug` when `debug_enabled` is set;
/// an explicit `RUST_LOG` overrides both. Output goes to stderr with no
/// timestamps, so stdout stays clean for the rendered grid.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    // Let RUST_LOG override our defaults if explicitly set
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    builder.init();
    log::info!("logger initialized at {level:?} level");
}
