use log::LevelFilter;

/// Initialize logging to stderr at `level`.
/// Should be called once at the start of main().
///
/// # Errors
///
/// Returns an error if a logger has already been installed.
pub fn init_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}  {} {} {}",
                chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

