pub mod logger {
    use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

    struct StderrLogger;

    impl Log for StderrLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: StderrLogger = StderrLogger;

    /// Parse a `PAGER_LOG` style level name, falling back to `warn`.
    pub fn level_from(value: Option<&str>) -> LevelFilter {
        value
            .and_then(|v| v.trim().parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Warn)
    }

    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_logger(&LOGGER)?;
        log::set_max_level(level);
        Ok(())
    }

    pub fn init_from_env() -> Result<(), SetLoggerError> {
        init(level_from(std::env::var("PAGER_LOG").ok().as_deref()))
    }
}
