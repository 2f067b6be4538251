//! Logging setup shared by the timing binaries and test suites.

/// Filter used when `RUST_LOG` isn't set: enough to see which clock configuration a run picked up.
const DEFAULT_FILTER: &str = "info";

/// Log to stderr, filtered by `RUST_LOG`.
///
/// Safe to call from every test: only the first call in a process installs the logger.
pub fn log_to_stderr() {
    static ONCE: std::sync::Once = std::sync::Once::new();

    ONCE.call_once(|| {
        let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
            .format(|buf, record| {
                use std::io::Write;

                writeln!(
                    buf,
                    "{} {} time={} target={}",
                    record.level(),
                    record.args(),
                    time::OffsetDateTime::now_utc(),
                    record.target()
                )
            })
            .try_init();

        // Someone else got to the global logger first; theirs stays.
        if let Err(e) = result {
            log::debug!("Not installing the stderr logger: {}", e);
        }
    });
}
