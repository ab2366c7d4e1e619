//! This module provides observability for the strategy planner.
//!
//! The planner's choice between candidates is easy to get wrong silently, so
//! its decisions go through `log` and, in debug builds, through the
//! `log_metric!` macro as structured key-value records.

use log::LevelFilter;
use std::fs::OpenOptions;
use std::sync::Once;

/// Logs a structured key-value metric string through `log::debug!`, only in debug builds.
///
/// # Example
/// ```
/// use multiset_codec::log_metric;
/// let len = 12;
/// log_metric!("event"="candidate", "method"="Direct", "len"=&len);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            // Collect each pair as a JSON string fragment
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+

            log::debug!("CODEC_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` backend at `Info` level.
///
/// Only the first call has an effect. When `log_file` is given and can be
/// opened, records are appended there instead of stderr; if it cannot be
/// opened the logger falls back to stderr and says so.
pub fn enable_verbose_logging(log_file: Option<&str>) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Info);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        let mut open_failure = None;
        if let Some(filename) = log_file {
            match OpenOptions::new().append(true).create(true).open(filename) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                }
                Err(e) => open_failure = Some((filename.to_string(), e)),
            }
        }

        let _ = builder.try_init();

        if let Some((filename, e)) = open_failure {
            log::warn!("Could not open log file {filename:?} ({e}); logging to stderr");
        }
    });
}
