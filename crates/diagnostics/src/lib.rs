//! Logging setup shared by the ToyFS crates
//!
//! The level comes from the `TOYFS_LOG` environment variable:
//! - `off` (default) - no logs
//! - `error`, `warn`, `info`, `debug` - minimum level written to stderr

use std::sync::Once;

// The macros expand to `$crate::emit::*`
pub use emit;

/// Environment variable holding the log level
pub const LOG_ENV: &str = "TOYFS_LOG";

static INIT: Once = Once::new();

/// Parsed value of `TOYFS_LOG`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSetting {
    Off,
    Level(emit::Level),
    Unknown,
}

/// Interpret a `TOYFS_LOG` value. Case-insensitive; surrounding blanks are ignored.
pub fn parse_log_setting(value: &str) -> LogSetting {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "off" => LogSetting::Off,
        "debug" => LogSetting::Level(emit::Level::Debug),
        "info" => LogSetting::Level(emit::Level::Info),
        "warn" => LogSetting::Level(emit::Level::Warn),
        "error" => LogSetting::Level(emit::Level::Error),
        _ => LogSetting::Unknown,
    }
}

/// Initialize diagnostics based on the `TOYFS_LOG` environment variable
///
/// Call once at startup. Later calls are ignored.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let value = std::env::var(LOG_ENV).unwrap_or_else(|_| "off".to_string());

        let level = match parse_log_setting(&value) {
            LogSetting::Off => return,
            LogSetting::Level(level) => level,
            LogSetting::Unknown => {
                // Logging isn't running yet, so this can't go through emit.
                eprintln!("Warning: Unknown {} value '{}', using 'info'", LOG_ENV, value);
                emit::Level::Info
            }
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        // The runtime lives for the whole process.
        std::mem::forget(rt);
    });
}

/// Log basic operations users may want to see (created a node, restored a tree)
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics (each mutation, resolution steps)
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log recoverable problems (fallbacks, ignored input)
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log failures that stop an operation
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

pub use init_diagnostics as init;
