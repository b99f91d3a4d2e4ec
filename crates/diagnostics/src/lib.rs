//! Logging setup shared by the drivelist crates.
//!
//! Usage:
//! - Set DRIVELIST_LOG=off (default) - no logs
//! - Set DRIVELIST_LOG=info - run progress and summaries
//! - Set DRIVELIST_LOG=debug - every page, cache hit and parent lookup

use std::sync::Once;

// Re-export emit so macros can use it
pub use emit;

/// Environment variable that selects the log level.
pub const LOG_ENV: &str = "DRIVELIST_LOG";

static INIT: Once = Once::new();

/// Parse a `DRIVELIST_LOG` value.
///
/// Returns `None` for an unrecognized value, `Some(None)` for "off".
pub fn parse_level(value: &str) -> Option<Option<emit::Level>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "off" => Some(None),
        "debug" => Some(Some(emit::Level::Debug)),
        "info" => Some(Some(emit::Level::Info)),
        "warn" => Some(Some(emit::Level::Warn)),
        "error" => Some(Some(emit::Level::Error)),
        _ => None,
    }
}

/// Initialize diagnostics based on the DRIVELIST_LOG environment variable
///
/// Call once at startup. Later calls are ignored.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let value = std::env::var(LOG_ENV).unwrap_or_else(|_| "off".to_string());

        let level = match parse_level(&value) {
            Some(None) => return,
            Some(Some(level)) => level,
            None => {
                // Bootstrap warning, the emitter is not running yet
                eprintln!("Warning: Unknown {LOG_ENV} value '{value}', using 'info'");
                emit::Level::Info
            }
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        // The runtime lives for the whole process
        std::mem::forget(rt);
    });
}

/// Log run progress (pages listed, records written, summaries)
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics (cursor changes, cache hits, parent lookups)
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log recoverable conditions (retries, skipped objects)
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log failures that end an operation
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Using "error" instead of "fatal" for consistency with emit-rs
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

pub use init_diagnostics as init;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("off"), Some(None));
        assert_eq!(parse_level(""), Some(None));
        assert_eq!(parse_level("DEBUG"), Some(Some(emit::Level::Debug)));
        assert_eq!(parse_level(" warn "), Some(Some(emit::Level::Warn)));
        assert_eq!(parse_level("error"), Some(Some(emit::Level::Error)));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn test_init_is_safe_to_call_multiple_times() {
        init_diagnostics();
        init_diagnostics();
    }

    #[test]
    fn test_macros_compile() {
        let pages = 2;
        log_info!("Listed {pages} pages", pages: pages);
        log_debug!("Cursor {cursor}", cursor: "abc");
        warn!("Retrying");
        error!("Giving up after {attempts} attempts", attempts: 4);
        info!("done");
        debug!("cache hit");
    }
}
