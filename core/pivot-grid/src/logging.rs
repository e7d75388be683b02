//! FILENAME: core/pivot-grid/src/logging.rs
// PURPOSE: Category-tagged logging on top of the `log` facade.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[doc(hidden)]
pub use log;

// ============================================================================
// SEQUENCED LOG LINES
// ============================================================================

/// Sequence counter shared by every controller in the process, so interleaved
/// lines from several grids can be put back in order.
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Write a log line in `seq|message` form, using the category as the target.
/// Nothing is written unless the host has installed a logger.
pub fn write_log(level: log::Level, category: &str, message: fmt::Arguments<'_>) {
    if log::log_enabled!(target: category, level) {
        log::log!(target: category, level, "{}|{}", next_seq(), message);
    }
}

/// Write an ENTER line for function entry
pub fn write_log_enter(level: log::Level, category: &str, func_name: &str, params: fmt::Arguments<'_>) {
    write_log(level, category, format_args!("ENTER {} {}", func_name, params));
}

/// Write an EXIT line for function exit
pub fn write_log_exit(level: log::Level, category: &str, func_name: &str, result: fmt::Arguments<'_>) {
    write_log(level, category, format_args!("EXIT {} {}", func_name, result));
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::log::Level::Debug, $cat, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::log::Level::Info, $cat, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::log::Level::Warn, $cat, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::log::Level::Error, $cat, format_args!($($arg)*))
    };
}

// ENTER/EXIT macros for function tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter($crate::logging::log::Level::Debug, $cat, $func, format_args!(""))
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_enter($crate::logging::log::Level::Debug, $cat, $func, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_exit($crate::logging::log::Level::Debug, $cat, $func, format_args!(""))
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_exit($crate::logging::log::Level::Debug, $cat, $func, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let a = next_seq();
        let b = next_seq();
        assert!(b > a);
    }

    #[test]
    fn test_macros_without_logger_are_silent() {
        log_info!("GRID", "built {}x{}", 2, 3);
        log_warn!("SORT", "column {} ignored", 7);
        log_enter!("STACK", "push_data");
        log_exit!("STACK", "push_data", "depth={}", 2);
    }
}
