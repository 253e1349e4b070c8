//! Structured logging with visual formatting.
//!
//! Provides the box-drawing log macros used throughout the crate. Messages
//! form a single vertical run: `log_version!` opens it, `log_block_start!`
//! begins a conceptual block, `log_decorated!`/`log_indented!` continue one,
//! `log_pipe!` inserts vertical spacing before a semantic-level message, and
//! `log_end!` terminates the run.
//!
//! Logging can be disabled at runtime so library consumers and tests get
//! silent computation.

use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

/// Main logging interface.
pub struct Log;

impl Log {
    /// Enable or disable all log output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    #[doc(hidden)]
    pub fn emit(line: std::fmt::Arguments) {
        if Self::is_enabled() {
            println!("{line}");
        }
    }
}

/// Print the application startup header: `┏ sunside vX.Y.Z ━━╸`
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::logger::Log::emit(format_args!(
            "┏ {} v{} ━━╸",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ))
    };
}

/// Begin a new conceptual block: empty pipe for spacing, then `┣ message`.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)*) => {{
        $crate::logger::Log::emit(format_args!("┃"));
        $crate::logger::Log::emit(format_args!("┣ {}", format_args!($($arg)*)));
    }};
}

/// Continue the current block: `┣ message`.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit(format_args!("┣ {}", format_args!($($arg)*)))
    };
}

/// Nested detail under the current block: `┃   message`.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit(format_args!("┃   {}", format_args!($($arg)*)))
    };
}

/// A single empty prefixed line for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::logger::Log::emit(format_args!("┃"))
    };
}

/// Final log termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::logger::Log::emit(format_args!("╹"))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit(format_args!("┃ [INFO] {}", format_args!($($arg)*)))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit(format_args!("┃ [DEBUG] {}", format_args!($($arg)*)))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit(format_args!("┃ [WARNING] {}", format_args!($($arg)*)))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logger::Log::emit(format_args!("┃ [ERROR] {}", format_args!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_toggle_round_trips() {
        Log::set_enabled(false);
        assert!(!Log::is_enabled());
        Log::set_enabled(true);
        assert!(Log::is_enabled());
    }
}
