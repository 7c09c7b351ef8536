//! Utilities for logging diagnostic messages.
//!
//! Logging is off unless the `SVG_CONVERT_LOG` environment variable is set.

use once_cell::sync::Lazy;

#[macro_export]
macro_rules! convert_log {
    (
        $($arg:tt)+
    ) => {
        if $crate::log::log_enabled() {
            eprintln!("{}", format_args!($($arg)+));
        }
    };
}

pub fn log_enabled() -> bool {
    static ENABLED: Lazy<bool> = Lazy::new(|| ::std::env::var_os("SVG_CONVERT_LOG").is_some());

    *ENABLED
}
