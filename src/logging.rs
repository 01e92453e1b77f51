//! Unified logging macro for the link engine.
//!
//! The engine performs no I/O of its own, but it does observe conditions worth
//! surfacing to an operator console: discarded leading junk, checksum-failed
//! resynchronization, carry-over trims. This module provides one macro that
//! routes those messages to `log::` or `defmt::` depending on the active
//! feature flags, and compiles to nothing when neither backend is enabled.
//!
//! # Usage
//!
//! ```rust,ignore
//! link_log!(debug, "discarded {} leading bytes", n);
//! link_log!(trace, "checksum mismatch at offset {}", i);
//! ```
//!
//! # Feature Flags
//!
//! - `defmt` - Uses `defmt::` (embedded hosts)
//! - `log` - Uses the `log::` facade (desktop hosts)
//! - Neither - Expands to a no-op that still typechecks its arguments

/// Unified logging macro - selects defmt::, log::, or a no-op based on features.
#[macro_export]
#[cfg(feature = "defmt")]
macro_rules! link_log {
    (info, $($arg:tt)*) => { defmt::info!($($arg)*) };
    (debug, $($arg:tt)*) => { defmt::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { defmt::warn!($($arg)*) };
    (error, $($arg:tt)*) => { defmt::error!($($arg)*) };
    (trace, $($arg:tt)*) => { defmt::trace!($($arg)*) };
}

#[macro_export]
#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! link_log {
    (info, $($arg:tt)*) => { log::info!($($arg)*) };
    (debug, $($arg:tt)*) => { log::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { log::warn!($($arg)*) };
    (error, $($arg:tt)*) => { log::error!($($arg)*) };
    (trace, $($arg:tt)*) => { log::trace!($($arg)*) };
}

#[macro_export]
#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! link_log {
    ($level:ident, $($arg:tt)*) => {{
        let _ = core::format_args!($($arg)*);
    }};
}
