//! Logging macros used inside the crate.
//!
//! - With the `defmt` feature: forwards to `defmt`.
//! - Host tests or the `host` feature: prints to stdout.
//! - Otherwise: compiles to nothing (arguments are still type-checked).
//!
//! Format strings must stay within the `{}` / `{:?}` subset both `defmt` and
//! `core::fmt` understand.

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "defmt"), any(test, feature = "host")))]
        ::std::println!("[INFO] {}", ::core::format_args!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(any(test, feature = "host"))))]
        ::core::mem::drop(::core::format_args!($($arg)*));
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "defmt"), any(test, feature = "host")))]
        ::std::println!("[DEBUG] {}", ::core::format_args!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(any(test, feature = "host"))))]
        ::core::mem::drop(::core::format_args!($($arg)*));
    }};
}

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);

        // stdout stays quiet at trace level
        #[cfg(not(feature = "defmt"))]
        ::core::mem::drop(::core::format_args!($($arg)*));
    }};
}

pub(crate) use {debug, info, trace};
