//! Error and result types shared across the crate.

use derive_more::{Display, Error};

/// Result type for this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while setting up a [`TwinServo`](crate::TwinServo).
///
/// Writing pulses and setting calibrations never fail; these only come from
/// timer construction and the static holder.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The system clock cannot be divided down to a half-microsecond tick.
    #[display("clk_sys of {clk_sys_hz} Hz cannot produce a 2 MHz servo tick")]
    ClockOutOfRange {
        /// The system clock frequency that was found.
        clk_sys_hz: u32,
    },

    /// A [`TwinServoStatic`](crate::TwinServoStatic) already holds a servo pair.
    #[display("twin servo static is already initialized")]
    AlreadyInitialized,

    /// A [`TwinServoStatic`](crate::TwinServoStatic) was used before `init`.
    #[display("twin servo static is not initialized")]
    NotInitialized,
}
