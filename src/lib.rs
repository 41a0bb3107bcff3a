//! Drive two hobby servos from the two compare outputs of one hardware timer.
//!
//! The timer runs in fast-PWM mode with a half-microsecond tick and a 20 ms
//! frame, so it emits both pulse trains on its own: no interrupts, no
//! software PWM, a few bytes of state. Software only writes compare values.
//!
//! - [`TwinServo`] configures the timer (on first write, with the default
//!   `auto-init` feature), writes pulse widths, and converts degrees with a
//!   shared [`Calibration`].
//! - [`ServoTimer`] is the register-level seam. [`SimulatedTimer`] models it
//!   in software; `RpServoTimer` runs it on a Raspberry Pi Pico PWM slice
//!   (features `pico1` / `pico2`).
//! - [`TwinServoStatic`] holds the pair in a `static` behind a critical
//!   section.
//!
//! # Glossary
//!
//! - **Fast PWM:** the output goes high when the counter restarts and low when
//!   it reaches the channel's compare value.
//! - **Top:** the counter value after which the timer wraps; sets the frame
//!   length (20 ms here).
//! - **Compare register:** per-channel value setting the pulse width.
//! - **Auto-initialization:** configuring the timer lazily on first write.
//! - **Fast update:** restarting the frame early so a new pulse width takes
//!   effect without waiting for the next 20 ms boundary.
#![cfg_attr(not(any(test, feature = "host")), no_std)]

// Compile-time checks: board features
#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

#[cfg(all(feature = "arm", not(any(feature = "pico1", feature = "pico2"))))]
compile_error!("The 'arm' feature needs a board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "host", any(feature = "pico1", feature = "pico2")))]
compile_error!("The 'host' feature cannot be combined with a board feature");

pub mod calibration;
mod error;
mod log;
pub mod servo;
pub mod servo_static;
pub mod timer;

// Re-export error types and result (used throughout)
pub use crate::calibration::Calibration;
pub use crate::error::{Error, Result};
pub use crate::servo::TwinServo;
pub use crate::servo_static::TwinServoStatic;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use crate::timer::RpServoTimer;
pub use crate::timer::{Channel, ChannelSet, ServoTimer, SimulatedTimer, TimerMode, TimerState};
