//! A process-wide home for a [`TwinServo`].
//!
//! See [`TwinServoStatic`] for details and usage examples.

use core::cell::RefCell;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::log::info;
use crate::servo::TwinServo;
use crate::timer::ServoTimer;
use crate::{Channel, Error, Result};

/// Static slot holding one [`TwinServo`], guarded by a critical section.
///
/// There is one timer, so there is one servo pair. Put it in a `static` when
/// several tasks or interrupt handlers write servo positions: every access
/// runs inside a critical section, which keeps the timer's read-modify-write
/// sequences (configuration, the fast-update counter check) from being
/// interleaved.
///
/// # Example
///
/// ```
/// use twin_servo::{Channel, SimulatedTimer, TwinServo, TwinServoStatic};
///
/// static SERVOS: TwinServoStatic<SimulatedTimer> = TwinServoStatic::new();
///
/// SERVOS.init(TwinServo::new(SimulatedTimer::new()))?;
/// SERVOS.write_angle_or_microseconds(90, Channel::A, false)?;
/// let compare = SERVOS.with(|servos| servos.timer().compare(Channel::A))?;
/// assert_eq!(compare, 2944);
/// # Ok::<(), twin_servo::Error>(())
/// ```
pub struct TwinServoStatic<T> {
    slot: Mutex<CriticalSectionRawMutex, RefCell<Option<TwinServo<T>>>>,
}

impl<T> TwinServoStatic<T> {
    /// An empty slot, usable as a `static` initializer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(None)),
        }
    }

    /// Whether [`init`](Self::init) has been called (and not undone by
    /// [`release`](Self::release)).
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.slot.lock(|slot| slot.borrow().is_some())
    }

    /// Store the servo pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`] if the slot is occupied; the
    /// stored pair is kept and `servos` is dropped.
    pub fn init(&self, servos: TwinServo<T>) -> Result<()> {
        self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.is_some() {
                return Err(Error::AlreadyInitialized);
            }
            *slot = Some(servos);
            info!("twin servo static initialized");
            Ok(())
        })
    }

    /// Run `f` on the stored pair inside a critical section.
    ///
    /// Keep `f` short: interrupts are masked while it runs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if nothing is stored.
    pub fn with<R>(&self, f: impl FnOnce(&mut TwinServo<T>) -> R) -> Result<R> {
        self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            let servos = slot.as_mut().ok_or(Error::NotInitialized)?;
            Ok(f(servos))
        })
    }

    /// Take the pair out, leaving the slot empty.
    pub fn release(&self) -> Option<TwinServo<T>> {
        self.slot.lock(|slot| slot.borrow_mut().take())
    }
}

impl<T: ServoTimer> TwinServoStatic<T> {
    /// See [`TwinServo::write_angle_or_microseconds`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if nothing is stored.
    pub fn write_angle_or_microseconds(&self, value: i32, channel: Channel, update_fast: bool) -> Result<i32> {
        self.with(|servos| servos.write_angle_or_microseconds(value, channel, update_fast))
    }

    /// See [`TwinServo::write_pulse_microseconds`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if nothing is stored.
    pub fn write_pulse_microseconds(&self, microseconds: i32, channel: Channel, update_fast: bool) -> Result<()> {
        self.with(|servos| servos.write_pulse_microseconds(microseconds, channel, update_fast))
    }

    /// See [`TwinServo::set_calibration`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if nothing is stored.
    pub fn set_calibration(&self, pulse_at_0_degrees_us: i32, pulse_at_180_degrees_us: i32) -> Result<()> {
        self.with(|servos| servos.set_calibration(pulse_at_0_degrees_us, pulse_at_180_degrees_us))
    }
}

impl<T> Default for TwinServoStatic<T> {
    fn default() -> Self {
        Self::new()
    }
}
