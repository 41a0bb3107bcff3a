//! A device abstraction for two hobby servos sharing one hardware timer.
//!
//! This module drives two positional servos (SG90 and friends) from the two
//! compare outputs of a single timer. The timer produces the pulses on its
//! own; software only writes compare values, so there are no interrupts and
//! no per-servo RAM. See [`TwinServo`] for usage examples.

use crate::calibration::Calibration;
#[cfg(feature = "auto-init")]
use crate::log::debug;
use crate::log::{info, trace};
use crate::timer::{
    Channel, ChannelSet, FAST_UPDATE_THRESHOLD_TICKS, SERVO_TOP, ServoTimer,
    TICKS_PER_MICROSECOND, TimerMode, TimerState,
};

/// Values at or below this are taken as degrees by
/// [`write_angle_or_microseconds`](TwinServo::write_angle_or_microseconds);
/// larger values are microseconds. No real servo pulse is this short.
pub const DEGREES_THRESHOLD: i32 = 180;

/// Two servos on the A and B outputs of one timer.
///
/// Holds the timer and the [`Calibration`] used by both channels. With the
/// `auto-init` feature (on by default) the first write on either channel
/// configures the timer: fast PWM, half-microsecond ticks, 20 ms frames. A
/// timer reconfigured behind this type's back is repaired the same way on
/// the next write.
///
/// Writes never fail and are not range checked; a pulse wider than the
/// 16-bit compare register (32767 µs) wraps.
///
/// # Examples
/// ```
/// use twin_servo::{Channel, SimulatedTimer, TwinServo};
///
/// // On hardware, use `RpServoTimer` (features `pico1` / `pico2`).
/// let mut servos = TwinServo::new(SimulatedTimer::new());
///
/// servos.write_a(90, false); // 90 degrees with the default 544..=2400 µs range
/// servos.write_microseconds_b(1500, false); // raw pulse width
///
/// assert_eq!(servos.timer().compare(Channel::A), 2 * 1472);
/// assert_eq!(servos.timer().compare(Channel::B), 2 * 1500);
///
/// servos.set_calibration(1000, 2000); // applies to both channels
/// assert_eq!(servos.write_degrees(90, Channel::A, true), 1500);
///
/// servos.relax(Channel::B); // stop pulses on B
/// ```
#[derive(Debug)]
pub struct TwinServo<T> {
    timer: T,
    calibration: Calibration,
}

impl<T: ServoTimer> TwinServo<T> {
    /// Wrap a timer, using the default calibration.
    ///
    /// Nothing is written to the timer yet.
    ///
    /// See the [struct-level example](Self) for usage.
    #[must_use]
    pub const fn new(timer: T) -> Self {
        Self::with_calibration(timer, Calibration::DEFAULT)
    }

    /// Wrap a timer with a specific calibration.
    #[must_use]
    pub const fn with_calibration(timer: T, calibration: Calibration) -> Self {
        Self { timer, calibration }
    }

    /// Configure servo timing with both outputs enabled.
    ///
    /// Always rewrites the timer, briefly glitching any running pulse. The
    /// counter is not reset.
    pub fn configure_both_channels(&mut self) {
        self.apply_channels(ChannelSet::BOTH);
    }

    /// Configure servo timing, adding the requested outputs to those already
    /// enabled.
    ///
    /// Mode, clock and period are always rewritten.
    pub fn configure_selected_channels(&mut self, use_a: bool, use_b: bool) {
        let requested = ChannelSet { a: use_a, b: use_b };
        let channels = self.timer.mode().channels.union(requested);
        self.apply_channels(channels);
    }

    fn apply_channels(&mut self, channels: ChannelSet) {
        self.timer.set_mode(TimerMode::servo(channels));
        info!("servo timer configured: a={} b={}", channels.a, channels.b);
    }

    /// The timer's current readiness, read back from its registers.
    #[must_use]
    pub fn state(&self) -> TimerState {
        TimerState::of(&self.timer.mode())
    }

    /// Set the pulse width of `channel` in microseconds.
    ///
    /// With `update_fast`, if more than about 5 ms of the current 20 ms frame
    /// have passed, the frame is cut short so the new pulse starts almost
    /// immediately instead of waiting out the frame.
    ///
    /// See the [struct-level example](Self) for usage.
    pub fn write_pulse_microseconds(&mut self, microseconds: i32, channel: Channel, update_fast: bool) {
        #[cfg(feature = "auto-init")]
        self.auto_initialize(channel);

        let ticks = compare_ticks(microseconds);
        if update_fast {
            self.restart_frame_if_late();
        }
        self.timer.set_compare(channel, ticks);
        trace!("servo {:?} <- {} ticks", channel, ticks);
    }

    /// Bring the timer into a state that drives `channel`, keeping the other
    /// output's current enable bit.
    #[cfg(feature = "auto-init")]
    fn auto_initialize(&mut self, channel: Channel) {
        let mode = self.timer.mode();
        let state = TimerState::of(&mode);
        if state.drives(channel) {
            return;
        }
        let channels = mode.channels.with(channel);
        debug!(
            "servo auto-init for {:?}: {:?} -> {:?}",
            channel,
            state,
            TimerState::from_channels(channels)
        );
        self.apply_channels(channels);
    }

    fn restart_frame_if_late(&mut self) {
        if self.timer.counter() > FAST_UPDATE_THRESHOLD_TICKS {
            // One tick before wraparound: the next frame starts right away.
            self.timer.set_counter(SERVO_TOP);
        }
    }

    /// Set `channel` from an angle or a pulse width.
    ///
    /// `value <= 180` is taken as degrees and converted with the current
    /// calibration; anything larger is microseconds. Returns the microseconds
    /// written. Prefer [`write_degrees`](Self::write_degrees) or
    /// [`write_pulse_microseconds`](Self::write_pulse_microseconds) when the
    /// unit is known.
    pub fn write_angle_or_microseconds(&mut self, value: i32, channel: Channel, update_fast: bool) -> i32 {
        if value <= DEGREES_THRESHOLD {
            self.write_degrees(value, channel, update_fast)
        } else {
            self.write_pulse_microseconds(value, channel, update_fast);
            value
        }
    }

    /// Set `channel` to an angle. Returns the microseconds written.
    ///
    /// Angles outside `0..=180` extrapolate along the calibration line.
    pub fn write_degrees(&mut self, degrees: i32, channel: Channel, update_fast: bool) -> i32 {
        let microseconds = self.degrees_to_microseconds(degrees);
        self.write_pulse_microseconds(microseconds, channel, update_fast);
        microseconds
    }

    /// Channel A: degrees if `value <= 180`, otherwise microseconds.
    ///
    /// See the [struct-level example](Self) for usage.
    pub fn write_a(&mut self, value: i32, update_fast: bool) -> i32 {
        self.write_angle_or_microseconds(value, Channel::A, update_fast)
    }

    /// Channel A pulse width in microseconds.
    pub fn write_microseconds_a(&mut self, microseconds: i32, update_fast: bool) {
        self.write_pulse_microseconds(microseconds, Channel::A, update_fast);
    }

    /// Channel B: degrees if `value <= 180`, otherwise microseconds.
    ///
    /// See the [struct-level example](Self) for usage.
    pub fn write_b(&mut self, value: i32, update_fast: bool) -> i32 {
        self.write_angle_or_microseconds(value, Channel::B, update_fast)
    }

    /// Channel B pulse width in microseconds.
    ///
    /// See the [struct-level example](Self) for usage.
    pub fn write_microseconds_b(&mut self, microseconds: i32, update_fast: bool) {
        self.write_pulse_microseconds(microseconds, Channel::B, update_fast);
    }

    /// Stop sending pulses on `channel` so the servo can relax.
    ///
    /// The other channel keeps running. The next write to `channel` enables
    /// it again (with `auto-init`).
    ///
    /// See the [struct-level example](Self) for usage.
    pub fn relax(&mut self, channel: Channel) {
        let mode = self.timer.mode();
        self.timer.set_mode(TimerMode {
            channels: mode.channels.without(channel),
            ..mode
        });
        info!("servo {:?} relaxed", channel);
    }

    /// Replace the calibration used by both channels.
    ///
    /// Any pair is accepted, see [`Calibration`]. Already written pulses are
    /// not recomputed.
    pub fn set_calibration(&mut self, pulse_at_0_degrees_us: i32, pulse_at_180_degrees_us: i32) {
        self.calibration = Calibration::new(pulse_at_0_degrees_us, pulse_at_180_degrees_us);
        info!(
            "servo calibration 0deg={}us 180deg={}us",
            pulse_at_0_degrees_us, pulse_at_180_degrees_us
        );
    }

    /// The calibration in effect.
    #[must_use]
    pub const fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Convert an angle to a pulse width with the current calibration.
    #[must_use]
    pub const fn degrees_to_microseconds(&self, degrees: i32) -> i32 {
        self.calibration.degrees_to_microseconds(degrees)
    }

    /// Convert a pulse width to an angle with the current calibration.
    #[must_use]
    pub const fn microseconds_to_degrees(&self, microseconds: i32) -> i32 {
        self.calibration.microseconds_to_degrees(microseconds)
    }

    /// The underlying timer.
    #[must_use]
    pub const fn timer(&self) -> &T {
        &self.timer
    }

    /// The underlying timer, mutably. Changing its mode here is detected as
    /// drift by the next write.
    pub const fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Give the timer back.
    #[must_use]
    pub fn release(self) -> T {
        self.timer
    }
}

/// Compare value for a pulse width: two ticks per microsecond, cut to the
/// 16-bit register.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the compare register is 16 bits wide"
)]
fn compare_ticks(microseconds: i32) -> u16 {
    microseconds.wrapping_mul(i32::from(TICKS_PER_MICROSECOND)) as u16
}
