//! A software model of the servo timer.
//!
//! See [`SimulatedTimer`].

use super::{Channel, ChannelSet, ServoTimer, TimerMode};

/// Register-level model of a 16-bit timer with two compare outputs.
///
/// Starts in the power-on state (all registers zero). Pin direction is only
/// ever set, never cleared, like a data-direction register nobody resets.
/// Time passes only through [`advance`](Self::advance).
///
/// ```
/// use twin_servo::{Channel, SimulatedTimer, TwinServo};
///
/// let mut servo = TwinServo::new(SimulatedTimer::new());
/// servo.write_pulse_microseconds(1500, Channel::A, false);
///
/// let timer = servo.timer();
/// assert_eq!(timer.compare(Channel::A), 3000);
/// assert!(timer.pin_is_output(Channel::A));
/// assert!(!timer.pin_is_output(Channel::B));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimulatedTimer {
    mode: TimerMode,
    pins: ChannelSet,
    counter: u16,
    compare_a: u16,
    compare_b: u16,
    mode_writes: u32,
}

impl SimulatedTimer {
    /// A timer in its power-on state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: TimerMode::RESET,
            pins: ChannelSet::NONE,
            counter: 0,
            compare_a: 0,
            compare_b: 0,
            mode_writes: 0,
        }
    }

    /// A timer already holding `mode`, as if other code had configured it.
    ///
    /// Does not count as a mode write.
    #[must_use]
    pub const fn with_mode(mode: TimerMode) -> Self {
        Self {
            mode,
            pins: mode.channels,
            ..Self::new()
        }
    }

    /// Number of [`set_mode`](ServoTimer::set_mode) calls so far. Each one
    /// briefly glitches running outputs on real hardware.
    #[must_use]
    pub const fn mode_writes(&self) -> u32 {
        self.mode_writes
    }

    /// Whether the pin of `channel` has been made an output.
    #[must_use]
    pub const fn pin_is_output(&self, channel: Channel) -> bool {
        self.pins.contains(channel)
    }

    /// Current compare register of `channel`.
    #[must_use]
    pub const fn compare(&self, channel: Channel) -> u16 {
        match channel {
            Channel::A => self.compare_a,
            Channel::B => self.compare_b,
        }
    }

    /// Instantaneous level of the output of `channel`.
    #[must_use]
    pub const fn output_high(&self, channel: Channel) -> bool {
        self.pins.contains(channel)
            && self.mode.channels.contains(channel)
            && self.mode.ticks_per_us > 0
            && self.counter < self.compare(channel)
    }

    /// Let `ticks` timer ticks elapse.
    ///
    /// A stopped clock (`ticks_per_us == 0`) does not count. In fast-PWM mode
    /// the counter wraps after `top`; otherwise after `u16::MAX`.
    pub fn advance(&mut self, ticks: u32) {
        if self.mode.ticks_per_us == 0 {
            return;
        }
        let period = if self.mode.fast_pwm {
            u32::from(self.mode.top).wrapping_add(1)
        } else {
            u32::from(u16::MAX).wrapping_add(1)
        };
        let position = u32::from(self.counter)
            .wrapping_add(ticks % period)
            .checked_rem(period)
            .unwrap_or(0);
        self.counter = u16::try_from(position).unwrap_or(u16::MAX);
    }
}

impl ServoTimer for SimulatedTimer {
    fn mode(&self) -> TimerMode {
        self.mode
    }

    fn set_mode(&mut self, mode: TimerMode) {
        self.pins = self.pins.union(mode.channels);
        self.mode = mode;
        self.mode_writes = self.mode_writes.wrapping_add(1);
    }

    fn counter(&self) -> u16 {
        self.counter
    }

    fn set_counter(&mut self, ticks: u16) {
        self.counter = ticks;
    }

    fn set_compare(&mut self, channel: Channel, ticks: u16) {
        match channel {
            Channel::A => self.compare_a = ticks,
            Channel::B => self.compare_b = ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{SERVO_TOP, TimerState};

    #[test]
    fn power_on_state() {
        let timer = SimulatedTimer::new();
        assert_eq!(timer.mode(), TimerMode::RESET);
        assert_eq!(timer.counter(), 0);
        assert_eq!(timer.mode_writes(), 0);
        assert!(!timer.pin_is_output(Channel::A));
        assert!(!timer.output_high(Channel::A));
    }

    #[test]
    fn pins_stay_outputs_after_disable() {
        let mut timer = SimulatedTimer::new();
        timer.set_mode(TimerMode::servo(ChannelSet::BOTH));
        timer.set_mode(TimerMode::servo(ChannelSet::only(Channel::A)));
        assert!(timer.pin_is_output(Channel::B));
        assert_eq!(TimerState::of(&timer.mode()), TimerState::ConfiguredForA);
        assert_eq!(timer.mode_writes(), 2);
    }

    #[test]
    fn counter_wraps_after_top() {
        let mut timer = SimulatedTimer::with_mode(TimerMode::servo(ChannelSet::BOTH));
        timer.set_counter(SERVO_TOP);
        timer.advance(1);
        assert_eq!(timer.counter(), 0);
        timer.advance(40_000 * 3 + 7);
        assert_eq!(timer.counter(), 7);
    }

    #[test]
    fn stopped_clock_does_not_count() {
        let mut timer = SimulatedTimer::new();
        timer.advance(1234);
        assert_eq!(timer.counter(), 0);
    }

    #[test]
    fn output_high_until_compare_match() {
        let mut timer = SimulatedTimer::with_mode(TimerMode::servo(ChannelSet::only(Channel::A)));
        timer.set_compare(Channel::A, 3000);
        timer.set_compare(Channel::B, 3000);
        assert!(timer.output_high(Channel::A));
        assert!(!timer.output_high(Channel::B));
        timer.advance(2999);
        assert!(timer.output_high(Channel::A));
        timer.advance(1);
        assert!(!timer.output_high(Channel::A));
    }
}
