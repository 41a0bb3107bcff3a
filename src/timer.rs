//! The timer peripheral behind both servo outputs.
//!
//! [`ServoTimer`] is the register-level seam: mode, counter and the two
//! compare registers. [`TimerState`] classifies a [`TimerMode`] so the pulse
//! writer can tell whether the timer is ready for a given [`Channel`].
//!
//! Implementations:
//! - [`SimulatedTimer`]: software model, used by tests and host builds.
//! - `RpServoTimer`: a Raspberry Pi Pico PWM slice (features `pico1` / `pico2`).

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub mod rp;
pub mod simulated;

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use rp::RpServoTimer;
pub use simulated::SimulatedTimer;

/// Counter ticks per microsecond. Compare values are `2 * microseconds`.
pub const TICKS_PER_MICROSECOND: u8 = 2;

/// Ticks in one 20 ms servo frame. Shorter frames break long pulses.
pub const SERVO_PERIOD_TICKS: u32 = 40_000;

const _: () = assert!(SERVO_PERIOD_TICKS >= 1 && SERVO_PERIOD_TICKS <= 1 << 16);

/// Period register value for a 20 ms frame (the counter wraps after `TOP`).
#[expect(
    clippy::cast_possible_truncation,
    reason = "the period fits the 16-bit counter, checked above"
)]
pub const SERVO_TOP: u16 = SERVO_PERIOD_TICKS.wrapping_sub(1) as u16;

/// A fast update restarts the frame only once the counter is past this
/// (about 5 ms into the frame).
pub const FAST_UPDATE_THRESHOLD_TICKS: u16 = 10_000;

/// One of the timer's two compare outputs.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Compare output A.
    A,
    /// Compare output B.
    B,
}

/// Which outputs are driven by the timer.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSet {
    /// Output A is enabled.
    pub a: bool,
    /// Output B is enabled.
    pub b: bool,
}

impl ChannelSet {
    /// No outputs.
    pub const NONE: Self = Self { a: false, b: false };
    /// Both outputs.
    pub const BOTH: Self = Self { a: true, b: true };

    /// Set holding just `channel`.
    #[must_use]
    pub const fn only(channel: Channel) -> Self {
        Self::NONE.with(channel)
    }

    /// Whether `channel` is in the set.
    #[must_use]
    pub const fn contains(self, channel: Channel) -> bool {
        match channel {
            Channel::A => self.a,
            Channel::B => self.b,
        }
    }

    /// The set with `channel` added.
    #[must_use]
    pub const fn with(self, channel: Channel) -> Self {
        match channel {
            Channel::A => Self { a: true, b: self.b },
            Channel::B => Self { a: self.a, b: true },
        }
    }

    /// The set with `channel` removed.
    #[must_use]
    pub const fn without(self, channel: Channel) -> Self {
        match channel {
            Channel::A => Self { a: false, b: self.b },
            Channel::B => Self { a: self.a, b: false },
        }
    }

    /// Union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            a: self.a || other.a,
            b: self.b || other.b,
        }
    }
}

/// Mode, clock and period registers of the timer, plus the output enables.
///
/// The counter and compare registers are not part of the mode.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerMode {
    /// Edge-aligned PWM: outputs go high at the start of the period and low on
    /// compare match; the period comes from `top`.
    pub fast_pwm: bool,
    /// Counter ticks per microsecond (0 means the clock is stopped).
    pub ticks_per_us: u8,
    /// Period register; the counter wraps after reaching it.
    pub top: u16,
    /// Non-inverting outputs driven by the timer.
    pub channels: ChannelSet,
}

impl TimerMode {
    /// Power-on state: everything cleared.
    pub const RESET: Self = Self {
        fast_pwm: false,
        ticks_per_us: 0,
        top: 0,
        channels: ChannelSet::NONE,
    };

    /// Fast PWM, half-microsecond ticks, 20 ms period, driving `channels`.
    #[must_use]
    pub const fn servo(channels: ChannelSet) -> Self {
        Self {
            fast_pwm: true,
            ticks_per_us: TICKS_PER_MICROSECOND,
            top: SERVO_TOP,
            channels,
        }
    }

    /// Whether mode, clock and period match [`TimerMode::servo`], ignoring
    /// the output enables.
    #[must_use]
    pub const fn is_servo_timing(&self) -> bool {
        self.fast_pwm && self.ticks_per_us == TICKS_PER_MICROSECOND && self.top == SERVO_TOP
    }
}

/// Readiness of the timer for servo output, derived from its registers.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    /// Never configured, reconfigured by someone else, or no output enabled.
    Unconfigured,
    /// Servo timing with only output A enabled.
    ConfiguredForA,
    /// Servo timing with only output B enabled.
    ConfiguredForB,
    /// Servo timing with both outputs enabled.
    ConfiguredForBoth,
}

impl TimerState {
    /// Classify a register snapshot.
    #[must_use]
    pub const fn of(mode: &TimerMode) -> Self {
        if !mode.is_servo_timing() {
            return Self::Unconfigured;
        }
        Self::from_channels(mode.channels)
    }

    /// The state reached by configuring servo timing for `channels`.
    #[must_use]
    pub const fn from_channels(channels: ChannelSet) -> Self {
        match (channels.a, channels.b) {
            (false, false) => Self::Unconfigured,
            (true, false) => Self::ConfiguredForA,
            (false, true) => Self::ConfiguredForB,
            (true, true) => Self::ConfiguredForBoth,
        }
    }

    /// Outputs producing servo pulses in this state.
    #[must_use]
    pub const fn channels(self) -> ChannelSet {
        match self {
            Self::Unconfigured => ChannelSet::NONE,
            Self::ConfiguredForA => ChannelSet::only(Channel::A),
            Self::ConfiguredForB => ChannelSet::only(Channel::B),
            Self::ConfiguredForBoth => ChannelSet::BOTH,
        }
    }

    /// Whether a write to `channel` can go straight to the compare register.
    #[must_use]
    pub const fn drives(self, channel: Channel) -> bool {
        self.channels().contains(channel)
    }
}

/// Smallest clock divider a PWM slice accepts, in 8.4 fixed-point bits (1.0).
pub const DIVIDER_BITS_MIN: u32 = 1 << 4;

/// Largest clock divider a PWM slice accepts, in 8.4 fixed-point bits
/// (255.9375).
pub const DIVIDER_BITS_MAX: u32 = (256 << 4) - 1;

/// Raw 8.4 fixed-point divider turning `clk_sys_hz` into `ticks_per_us`
/// counter ticks per microsecond.
///
/// Returns `None` for a stopped clock (`ticks_per_us == 0`) or when the
/// divider falls outside [`DIVIDER_BITS_MIN`]`..=`[`DIVIDER_BITS_MAX`].
/// Fractions below 1/16 are truncated.
#[must_use]
pub fn divider_bits(clk_sys_hz: u32, ticks_per_us: u8) -> Option<u16> {
    // bits = clk_sys / (ticks_per_us * 1 MHz) * 16
    let ticks_hz_per_sixteenth = u32::from(ticks_per_us).checked_mul(62_500)?;
    let bits = clk_sys_hz.checked_div(ticks_hz_per_sixteenth)?;
    if !(DIVIDER_BITS_MIN..=DIVIDER_BITS_MAX).contains(&bits) {
        return None;
    }
    u16::try_from(bits).ok()
}

/// Register access to a 16-bit timer with two compare outputs.
///
/// Implementations are owned by one [`TwinServo`](crate::TwinServo); nothing
/// else should write the mode registers.
pub trait ServoTimer {
    /// Read the mode, clock, period and output-enable registers.
    fn mode(&self) -> TimerMode;

    /// Write the mode, clock, period and output-enable registers, and make
    /// every enabled output's pin an output. Leaves the counter alone: a
    /// counter of 0 would start a zero-width pulse.
    fn set_mode(&mut self, mode: TimerMode);

    /// Read the free-running counter.
    fn counter(&self) -> u16;

    /// Overwrite the free-running counter.
    fn set_counter(&mut self, ticks: u16);

    /// Write the compare register of `channel`; the output stays high for
    /// `ticks` counts of every period.
    fn set_compare(&mut self, channel: Channel, ticks: u16);
}

impl<T: ServoTimer + ?Sized> ServoTimer for &mut T {
    fn mode(&self) -> TimerMode {
        (**self).mode()
    }

    fn set_mode(&mut self, mode: TimerMode) {
        (**self).set_mode(mode);
    }

    fn counter(&self) -> u16 {
        (**self).counter()
    }

    fn set_counter(&mut self, ticks: u16) {
        (**self).set_counter(ticks);
    }

    fn set_compare(&mut self, channel: Channel, ticks: u16) {
        (**self).set_compare(channel, ticks);
    }
}
