//! Servo timer backed by a Raspberry Pi Pico PWM slice.
//!
//! See [`RpServoTimer`].

use defmt::info;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use fixed::FixedU16;
use fixed::types::extra::U4;

use super::{Channel, ServoTimer, TICKS_PER_MICROSECOND, TimerMode, divider_bits};
use crate::{Error, Result};

/// A PWM slice used as the shared servo timer.
///
/// A slice has one counter and two outputs, A and B, which makes it the
/// same shape as the two-channel timer this crate drives. Construct the
/// [`Pwm`] with `new_output_a`, `new_output_b` or `new_output_ab`; enabling a
/// channel whose pin was not handed to the slice has no visible effect.
///
/// The hardware registers are write-only through `embassy-rp`, so the mode is
/// reported from a shadow copy kept here. A disabled channel outputs a
/// compare value of 0 while its last requested value is kept for re-enabling.
///
/// # Example
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use twin_servo::{Channel, RpServoTimer, TwinServo};
/// # #[panic_handler]
/// # fn panic(_info: &core::panic::PanicInfo) -> ! { loop {} }
///
/// fn example(p: embassy_rp::Peripherals) -> twin_servo::Result<()> {
///     let pwm = embassy_rp::pwm::Pwm::new_output_ab(
///         p.PWM_SLICE4,
///         p.PIN_8,
///         p.PIN_9,
///         embassy_rp::pwm::Config::default(),
///     );
///     let mut servos = TwinServo::new(RpServoTimer::new(pwm)?);
///     servos.write_a(90, false);
///     servos.write_b(1500, false);
///     Ok(())
/// }
/// ```
pub struct RpServoTimer<'d> {
    pwm: Pwm<'d>,
    cfg: Config, // Shadow of what was last written to the slice
    mode: TimerMode,
    clk_sys_hz: u32,
    compare_a: u16,
    compare_b: u16,
}

impl<'d> RpServoTimer<'d> {
    /// Take over a PWM slice.
    ///
    /// The slice is not reconfigured until the first mode write.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockOutOfRange`] if `clk_sys` cannot be divided down
    /// to a half-microsecond tick.
    pub fn new(pwm: Pwm<'d>) -> Result<Self> {
        let clk_sys_hz = clk_sys_freq();
        let divider = divider_for(clk_sys_hz, TICKS_PER_MICROSECOND)
            .ok_or(Error::ClockOutOfRange { clk_sys_hz })?;
        info!(
            "servo timer clk={}Hz div={}/16",
            clk_sys_hz,
            divider.to_bits()
        );
        Ok(Self {
            pwm,
            cfg: Config::default(),
            mode: TimerMode::RESET,
            clk_sys_hz,
            compare_a: 0,
            compare_b: 0,
        })
    }

    // Compare values actually emitted, honoring the channel enables.
    fn apply(&mut self) {
        self.cfg.compare_a = if self.mode.channels.a { self.compare_a } else { 0 };
        self.cfg.compare_b = if self.mode.channels.b { self.compare_b } else { 0 };
        self.pwm.set_config(&self.cfg);
    }
}

impl ServoTimer for RpServoTimer<'_> {
    fn mode(&self) -> TimerMode {
        self.mode
    }

    fn set_mode(&mut self, mode: TimerMode) {
        let divider = divider_for(self.clk_sys_hz, mode.ticks_per_us);
        self.cfg.phase_correct = !mode.fast_pwm;
        self.cfg.top = mode.top;
        self.cfg.enable = divider.is_some();
        if let Some(divider) = divider {
            self.cfg.divider = divider;
        }
        self.mode = mode;
        self.apply();
    }

    fn counter(&self) -> u16 {
        self.pwm.counter()
    }

    fn set_counter(&mut self, ticks: u16) {
        self.pwm.set_counter(ticks);
    }

    fn set_compare(&mut self, channel: Channel, ticks: u16) {
        match channel {
            Channel::A => self.compare_a = ticks,
            Channel::B => self.compare_b = ticks,
        }
        self.apply();
    }
}

fn divider_for(clk_sys_hz: u32, ticks_per_us: u8) -> Option<FixedU16<U4>> {
    divider_bits(clk_sys_hz, ticks_per_us).map(FixedU16::from_bits)
}
