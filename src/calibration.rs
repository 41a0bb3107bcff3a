//! Linear mapping between servo angles and pulse widths.
//!
//! See [`Calibration`] for details.

/// Default pulse width for 0 degrees (microseconds).
///
/// 544 and 2400 match the classic hobby servo library defaults.
pub const PULSE_AT_0_DEGREES_US_DEFAULT: i32 = 544;

/// Default pulse width for 180 degrees (microseconds).
pub const PULSE_AT_180_DEGREES_US_DEFAULT: i32 = 2_400;

/// Largest angle of the angular domain (degrees).
pub const MAX_DEGREES: i32 = 180;

/// The pulse widths for 0 and 180 degrees, shared by both channels.
///
/// Conversions use integer range mapping with truncation toward zero. Inputs
/// outside `0..=180` degrees, or outside the calibrated pulse range, are
/// extrapolated rather than clamped.
///
/// Any pair is accepted. With equal endpoints every angle maps to that one
/// pulse width, and every pulse width maps back to 0 degrees.
///
/// ```
/// use twin_servo::Calibration;
///
/// let calibration = Calibration::new(1000, 2000);
/// assert_eq!(calibration.degrees_to_microseconds(90), 1500);
/// assert_eq!(calibration.microseconds_to_degrees(1500), 90);
///
/// // Reversed servos just swap the endpoints.
/// let reversed = Calibration::new(2000, 1000);
/// assert_eq!(reversed.degrees_to_microseconds(45), 1750);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pulse_at_0_degrees_us: i32,
    pulse_at_180_degrees_us: i32,
}

impl Calibration {
    /// 544 µs at 0 degrees, 2400 µs at 180 degrees.
    pub const DEFAULT: Self = Self {
        pulse_at_0_degrees_us: PULSE_AT_0_DEGREES_US_DEFAULT,
        pulse_at_180_degrees_us: PULSE_AT_180_DEGREES_US_DEFAULT,
    };

    /// Create a calibration from the pulse widths (µs) for 0 and 180 degrees.
    #[must_use]
    pub const fn new(pulse_at_0_degrees_us: i32, pulse_at_180_degrees_us: i32) -> Self {
        Self {
            pulse_at_0_degrees_us,
            pulse_at_180_degrees_us,
        }
    }

    /// Pulse width (µs) for 0 degrees.
    #[must_use]
    pub const fn pulse_at_0_degrees_us(&self) -> i32 {
        self.pulse_at_0_degrees_us
    }

    /// Pulse width (µs) for 180 degrees.
    #[must_use]
    pub const fn pulse_at_180_degrees_us(&self) -> i32 {
        self.pulse_at_180_degrees_us
    }

    /// Map an angle onto the calibrated pulse range.
    #[must_use]
    pub const fn degrees_to_microseconds(&self, degrees: i32) -> i32 {
        map_range(
            degrees,
            0,
            MAX_DEGREES,
            self.pulse_at_0_degrees_us,
            self.pulse_at_180_degrees_us,
        )
    }

    /// Map a pulse width back onto `0..=180` degrees.
    ///
    /// Returns 0 when both endpoints are equal.
    #[must_use]
    pub const fn microseconds_to_degrees(&self, microseconds: i32) -> i32 {
        map_range(
            microseconds,
            self.pulse_at_0_degrees_us,
            self.pulse_at_180_degrees_us,
            0,
            MAX_DEGREES,
        )
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// Integer range mapping. An empty input range (or an overflowing division)
// yields `out_min`.
const fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    let scaled = value.wrapping_sub(in_min).wrapping_mul(out_max.wrapping_sub(out_min));
    match scaled.checked_div(in_max.wrapping_sub(in_min)) {
        Some(quotient) => quotient.wrapping_add(out_min),
        None => out_min,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for (at_0, at_180) in [(544, 2400), (1000, 2000), (2500, 500), (-300, 700)] {
            let calibration = Calibration::new(at_0, at_180);
            assert_eq!(calibration.degrees_to_microseconds(0), at_0);
            assert_eq!(calibration.degrees_to_microseconds(180), at_180);
            assert_eq!(calibration.microseconds_to_degrees(at_0), 0);
            assert_eq!(calibration.microseconds_to_degrees(at_180), 180);
        }
    }

    #[test]
    fn default_midpoint() {
        assert_eq!(Calibration::DEFAULT.degrees_to_microseconds(90), 1472);
        assert_eq!(Calibration::default(), Calibration::DEFAULT);
    }

    #[test]
    fn truncates_toward_zero() {
        // 1 * 1856 / 180 = 10.31
        assert_eq!(Calibration::DEFAULT.degrees_to_microseconds(1), 554);
        // -1 * 1856 / 180 = -10.31
        assert_eq!(Calibration::DEFAULT.degrees_to_microseconds(-1), 534);
    }

    #[test]
    fn extrapolates_outside_range() {
        let calibration = Calibration::new(1000, 2000);
        assert_eq!(calibration.degrees_to_microseconds(270), 2500);
        assert_eq!(calibration.degrees_to_microseconds(-90), 500);
        assert_eq!(calibration.microseconds_to_degrees(2500), 270);
        assert_eq!(calibration.microseconds_to_degrees(500), -90);
    }

    #[test]
    fn equal_endpoints_pin_every_angle() {
        let calibration = Calibration::new(1500, 1500);
        for degrees in [-90, 0, 90, 180, 270] {
            assert_eq!(calibration.degrees_to_microseconds(degrees), 1500);
        }
        for microseconds in [0, 1499, 1500, 1501, 2400] {
            assert_eq!(calibration.microseconds_to_degrees(microseconds), 0);
        }
    }
}
