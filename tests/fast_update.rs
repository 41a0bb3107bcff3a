#![allow(missing_docs, reason = "integration tests")]
//! Host-level tests for the fast-update frame restart.

use twin_servo::timer::{FAST_UPDATE_THRESHOLD_TICKS, SERVO_TOP};
use twin_servo::{Channel, ServoTimer, SimulatedTimer, TwinServo};

fn configured_at(counter: u16) -> TwinServo<SimulatedTimer> {
    let mut servos = TwinServo::new(SimulatedTimer::new());
    servos.configure_both_channels();
    servos.timer_mut().set_counter(counter);
    servos
}

#[test]
fn early_in_frame_counter_is_untouched() {
    for counter in [0, 5_000, FAST_UPDATE_THRESHOLD_TICKS] {
        let mut servos = configured_at(counter);
        servos.write_microseconds_a(1500, true);
        assert_eq!(servos.timer().counter(), counter);
    }
}

#[test]
fn late_in_frame_counter_jumps_to_wraparound() {
    for counter in [FAST_UPDATE_THRESHOLD_TICKS + 1, 20_000, SERVO_TOP] {
        let mut servos = configured_at(counter);
        servos.write_microseconds_b(1500, true);
        assert_eq!(servos.timer().counter(), SERVO_TOP);
    }
}

#[test]
fn without_update_fast_counter_is_untouched() {
    let mut servos = configured_at(30_000);
    servos.write_microseconds_a(1500, false);
    assert_eq!(servos.timer().counter(), 30_000);
}

#[test]
fn new_pulse_starts_on_next_tick() {
    let mut servos = configured_at(25_000);
    servos.write_a(90, true);

    let timer = servos.timer_mut();
    assert!(!timer.output_high(Channel::A));
    timer.advance(1);
    assert_eq!(timer.counter(), 0);
    assert!(timer.output_high(Channel::A));
}

#[test]
fn returns_written_microseconds() {
    let mut servos = configured_at(0);
    assert_eq!(servos.write_angle_or_microseconds(2000, Channel::A, true), 2000);
    assert_eq!(servos.write_angle_or_microseconds(180, Channel::B, true), 2400);
    assert_eq!(servos.timer().compare(Channel::A), 4000);
    assert_eq!(servos.timer().compare(Channel::B), 4800);
}
