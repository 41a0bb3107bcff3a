#![allow(missing_docs, reason = "integration tests")]
#![cfg(not(feature = "auto-init"))]
//! Host-level tests for builds without automatic timer configuration.

use twin_servo::{Channel, ServoTimer, SimulatedTimer, TimerMode, TimerState, TwinServo};

#[test]
fn writes_do_not_configure() {
    let mut servos = TwinServo::new(SimulatedTimer::new());
    servos.write_a(90, false);
    assert_eq!(servos.timer().mode(), TimerMode::RESET);
    assert_eq!(servos.timer().compare(Channel::A), 2944);
    assert_eq!(servos.timer().mode_writes(), 0);
}

#[test]
fn explicit_configuration_then_write() {
    let mut servos = TwinServo::new(SimulatedTimer::new());
    servos.configure_both_channels();
    servos.write_b(1500, false);
    assert_eq!(servos.state(), TimerState::ConfiguredForBoth);
    assert_eq!(servos.timer().compare(Channel::B), 3000);
}
