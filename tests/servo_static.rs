#![allow(missing_docs, reason = "integration tests")]
//! Host-level tests for the critical-section guarded static holder.

use twin_servo::{Channel, Error, SimulatedTimer, TwinServo, TwinServoStatic};

#[test]
fn use_before_init_fails() {
    static SERVOS: TwinServoStatic<SimulatedTimer> = TwinServoStatic::new();
    assert!(!SERVOS.is_initialized());
    assert_eq!(
        SERVOS.write_pulse_microseconds(1500, Channel::A, false),
        Err(Error::NotInitialized)
    );
    assert_eq!(SERVOS.set_calibration(1000, 2000), Err(Error::NotInitialized));
}

#[test]
fn init_twice_fails() {
    static SERVOS: TwinServoStatic<SimulatedTimer> = TwinServoStatic::new();
    SERVOS.init(TwinServo::new(SimulatedTimer::new())).unwrap();
    assert_eq!(
        SERVOS.init(TwinServo::new(SimulatedTimer::new())),
        Err(Error::AlreadyInitialized)
    );
}

#[test]
fn writes_reach_the_timer() {
    static SERVOS: TwinServoStatic<SimulatedTimer> = TwinServoStatic::new();
    SERVOS.init(TwinServo::new(SimulatedTimer::new())).unwrap();
    SERVOS.set_calibration(1000, 2000).unwrap();
    assert_eq!(SERVOS.write_angle_or_microseconds(90, Channel::B, false), Ok(1500));

    let servos = SERVOS.release().unwrap();
    assert_eq!(servos.timer().compare(Channel::B), 3000);
    assert!(!SERVOS.is_initialized());
}

#[test]
fn equal_calibration_endpoints_are_accepted() {
    static SERVOS: TwinServoStatic<SimulatedTimer> = TwinServoStatic::new();
    SERVOS.init(TwinServo::new(SimulatedTimer::new())).unwrap();
    assert_eq!(SERVOS.set_calibration(1500, 1500), Ok(()));
    assert_eq!(SERVOS.write_angle_or_microseconds(0, Channel::A, false), Ok(1500));
    assert_eq!(SERVOS.write_angle_or_microseconds(180, Channel::A, false), Ok(1500));
}
