//! Two tasks drive one servo each through a shared static servo pair.
//!
//! Servo A nods quickly, servo B swings slowly; both run off PWM slice 4.
#![no_std]
#![no_main]

use core::convert::Infallible;
use embassy_executor::Spawner;
use embassy_rp::pwm::{Config, Pwm};
use embassy_time::Timer;
use twin_servo::{Channel, Result, RpServoTimer, TwinServo, TwinServoStatic};
use {defmt::info, defmt_rtt as _, panic_probe as _};

static SERVOS: TwinServoStatic<RpServoTimer<'static>> = TwinServoStatic::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let pwm = Pwm::new_output_ab(p.PWM_SLICE4, p.PIN_8, p.PIN_9, Config::default());
    let mut servos = TwinServo::new(RpServoTimer::new(pwm)?);
    // These servos reach a wider range than the 544..=2400 us default.
    servos.set_calibration(500, 2500);
    servos.configure_both_channels();
    SERVOS.init(servos)?;

    defmt::unwrap!(spawner.spawn(nod_task()));

    loop {
        for degrees in [0, 45, 90, 135, 180, 135, 90, 45] {
            SERVOS.write_angle_or_microseconds(degrees, Channel::B, false)?;
            Timer::after_millis(750).await;
        }
    }
}

#[embassy_executor::task]
async fn nod_task() -> ! {
    loop {
        for degrees in [60, 120] {
            match SERVOS.write_angle_or_microseconds(degrees, Channel::A, true) {
                Ok(pulse_us) => info!("nod {}us", pulse_us),
                Err(err) => info!("nod skipped: {}", err),
            }
            Timer::after_millis(250).await;
        }
    }
}
