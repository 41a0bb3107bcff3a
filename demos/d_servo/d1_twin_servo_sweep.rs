//! Sweep two servos on GPIO 8 and GPIO 9 (both on PWM slice 4) in opposite directions.
#![no_std]
#![no_main]

use core::convert::Infallible;
use embassy_executor::Spawner;
use embassy_rp::pwm::{Config, Pwm};
use embassy_time::Timer;
use twin_servo::{Result, RpServoTimer, TwinServo};
use {defmt::info, defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    // GPIO 8 is output A and GPIO 9 is output B of slice 4 (8 / 2 = 4).
    let pwm = Pwm::new_output_ab(p.PWM_SLICE4, p.PIN_8, p.PIN_9, Config::default());
    let mut servos = TwinServo::new(RpServoTimer::new(pwm)?);

    // No setup call: the first write configures the slice.
    servos.write_a(0, false);
    servos.write_b(180, false);
    Timer::after_millis(500).await;

    // Loop by 10 degrees. Include 180 degrees.
    for degrees in (0..=180).step_by(10).chain((0..=180).rev().step_by(10)).cycle() {
        let pulse_a = servos.write_a(degrees, true);
        let pulse_b = servos.write_b(180 - degrees, true);
        info!("a={}us b={}us", pulse_a, pulse_b);
        Timer::after_millis(100).await;
    }

    core::future::pending().await // run forever
}
