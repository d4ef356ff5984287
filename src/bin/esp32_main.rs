//! ESP32-C3 L9110S motor sweep.
//!
//! Bench firmware for checking a motor and finding its stall duty. It:
//! - Configures two LEDC channels at 8-bit resolution on GPIO2/3
//! - Attaches an L9110S driver to them
//! - Sweeps the throttle forward, back through zero, and into reverse
//! - Stops and detaches the driver
//!
//! The stall duty and dead zone can be set at compile time through the
//! `MOTOR_STALL_DUTY` and `MOTOR_DEAD_ZONE` environment variables.
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_main
//! ```

use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver};
use esp_idf_hal::peripherals::Peripherals;
use l9110s::hal::esp32::Esp32Pwm;
use l9110s::{MotorConfig, MotorDriver};
use log::info;
use std::thread;
use std::time::Duration;

/// Time spent at each sweep step in milliseconds
const STEP_INTERVAL_MS: u64 = 50;

/// Throttle change per sweep step
const THROTTLE_STEP: f32 = 0.02;

fn main() -> anyhow::Result<()> {
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = MotorConfig::default()
        .with_name("bench")
        .with_stall_duty(
            option_env!("MOTOR_STALL_DUTY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
        )
        .with_dead_zone(
            option_env!("MOTOR_DEAD_ZONE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.0),
        );
    info!(
        "{}: stall duty {}, dead zone {:.2}",
        config.name, config.stall_duty, config.dead_zone
    );

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // PWM outputs (L9110S IA/IB on GPIO2/3)
    // =========================================================================
    let timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &Esp32Pwm::timer_config(config.pwm_frequency_hz),
    )?;
    let mut forward = Esp32Pwm::new(LedcDriver::new(
        peripherals.ledc.channel0,
        &timer,
        peripherals.pins.gpio2,
    )?);
    let mut reverse = Esp32Pwm::new(LedcDriver::new(
        peripherals.ledc.channel1,
        &timer,
        peripherals.pins.gpio3,
    )?);

    let mut motor = MotorDriver::with_config(&config);
    motor.attach(&mut forward, &mut reverse)?;
    info!("motor attached (GPIO2/3 PWM)");

    // =========================================================================
    // Sweep 0 -> 1 -> -1 -> 0
    // =========================================================================
    let steps = (1.0 / THROTTLE_STEP) as i32;
    let ramp = (0..=steps)
        .chain((-steps..steps).rev())
        .chain(-steps..=0)
        .map(|i| i as f32 * THROTTLE_STEP);

    for throttle in ramp {
        motor.set_throttle(throttle)?;
        if motor.duty() == motor.stall_duty() {
            info!(
                "throttle {:+.2}: at stall duty ({})",
                throttle,
                if motor.forward() { "forward" } else { "reverse" }
            );
        }
        thread::sleep(Duration::from_millis(STEP_INTERVAL_MS));
    }

    motor.detach()?;
    info!("sweep complete, motor detached");

    Ok(())
}
