//! L9110S input lines driven by ESP32 LEDC PWM channels.
//!
//! The L9110S is controlled via two PWM signals:
//! - IA (GPIO2): Forward direction PWM
//! - IB (GPIO3): Reverse direction PWM
//!
//! Both channels must share an LEDC timer configured at 8-bit resolution,
//! see [`Esp32Pwm::timer_config`].
//!
//! The LEDC full-scale duty at 8 bits is 256, not 255, so the driver's
//! maximum duty of 255 is 255/256 (about 99.6%) on time, not a solid high.

use crate::traits::{resolution_from_max_duty, PwmOutput};
use esp_idf_hal::ledc::{config::TimerConfig, LedcDriver, Resolution};
use esp_idf_hal::prelude::*;
use esp_idf_hal::sys::EspError;

/// One LEDC channel used as a motor driver input line.
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver};
/// use l9110s::hal::esp32::Esp32Pwm;
/// use l9110s::MotorDriver;
///
/// let peripherals = Peripherals::take()?;
/// let timer = LedcTimerDriver::new(
///     peripherals.ledc.timer0,
///     &Esp32Pwm::timer_config(20_000),
/// )?;
/// let mut forward = Esp32Pwm::new(LedcDriver::new(
///     peripherals.ledc.channel0,
///     &timer,
///     peripherals.pins.gpio2,
/// )?);
/// let mut reverse = Esp32Pwm::new(LedcDriver::new(
///     peripherals.ledc.channel1,
///     &timer,
///     peripherals.pins.gpio3,
/// )?);
///
/// let mut motor = MotorDriver::new();
/// motor.attach(&mut forward, &mut reverse)?;
/// motor.set_power(true, 128)?;
/// ```
pub struct Esp32Pwm<'d> {
    channel: LedcDriver<'d>,
}

impl<'d> Esp32Pwm<'d> {
    /// LEDC resolution matching [`BIT_RESOLUTION`](crate::driver::BIT_RESOLUTION).
    const PWM_RESOLUTION: Resolution = Resolution::Bits8;

    /// Wraps a configured LEDC channel.
    pub fn new(channel: LedcDriver<'d>) -> Self {
        Self { channel }
    }

    /// Timer configuration for motor outputs: the given frequency at 8-bit
    /// resolution.
    pub fn timer_config(frequency_hz: u32) -> TimerConfig {
        TimerConfig::default()
            .frequency(frequency_hz.Hz())
            .resolution(Self::PWM_RESOLUTION)
    }

    /// Consumes the wrapper, returning the LEDC channel.
    pub fn into_inner(self) -> LedcDriver<'d> {
        self.channel
    }
}

impl PwmOutput for Esp32Pwm<'_> {
    type Error = EspError;

    fn bit_resolution(&self) -> u8 {
        // LEDC reports 1 << bits here
        resolution_from_max_duty(self.channel.get_max_duty())
    }

    fn enable(&mut self) -> Result<(), EspError> {
        self.channel.enable()
    }

    fn set_duty(&mut self, duty: u32) -> Result<(), EspError> {
        self.channel.set_duty(duty)
    }

    fn release(&mut self) -> Result<(), EspError> {
        self.channel.disable()
    }
}
