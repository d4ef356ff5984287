//! PWM output capability consumed by the motor driver.
//!
//! The driver never touches registers itself. Everything it needs from the
//! hardware goes through [`PwmOutput`]: a fixed bit resolution, a duty write,
//! and an optional release back to a non-driving state.
//!
//! # Implementations
//!
//! | Type | Backend |
//! |------|---------|
//! | [`HalPwm`] | Any `embedded_hal::pwm::SetDutyCycle` channel |
//! | [`MockPwm`](crate::hal::MockPwm) | Records writes for tests |
//! | `Esp32Pwm` | ESP32 LEDC channel (requires `esp32` feature) |
//!
//! # Example
//!
//! ```rust
//! use l9110s::traits::PwmOutput;
//! use l9110s::hal::MockPwm;
//!
//! let mut pwm = MockPwm::new();
//! pwm.enable().unwrap();
//! pwm.set_duty(128).unwrap();
//! assert_eq!(pwm.last_duty(), Some(128));
//! ```

use embedded_hal::pwm::SetDutyCycle;

use crate::driver::{BIT_RESOLUTION, MAX_DUTY};

/// A single PWM output line.
///
/// Implement this for your PWM peripheral. The motor driver borrows two of
/// these (forward and reverse) for as long as it is attached.
///
/// # Implementation Notes
///
/// - `bit_resolution()` must report the resolution the hardware is actually
///   configured with; the driver refuses to attach outputs that do not match
///   [`MotorDriver::bit_resolution`](crate::MotorDriver::bit_resolution).
/// - `set_duty()` receives values in `0..=max_duty`; commit them immediately.
/// - `release()` is optional. The default does nothing.
pub trait PwmOutput {
    /// Error type for PWM operations.
    type Error: core::fmt::Debug;

    /// Bit resolution the output is configured with.
    fn bit_resolution(&self) -> u8;

    /// Places the output into duty-cycle write mode.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Writes a duty value and commits it to the physical output.
    fn set_duty(&mut self, duty: u32) -> Result<(), Self::Error>;

    /// Returns the pin to its default non-driving state.
    ///
    /// Called by the driver on detach, after the duty has been zeroed.
    fn release(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Bit width of a PWM channel given its maximum duty value.
///
/// Accepts both conventions found in PWM peripherals: a full-scale value of
/// `2^n - 1` (255 for 8 bits) and one of `2^n` (256 for 8 bits, as the ESP32
/// LEDC reports).
///
/// ```rust
/// use l9110s::traits::resolution_from_max_duty;
///
/// assert_eq!(resolution_from_max_duty(255), 8);
/// assert_eq!(resolution_from_max_duty(256), 8);
/// ```
pub fn resolution_from_max_duty(max_duty: u32) -> u8 {
    if max_duty.is_power_of_two() {
        max_duty.trailing_zeros() as u8
    } else {
        (u32::BITS - max_duty.leading_zeros()) as u8
    }
}

/// Adapter from an `embedded-hal` PWM channel to [`PwmOutput`].
///
/// The channel may have any native resolution; 8-bit duty values are scaled
/// onto the channel's `max_duty_cycle()`, so the adapter always reports
/// [`BIT_RESOLUTION`].
///
/// ```rust,ignore
/// use l9110s::{MotorDriver, traits::HalPwm};
///
/// let mut forward = HalPwm::new(channel_a);
/// let mut reverse = HalPwm::new(channel_b);
/// let mut motor = MotorDriver::new();
/// motor.attach(&mut forward, &mut reverse)?;
/// ```
#[derive(Debug)]
pub struct HalPwm<C> {
    channel: C,
}

impl<C: SetDutyCycle> HalPwm<C> {
    /// Wraps an `embedded-hal` PWM channel.
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Returns a reference to the wrapped channel.
    pub fn inner(&self) -> &C {
        &self.channel
    }

    /// Consumes the adapter, returning the wrapped channel.
    pub fn into_inner(self) -> C {
        self.channel
    }
}

impl<C: SetDutyCycle> PwmOutput for HalPwm<C> {
    type Error = C::Error;

    fn bit_resolution(&self) -> u8 {
        BIT_RESOLUTION
    }

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.channel.set_duty_cycle_fully_off()
    }

    fn set_duty(&mut self, duty: u32) -> Result<(), Self::Error> {
        let duty = duty.min(MAX_DUTY) as u16;
        self.channel.set_duty_cycle_fraction(duty, MAX_DUTY as u16)
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        self.channel.set_duty_cycle_fully_off()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    /// 10-bit style channel that remembers its last raw duty.
    struct FakeChannel {
        raw: u16,
    }

    impl ErrorType for FakeChannel {
        type Error = Infallible;
    }

    impl SetDutyCycle for FakeChannel {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.raw = duty;
            Ok(())
        }
    }

    #[test]
    fn resolution_from_inclusive_max() {
        assert_eq!(resolution_from_max_duty(255), 8);
        assert_eq!(resolution_from_max_duty(1023), 10);
        assert_eq!(resolution_from_max_duty(1), 1);
    }

    #[test]
    fn resolution_from_power_of_two_max() {
        // ESP32 LEDC: Bits8 reports 1 << 8
        assert_eq!(resolution_from_max_duty(1 << 8), 8);
        assert_eq!(resolution_from_max_duty(1 << 10), 10);
        assert_eq!(resolution_from_max_duty(1 << 14), 14);
    }

    #[test]
    fn resolution_from_zero_max() {
        assert_eq!(resolution_from_max_duty(0), 0);
    }

    #[test]
    fn hal_pwm_reports_driver_resolution() {
        let pwm = HalPwm::new(FakeChannel { raw: 0 });
        assert_eq!(pwm.bit_resolution(), BIT_RESOLUTION);
    }

    #[test]
    fn hal_pwm_scales_to_channel_range() {
        let mut pwm = HalPwm::new(FakeChannel { raw: 7 });

        pwm.set_duty(MAX_DUTY).unwrap();
        assert_eq!(pwm.inner().raw, 1000);

        pwm.set_duty(51).unwrap();
        assert_eq!(pwm.inner().raw, 200);

        pwm.set_duty(0).unwrap();
        assert_eq!(pwm.inner().raw, 0);
    }

    #[test]
    fn hal_pwm_clamps_oversized_duty() {
        let mut pwm = HalPwm::new(FakeChannel { raw: 0 });
        pwm.set_duty(10_000).unwrap();
        assert_eq!(pwm.inner().raw, 1000);
    }

    #[test]
    fn hal_pwm_enable_and_release_turn_off() {
        let mut pwm = HalPwm::new(FakeChannel { raw: 500 });
        pwm.enable().unwrap();
        assert_eq!(pwm.inner().raw, 0);

        pwm.set_duty(MAX_DUTY).unwrap();
        pwm.release().unwrap();
        assert_eq!(pwm.into_inner().raw, 0);
    }
}
