//! L9110S-class two-pin motor driver.
//!
//! This module provides [`MotorDriver`], which steers one DC motor through two
//! PWM lines. Direction is selected by which line carries the duty cycle; the
//! other line is always held at zero.
//!
//! | Command | Forward line | Reverse line |
//! |---------|--------------|--------------|
//! | `set_power(true, d)` | `d` | 0 |
//! | `set_power(false, d)` | 0 | `d` |
//! | `detach()` | 0 | 0 |
//!
//! # Lifecycle
//!
//! A driver starts detached. [`attach`](MotorDriver::attach) borrows two
//! outputs for the lifetime `'a`, so the borrow checker guarantees they stay
//! alive for as long as the driver can touch them.
//! [`detach`](MotorDriver::detach) stops the motor and releases the outputs.
//!
//! # Example
//!
//! ```rust
//! use l9110s::{MotorDriver, hal::MockPwm};
//!
//! let mut forward = MockPwm::new();
//! let mut reverse = MockPwm::new();
//!
//! let mut motor = MotorDriver::new();
//! motor.attach(&mut forward, &mut reverse).unwrap();
//!
//! motor.set_power(true, 200).unwrap();
//! assert!(motor.forward());
//! assert_eq!(motor.duty(), 200);
//!
//! motor.detach().unwrap();
//! assert!(!motor.attached());
//! drop(motor);
//!
//! assert_eq!(forward.last_duty(), Some(0));
//! assert_eq!(reverse.last_duty(), Some(0));
//! ```

use log::{debug, trace, warn};

use crate::config::MotorConfig;
use crate::error::MotorError;
use crate::throttle::{PowerCommand, ThrottleMap};
use crate::traits::PwmOutput;

/// PWM bit width shared by the driver and both outputs.
pub const BIT_RESOLUTION: u8 = 8;

/// Largest duty value: `2^BIT_RESOLUTION - 1`.
pub const MAX_DUTY: u32 = (1 << BIT_RESOLUTION) - 1;

/// Snapshot of driver state for display or telemetry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotorState {
    /// True while outputs are attached.
    pub attached: bool,
    /// Last commanded direction.
    pub forward: bool,
    /// Last commanded duty value.
    pub duty: u32,
    /// Configured stall threshold.
    pub stall_duty: u32,
}

/// Two-pin H-bridge motor driver.
///
/// # Type Parameters
///
/// - `'a`: how long the attached outputs are borrowed
/// - `P`: the [`PwmOutput`] implementation used for both lines
///
/// # Thread Safety
///
/// The driver is a plain synchronous state machine. When a control loop and a
/// safety task both need it, wrap it in [`SharedMotor`](crate::SharedMotor)
/// (requires `std`).
pub struct MotorDriver<'a, P: PwmOutput> {
    outputs: Option<(&'a mut P, &'a mut P)>,
    forward: bool,
    duty: u32,
    stall_duty: u32,
    throttle_map: ThrottleMap,
}

impl<P: PwmOutput> Default for MotorDriver<'_, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, P: PwmOutput> MotorDriver<'a, P> {
    /// Creates a detached driver with a stall threshold of 1.
    pub const fn new() -> Self {
        Self {
            outputs: None,
            forward: false,
            duty: 0,
            stall_duty: 1,
            throttle_map: ThrottleMap::new(),
        }
    }

    /// Creates a detached driver using the stall threshold and throttle
    /// mapping from `config`.
    pub fn with_config(config: &MotorConfig) -> Self {
        let mut driver = Self::new();
        driver
            .set_stall_duty(config.stall_duty)
            .set_throttle_map(config.throttle_map());
        driver
    }

    /// PWM bit resolution both outputs must be configured with.
    #[inline]
    pub const fn bit_resolution() -> u8 {
        BIT_RESOLUTION
    }

    /// Upper bound for duty values.
    #[inline]
    pub const fn max_duty() -> u32 {
        MAX_DUTY
    }

    /// Current stall threshold.
    #[inline]
    pub fn stall_duty(&self) -> u32 {
        self.stall_duty
    }

    /// Sets the stall threshold, clamped to `1..=max_duty()`.
    ///
    /// Zero is coerced to 1: zero duty means stopped, not minimal turning.
    pub fn set_stall_duty(&mut self, value: u32) -> &mut Self {
        self.stall_duty = value.clamp(1, MAX_DUTY);
        debug!("stall duty set to {}", self.stall_duty);
        self
    }

    /// Throttle mapping used by [`set_throttle`](Self::set_throttle).
    #[inline]
    pub fn throttle_map(&self) -> ThrottleMap {
        self.throttle_map
    }

    /// Replaces the throttle mapping.
    pub fn set_throttle_map(&mut self, map: ThrottleMap) -> &mut Self {
        self.throttle_map = map;
        self
    }

    /// Last commanded direction; `false` before the first command.
    #[inline]
    pub fn forward(&self) -> bool {
        self.forward
    }

    /// Last commanded duty value; 0 before the first command.
    #[inline]
    pub fn duty(&self) -> u32 {
        self.duty
    }

    /// True between `attach` and `detach`.
    #[inline]
    pub fn attached(&self) -> bool {
        self.outputs.is_some()
    }

    /// Returns a snapshot of the driver state.
    pub fn state(&self) -> MotorState {
        MotorState {
            attached: self.attached(),
            forward: self.forward,
            duty: self.duty,
            stall_duty: self.stall_duty,
        }
    }

    /// Borrows the attached `(forward, reverse)` outputs.
    pub fn outputs(&self) -> Option<(&P, &P)> {
        self.outputs.as_ref().map(|(f, r)| (&**f, &**r))
    }

    /// Binds the forward and reverse outputs and enables duty writes on both.
    ///
    /// If the driver is already attached, the current outputs are detached
    /// (stopped and released) first.
    ///
    /// # Errors
    ///
    /// - [`MotorError::ResolutionMismatch`] if either output is not configured
    ///   for [`bit_resolution()`](Self::bit_resolution) bits
    /// - [`MotorError::Pwm`] if detaching the old outputs or enabling the new
    ///   ones fails
    ///
    /// The driver is left detached on error.
    pub fn attach(
        &mut self,
        forward: &'a mut P,
        reverse: &'a mut P,
    ) -> Result<&mut Self, MotorError<P::Error>> {
        if self.attached() {
            debug!("rebinding attached motor to new outputs");
            self.detach()?;
        }

        check_resolution(forward)?;
        check_resolution(reverse)?;

        forward.enable().map_err(MotorError::Pwm)?;
        if let Err(e) = reverse.enable() {
            let _ = forward.release();
            warn!("reverse output failed to enable; forward output released");
            return Err(MotorError::Pwm(e));
        }

        self.outputs = Some((forward, reverse));
        debug!("motor attached");
        Ok(self)
    }

    /// Stops the motor and releases both outputs.
    ///
    /// Both lines are written to zero, then released. The driver is marked
    /// detached even if a write fails; the first failure is returned.
    /// Calling this while detached does nothing.
    pub fn detach(&mut self) -> Result<&mut Self, MotorError<P::Error>> {
        let Some((forward, reverse)) = self.outputs.take() else {
            return Ok(self);
        };

        let stopped = forward.set_duty(0).and(reverse.set_duty(0));
        let released = forward.release().and(reverse.release());
        self.duty = 0;
        debug!("motor detached");

        stopped.and(released).map_err(MotorError::Pwm)?;
        Ok(self)
    }

    /// Drives the motor in the given direction at `duty`.
    ///
    /// `duty` is clamped to `0..=max_duty()`. The inactive line is zeroed
    /// before the active line is raised, so after the call exactly one line
    /// carries the duty.
    ///
    /// # Errors
    ///
    /// - [`MotorError::NotAttached`] if no outputs are bound; nothing is written
    /// - [`MotorError::Pwm`] if an output write fails. If the previously
    ///   driven line was already zeroed, [`duty()`](Self::duty) reports 0.
    pub fn set_power(&mut self, forward: bool, duty: u32) -> Result<(), MotorError<P::Error>> {
        let Some((forward_out, reverse_out)) = self.outputs.as_mut() else {
            warn!("set_power called on detached motor");
            return Err(MotorError::NotAttached);
        };

        let duty = duty.min(MAX_DUTY);
        let (active, idle) = if forward {
            (forward_out, reverse_out)
        } else {
            (reverse_out, forward_out)
        };

        idle.set_duty(0).map_err(MotorError::Pwm)?;
        if self.forward != forward {
            // the line that was driving the motor is now zero
            self.duty = 0;
        }
        active.set_duty(duty).map_err(MotorError::Pwm)?;

        self.forward = forward;
        self.duty = duty;
        trace!("power: forward={} duty={}", forward, duty);
        Ok(())
    }

    /// Applies a resolved [`PowerCommand`].
    pub fn apply(&mut self, command: PowerCommand) -> Result<(), MotorError<P::Error>> {
        self.set_power(command.forward, command.duty)
    }

    /// Drives the motor from a signed throttle in `-1.0..=1.0`.
    ///
    /// The value goes through the driver's [`ThrottleMap`] with the current
    /// stall threshold, so any value outside the dead zone produces at least
    /// the stall duty.
    pub fn set_throttle(&mut self, value: f32) -> Result<(), MotorError<P::Error>> {
        let command = self.throttle_map.map(value, self.stall_duty);
        self.apply(command)
    }

    /// Zeroes the duty, keeping the last direction.
    pub fn stop(&mut self) -> Result<(), MotorError<P::Error>> {
        self.set_power(self.forward, 0)
    }
}

fn check_resolution<P: PwmOutput>(output: &P) -> Result<(), MotorError<P::Error>> {
    let actual = output.bit_resolution();
    if actual != BIT_RESOLUTION {
        warn!(
            "refusing to attach output with {} bit resolution (need {})",
            actual, BIT_RESOLUTION
        );
        return Err(MotorError::ResolutionMismatch {
            expected: BIT_RESOLUTION,
            actual,
        });
    }
    Ok(())
}
