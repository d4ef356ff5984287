//! Thread-safe wrapper for a motor driver.
//!
//! `SharedMotor` serializes access to one [`MotorDriver`] so that a control
//! loop and a safety-shutdown task can both command it. The driver borrows its
//! outputs, so share the wrapper by reference across `std::thread::scope`
//! threads rather than through an `Arc`.
//!
//! # Example
//!
//! ```rust
//! use l9110s::{MotorDriver, SharedMotor, hal::MockPwm};
//!
//! let mut forward = MockPwm::new();
//! let mut reverse = MockPwm::new();
//! let mut driver = MotorDriver::new();
//! driver.attach(&mut forward, &mut reverse).unwrap();
//!
//! let motor = SharedMotor::new(driver);
//!
//! std::thread::scope(|s| {
//!     s.spawn(|| motor.set_throttle(0.5).unwrap());
//! });
//!
//! // Safety path
//! motor.detach().unwrap();
//! assert!(!motor.state().attached);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::driver::{MotorDriver, MotorState};
use crate::error::MotorError;
use crate::traits::PwmOutput;

/// Mutex-guarded [`MotorDriver`].
///
/// A poisoned lock is recovered rather than propagated, so `detach` still
/// stops the motor after a panicking control thread.
pub struct SharedMotor<'a, P: PwmOutput> {
    inner: Mutex<MotorDriver<'a, P>>,
}

impl<'a, P: PwmOutput> SharedMotor<'a, P> {
    /// Wraps a driver.
    pub fn new(driver: MotorDriver<'a, P>) -> Self {
        Self {
            inner: Mutex::new(driver),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MotorDriver<'a, P>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access to the driver.
    pub fn with_driver<T>(&self, f: impl FnOnce(&mut MotorDriver<'a, P>) -> T) -> T {
        let mut guard = self.lock();
        f(&mut *guard)
    }

    /// See [`MotorDriver::set_power`].
    pub fn set_power(&self, forward: bool, duty: u32) -> Result<(), MotorError<P::Error>> {
        self.lock().set_power(forward, duty)
    }

    /// See [`MotorDriver::set_throttle`].
    pub fn set_throttle(&self, value: f32) -> Result<(), MotorError<P::Error>> {
        self.lock().set_throttle(value)
    }

    /// See [`MotorDriver::stop`].
    pub fn stop(&self) -> Result<(), MotorError<P::Error>> {
        self.lock().stop()
    }

    /// See [`MotorDriver::detach`].
    pub fn detach(&self) -> Result<(), MotorError<P::Error>> {
        self.lock().detach().map(|_| ())
    }

    /// Current driver state.
    pub fn state(&self) -> MotorState {
        self.lock().state()
    }

    /// Unwraps the driver.
    pub fn into_inner(self) -> MotorDriver<'a, P> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockPwm;

    #[test]
    fn shared_motor_commands() {
        let mut f = MockPwm::new();
        let mut r = MockPwm::new();
        let mut driver = MotorDriver::new();
        driver.attach(&mut f, &mut r).unwrap();
        let motor = SharedMotor::new(driver);

        motor.set_power(false, 60).unwrap();
        let state = motor.state();
        assert!(state.attached);
        assert!(!state.forward);
        assert_eq!(state.duty, 60);

        motor.stop().unwrap();
        assert_eq!(motor.state().duty, 0);
    }

    #[test]
    fn shared_motor_not_attached() {
        let motor: SharedMotor<'_, MockPwm> = SharedMotor::new(MotorDriver::new());
        assert_eq!(motor.set_throttle(1.0), Err(MotorError::NotAttached));
        assert!(motor.detach().is_ok());
    }

    #[test]
    fn concurrent_control_and_shutdown() {
        let mut f = MockPwm::new();
        let mut r = MockPwm::new();
        let mut driver = MotorDriver::new();
        driver.attach(&mut f, &mut r).unwrap();
        let motor = SharedMotor::new(driver);

        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..50 {
                    // Fails with NotAttached once the shutdown lands
                    let _ = motor.set_power(i % 2 == 0, i);
                }
            });
            s.spawn(|| {
                motor.detach().unwrap();
            });
        });

        let driver = motor.into_inner();
        assert!(!driver.attached());
        drop(driver);

        assert_eq!(f.last_duty(), Some(0));
        assert_eq!(r.last_duty(), Some(0));
        assert_eq!(f.release_count, 1);
        assert_eq!(r.release_count, 1);
    }

    #[test]
    fn poisoned_lock_still_detaches() {
        let mut f = MockPwm::new();
        let mut r = MockPwm::new();
        let mut driver = MotorDriver::new();
        driver.attach(&mut f, &mut r).unwrap();
        let motor = SharedMotor::new(driver);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            motor.with_driver(|_| panic!("control loop crashed"));
        }));
        assert!(result.is_err());

        motor.detach().unwrap();
        assert!(!motor.state().attached);
    }
}
