//! Error taxonomy for motor driver operations.
//!
//! Out-of-range duty and stall values are never errors; they are clamped.
//! A dangling output reference cannot be expressed at all, because the driver
//! borrows its outputs for its own lifetime.

use thiserror::Error;

/// Errors returned by [`MotorDriver`](crate::MotorDriver).
///
/// `E` is the error type of the attached [`PwmOutput`](crate::traits::PwmOutput).
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum MotorError<E> {
    /// A power command was issued while no outputs are attached.
    #[error("motor driver is not attached to PWM outputs")]
    NotAttached,

    /// An output is configured with a different bit resolution than the driver.
    #[error("PWM output resolution mismatch: expected {expected} bits, got {actual}")]
    ResolutionMismatch {
        /// Resolution the driver requires.
        expected: u8,
        /// Resolution the output reported.
        actual: u8,
    },

    /// The underlying PWM output failed.
    #[error("PWM output error: {0:?}")]
    Pwm(E),
}

impl<E> MotorError<E> {
    /// Returns true for [`MotorError::NotAttached`].
    #[inline]
    pub fn is_not_attached(&self) -> bool {
        matches!(self, MotorError::NotAttached)
    }
}
