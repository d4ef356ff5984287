//! Trait definitions for hardware abstraction.
//!
//! The driver depends on exactly one hardware capability, [`PwmOutput`].
//! Concrete implementations live in [`crate::hal`]; the [`HalPwm`] adapter
//! bridges any `embedded-hal` 1.0 PWM channel.

pub mod pwm;

pub use pwm::*;
