//! # l9110s
//!
//! Driver for two-pin PWM DC motor drivers of the L9110S H-bridge class.
//!
//! ## Features
//!
//! - **Hardware abstraction**: the driver only needs a [`PwmOutput`] per input line
//! - **One-line-at-a-time contract**: at most one PWM line is ever non-zero
//! - **Stall-aware throttle**: signed throttle mapped onto `stall_duty..=255`
//! - **Checked misuse**: power commands while detached are errors, not UB
//! - **Borrowed outputs**: the compiler keeps outputs alive while attached
//!
//! ## Architecture
//!
//! - `traits` - The PWM output capability and an `embedded-hal` adapter
//! - `driver` - [`MotorDriver`] state and control surface
//! - `throttle` - Signed throttle to duty mapping
//! - `config` - Motor configuration builder
//! - `hal` - Concrete outputs (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use l9110s::{MotorDriver, hal::MockPwm};
//!
//! let mut forward = MockPwm::new();
//! let mut reverse = MockPwm::new();
//!
//! let mut motor = MotorDriver::new();
//! motor.set_stall_duty(60);
//! motor.attach(&mut forward, &mut reverse).unwrap();
//!
//! // Raw duty
//! motor.set_power(true, 200).unwrap();
//!
//! // Signed throttle: half speed in reverse, scaled above the stall duty
//! motor.set_throttle(-0.5).unwrap();
//! assert!(!motor.forward());
//!
//! motor.detach().unwrap();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Motor configuration builder.
pub mod config;
/// The two-pin motor driver.
pub mod driver;
/// Error types for driver operations.
pub mod error;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Signed throttle mapping with stall and dead zone handling.
pub mod throttle;
/// Core traits for hardware abstraction.
pub mod traits;

/// Mutex wrapper for sharing a driver between threads.
#[cfg(feature = "std")]
pub mod shared;

// Re-exports for convenience
pub use config::MotorConfig;
pub use driver::{MotorDriver, MotorState, BIT_RESOLUTION, MAX_DUTY};
pub use error::MotorError;
pub use throttle::{PowerCommand, ThrottleMap};
pub use traits::{HalPwm, PwmOutput};

#[cfg(feature = "std")]
pub use shared::SharedMotor;
