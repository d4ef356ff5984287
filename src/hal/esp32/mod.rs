//! ESP32 hardware abstraction layer for an L9110S motor driver.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 (LEDC peripheral for PWM)
//! - **Motor Driver**: L9110S (two PWM inputs per motor)
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments.

mod pwm;

pub use pwm::Esp32Pwm;

/// Pin assignments for the motor driver inputs.
pub mod pins {
    /// Forward PWM output (IA on L9110S)
    pub const FORWARD_PWM: i32 = 2;

    /// Reverse PWM output (IB on L9110S)
    pub const REVERSE_PWM: i32 = 3;
}
