//! Motor configuration.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`. Nothing here is persisted; build
//! the config at startup and hand it to
//! [`MotorDriver::with_config`](crate::MotorDriver::with_config).
//!
//! # Example
//!
//! ```rust
//! use l9110s::config::MotorConfig;
//!
//! let config = MotorConfig::default()
//!     .with_name("left wheel")
//!     .with_stall_duty(90)
//!     .with_dead_zone(0.05);
//!
//! assert_eq!(config.name.as_str(), "left wheel");
//! assert_eq!(config.stall_duty, 90);
//! ```

use heapless::String as HString;

use crate::driver::MAX_DUTY;
use crate::throttle::ThrottleMap;

/// Maximum length for the motor name
pub const MAX_NAME_LEN: usize = 32;

/// Type alias for the motor name string
pub type NameString = HString<MAX_NAME_LEN>;

/// Create a NameString from a &str, truncating at a UTF-8 boundary if too long
pub fn name_string(s: &str) -> NameString {
    let mut hs = NameString::new();
    let take = s.len().min(MAX_NAME_LEN);
    let valid_end = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

/// Motor driver configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotorConfig {
    /// Human-readable motor name (for logs)
    pub name: NameString,
    /// Minimum duty that keeps the motor turning (1 to 255)
    pub stall_duty: u32,
    /// Throttle magnitude treated as zero (0.0 to 1.0)
    pub dead_zone: f32,
    /// Motor wired backwards; negate throttle
    pub flip: bool,
    /// PWM carrier frequency in Hz (used by hardware backends)
    pub pwm_frequency_hz: u32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            name: name_string("motor"),
            stall_duty: 1,
            dead_zone: 0.0,
            flip: false,
            pwm_frequency_hz: 20_000,
        }
    }
}

impl MotorConfig {
    /// Set the motor name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name_string(name);
        self
    }

    /// Set the stall duty, clamped to 1..=255
    pub fn with_stall_duty(mut self, duty: u32) -> Self {
        self.stall_duty = duty.clamp(1, MAX_DUTY);
        self
    }

    /// Set the dead zone, clamped to 0.0..=1.0
    pub fn with_dead_zone(mut self, dead_zone: f32) -> Self {
        self.dead_zone = ThrottleMap::new().with_dead_zone(dead_zone).dead_zone;
        self
    }

    /// Set whether the throttle is flipped
    pub fn with_flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    /// Set the PWM frequency
    pub fn with_pwm_frequency_hz(mut self, hz: u32) -> Self {
        self.pwm_frequency_hz = hz;
        self
    }

    /// Throttle mapping described by this config
    pub fn throttle_map(&self) -> ThrottleMap {
        ThrottleMap::new()
            .with_dead_zone(self.dead_zone)
            .with_flip(self.flip)
    }
}
