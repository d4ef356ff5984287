//! Signed throttle to duty-cycle mapping.
//!
//! Operator inputs (joysticks, sliders, remote commands) are usually a signed
//! value in `-1.0..=1.0`. [`ThrottleMap`] turns one into a [`PowerCommand`]
//! the driver can apply directly, taking the motor's stall threshold into
//! account so that any non-zero request actually turns the motor.
//!
//! # Mapping
//!
//! 1. Clamp to `-1.0..=1.0` (NaN counts as zero).
//! 2. Negate if `flip` is set (motor wired backwards).
//! 3. Magnitudes at or below `dead_zone` are zero duty.
//! 4. Otherwise the magnitude is mapped linearly from `(dead_zone, 1.0]`
//!    onto `stall_duty..=MAX_DUTY`.
//!
//! Direction is forward for any non-negative value.
//!
//! # Example
//!
//! ```rust
//! use l9110s::throttle::{PowerCommand, ThrottleMap};
//!
//! let map = ThrottleMap::new().with_dead_zone(0.1);
//!
//! assert_eq!(map.map(0.05, 100), PowerCommand::STOP);
//! assert_eq!(map.map(1.0, 100), PowerCommand { forward: true, duty: 255 });
//! assert_eq!(map.map(-1.0, 100), PowerCommand { forward: false, duty: 255 });
//! ```

use crate::driver::MAX_DUTY;

/// A resolved power command: direction plus duty in `0..=MAX_DUTY`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerCommand {
    /// True to drive the forward line, false for the reverse line.
    pub forward: bool,
    /// Duty value for the active line.
    pub duty: u32,
}

impl PowerCommand {
    /// Forward direction, zero duty.
    pub const STOP: Self = Self {
        forward: true,
        duty: 0,
    };
}

/// Signed throttle mapping with dead zone and optional direction flip.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThrottleMap {
    /// Magnitude at or below which the throttle is treated as zero (0.0 to 1.0).
    pub dead_zone: f32,
    /// Negate the throttle before mapping.
    pub flip: bool,
}

impl Default for ThrottleMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ThrottleMap {
    /// No dead zone, no flip.
    pub const fn new() -> Self {
        Self {
            dead_zone: 0.0,
            flip: false,
        }
    }

    /// Set the dead zone, clamped to `0.0..=1.0`.
    pub fn with_dead_zone(mut self, dead_zone: f32) -> Self {
        self.dead_zone = clamp_dead_zone(dead_zone);
        self
    }

    /// Set whether the throttle direction is flipped.
    pub fn with_flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    /// Maps a signed throttle to a power command.
    ///
    /// `stall_duty` is clamped to `1..=MAX_DUTY` before use.
    pub fn map(&self, value: f32, stall_duty: u32) -> PowerCommand {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(-1.0, 1.0)
        };
        let value = if self.flip { -value } else { value };

        let forward = value >= 0.0;
        let magnitude = if value < 0.0 { -value } else { value };
        let dead_zone = clamp_dead_zone(self.dead_zone);

        if magnitude <= dead_zone {
            return PowerCommand { forward, duty: 0 };
        }

        let stall = stall_duty.clamp(1, MAX_DUTY) as f32;
        let fraction = (magnitude - dead_zone) / (1.0 - dead_zone);
        let duty = stall + fraction * (MAX_DUTY as f32 - stall);

        PowerCommand {
            forward,
            duty: (duty as u32).clamp(1, MAX_DUTY),
        }
    }
}

fn clamp_dead_zone(dead_zone: f32) -> f32 {
    if dead_zone.is_nan() {
        0.0
    } else {
        dead_zone.clamp(0.0, 1.0)
    }
}
