//! Mock implementations for testing without hardware.
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockPwm`] | [`PwmOutput`] | Records every duty write and lifecycle call |
//!
//! # Example
//!
//! ```rust
//! use l9110s::hal::MockPwm;
//! use l9110s::traits::PwmOutput;
//!
//! let mut pwm = MockPwm::new();
//! pwm.set_duty(10).unwrap();
//! pwm.set_duty(0).unwrap();
//!
//! assert_eq!(pwm.writes, [10, 0]);
//! assert_eq!(pwm.last_duty(), Some(0));
//! ```
//!
//! [`PwmOutput`]: crate::traits::PwmOutput

use alloc::vec::Vec;

use crate::driver::BIT_RESOLUTION;
use crate::traits::PwmOutput;

/// Mock PWM output for testing.
///
/// Records all duty writes for verification. Use the public fields to
/// inspect state after test operations, or flip `fail_writes` to simulate a
/// bus fault.
///
/// # Example
///
/// ```rust
/// use l9110s::hal::MockPwm;
/// use l9110s::traits::PwmOutput;
///
/// let mut pwm = MockPwm::new().with_resolution(10);
/// assert_eq!(pwm.bit_resolution(), 10);
///
/// pwm.fail_writes = true;
/// assert!(pwm.set_duty(1).is_err());
/// assert!(pwm.writes.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct MockPwm {
    /// Every duty value written, oldest first.
    pub writes: Vec<u32>,
    /// Reported bit resolution.
    pub resolution: u8,
    /// Whether `enable` has been called since the last `release`.
    pub enabled: bool,
    /// Number of times `enable` was called.
    pub enable_count: usize,
    /// Number of times `release` was called.
    pub release_count: usize,
    /// When true, `set_duty` fails without recording.
    pub fail_writes: bool,
    /// When true, `enable` fails.
    pub fail_enable: bool,
    /// When set, `set_duty` fails once this many writes have been recorded.
    pub fail_after: Option<usize>,
}

impl Default for MockPwm {
    fn default() -> Self {
        Self {
            writes: Vec::new(),
            resolution: BIT_RESOLUTION,
            enabled: false,
            enable_count: 0,
            release_count: 0,
            fail_writes: false,
            fail_enable: false,
            fail_after: None,
        }
    }
}

impl MockPwm {
    /// Creates a mock output at the driver's bit resolution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock output reporting a different resolution.
    pub fn with_resolution(mut self, bits: u8) -> Self {
        self.resolution = bits;
        self
    }

    /// Creates a mock output that accepts `writes` duty writes, then fails.
    pub fn failing_after(mut self, writes: usize) -> Self {
        self.fail_after = Some(writes);
        self
    }

    /// Most recent duty write, if any.
    pub fn last_duty(&self) -> Option<u32> {
        self.writes.last().copied()
    }

    /// Number of duty writes recorded.
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }
}

impl PwmOutput for MockPwm {
    type Error = ();

    fn bit_resolution(&self) -> u8 {
        self.resolution
    }

    fn enable(&mut self) -> Result<(), ()> {
        if self.fail_enable {
            return Err(());
        }
        self.enabled = true;
        self.enable_count += 1;
        Ok(())
    }

    fn set_duty(&mut self, duty: u32) -> Result<(), ()> {
        if self.fail_writes || self.fail_after.is_some_and(|n| self.writes.len() >= n) {
            return Err(());
        }
        self.writes.push(duty);
        Ok(())
    }

    fn release(&mut self) -> Result<(), ()> {
        self.enabled = false;
        self.release_count += 1;
        Ok(())
    }
}
