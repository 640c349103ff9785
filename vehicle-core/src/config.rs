//! Vehicle tunables
//!
//! All speeds are duty percentages in the motor driver's native 0..=100
//! input range (0 = off, 100 = full power).

/// Cruising speed restored when leaving garage mode (%)
pub const DEFAULT_SPEED_PERCENT: u8 = 80;

/// Capped speed while garage mode is active (%)
pub const GARAGE_SPEED_PERCENT: u8 = 30;

/// Upper bound for user-selected speed (%)
pub const MAX_SPEED_PERCENT: u8 = 100;

/// Turn PWM relative to drive PWM. The car turns at a reduced magnitude
/// for precision (roughly 800/1023 of full scale).
pub const TURN_SCALE_PERCENT: u8 = 78;

/// Indicator/hazard blink half-period (ms)
pub const INDICATOR_BLINK_INTERVAL_MS: u64 = 500;

/// Horn pulse length (ms)
pub const HORN_PULSE_MS: u64 = 300;
