//! Drive mixing
//!
//! Converts a direction plus pre-scaled PWM magnitudes into per-side
//! signed drive values for the differential drivetrain. No scaling or
//! clamping happens here; inputs are already in the driver's 0..=100
//! range.

use crate::intent::Direction;
use defmt::Format;

/// Signed duty percent for the two drive sides. Positive is forward,
/// negative backward, zero de-energized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct WheelDrive {
    pub left: i8,
    pub right: i8,
}

impl WheelDrive {
    pub const STOPPED: WheelDrive = WheelDrive { left: 0, right: 0 };
}

/// Mixes direction and magnitudes into per-side outputs.
///
/// Turns rotate in place at the reduced `turn_pwm`; straight motion uses
/// `drive_pwm` on both sides.
pub fn mix(direction: Direction, drive_pwm: u8, turn_pwm: u8) -> WheelDrive {
    let d = drive_pwm as i8;
    let t = turn_pwm as i8;
    match direction {
        Direction::Stopped => WheelDrive::STOPPED,
        Direction::Forward => WheelDrive { left: d, right: d },
        Direction::Backward => WheelDrive { left: -d, right: -d },
        Direction::Left => WheelDrive { left: -t, right: t },
        Direction::Right => WheelDrive { left: t, right: -t },
    }
}
