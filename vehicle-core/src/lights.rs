//! Physical lamp levels
//!
//! The logical light flags live in [`crate::vehicle::VehicleState`]; this
//! is the derived on/off level of each output line, with the indicator
//! blink phase already folded in.

use defmt::Format;

/// On/off level for each lamp output plus the horn line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct LampLevels {
    pub headlight: bool,
    pub brakelight: bool,
    pub indicator_left: bool,
    pub indicator_right: bool,
    pub horn: bool,
}

impl LampLevels {
    pub const ALL_OFF: LampLevels = LampLevels {
        headlight: false,
        brakelight: false,
        indicator_left: false,
        indicator_right: false,
        horn: false,
    };
}
