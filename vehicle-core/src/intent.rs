//! Command intents
//!
//! The normalized vocabulary produced by the dispatcher. Direction and
//! intents are closed enums so that invalid or misspelled states cannot
//! exist past the parsing edge.

use defmt::Format;

/// Drive direction. Exactly one value holds at a time; `Stopped` is the
/// power-on default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Direction {
    Stopped,
    Forward,
    Backward,
    Left,
    Right,
}

/// One of the two turn indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum IndicatorSide {
    Left,
    Right,
}

/// A validated action ready to be applied against the vehicle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Intent {
    /// Set the drive direction (including `Stopped`)
    Drive(Direction),
    /// Select speed in percent, already clamped to 0..=100
    SetSpeed(u8),
    ToggleHeadlight,
    ToggleBrakelight,
    ToggleIndicator(IndicatorSide),
    ToggleHazard,
    /// Momentary horn pulse
    Horn,
    ToggleGarageMode,
}
