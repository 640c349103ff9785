//! Vehicle state machine
//!
//! Single owned instance of the authoritative vehicle state: drive
//! direction, selected speed, all light flags and the blink/horn timing.
//! Only the control loop mutates it (single-writer); every other task sees
//! derived values ([`WheelDrive`], [`LampLevels`]) pushed out through
//! signals.
//!
//! # Invariants
//! - Exactly one [`Direction`] at all times; `is_moving` is derived from
//!   it, never stored.
//! - Hazard and the individual indicators are mutually exclusive: turning
//!   hazard on clears both indicators, toggling an indicator clears
//!   hazard.
//! - Brake light is forced on when stopping or reversing and forced off
//!   when entering forward motion; the user can still toggle it manually
//!   while moving.
//! - Blinking is a level toggle over the logical flags, driven by
//!   [`VehicleState::tick`] on a fixed 500 ms interval.

use crate::config::{
    DEFAULT_SPEED_PERCENT, GARAGE_SPEED_PERCENT, HORN_PULSE_MS, INDICATOR_BLINK_INTERVAL_MS,
    MAX_SPEED_PERCENT, TURN_SCALE_PERCENT,
};
use crate::intent::{Direction, IndicatorSide, Intent};
use crate::lights::LampLevels;
use crate::motor::{mix, WheelDrive};
use defmt::Format;

/// Authoritative vehicle state. Created once at startup with everything
/// off and `Stopped`; lives for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Format)]
pub struct VehicleState {
    direction: Direction,
    /// User-selected speed in percent (0..=100)
    speed_percent: u8,
    headlight_on: bool,
    brakelight_on: bool,
    indicator_left_on: bool,
    indicator_right_on: bool,
    hazard_on: bool,
    garage_mode: bool,
    /// Last blink phase flip (ms, monotonic)
    last_blink_toggle_ms: u64,
    /// Visible on/off level of the active signal class
    blink_phase: bool,
    /// Horn line stays asserted until this instant (ms, monotonic)
    horn_until_ms: u64,
}

impl VehicleState {
    pub fn new() -> Self {
        Self {
            direction: Direction::Stopped,
            speed_percent: DEFAULT_SPEED_PERCENT,
            headlight_on: false,
            // Stopped forces the brake light on, from boot onwards.
            brakelight_on: true,
            indicator_left_on: false,
            indicator_right_on: false,
            hazard_on: false,
            garage_mode: false,
            last_blink_toggle_ms: 0,
            blink_phase: false,
            horn_until_ms: 0,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed_percent(&self) -> u8 {
        self.speed_percent
    }

    pub fn is_moving(&self) -> bool {
        self.direction != Direction::Stopped
    }

    /// Full-range drive magnitude (duty percent)
    pub fn drive_pwm(&self) -> u8 {
        self.speed_percent
    }

    /// Reduced magnitude used while turning (duty percent)
    pub fn turn_pwm(&self) -> u8 {
        (self.speed_percent as u16 * TURN_SCALE_PERCENT as u16 / 100) as u8
    }

    /// Current per-side motor output for the current direction and speed.
    pub fn wheel_drive(&self) -> WheelDrive {
        mix(self.direction, self.drive_pwm(), self.turn_pwm())
    }

    /// Applies one intent. Total: no intent can fail, redundant
    /// applications are plain no-ops in effect.
    pub fn apply(&mut self, intent: Intent, now_ms: u64) {
        match intent {
            Intent::Drive(direction) => self.set_direction(direction),
            Intent::SetSpeed(percent) => {
                self.speed_percent = percent.min(MAX_SPEED_PERCENT);
            }
            Intent::ToggleHeadlight => self.headlight_on = !self.headlight_on,
            Intent::ToggleBrakelight => self.brakelight_on = !self.brakelight_on,
            Intent::ToggleIndicator(side) => {
                match side {
                    IndicatorSide::Left => self.indicator_left_on = !self.indicator_left_on,
                    IndicatorSide::Right => self.indicator_right_on = !self.indicator_right_on,
                }
                // An explicit indicator request always wins over hazard,
                // so the final visible state is exactly the toggled side.
                self.hazard_on = false;
            }
            Intent::ToggleHazard => {
                self.hazard_on = !self.hazard_on;
                if self.hazard_on {
                    self.indicator_left_on = false;
                    self.indicator_right_on = false;
                }
                // Turning hazard off restores nothing; both indicators
                // stay off.
            }
            Intent::Horn => self.horn_until_ms = now_ms + HORN_PULSE_MS,
            Intent::ToggleGarageMode => {
                self.garage_mode = !self.garage_mode;
                if self.garage_mode {
                    self.speed_percent = GARAGE_SPEED_PERCENT;
                    if !self.headlight_on {
                        self.headlight_on = true;
                    }
                } else {
                    self.speed_percent = DEFAULT_SPEED_PERCENT;
                }
            }
        }
    }

    /// Direction change with the cross-cutting brake-light and indicator
    /// rules.
    fn set_direction(&mut self, new_direction: Direction) {
        let old_direction = self.direction;
        self.direction = new_direction;

        match new_direction {
            Direction::Forward => {
                if self.brakelight_on {
                    self.brakelight_on = false;
                }
            }
            Direction::Backward | Direction::Stopped => {
                if !self.brakelight_on {
                    self.brakelight_on = true;
                }
            }
            Direction::Left | Direction::Right => {}
        }

        // Hazard fully overrides the discrete indicators; while it is
        // active a turn neither engages nor clears them.
        if self.hazard_on {
            return;
        }

        // Leaving a turning state disengages the indicator that the turn
        // engaged.
        if old_direction == Direction::Left && new_direction != Direction::Left {
            self.indicator_left_on = false;
        }
        if old_direction == Direction::Right && new_direction != Direction::Right {
            self.indicator_right_on = false;
        }

        match new_direction {
            Direction::Left => self.indicator_left_on = true,
            Direction::Right => self.indicator_right_on = true,
            // Indicator origin is not tracked, so stopping also clears an
            // indicator the user requested manually.
            Direction::Stopped => {
                self.indicator_left_on = false;
                self.indicator_right_on = false;
            }
            Direction::Forward | Direction::Backward => {}
        }
    }

    /// Advances the blink schedule. Flips the visible phase once per
    /// interval regardless of which signal class is active; the logical
    /// flags are untouched.
    pub fn tick(&mut self, now_ms: u64) {
        if now_ms.wrapping_sub(self.last_blink_toggle_ms) >= INDICATOR_BLINK_INTERVAL_MS {
            self.last_blink_toggle_ms = now_ms;
            self.blink_phase = !self.blink_phase;
        }
    }

    /// Derives the physical output levels for the current state: hazard
    /// blinks both indicators, a single active indicator blinks alone,
    /// otherwise both stay dark. The horn line is asserted until its pulse
    /// deadline passes.
    pub fn lamp_levels(&self, now_ms: u64) -> LampLevels {
        let (indicator_left, indicator_right) = if self.hazard_on {
            (self.blink_phase, self.blink_phase)
        } else if self.indicator_left_on {
            (self.blink_phase, false)
        } else if self.indicator_right_on {
            (false, self.blink_phase)
        } else {
            (false, false)
        };

        LampLevels {
            headlight: self.headlight_on,
            brakelight: self.brakelight_on,
            indicator_left,
            indicator_right,
            horn: now_ms < self.horn_until_ms,
        }
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::parse_token;

    fn drive(direction: Direction) -> Intent {
        Intent::Drive(direction)
    }

    #[test]
    fn boots_stopped_with_brake_light_on() {
        let v = VehicleState::new();
        assert_eq!(v.direction(), Direction::Stopped);
        assert_eq!(v.speed_percent(), DEFAULT_SPEED_PERCENT);
        assert!(!v.is_moving());
        assert!(!v.headlight_on);
        assert!(!v.hazard_on);
        assert_eq!(v.wheel_drive(), WheelDrive::STOPPED);
        // Stopped at boot means the brake light is already lit.
        assert!(v.brakelight_on);
        assert!(v.lamp_levels(0).brakelight);
    }

    #[test]
    fn forward_clears_brake_light() {
        let mut v = VehicleState::new();
        v.apply(drive(Direction::Stopped), 0);
        assert!(v.brakelight_on);

        v.apply(drive(Direction::Forward), 0);
        assert_eq!(v.direction(), Direction::Forward);
        assert!(!v.brakelight_on);
        assert_eq!(
            v.wheel_drive(),
            WheelDrive {
                left: DEFAULT_SPEED_PERCENT as i8,
                right: DEFAULT_SPEED_PERCENT as i8
            }
        );
    }

    #[test]
    fn backward_and_stop_force_brake_light_on() {
        let mut v = VehicleState::new();
        v.apply(drive(Direction::Backward), 0);
        assert!(v.brakelight_on);

        v.apply(drive(Direction::Forward), 0);
        assert!(!v.brakelight_on);

        v.apply(drive(Direction::Stopped), 0);
        assert!(v.brakelight_on);
    }

    #[test]
    fn manual_brake_light_toggle_still_works_while_moving() {
        let mut v = VehicleState::new();
        v.apply(drive(Direction::Forward), 0);
        assert!(!v.brakelight_on);
        v.apply(Intent::ToggleBrakelight, 0);
        assert!(v.brakelight_on);
    }

    #[test]
    fn turning_engages_matching_indicator() {
        let mut v = VehicleState::new();
        v.apply(drive(Direction::Left), 0);
        assert_eq!(v.direction(), Direction::Left);
        assert!(v.indicator_left_on);
        assert!(!v.indicator_right_on);
    }

    #[test]
    fn direction_is_exclusive_forward_then_left_is_left() {
        let mut v = VehicleState::new();
        v.apply(drive(Direction::Forward), 0);
        v.apply(drive(Direction::Left), 0);
        assert_eq!(v.direction(), Direction::Left);
    }

    #[test]
    fn leaving_a_turn_disengages_its_indicator() {
        let mut v = VehicleState::new();
        v.apply(drive(Direction::Left), 0);
        v.apply(drive(Direction::Right), 0);
        assert!(!v.indicator_left_on);
        assert!(v.indicator_right_on);

        v.apply(drive(Direction::Forward), 0);
        assert!(!v.indicator_left_on);
        assert!(!v.indicator_right_on);
    }

    #[test]
    fn stop_clears_indicators_even_when_manually_requested() {
        // Indicator origin is not tracked; this mirrors the accepted
        // behavior rather than an origin-tagged variant.
        let mut v = VehicleState::new();
        v.apply(Intent::ToggleIndicator(IndicatorSide::Left), 0);
        assert!(v.indicator_left_on);
        v.apply(drive(Direction::Stopped), 0);
        assert!(!v.indicator_left_on);
    }

    #[test]
    fn hazard_preserves_indicators_across_direction_changes() {
        let mut v = VehicleState::new();
        v.apply(Intent::ToggleHazard, 0);
        v.apply(drive(Direction::Left), 0);
        assert!(v.hazard_on);
        assert!(!v.indicator_left_on);

        v.apply(drive(Direction::Stopped), 0);
        assert!(v.hazard_on);
        assert!(!v.indicator_left_on);
        assert!(!v.indicator_right_on);
    }

    #[test]
    fn hazard_clears_active_indicator() {
        let mut v = VehicleState::new();
        v.apply(Intent::ToggleIndicator(IndicatorSide::Left), 0);
        assert!(v.indicator_left_on);

        v.apply(Intent::ToggleHazard, 0);
        assert!(v.hazard_on);
        assert!(!v.indicator_left_on);
        assert!(!v.indicator_right_on);
    }

    #[test]
    fn indicator_toggle_clears_hazard() {
        let mut v = VehicleState::new();
        v.apply(Intent::ToggleHazard, 0);
        v.apply(Intent::ToggleIndicator(IndicatorSide::Right), 0);
        assert!(!v.hazard_on);
        assert!(v.indicator_right_on);
        assert!(!v.indicator_left_on);
    }

    #[test]
    fn hazard_off_restores_nothing() {
        let mut v = VehicleState::new();
        v.apply(Intent::ToggleIndicator(IndicatorSide::Left), 0);
        v.apply(Intent::ToggleHazard, 0);
        v.apply(Intent::ToggleHazard, 0);
        assert!(!v.hazard_on);
        assert!(!v.indicator_left_on);
        assert!(!v.indicator_right_on);
    }

    #[test]
    fn garage_mode_caps_speed_and_forces_headlight() {
        let mut v = VehicleState::new();
        assert_eq!(v.speed_percent(), 80);
        assert!(!v.headlight_on);

        v.apply(Intent::ToggleGarageMode, 0);
        assert!(v.garage_mode);
        assert!(v.headlight_on);
        assert_eq!(v.speed_percent(), GARAGE_SPEED_PERCENT);

        // Leaving garage mode restores cruising speed but leaves the
        // headlight as-is.
        v.apply(Intent::ToggleGarageMode, 0);
        assert!(!v.garage_mode);
        assert!(v.headlight_on);
        assert_eq!(v.speed_percent(), DEFAULT_SPEED_PERCENT);
    }

    #[test]
    fn speed_round_trip_reaches_configured_maximum() {
        let mut v = VehicleState::new();
        v.apply(parse_token("speed:0").unwrap(), 0);
        v.apply(parse_token("speed:100").unwrap(), 0);
        v.apply(parse_token("forward").unwrap(), 0);
        assert_eq!(v.drive_pwm(), MAX_SPEED_PERCENT);
        assert_eq!(
            v.wheel_drive(),
            WheelDrive {
                left: 100,
                right: 100
            }
        );
    }

    #[test]
    fn speed_change_keeps_current_direction() {
        let mut v = VehicleState::new();
        v.apply(drive(Direction::Left), 0);
        v.apply(Intent::SetSpeed(40), 0);
        assert_eq!(v.direction(), Direction::Left);
        let expected_turn = (40u16 * TURN_SCALE_PERCENT as u16 / 100) as i8;
        assert_eq!(
            v.wheel_drive(),
            WheelDrive {
                left: -expected_turn,
                right: expected_turn
            }
        );
    }

    #[test]
    fn turn_pwm_is_scaled_down() {
        let mut v = VehicleState::new();
        v.apply(Intent::SetSpeed(100), 0);
        assert_eq!(v.drive_pwm(), 100);
        assert_eq!(v.turn_pwm(), TURN_SCALE_PERCENT);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut v = VehicleState::new();
        v.apply(drive(Direction::Forward), 0);
        v.apply(drive(Direction::Stopped), 0);
        let after_first = v.clone();
        v.apply(drive(Direction::Stopped), 0);
        assert_eq!(v, after_first);
        assert_eq!(v.wheel_drive(), WheelDrive::STOPPED);
    }

    #[test]
    fn blink_phase_alternates_on_the_interval() {
        let mut v = VehicleState::new();
        v.apply(Intent::ToggleIndicator(IndicatorSide::Left), 0);

        // Walk time forward in steps past the interval; the left output
        // must alternate each interval while the right stays off.
        let mut previous = v.lamp_levels(0).indicator_left;
        for i in 1..=6u64 {
            let now = i * INDICATOR_BLINK_INTERVAL_MS;
            v.tick(now);
            let lamps = v.lamp_levels(now);
            assert_ne!(lamps.indicator_left, previous);
            assert!(!lamps.indicator_right);
            previous = lamps.indicator_left;
        }
    }

    #[test]
    fn tick_before_interval_does_not_flip() {
        let mut v = VehicleState::new();
        v.apply(Intent::ToggleHazard, 0);
        v.tick(INDICATOR_BLINK_INTERVAL_MS);
        let phase = v.lamp_levels(INDICATOR_BLINK_INTERVAL_MS).indicator_left;
        v.tick(INDICATOR_BLINK_INTERVAL_MS + 100);
        assert_eq!(
            v.lamp_levels(INDICATOR_BLINK_INTERVAL_MS + 100).indicator_left,
            phase
        );
    }

    #[test]
    fn hazard_blinks_both_indicators_together() {
        let mut v = VehicleState::new();
        v.apply(Intent::ToggleHazard, 0);
        v.tick(INDICATOR_BLINK_INTERVAL_MS);
        let lamps = v.lamp_levels(INDICATOR_BLINK_INTERVAL_MS);
        assert!(lamps.indicator_left);
        assert!(lamps.indicator_right);
        v.tick(2 * INDICATOR_BLINK_INTERVAL_MS);
        let lamps = v.lamp_levels(2 * INDICATOR_BLINK_INTERVAL_MS);
        assert!(!lamps.indicator_left);
        assert!(!lamps.indicator_right);
    }

    #[test]
    fn idle_indicators_stay_dark_regardless_of_phase() {
        let mut v = VehicleState::new();
        v.tick(INDICATOR_BLINK_INTERVAL_MS);
        let lamps = v.lamp_levels(INDICATOR_BLINK_INTERVAL_MS);
        assert!(!lamps.indicator_left);
        assert!(!lamps.indicator_right);
    }

    #[test]
    fn horn_is_a_timed_pulse() {
        let mut v = VehicleState::new();
        v.apply(Intent::Horn, 1_000);
        assert!(v.lamp_levels(1_000).horn);
        assert!(v.lamp_levels(1_000 + HORN_PULSE_MS - 1).horn);
        assert!(!v.lamp_levels(1_000 + HORN_PULSE_MS).horn);
    }
}
