//! Command dispatcher
//!
//! Maps raw inbound commands onto [`Intent`]s. Two sources exist: the
//! wireless link delivers UTF-8 tokens, the IR remote delivers 32-bit NEC
//! frames matched against a static code table. Anything unrecognized maps
//! to `None` and is dropped by the caller (with a log line, no error).

use crate::config::MAX_SPEED_PERCENT;
use crate::intent::{Direction, IndicatorSide, Intent};

/// Parses one command token from the wireless channel.
///
/// Recognized tokens: `forward`, `backward`, `left`, `right`, `stop`,
/// `headlight`, `brakelight`, `indicator-left`, `indicator-right`,
/// `hazard`, `horn`, `garage` and `speed:<integer>`. The speed value is
/// clamped to 0..=100; a token with an unparsable number is ignored.
pub fn parse_token(token: &str) -> Option<Intent> {
    if let Some(value) = token.strip_prefix("speed:") {
        let percent = value.parse::<i32>().ok()?;
        return Some(Intent::SetSpeed(
            percent.clamp(0, MAX_SPEED_PERCENT as i32) as u8
        ));
    }

    match token {
        "forward" => Some(Intent::Drive(Direction::Forward)),
        "backward" => Some(Intent::Drive(Direction::Backward)),
        "left" => Some(Intent::Drive(Direction::Left)),
        "right" => Some(Intent::Drive(Direction::Right)),
        "stop" => Some(Intent::Drive(Direction::Stopped)),
        "headlight" => Some(Intent::ToggleHeadlight),
        "brakelight" => Some(Intent::ToggleBrakelight),
        "indicator-left" => Some(Intent::ToggleIndicator(IndicatorSide::Left)),
        "indicator-right" => Some(Intent::ToggleIndicator(IndicatorSide::Right)),
        "hazard" => Some(Intent::ToggleHazard),
        "horn" => Some(Intent::Horn),
        "garage" => Some(Intent::ToggleGarageMode),
        _ => None,
    }
}

/// Maps a decoded 32-bit NEC frame to an intent.
///
/// The codes are the frames sent by the bundled remote. There is no speed
/// command on the remote; speed selection is link-only.
pub fn lookup_ir(code: u32) -> Option<Intent> {
    match code {
        0x00FF_A25D => Some(Intent::Drive(Direction::Stopped)),
        0x00FF_629D => Some(Intent::Drive(Direction::Forward)),
        0x00FF_A857 => Some(Intent::Drive(Direction::Backward)),
        0x00FF_22DD => Some(Intent::Drive(Direction::Left)),
        0x00FF_C23D => Some(Intent::Drive(Direction::Right)),
        0x00FF_02FD => Some(Intent::ToggleHeadlight),
        0x00FF_E01F => Some(Intent::ToggleBrakelight),
        0x00FF_906F => Some(Intent::ToggleIndicator(IndicatorSide::Left)),
        0x00FF_6897 => Some(Intent::ToggleIndicator(IndicatorSide::Right)),
        0x00FF_9867 => Some(Intent::ToggleHazard),
        0x00FF_B04F => Some(Intent::Horn),
        0x00FF_30CF => Some(Intent::ToggleGarageMode),
        _ => None,
    }
}
