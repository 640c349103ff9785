//! Lamp level signal
//!
//! Carries the derived output levels (headlight, brake light, blinking
//! indicators, horn line) from the control loop to the lights task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use vehicle_core::lights::LampLevels;

/// Signal for lamp output updates
pub static LAMPS: Signal<CriticalSectionRawMutex, LampLevels> = Signal::new();

/// Publishes new lamp levels
pub fn update(levels: LampLevels) {
    LAMPS.signal(levels);
}

/// Waits for the next lamp levels
pub async fn wait() -> LampLevels {
    LAMPS.wait().await
}
