//! Drive Command Module
//!
//! Carries the latest per-side motor output from the control loop to the
//! drive task. A Signal is used rather than a channel: only the most
//! recent output matters, a later command simply overrides the previous
//! actuator state.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use vehicle_core::motor::WheelDrive;

/// Signal for motor output updates
pub static DRIVE: Signal<CriticalSectionRawMutex, WheelDrive> = Signal::new();

/// Publishes a new motor output
pub fn update(command: WheelDrive) {
    DRIVE.signal(command);
}

/// Waits for the next motor output
pub async fn wait() -> WheelDrive {
    DRIVE.wait().await
}
