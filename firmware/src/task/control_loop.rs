//! Control loop
//!
//! Owns the one [`VehicleState`] instance and is its only writer. Each
//! iteration drains at most one queued intent, advances the blink/horn
//! schedule, and pushes the derived motor and lamp outputs to the tasks
//! that own the hardware. The horn is a timed state checked by the tick,
//! so nothing in here ever blocks beyond the poll interval.

use crate::system::{command, drive_command, lamp};
use defmt::info;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};
use vehicle_core::vehicle::VehicleState;

/// Poll interval for the blink and horn schedule
const TICK_INTERVAL: Duration = Duration::from_millis(50);

#[embassy_executor::task]
pub async fn control_loop() {
    info!("Control loop started");
    let mut vehicle = VehicleState::new();
    let mut last_lamps = vehicle.lamp_levels(Instant::now().as_millis());

    // Initial outputs: motors de-energized, brake light already on for
    // the stopped vehicle.
    drive_command::update(vehicle.wheel_drive());
    lamp::update(last_lamps);

    loop {
        // At most one command per iteration, then the tick.
        match select(command::wait(), Timer::after(TICK_INTERVAL)).await {
            Either::First(intent) => {
                let now = Instant::now().as_millis();
                info!("Applying {}", intent);
                vehicle.apply(intent, now);
                // Re-issue the motor output even when only the speed
                // changed, so the current direction picks up the new
                // magnitude without interruption.
                drive_command::update(vehicle.wheel_drive());
            }
            Either::Second(()) => {}
        }

        let now = Instant::now().as_millis();
        vehicle.tick(now);
        let lamps = vehicle.lamp_levels(now);
        if lamps != last_lamps {
            lamp::update(lamps);
            last_lamps = lamps;
        }
    }
}
