//! Lights task
//!
//! Owns the lamp and horn output lines and mirrors the levels published
//! by the control loop. Blink timing is already folded into the levels,
//! so this task is a plain level writer.

use crate::system::lamp;
use crate::system::resources::LampResources;
use embassy_rp::gpio::{Level, Output};

#[embassy_executor::task]
pub async fn lights(r: LampResources) {
    let mut headlight = Output::new(r.headlight_pin, Level::Low);
    let mut brakelight = Output::new(r.brakelight_pin, Level::Low);
    let mut indicator_left = Output::new(r.indicator_left_pin, Level::Low);
    let mut indicator_right = Output::new(r.indicator_right_pin, Level::Low);
    let mut horn = Output::new(r.horn_pin, Level::Low);

    loop {
        let levels = lamp::wait().await;
        headlight.set_level(levels.headlight.into());
        brakelight.set_level(levels.brakelight.into());
        indicator_left.set_level(levels.indicator_left.into());
        indicator_right.set_level(levels.indicator_right.into());
        horn.set_level(levels.horn.into());
    }
}
