//! RC car firmware entry point
//!
//! Initializes the hardware and spawns the control tasks: the single
//! control loop that owns the vehicle state, the motor and lamp output
//! tasks, and the two command sources (serial link and IR remote).

#![no_std]
#![no_main]

use crate::task::{
    control_loop::control_loop, drive::drive, ir_receive::ir_receive, lights::lights,
    link_rx::link_rx,
};
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use system::resources::{
    AssignedResources, IrReceiverResources, LampResources, LinkResources, MotorDriverResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// System core modules
mod system;
/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the resources into separate groups, one per task.
    let r = split_resources!(p);

    // Spawn the output tasks first so the control loop's initial
    // all-stop outputs land on ready consumers.
    spawner.spawn(drive(r.motor_driver)).unwrap();
    spawner.spawn(lights(r.lamps)).unwrap();
    spawner.spawn(control_loop()).unwrap();
    spawner.spawn(link_rx(r.link)).unwrap();
    spawner.spawn(ir_receive(r.ir_receiver)).unwrap();
}
