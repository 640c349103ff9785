//! Inbound command queue
//!
//! Single-consumer queue of parsed intents. The link and IR tasks push
//! into it; only the control loop drains it, so every command is applied
//! in arrival order against the one vehicle state instance.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use vehicle_core::intent::Intent;

/// Multi-producer, single-consumer intent channel with capacity of 10
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Intent, 10> = Channel::new();

/// Queues an intent for the control loop
pub async fn send(intent: Intent) {
    COMMAND_CHANNEL.sender().send(intent).await;
}

/// Receives the next queued intent
pub async fn wait() -> Intent {
    COMMAND_CHANNEL.receiver().receive().await
}
