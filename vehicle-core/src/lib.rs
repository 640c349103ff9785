//! Hardware-free control core for a differential-drive RC car
//!
//! Translates remote commands (text tokens from the radio link, NEC codes
//! from the IR remote) into motor and lighting state, and schedules the
//! time-driven indicator blinking. The firmware crate owns the pins and
//! the async tasks; everything in here is plain state and pure functions,
//! so it also builds and tests on the host.

#![cfg_attr(target_os = "none", no_std)]

pub mod config;
pub mod dispatch;
pub mod intent;
pub mod lights;
pub mod motor;
pub mod vehicle;
