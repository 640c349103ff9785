//! Core system components: shared channels, signals and hardware resources
pub mod command;
pub mod drive_command;
pub mod lamp;
pub mod resources;
