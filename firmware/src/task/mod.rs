//! Task implementations
pub mod control_loop;
pub mod drive;
pub mod ir_receive;
pub mod lights;
pub mod link_rx;
