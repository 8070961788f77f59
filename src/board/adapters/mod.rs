//! Adapter implementations of the task gateway port.

pub mod memory;
pub mod postgres;
