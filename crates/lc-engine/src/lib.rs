//! `lc-engine` - Execution backends for `lc-kernel` kernels.
//!
//! This crate provides:
//! - An `ExecutionBackend` trait for pluggable devices
//! - `EmulatorBackend` (inline) and `SimulatorBackend` (worker thread)
//! - `DeviceSelector`, chosen at build time by cargo features
//! - A `Queue` that submits kernels and hands back an `Event`

pub mod backend;
pub mod emulator;
pub mod error;
pub mod event;
pub mod queue;
pub mod selector;
pub mod simulator;

// Re-export primary types at the crate root for convenience.
pub use backend::ExecutionBackend;
pub use emulator::EmulatorBackend;
pub use error::{EngineError, Result};
pub use event::Event;
pub use queue::{Queue, QueueConfig};
pub use selector::DeviceSelector;
pub use simulator::SimulatorBackend;
