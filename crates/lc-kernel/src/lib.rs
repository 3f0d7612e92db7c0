//! `lc-kernel` - Matrix-multiply kernel demonstrating loop coalescing.
//!
//! This crate provides:
//! - `linearize` / `delinearize`, the index mapping behind loop coalescing
//! - A `LoopNest` iterator that merges the outer levels of a nest
//! - Read-only and write-only buffer views
//! - A fixed-size `Matrix` type
//! - The `MatrixMultiply<FACTOR>` kernel and the `Kernel` trait backends launch

pub mod coalesce;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod view;

// Re-export primary types at the crate root for convenience.
pub use coalesce::{delinearize, linearize, Coalesced, LoopNest};
pub use error::{KernelError, Result};
pub use kernel::{Kernel, KernelArgs, KernelReport, MatrixMultiply, Phase, PhaseStats, NEST_DEPTH};
pub use matrix::{Matrix, N, NUM_ELEMENTS};
pub use view::{ReadView, WriteView};
