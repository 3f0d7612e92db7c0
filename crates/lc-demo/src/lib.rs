//! `lc-demo` - Runs the matrix-multiply kernel with and without loop
//! coalescing and checks both results against the closed form.

pub mod verify;

use std::time::Duration;

use lc_engine::{DeviceSelector, Queue, QueueConfig, Result};
use lc_kernel::{KernelReport, Matrix, MatrixMultiply};

pub use verify::{expected, verify, Mismatch, Verification};

/// Settings for one demonstration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DemoConfig {
    pub device: DeviceSelector,
    pub queue: QueueConfig,
}

/// Output of one kernel invocation.
#[derive(Debug, Clone)]
pub struct Run {
    pub factor: usize,
    pub result: Matrix,
    pub report: KernelReport,
    pub duration: Option<Duration>,
}

/// A = identity, B[i, j] = i*j + 1.
pub fn prepare_inputs() -> (Matrix, Matrix) {
    (Matrix::identity(), Matrix::from_fn(expected))
}

/// Multiplies `a × b` with the kernel specialized for `FACTOR` into a fresh
/// result buffer.
pub fn run_coalesce<const FACTOR: usize>(queue: &Queue, a: &Matrix, b: &Matrix) -> Result<Run> {
    let kernel = MatrixMultiply::<FACTOR>::new();
    let mut result = Matrix::zeros();
    let event = queue.submit(&kernel, a, b, &mut result)?;
    let duration = event.duration();
    let report = event.wait();
    Ok(Run {
        factor: FACTOR,
        result,
        report,
        duration,
    })
}

/// Runs factor 1 and factor 2 on `queue` and verifies both.
pub fn run_on(queue: &Queue) -> Result<(Vec<Run>, Verification)> {
    let (a, b) = prepare_inputs();
    let runs = vec![
        run_coalesce::<1>(queue, &a, &b)?,
        run_coalesce::<2>(queue, &a, &b)?,
    ];
    let verification = verify(&runs);
    Ok((runs, verification))
}

/// Opens the configured device and runs the whole scenario.
///
/// # Errors
/// Fails when the device is unavailable.
pub fn run(config: &DemoConfig) -> Result<(Vec<Run>, Verification)> {
    let queue = Queue::new(config.device, config.queue)?;
    run_on(&queue)
}
