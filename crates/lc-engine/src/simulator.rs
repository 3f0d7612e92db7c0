use std::any::Any;
use std::thread;

use log::debug;
use lc_kernel::{Kernel, KernelArgs, KernelReport};

use crate::backend::ExecutionBackend;
use crate::error::{EngineError, Result};

/// Runs each kernel as a single task on its own worker thread.
///
/// The submitting thread blocks until the task finishes, so a launch is
/// synchronous from the caller's side. A task that panics is reported as
/// [`EngineError::TaskFailed`] instead of tearing down the caller.
#[derive(Debug, Clone)]
pub struct SimulatorBackend;

impl SimulatorBackend {
    pub fn new() -> Self {
        SimulatorBackend
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "kernel panicked".to_string()
    }
}

impl ExecutionBackend for SimulatorBackend {
    fn name(&self) -> &str {
        "simulator"
    }

    fn device_name(&self) -> &str {
        "CPU simulation device (single-task worker)"
    }

    fn launch(&self, kernel: &dyn Kernel, args: KernelArgs<'_>) -> Result<KernelReport> {
        let name = kernel.name();
        thread::scope(|s| {
            let task = thread::Builder::new()
                .name(name.clone())
                .spawn_scoped(s, move || kernel.execute(args))
                .map_err(|e| EngineError::TaskFailed(format!("{}: {}", name, e)))?;
            debug!("{}: task started on worker thread", name);
            task.join()
                .map_err(|payload| EngineError::TaskFailed(format!("{}: {}", name, panic_message(&*payload))))
        })
    }
}
