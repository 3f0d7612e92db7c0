use lc_kernel::{Kernel, KernelArgs, KernelReport};

use crate::backend::ExecutionBackend;
use crate::error::Result;

/// Runs kernels inline on the calling thread.
///
/// The reference backend: no device is required and a launch is an ordinary
/// function call, which makes it the default for development and tests.
#[derive(Debug, Clone)]
pub struct EmulatorBackend;

impl EmulatorBackend {
    pub fn new() -> Self {
        EmulatorBackend
    }
}

impl Default for EmulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionBackend for EmulatorBackend {
    fn name(&self) -> &str {
        "emulator"
    }

    fn device_name(&self) -> &str {
        "CPU emulation device"
    }

    fn launch(&self, kernel: &dyn Kernel, args: KernelArgs<'_>) -> Result<KernelReport> {
        Ok(kernel.execute(args))
    }
}
