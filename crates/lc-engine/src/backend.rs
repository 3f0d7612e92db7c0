use std::fmt::Debug;

use lc_kernel::{Kernel, KernelArgs, KernelReport};

use crate::error::Result;

/// Trait for backends that can run a kernel (emulator, simulator, hardware).
///
/// A backend receives the kernel together with already-validated views and
/// runs it as a single task. When `launch` returns, every write the kernel
/// made to the output view has landed.
pub trait ExecutionBackend: Send + Sync + Debug {
    /// Returns the name of this backend (e.g., "emulator", "simulator").
    fn name(&self) -> &str;

    /// Human-readable name of the device kernels run on.
    fn device_name(&self) -> &str;

    /// Runs `kernel` over `args` to completion.
    fn launch(&self, kernel: &dyn Kernel, args: KernelArgs<'_>) -> Result<KernelReport>;
}
