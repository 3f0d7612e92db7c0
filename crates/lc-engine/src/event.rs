use std::time::Duration;

use lc_kernel::KernelReport;

/// Completion signal for one submitted kernel.
#[derive(Debug, Clone)]
#[must_use = "wait on the event before reading the output buffer"]
pub struct Event {
    kernel: String,
    report: KernelReport,
    duration: Option<Duration>,
}

impl Event {
    pub(crate) fn new(kernel: String, report: KernelReport, duration: Option<Duration>) -> Self {
        Event {
            kernel,
            report,
            duration,
        }
    }

    pub fn kernel_name(&self) -> &str {
        &self.kernel
    }

    /// Kernel execution time, when the queue was created with profiling on.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Returns the kernel's report.
    ///
    /// A queue hands out the event only after the launch has completed, so
    /// this never blocks and the output buffer is already fully written.
    pub fn wait(self) -> KernelReport {
        self.report
    }
}
