use std::time::Instant;

use log::info;
use lc_kernel::{Kernel, KernelArgs, Matrix};

use crate::backend::ExecutionBackend;
use crate::error::Result;
use crate::event::Event;
use crate::selector::DeviceSelector;

/// Queue settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    /// Record kernel execution time on every [`Event`].
    pub profiling: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        QueueConfig { profiling: true }
    }
}

/// Submission point for kernels on one backend.
#[derive(Debug)]
pub struct Queue {
    backend: Box<dyn ExecutionBackend>,
    config: QueueConfig,
}

impl Queue {
    /// Open a queue on the device picked by `selector`.
    ///
    /// # Errors
    /// Fails with [`crate::EngineError::BackendUnavailable`] when the device
    /// cannot be opened.
    pub fn new(selector: DeviceSelector, config: QueueConfig) -> Result<Self> {
        let backend = selector.select()?;
        Ok(Self::with_backend(backend, config))
    }

    pub fn with_backend(backend: Box<dyn ExecutionBackend>, config: QueueConfig) -> Self {
        info!(
            "opened {} queue on {} (profiling {})",
            backend.name(),
            backend.device_name(),
            if config.profiling { "on" } else { "off" }
        );
        Queue { backend, config }
    }

    pub fn backend(&self) -> &dyn ExecutionBackend {
        self.backend.as_ref()
    }

    pub fn device_name(&self) -> &str {
        self.backend.device_name()
    }

    pub fn config(&self) -> QueueConfig {
        self.config
    }

    /// Submits `kernel` with `a` and `b` as read-only inputs and `out` as its
    /// write-only output.
    ///
    /// Whatever `out` held before is discarded. The borrows on the three
    /// matrices last until this call returns, so they cannot alias and
    /// nothing else can observe `out` half-written.
    pub fn submit(
        &self,
        kernel: &dyn Kernel,
        a: &Matrix,
        b: &Matrix,
        out: &mut Matrix,
    ) -> Result<Event> {
        let mut view = out.write_view();
        view.fill(f32::NAN);
        let args = KernelArgs::new(a.read_view(), b.read_view(), view)?;

        let name = kernel.name();
        info!("submitting {} to {}", name, self.backend.name());
        let start = Instant::now();
        let report = self.backend.launch(kernel, args)?;
        let duration = self.config.profiling.then(|| start.elapsed());
        info!(
            "{} finished with {} loop-control steps",
            name,
            report.control_steps()
        );

        Ok(Event::new(name, report, duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_kernel::{MatrixMultiply, NUM_ELEMENTS};

    fn pattern() -> Matrix {
        Matrix::from_fn(|i, j| (i * j + 1) as f32)
    }

    #[test]
    fn test_submit_on_each_backend() {
        for selector in [DeviceSelector::Emulator, DeviceSelector::Simulator] {
            let queue = Queue::new(selector, QueueConfig::default()).unwrap();
            let a = Matrix::identity();
            let b = pattern();
            let mut out = Matrix::zeros();
            let event = queue
                .submit(&MatrixMultiply::<2>::new(), &a, &b, &mut out)
                .unwrap();

            assert_eq!(event.kernel_name(), "KernelCompute<2>");
            assert!(event.duration().is_some());
            let report = event.wait();
            assert_eq!(report.factor, 2);
            assert_eq!(out, b, "backend {}", selector);
        }
    }

    #[test]
    fn test_stale_output_is_discarded() {
        let queue = Queue::new(DeviceSelector::Emulator, QueueConfig::default()).unwrap();
        let a = Matrix::identity();
        let b = pattern();
        let mut out = Matrix::from_vec(vec![99.0; NUM_ELEMENTS]).unwrap();
        let _ = queue
            .submit(&MatrixMultiply::<1>::new(), &a, &b, &mut out)
            .unwrap()
            .wait();

        assert_eq!(out, b);
        assert_eq!(a, Matrix::identity());
        assert_eq!(b, pattern());
    }

    #[test]
    fn test_output_complete_before_wait() {
        let queue = Queue::new(DeviceSelector::Simulator, QueueConfig::default()).unwrap();
        let a = Matrix::identity();
        let b = pattern();
        let mut out = Matrix::zeros();
        let event = queue
            .submit(&MatrixMultiply::<2>::new(), &a, &b, &mut out)
            .unwrap();

        assert_eq!(out, b);
        assert_eq!(event.wait().factor, 2);
    }

    #[test]
    fn test_profiling_off() {
        let queue = Queue::new(DeviceSelector::Emulator, QueueConfig { profiling: false }).unwrap();
        assert!(!queue.config().profiling);
        let a = Matrix::identity();
        let mut out = Matrix::zeros();
        let event = queue
            .submit(&MatrixMultiply::<1>::new(), &a, &a, &mut out)
            .unwrap();
        assert!(event.duration().is_none());
        assert_eq!(out, Matrix::identity());
    }

    #[test]
    fn test_hardware_queue_unavailable() {
        assert!(Queue::new(DeviceSelector::Hardware, QueueConfig::default()).is_err());
    }

    #[test]
    fn test_device_name() {
        let queue = Queue::with_backend(
            Box::new(crate::SimulatorBackend::new()),
            QueueConfig::default(),
        );
        assert_eq!(queue.backend().name(), "simulator");
        assert!(queue.device_name().contains("simulation"));
    }
}
