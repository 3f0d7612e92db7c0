use std::fmt;
use std::str::FromStr;

use log::error;

use crate::backend::ExecutionBackend;
use crate::emulator::EmulatorBackend;
use crate::error::{EngineError, Result};
use crate::simulator::SimulatorBackend;

const HARDWARE_GUIDANCE: &str = "If you are targeting an accelerator board, make sure it is \
installed and correctly configured, then check it with the vendor's system check tool.\n\
To run without a board, select the emulator (`--device emulator`) or build without the \
`hardware` feature.";

/// Chooses which backend kernels are submitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceSelector {
    Emulator,
    Simulator,
    Hardware,
}

impl DeviceSelector {
    /// The selector fixed at build time by the `hardware` and `simulator`
    /// features. Without either, kernels run on the emulator.
    pub const fn compiled() -> Self {
        if cfg!(feature = "hardware") {
            DeviceSelector::Hardware
        } else if cfg!(feature = "simulator") {
            DeviceSelector::Simulator
        } else {
            DeviceSelector::Emulator
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeviceSelector::Emulator => "emulator",
            DeviceSelector::Simulator => "simulator",
            DeviceSelector::Hardware => "hardware",
        }
    }

    /// Opens the selected backend.
    ///
    /// # Errors
    /// Returns [`EngineError::BackendUnavailable`] when no device of the
    /// selected kind can be opened. This is not retried.
    pub fn select(self) -> Result<Box<dyn ExecutionBackend>> {
        match self {
            DeviceSelector::Emulator => Ok(Box::new(EmulatorBackend::new())),
            DeviceSelector::Simulator => Ok(Box::new(SimulatorBackend::new())),
            // No accelerator board driver is linked into this build.
            DeviceSelector::Hardware => {
                error!("no {} device found", self);
                Err(EngineError::BackendUnavailable {
                    device: self.name().to_string(),
                    guidance: HARDWARE_GUIDANCE.to_string(),
                })
            }
        }
    }
}

impl Default for DeviceSelector {
    fn default() -> Self {
        Self::compiled()
    }
}

impl fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DeviceSelector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "emulator" => Ok(DeviceSelector::Emulator),
            "simulator" => Ok(DeviceSelector::Simulator),
            "hardware" => Ok(DeviceSelector::Hardware),
            other => Err(format!("unknown device '{}'", other)),
        }
    }
}
