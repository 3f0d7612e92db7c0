use std::fmt::{self, Debug};

use log::debug;

use crate::coalesce::{delinearize, linearize, LoopNest};
use crate::error::{KernelError, Result};
use crate::matrix::{N, NUM_ELEMENTS};
use crate::view::{ReadView, WriteView};

/// Loop levels eligible for coalescing at each attachment point. The
/// reduction loop inside the multiply phase is not one of them.
pub const NEST_DEPTH: usize = 2;

/// The buffers a kernel may touch during one execution.
#[derive(Debug)]
pub struct KernelArgs<'a> {
    a: ReadView<'a>,
    b: ReadView<'a>,
    out: WriteView<'a>,
}

impl<'a> KernelArgs<'a> {
    /// Bundle the views for one launch, checking each holds N*N elements.
    ///
    /// # Errors
    /// Returns [`KernelError::SizeMismatch`] for the first view of the wrong
    /// length.
    pub fn new(a: ReadView<'a>, b: ReadView<'a>, out: WriteView<'a>) -> Result<Self> {
        for got in [a.len(), b.len(), out.len()] {
            if got != NUM_ELEMENTS {
                return Err(KernelError::SizeMismatch {
                    expected: NUM_ELEMENTS,
                    got,
                });
            }
        }
        Ok(KernelArgs { a, b, out })
    }

    /// Splits into the two input views and the output view.
    pub fn into_parts(self) -> (ReadView<'a>, ReadView<'a>, WriteView<'a>) {
        (self.a, self.b, self.out)
    }
}

/// Trait for kernels an execution backend can launch.
pub trait Kernel: Send + Sync + Debug {
    /// Returns the kernel's name, including its specialization.
    fn name(&self) -> String;

    /// Number of outer loop levels merged into one counter.
    fn coalesce_factor(&self) -> usize;

    /// Runs the kernel to completion over `args`.
    fn execute(&self, args: KernelArgs<'_>) -> KernelReport;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Load,
    Multiply,
    Store,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Load => write!(f, "load"),
            Phase::Multiply => write!(f, "multiply"),
            Phase::Store => write!(f, "store"),
        }
    }
}

/// Loop behaviour of one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseStats {
    pub phase: Phase,
    /// Times the loop body ran.
    pub iterations: usize,
    /// Loop-control decisions taken by the rows × cols nest.
    pub control_steps: usize,
}

/// What a kernel reports back once it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelReport {
    pub factor: usize,
    pub phases: [PhaseStats; 3],
}

impl KernelReport {
    pub fn control_steps(&self) -> usize {
        self.phases.iter().map(|p| p.control_steps).sum()
    }
}

/// Runs `body` for every (i, j) of the rows × cols nest, row-major, with the
/// outer `FACTOR` levels sharing one counter.
fn rows_by_cols<const FACTOR: usize>(
    phase: Phase,
    mut body: impl FnMut(usize, usize),
) -> PhaseStats {
    let mut iterations = 0;
    let mut control_steps = 0;
    if FACTOR >= 2 {
        let bounds = [N, N];
        for c in linearize(&bounds) {
            control_steps += 1;
            let [i, j] = delinearize(c, &bounds);
            body(i, j);
            iterations += 1;
        }
    } else {
        for i in 0..N {
            control_steps += 1;
            for j in 0..N {
                control_steps += 1;
                body(i, j);
                iterations += 1;
            }
        }
    }
    debug_assert_eq!(
        LoopNest::new([N, N]).control_steps(FACTOR),
        Ok(control_steps),
        "{} phase loop-control count disagrees with the nest",
        phase
    );
    PhaseStats {
        phase,
        iterations,
        control_steps,
    }
}

/// Single-task matrix multiply `out = a × b` over N×N row-major buffers,
/// specialized on the number of loop levels it coalesces.
///
/// Every phase runs the same rows × cols nest, so the result is identical for
/// every factor; only the loop-control structure differs.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MatrixMultiply<const FACTOR: usize>;

impl<const FACTOR: usize> MatrixMultiply<FACTOR> {
    const FACTOR_IN_RANGE: () = assert!(
        FACTOR >= 1 && FACTOR <= NEST_DEPTH,
        "coalescing factor must be between 1 and NEST_DEPTH"
    );

    pub const fn new() -> Self {
        let () = Self::FACTOR_IN_RANGE;
        MatrixMultiply
    }

    /// Runs the load, multiply and store phases.
    pub fn run(&self, a: ReadView<'_>, b: ReadView<'_>, out: &mut WriteView<'_>) -> KernelReport {
        let () = Self::FACTOR_IN_RANGE;

        let mut lhs = [[0.0f32; N]; N];
        let mut rhs = [[0.0f32; N]; N];
        let mut tmp = [[0.0f32; N]; N];

        let mut idx = 0;
        let load = rows_by_cols::<FACTOR>(Phase::Load, |i, j| {
            lhs[i][j] = a.get(idx);
            rhs[i][j] = b.get(idx);
            tmp[i][j] = 0.0;
            idx += 1;
        });

        // The reduction over k stays an ordinary loop; only i and j merge.
        let multiply = rows_by_cols::<FACTOR>(Phase::Multiply, |i, j| {
            let mut sum = 0.0f32;
            for k in 0..N {
                sum += lhs[i][k] * rhs[k][j];
            }
            tmp[i][j] = sum;
        });

        let mut idx = 0;
        let store = rows_by_cols::<FACTOR>(Phase::Store, |i, j| {
            out.set(idx, tmp[i][j]);
            idx += 1;
        });

        let report = KernelReport {
            factor: FACTOR,
            phases: [load, multiply, store],
        };
        for p in &report.phases {
            debug!(
                "{}: {} phase ran {} iterations with {} loop-control steps",
                self.name(),
                p.phase,
                p.iterations,
                p.control_steps
            );
        }
        report
    }
}

impl<const FACTOR: usize> Debug for MatrixMultiply<FACTOR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatrixMultiply<{}>", FACTOR)
    }
}

impl<const FACTOR: usize> Kernel for MatrixMultiply<FACTOR> {
    fn name(&self) -> String {
        format!("KernelCompute<{}>", FACTOR)
    }

    fn coalesce_factor(&self) -> usize {
        FACTOR
    }

    fn execute(&self, args: KernelArgs<'_>) -> KernelReport {
        let (a, b, mut out) = args.into_parts();
        self.run(a, b, &mut out)
    }
}
