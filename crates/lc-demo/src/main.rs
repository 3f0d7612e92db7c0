use std::process;

use clap::Parser;
use log::error;

use lc_demo::{run_on, DemoConfig};
use lc_engine::{DeviceSelector, Queue, QueueConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "loop-coalesce")]
#[command(about = "Multiply 4x4 matrices with and without loop coalescing and check the results")]
#[command(version)]
struct Args {
    /// Device to run on: emulator, simulator or hardware (defaults to the
    /// one chosen at build time)
    #[arg(short, long, value_parser = clap::value_parser!(DeviceSelector))]
    device: Option<DeviceSelector>,

    /// Do not time kernel execution
    #[arg(long)]
    no_profiling: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all logging
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn config(&self) -> DemoConfig {
        DemoConfig {
            device: self.device.unwrap_or_default(),
            queue: QueueConfig {
                profiling: !self.no_profiling,
            },
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = stderrlog::new()
        .module(module_path!())
        .module("lc_demo")
        .module("lc_engine")
        .module("lc_kernel")
        .quiet(args.quiet)
        .verbosity(args.verbose as usize + 1)
        .init()
    {
        eprintln!("failed to initialize logging: {}", e);
    }

    let config = args.config();
    let queue = match Queue::new(config.device, config.queue) {
        Ok(q) => q,
        Err(e) => {
            error!("cannot open {} device", config.device);
            eprintln!("Caught error while opening the device:\n{}", e);
            process::exit(-1);
        }
    };
    println!("Running on device: {}", queue.device_name());

    let (runs, verification) = match run_on(&queue) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Caught error while running the kernels:\n{}", e);
            process::exit(-1);
        }
    };

    for run in &runs {
        if let Some(d) = run.duration {
            println!(
                "Coalesce factor {}: kernel time {:.3} ms, {} loop-control steps",
                run.factor,
                d.as_secs_f64() * 1e3,
                run.report.control_steps()
            );
        }
    }

    if verification.passed() {
        println!("PASSED: The results are correct");
    } else {
        println!("FAILED: The results are incorrect");
        for m in &verification.mismatches {
            println!("  {}", m);
        }
        if !verification.runs_agree {
            println!("  coalesced and uncoalesced results differ");
        }
        process::exit(-1);
    }
}
