use std::io::{self, BufWriter};
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use membrane_fdm::cli::{interpret, usage, Invocation};
use membrane_fdm::{MembraneParams, Simulation, GRID_SIZE};

fn main() -> ExitCode {
    // stdout carries the fields, logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let iterations = match interpret(std::env::args_os()) {
        Invocation::Run(iterations) => iterations,
        Invocation::Info(info) => {
            let _ = info.print();
            return ExitCode::SUCCESS;
        }
        Invocation::Usage => {
            let program = std::env::args_os()
                .next()
                .map_or_else(|| "membrane_fdm".to_owned(),
                             |p| p.to_string_lossy().into_owned());
            print!("{}", usage(&program));
            return ExitCode::from(1);
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let result = Simulation::new(GRID_SIZE, MembraneParams::default())
        .and_then(|mut sim| sim.run(iterations, &mut out));
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "simulation failed");
            ExitCode::FAILURE
        }
    }
}
