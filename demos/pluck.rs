//! Plucks a 6 × 6 membrane one node in from the corner and prints the first few steps.
//!
//! Unlike the binary, the impulse is also seeded into the previous field, so it survives the
//! first step and travels.
use std::io;

use membrane_fdm::{Field, MembraneParams, Simulation};

fn main() -> membrane_fdm::Result<()> {
    let size = 6;
    let mut seed = Field::zeros((size, size));
    seed[(1, 1)] = 1.;

    let mut sim = Simulation::from_fields(seed.clone(),
                                          seed,
                                          Field::zeros((size, size)),
                                          MembraneParams::default())?;
    let stdout = io::stdout();
    sim.run(5, &mut stdout.lock())?;
    Ok(())
}
