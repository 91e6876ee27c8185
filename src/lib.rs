//! Finite difference method for a damped wave on a small square membrane.
//!
//! Three fields hold the displacement at steps `t`, `t - 1` and `t - 2`. Every call to
//! [`step`] recomputes the first from the other two and shifts the history by one level.
//! Boundary nodes reflect an inner neighbour of the previous field, interior nodes follow
//! the explicit second order recurrence with damping.

pub mod cli;
pub mod error;
pub mod params;
pub mod render;
pub mod simulation;
pub mod stepper;

pub use error::{MembraneError, Result};
pub use params::{MembraneParams, G, GRID_SIZE, MIU, RHO};
pub use render::write_field;
pub use simulation::Simulation;
#[cfg(feature = "parallel")]
pub use stepper::step_jacobi_parallel;
pub use stepper::{step, step_jacobi, Field, Region, Scheme};
