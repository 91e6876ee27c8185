//! Driver owning the three time levels of the membrane.

use std::io::Write;

use tracing::{debug, info, trace};

use crate::error::{MembraneError, Result};
use crate::params::MembraneParams;
use crate::render::write_field;
use crate::stepper::{check_history, Field, Scheme};

pub struct Simulation {
    current: Field,
    prev: Field,
    prevprev: Field,
    params: MembraneParams,
    scheme: Scheme,
    steps: u64,
}

impl Simulation {
    /// Zeroed `size × size` membrane with a unit impulse at `(size/2 - 1, size/2 - 1)`.
    ///
    /// Only the current field is seeded; both history levels start at rest.
    pub fn new(size: usize, params: MembraneParams) -> Result<Self> {
        if size < 3 {
            return Err(MembraneError::GridTooSmall { size });
        }
        let mut current = Field::zeros((size, size));
        let centre = size / 2 - 1;
        current[(centre, centre)] = 1.;
        Self::from_fields(current, Field::zeros((size, size)), Field::zeros((size, size)), params)
    }

    pub fn from_fields(current: Field,
                       prev: Field,
                       prevprev: Field,
                       params: MembraneParams)
                       -> Result<Self> {
        params.validate()?;
        check_history(&current, &prev, &prevprev)?;
        Ok(Simulation {
            current,
            prev,
            prevprev,
            params,
            scheme: Scheme::default(),
            steps: 0,
        })
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn current(&self) -> &Field {
        &self.current
    }

    pub fn prev(&self) -> &Field {
        &self.prev
    }

    pub fn prevprev(&self) -> &Field {
        &self.prevprev
    }

    pub fn params(&self) -> &MembraneParams {
        &self.params
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Advances one time step.
    pub fn advance(&mut self) -> Result<()> {
        self.scheme.step(&mut self.current, &mut self.prev, &mut self.prevprev, &self.params)?;
        self.steps += 1;
        let peak = self.current.iter().fold(0f32, |acc, v| acc.max(v.abs()));
        debug!(step = self.steps, peak, "advanced membrane");
        Ok(())
    }

    /// Steps `iterations` times, writing the field after every step. Returns the number of
    /// snapshots written.
    pub fn run<W: Write>(&mut self, iterations: u64, out: &mut W) -> Result<u64> {
        info!(iterations,
              size = self.current.nrows(),
              scheme = ?self.scheme,
              "running membrane");
        for i in 0..iterations {
            self.advance()?;
            write_field(out, &self.current)?;
            trace!(snapshot = i + 1, "field written");
        }
        out.flush()?;
        Ok(iterations)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn seeds_reference_impulse() {
        let sim = Simulation::new(4, MembraneParams::default()).unwrap();
        let mut expected = Field::zeros((4, 4));
        expected[(1, 1)] = 1.;
        assert_eq!(sim.current(), &expected);
        assert_eq!(sim.prev(), &Field::zeros((4, 4)));
        assert_eq!(sim.prevprev(), &Field::zeros((4, 4)));
        assert_eq!(sim.steps(), 0);

        let sim = Simulation::new(7, MembraneParams::default()).unwrap();
        assert_eq!(sim.current()[(2, 2)], 1.);
        assert_eq!(sim.current().sum(), 1.);
    }

    #[test]
    fn rejects_invalid_setup() {
        assert!(matches!(Simulation::new(2, MembraneParams::default()),
                         Err(MembraneError::GridTooSmall { size: 2 })));
        assert!(matches!(Simulation::new(4, MembraneParams::default().with_miu(-1.)),
                         Err(MembraneError::InvalidParameter(_))));
        assert!(matches!(Simulation::from_fields(Field::zeros((4, 4)),
                                                 Field::zeros((4, 4)),
                                                 Field::zeros((3, 3)),
                                                 MembraneParams::default()),
                         Err(MembraneError::ShapeMismatch { name: "prevprev", .. })));
    }

    #[test]
    fn run_counts_steps_and_snapshots() {
        let mut sim = Simulation::new(4, MembraneParams::default()).unwrap();
        let mut out = Vec::new();
        assert_eq!(sim.run(0, &mut out).unwrap(), 0);
        assert!(out.is_empty());

        assert_eq!(sim.run(3, &mut out).unwrap(), 3);
        assert_eq!(sim.steps(), 3);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Size of grid: 16 nodes").count(), 3);
        assert_eq!(text.lines().count(), 3 * 5);
    }

    #[test]
    fn schemes_agree_on_history_rotation() {
        let mut prev = Field::zeros((5, 5));
        prev[(2, 2)] = 1.;
        for scheme in [Scheme::GaussSeidel, Scheme::Jacobi] {
            let mut sim = Simulation::from_fields(prev.clone(),
                                                  prev.clone(),
                                                  Field::zeros((5, 5)),
                                                  MembraneParams::default())
                .unwrap()
                .with_scheme(scheme);
            sim.advance().unwrap();
            assert_eq!(sim.prevprev(), &prev);
            assert_eq!(sim.prev(), sim.current());
        }
    }
}
