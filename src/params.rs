use crate::error::{MembraneError, Result};

/// Grid dimension of the reference membrane.
pub const GRID_SIZE: usize = 4;
/// τ²c²/h², scales the discrete Laplacian.
pub const RHO: f64 = 0.5;
/// Damping coefficient.
pub const MIU: f64 = 0.0002;
/// Reflection coefficient applied on the boundary ring.
pub const G: f64 = 0.75;

/// Coefficients of the damped wave recurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MembraneParams {
    pub rho: f64,
    pub miu: f64,
    pub boundary_gain: f64,
}

impl Default for MembraneParams {
    fn default() -> Self {
        MembraneParams {
            rho: RHO,
            miu: MIU,
            boundary_gain: G,
        }
    }
}

impl MembraneParams {
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    pub fn with_miu(mut self, miu: f64) -> Self {
        self.miu = miu;
        self
    }

    pub fn with_boundary_gain(mut self, boundary_gain: f64) -> Self {
        self.boundary_gain = boundary_gain;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.rho.is_finite() {
            return Err(MembraneError::InvalidParameter(format!("rho must be finite (rho={})",
                                                               self.rho)));
        }
        if !self.boundary_gain.is_finite() {
            let msg = format!("boundary gain must be finite (g={})", self.boundary_gain);
            return Err(MembraneError::InvalidParameter(msg));
        }
        // keeps the (1 + miu) divisor away from zero
        if !(0.0..=1.0).contains(&self.miu) {
            return Err(MembraneError::InvalidParameter(format!("miu must lie in [0, 1] (miu={})",
                                                               self.miu)));
        }
        Ok(())
    }
}
