//! Error types for the membrane stepper and its driver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MembraneError {
    #[error("{name} has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        name: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("field is not square: {rows} rows, {cols} columns")]
    NotSquare { rows: usize, cols: usize },

    #[error("grid of size {size} has no interior nodes, need at least 3")]
    GridTooSmall { size: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MembraneError>;
