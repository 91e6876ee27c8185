//! Explicit finite-difference update of a damped, reflecting membrane.

use ndarray::{Array2, ArrayViewMut2};
#[cfg(feature = "parallel")]
use ndarray::Axis;

use crate::error::{MembraneError, Result};
use crate::params::MembraneParams;

/// Displacement of every node at one instant, indexed `(y, x)`.
pub type Field = Array2<f32>;

/// Part of the grid a node belongs to. Corners take precedence over edges.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Region {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
    Interior,
}

impl Region {
    /// Classifies node `(y, x)` of an `n × n` grid.
    pub fn of(y: usize, x: usize, n: usize) -> Region {
        let last = n - 1;
        match (y, x) {
            (0, 0) => Region::TopLeft,
            (0, x) if x == last => Region::TopRight,
            (y, 0) if y == last => Region::BottomLeft,
            (y, x) if y == last && x == last => Region::BottomRight,
            (0, _) => Region::Top,
            (y, _) if y == last => Region::Bottom,
            (_, 0) => Region::Left,
            (_, x) if x == last => Region::Right,
            _ => Region::Interior,
        }
    }

    /// Node of the previous field that a boundary node at `(y, x)` reflects.
    ///
    /// The top corners read their row neighbour and the bottom corners read the node above them,
    /// so the bottom-left corner does not mirror the left edge. Kept as is, though it may be a
    /// slip in the case analysis rather than a deliberate reflection.
    pub fn source(self, y: usize, x: usize) -> Option<(usize, usize)> {
        match self {
            Region::TopLeft | Region::Left => Some((y, x + 1)),
            Region::TopRight | Region::Right => Some((y, x - 1)),
            Region::Top => Some((y + 1, x)),
            Region::Bottom | Region::BottomLeft | Region::BottomRight => Some((y - 1, x)),
            Region::Interior => None,
        }
    }
}

/// Time integration used by the driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Scheme {
    /// In-place row-major sweep, see [`step`].
    #[default]
    GaussSeidel,
    /// Out-of-place sweep, see [`step_jacobi`].
    Jacobi,
}

impl Scheme {
    pub fn step(self,
                current: &mut Field,
                prev: &mut Field,
                prevprev: &mut Field,
                params: &MembraneParams)
                -> Result<()> {
        match self {
            Scheme::GaussSeidel => step(current, prev, prevprev, params),
            #[cfg(feature = "parallel")]
            Scheme::Jacobi => step_jacobi_parallel(current, prev, prevprev, params),
            #[cfg(not(feature = "parallel"))]
            Scheme::Jacobi => step_jacobi(current, prev, prevprev, params),
        }
    }
}

/// Checks that the three fields share one square shape with interior nodes. Returns `n`.
pub(crate) fn check_history(current: &Field, prev: &Field, prevprev: &Field) -> Result<usize> {
    let (rows, cols) = current.dim();
    if rows != cols {
        return Err(MembraneError::NotSquare { rows, cols });
    }
    for (name, field) in [("prev", prev), ("prevprev", prevprev)] {
        if field.dim() != (rows, cols) {
            return Err(MembraneError::ShapeMismatch {
                name,
                expected: (rows, cols),
                found: field.dim(),
            });
        }
    }
    if rows < 3 {
        return Err(MembraneError::GridTooSmall { size: rows });
    }
    Ok(rows)
}

#[inline]
fn reflect(value: f32, params: &MembraneParams) -> f32 {
    (params.boundary_gain * f64::from(value)) as f32
}

/// Damped leapfrog update. `laplacian` arrives summed in single precision, the rest is
/// evaluated in double precision and rounded once.
#[inline]
fn damped(laplacian: f32, u1: f32, u2: f32, params: &MembraneParams) -> f32 {
    let next = (params.rho * f64::from(laplacian) + f64::from(2. * u1) -
                (1. - params.miu) * f64::from(u2)) / (1. + params.miu);
    next as f32
}

/// New value of node `(y, x)`. Interior nodes take their four neighbours from `neighbours`.
#[inline]
fn update_node(y: usize,
               x: usize,
               n: usize,
               neighbours: &Field,
               prev: &Field,
               prevprev: &Field,
               params: &MembraneParams)
               -> f32 {
    match Region::of(y, x, n).source(y, x) {
        Some(src) => reflect(prev[src], params),
        None => {
            let u1 = prev[(y, x)];
            let u2 = prevprev[(y, x)];
            let laplacian = neighbours[(y, x - 1)] + neighbours[(y, x + 1)] +
                            neighbours[(y - 1, x)] + neighbours[(y + 1, x)] -
                            4. * u1;
            damped(laplacian, u1, u2, params)
        }
    }
}

/// prevprev <- prev, prev <- current, by copy so the caller keeps its three buffers.
fn rotate_history(current: &Field, prev: &mut Field, prevprev: &mut Field) {
    prevprev.assign(prev);
    prev.assign(current);
}

/// Advances the membrane by one time step.
///
/// - `current`: on entry the field of the previous call, on return the field at step `t`
/// - `prev`: field at step `t - 1`, on return a copy of the new `current`
/// - `prevprev`: field at step `t - 2`, on return a copy of the old `prev`
///
/// Boundary nodes reflect a neighbour of `prev` scaled by the boundary gain. Interior nodes
/// follow the damped wave recurrence
/// `(ρ·Δu + 2·u₁ - (1 - μ)·u₂) / (1 + μ)`.
///
/// Nodes are visited row by row (`y` outer, `x` inner) and written in place, so the left and
/// upper neighbours in `Δu` already hold step `t` while the right and lower ones still hold
/// what `current` held on entry.
///
/// All three fields must be `n × n` with `n >= 3`; otherwise nothing is modified and an error
/// is returned.
pub fn step(current: &mut Field,
            prev: &mut Field,
            prevprev: &mut Field,
            params: &MembraneParams)
            -> Result<()> {
    let n = check_history(current, prev, prevprev)?;

    for y in 0..n {
        for x in 0..n {
            let value = update_node(y, x, n, current, prev, prevprev, params);
            current[(y, x)] = value;
        }
    }

    rotate_history(current, prev, prevprev);
    Ok(())
}

fn jacobi_rows(snapshot: &Field,
               prev: &Field,
               prevprev: &Field,
               mut out: ArrayViewMut2<f32>,
               row_start: usize,
               params: &MembraneParams) {
    let n = snapshot.nrows();
    for (i, mut row) in out.rows_mut().into_iter().enumerate() {
        let y = row_start + i;
        for x in 0..n {
            row[x] = update_node(y, x, n, snapshot, prev, prevprev, params);
        }
    }
}

/// Same as `step`, but every interior node reads its neighbours as they were on entry.
///
/// The result does not depend on the visiting order and differs numerically from `step`.
pub fn step_jacobi(current: &mut Field,
                   prev: &mut Field,
                   prevprev: &mut Field,
                   params: &MembraneParams)
                   -> Result<()> {
    check_history(current, prev, prevprev)?;

    let snapshot = current.clone();
    jacobi_rows(&snapshot, prev, prevprev, current.view_mut(), 0, params);

    rotate_history(current, prev, prevprev);
    Ok(())
}

/// Same as `step_jacobi`, splitting the rows between rayon tasks.
///
/// Bitwise equal to `step_jacobi`. There is no parallel version of `step`, its sweep carries a
/// dependency from every node to the next.
#[cfg(feature = "parallel")]
pub fn step_jacobi_parallel(current: &mut Field,
                            prev: &mut Field,
                            prevprev: &mut Field,
                            params: &MembraneParams)
                            -> Result<()> {
    fn inner(snapshot: &Field,
             prev: &Field,
             prevprev: &Field,
             out: ArrayViewMut2<f32>,
             rows: (usize, usize),
             params: &MembraneParams) {
        let elems_per_task = 64 * 1024;
        let (row_start, row_end) = rows;
        if row_end - row_start > 1 && out.len() > elems_per_task {
            let mid = (row_start + row_end) / 2;
            let (top, bottom) = out.split_at(Axis(0), mid - row_start);
            rayon::join(|| inner(snapshot, prev, prevprev, top, (row_start, mid), params),
                        || inner(snapshot, prev, prevprev, bottom, (mid, row_end), params));
        } else {
            jacobi_rows(snapshot, prev, prevprev, out, row_start, params);
        }
    }

    let n = check_history(current, prev, prevprev)?;

    let snapshot = current.clone();
    inner(&snapshot, prev, prevprev, current.view_mut(), (0, n), params);

    rotate_history(current, prev, prevprev);
    Ok(())
}
