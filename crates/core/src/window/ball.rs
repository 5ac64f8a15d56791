//! Discrete N-dimensional balls for isotropic flat structuring elements

use ndarray::{ArrayD, IxDyn};

use super::Kernel;
use crate::error::{Error, Result};

/// Upper bound on the number of cells of a generated ball mask
pub const MAX_BALL_CELLS: usize = 1 << 28;

/// Largest integer strictly less than `x`
pub fn strict_floor(x: f64) -> i64 {
    let f = x.floor();
    if f == x { f as i64 - 1 } else { f as i64 }
}

/// Boolean mask of the discrete ball of radius `radius` in `ndim` dimensions.
///
/// With `b = radius + 0.5`, the mask has extent `2 * strict_floor(b) + 1` on
/// every axis and a cell `p` (relative to the centre) is set iff
/// `sum(p_i^2) <= strict_floor(b^2)`. The centre is always set.
///
/// Masks of more than [`MAX_BALL_CELLS`] cells are rejected with
/// `InvalidParameter`.
pub fn ball(ndim: usize, radius: f64) -> Result<ArrayD<bool>> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(Error::InvalidParameter {
            name: "radius",
            value: radius.to_string(),
            reason: "ball radius must be finite and non-negative".to_string(),
        });
    }

    let b = radius + 0.5;
    let too_large = |extent: String| Error::InvalidParameter {
        name: "radius",
        value: radius.to_string(),
        reason: format!(
            "ball of extent {} in {} dimensions exceeds {} cells",
            extent, ndim, MAX_BALL_CELLS
        ),
    };

    // saturated for huge radii
    let half = strict_floor(b);
    let extent = half
        .checked_mul(2)
        .and_then(|e| e.checked_add(1))
        .and_then(|e| usize::try_from(e).ok())
        .filter(|&e| e <= MAX_BALL_CELLS)
        .ok_or_else(|| too_large(format!("2 * {} + 1", half)))?;
    let len = u32::try_from(ndim)
        .ok()
        .and_then(|n| extent.checked_pow(n))
        .filter(|&len| len <= MAX_BALL_CELLS)
        .ok_or_else(|| too_large(extent.to_string()))?;
    let half = half as isize;
    let qmax = strict_floor(b * b) as isize;

    let squares: Vec<isize> = (-half..=half).map(|x| x * x).collect();
    let mut cells = Vec::with_capacity(len);
    fill_ball(&squares, ndim, 0, qmax, &mut cells);

    ArrayD::from_shape_vec(IxDyn(&vec![extent; ndim]), cells)
        .map_err(|e| Error::Other(e.to_string()))
}

/// Append the cells of the remaining `depth` axes in row-major order.
///
/// `partial` is the squared distance already contributed by the outer axes.
fn fill_ball(squares: &[isize], depth: usize, partial: isize, qmax: isize, out: &mut Vec<bool>) {
    if depth == 0 {
        out.push(partial <= qmax);
        return;
    }
    for &sq in squares {
        let q = partial + sq;
        if depth == 1 {
            out.push(q <= qmax);
        } else {
            fill_ball(squares, depth - 1, q, qmax, out);
        }
    }
}

impl Kernel<bool> {
    /// Flat kernel shaped as the discrete ball of radius `radius`
    pub fn ball(ndim: usize, radius: f64) -> Result<Self> {
        Ok(Kernel::centered(ball(ndim, radius)?))
    }
}
