//! Morphological closing (dilation followed by erosion)
//!
//! Fills small dark gaps and holes while preserving the overall
//! shape of larger dark regions.

use ndarray::ArrayD;
use ndfocal_core::{
    Algorithm, Error, FloatElement, MaskEncoding, Neighborhood, NeighborhoodSpec, Numeric,
    Promote, Result,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::focal::{check_shape, local_filter, local_map, Dilation, Erosion};

/// Parameters for morphological closing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClosingParams {
    /// Structuring element shape
    pub neighborhood: NeighborhoodSpec,
}

/// Closing algorithm
#[derive(Debug, Clone, Default)]
pub struct Closing;

impl Algorithm for Closing {
    type Input = ArrayD<f64>;
    type Output = ArrayD<f64>;
    type Params = ClosingParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Closing"
    }

    fn description(&self) -> &'static str {
        "Morphological closing (dilation then erosion) to fill small dark gaps"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let element = params.neighborhood.resolve(input.ndim())?;
        closing(&input, &element)
    }
}

/// Perform morphological closing
///
/// Closing = dilate by the structuring element, then erode by its mirror.
/// Fills dark features the element does not fit into. The result is never
/// below `src` and closing it again changes nothing, for any element.
pub fn closing<F, N>(src: &ArrayD<F>, neighborhood: &N) -> Result<ArrayD<F>>
where
    F: FloatElement,
    N: Promote + ?Sized,
{
    let mut dest = ArrayD::zeros(src.raw_dim());
    closing_into(&mut dest, src, neighborhood)?;
    Ok(dest)
}

/// Close `src` into `dest` with a single intermediate array
pub fn closing_into<S, F, N>(dest: &mut ArrayD<F>, src: &ArrayD<S>, neighborhood: &N) -> Result<()>
where
    S: Numeric,
    F: FloatElement + From<S>,
    N: Promote + ?Sized,
{
    check_shape(dest, src)?;
    let nb = neighborhood.promote::<F>(MaskEncoding::Flat)?;
    nb.check_rank(src.ndim())?;
    debug!(from = %S::KIND, to = %F::KIND, "closing");

    let dilated = local_map(src, &nb, &Dilation)?;
    local_filter(dest, &dilated, &nb.reflected(), &Erosion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;
    use ndfocal_core::{BoxNeighborhood, Kernel};

    fn make_grid(rows: usize, cols: usize, value: f64) -> ArrayD<f64> {
        ArrayD::from_elem(IxDyn(&[rows, cols]), value)
    }

    fn square() -> BoxNeighborhood {
        BoxNeighborhood::cube(2, 3).unwrap()
    }

    #[test]
    fn test_closing_uniform() {
        let grid = make_grid(11, 11, 5.0);
        let result = closing(&grid, &square()).unwrap();
        let val = result[[5, 5].as_slice()];
        assert!(
            (val - 5.0).abs() < 1e-10,
            "Uniform closing should preserve value, got {}",
            val
        );
    }

    #[test]
    fn test_closing_fills_dark_spot() {
        let mut grid = make_grid(11, 11, 50.0);
        grid[[5, 5].as_slice()] = 0.0;

        let result = closing(&grid, &square()).unwrap();
        let val = result[[5, 5].as_slice()];
        assert!(
            (val - 50.0).abs() < 1e-10,
            "Closing should fill single dark cell, got {}",
            val
        );
    }

    #[test]
    fn test_closing_preserves_large_dark_region() {
        let mut grid = make_grid(11, 11, 50.0);
        for r in 3..8 {
            for c in 3..8 {
                grid[[r, c].as_slice()] = 0.0;
            }
        }

        let result = closing(&grid, &square()).unwrap();
        let val = result[[5, 5].as_slice()];
        assert!(
            val.abs() < 1e-10,
            "Closing should preserve large dark region center, got {}",
            val
        );
    }

    #[test]
    fn test_closing_one_sided_element() {
        let mut grid = make_grid(6, 6, 9.0);
        grid[[1, 4].as_slice()] = 0.0;
        grid[[1, 5].as_slice()] = 0.0;
        // element covers offsets (0..=0, -1..=0): a horizontal pair
        let pair = BoxNeighborhood::from_corners(&[0, -1], &[0, 0]).unwrap();

        let once = closing(&grid, &pair).unwrap();
        assert!(once[[1, 4].as_slice()].abs() < 1e-10, "pit as wide as the element stays");
        assert!(once[[1, 5].as_slice()].abs() < 1e-10, "pit as wide as the element stays");
        for (c, a) in once.iter().zip(grid.iter()) {
            assert!(c >= a, "closing must not fall below the source");
        }
        assert_eq!(closing(&once, &pair).unwrap(), once);
    }

    #[test]
    fn test_closing_extensive_with_ball() {
        let mut grid = make_grid(9, 9, 0.0);
        for row in 0..9 {
            for col in 0..9 {
                grid[[row, col].as_slice()] = ((row * 5 + col * 7) % 13) as f64;
            }
        }
        let disk = Kernel::ball(2, 1.5).unwrap();
        let result = closing(&grid, &disk).unwrap();
        for (c, a) in result.iter().zip(grid.iter()) {
            assert!(c >= a, "closing must not fall below the source");
        }
    }
}
