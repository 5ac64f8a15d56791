//! Morphological erosion (minimum filter)
//!
//! Replaces each cell with the minimum of `v - w` over its neighborhood.
//! With a flat structuring element this is the plain minimum over the set
//! offsets. Shrinks bright regions and enlarges dark regions.

use ndarray::ArrayD;
use ndfocal_core::{
    Algorithm, Error, FloatElement, MaskEncoding, Neighborhood, NeighborhoodSpec, Numeric,
    Promote, Result,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::focal::{check_shape, local_filter, local_map, Erosion};

/// Parameters for morphological erosion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErodeParams {
    /// Structuring element shape
    pub neighborhood: NeighborhoodSpec,
}

/// Erosion algorithm
#[derive(Debug, Clone, Default)]
pub struct Erode;

impl Algorithm for Erode {
    type Input = ArrayD<f64>;
    type Output = ArrayD<f64>;
    type Params = ErodeParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Erode"
    }

    fn description(&self) -> &'static str {
        "Morphological erosion (minimum filter over structuring element)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let element = params.neighborhood.resolve(input.ndim())?;
        erode(&input, &element)
    }
}

/// Perform morphological erosion
///
/// Each output cell is the minimum within the structuring element placed
/// on it. Windows are clipped to the array, so edge cells take the minimum
/// over the part of the neighborhood that lies inside.
///
/// # Arguments
/// * `src` - Input array
/// * `neighborhood` - Box, flat mask or grey-level structuring function
pub fn erode<F, N>(src: &ArrayD<F>, neighborhood: &N) -> Result<ArrayD<F>>
where
    F: FloatElement,
    N: Promote + ?Sized,
{
    let nb = neighborhood.promote::<F>(MaskEncoding::Flat)?;
    debug!(kind = %F::KIND, "erode");
    local_map(src, &nb, &Erosion)
}

/// Erode `src` into `dest`, working in the element kind of `dest`
pub fn erode_into<S, F, N>(dest: &mut ArrayD<F>, src: &ArrayD<S>, neighborhood: &N) -> Result<()>
where
    S: Numeric,
    F: FloatElement + From<S>,
    N: Promote + ?Sized,
{
    check_shape(dest, src)?;
    let nb = neighborhood.promote::<F>(MaskEncoding::Flat)?;
    nb.check_rank(src.ndim())?;
    debug!(from = %S::KIND, to = %F::KIND, "erode");
    local_filter(dest, src, &nb, &Erosion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, IxDyn};
    use ndfocal_core::{BoxNeighborhood, Kernel};

    fn make_grid(rows: usize, cols: usize, value: f64) -> ArrayD<f64> {
        ArrayD::from_elem(IxDyn(&[rows, cols]), value)
    }

    fn square() -> BoxNeighborhood {
        BoxNeighborhood::cube(2, 3).unwrap()
    }

    #[test]
    fn test_erode_uniform() {
        let grid = make_grid(7, 7, 5.0);
        let result = erode(&grid, &square()).unwrap();
        for &val in result.iter() {
            assert!(
                (val - 5.0).abs() < 1e-10,
                "Uniform erosion should preserve value, got {}",
                val
            );
        }
    }

    #[test]
    fn test_erode_picks_minimum() {
        let mut grid = make_grid(7, 7, 10.0);
        grid[[3, 4].as_slice()] = 2.0;

        let result = erode(&grid, &square()).unwrap();
        // (3,3) sees (3,4) = 2.0
        let val = result[[3, 3].as_slice()];
        assert!(
            (val - 2.0).abs() < 1e-10,
            "Erosion should pick minimum neighbor, got {}",
            val
        );
        assert!((result[[3, 1].as_slice()] - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_erode_edges_shrink() {
        let src = arr1(&[1.0f64, 2.0, 3.0, 4.0, 5.0]).into_dyn();
        let result = erode(&src, &BoxNeighborhood::cube(1, 3).unwrap()).unwrap();
        assert_eq!(result.as_slice().unwrap(), &[1.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_erode_single_cell() {
        let grid = make_grid(1, 1, 5.0);
        let result = erode(&grid, &square()).unwrap();
        assert!((result[[0, 0].as_slice()] - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_erode_cross_element() {
        let mut grid = make_grid(7, 7, 10.0);
        grid[[2, 2].as_slice()] = 1.0;

        let cross = Kernel::centered(
            arr2(&[[false, true, false], [true, true, true], [false, true, false]]).into_dyn(),
        );
        let result = erode(&grid, &cross).unwrap();
        // the cross has no diagonals, so (3,3) does not see (2,2)
        let val = result[[3, 3].as_slice()];
        assert!(
            (val - 10.0).abs() < 1e-10,
            "Cross should not include diagonal, got {}",
            val
        );
        assert!((result[[2, 3].as_slice()] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_erode_flat_mask() {
        let src = arr1(&[5.0f64, 1.0, 5.0, 1.0, 5.0]).into_dyn();
        let mask = Kernel::centered(arr1(&[true, false, true]).into_dyn());
        let result = erode(&src, &mask).unwrap();
        // the centre is masked out, so each cell only sees its neighbours
        assert_eq!(result.as_slice().unwrap(), &[1.0, 5.0, 1.0, 5.0, 1.0]);
    }

    #[test]
    fn test_erode_structuring_function() {
        let src = arr1(&[4.0f64, 4.0, 4.0]).into_dyn();
        let k = Kernel::centered(arr1(&[1.0f64, 0.0, 1.0]).into_dyn());
        let result = erode(&src, &k).unwrap();
        assert_eq!(result.as_slice().unwrap(), &[3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_erode_into_from_u8() {
        let src = arr1(&[9u8, 3, 7, 8]).into_dyn();
        let mut dest = ArrayD::<f64>::zeros(IxDyn(&[4]));
        erode_into(&mut dest, &src, &BoxNeighborhood::cube(1, 3).unwrap()).unwrap();
        assert_eq!(dest.as_slice().unwrap(), &[3.0, 3.0, 3.0, 7.0]);
    }

    #[test]
    fn test_erode_rank_mismatch() {
        let src = arr1(&[1.0f64, 2.0]).into_dyn();
        let err = erode(&src, &square()).unwrap_err();
        assert!(matches!(err, Error::RankMismatch { .. }));
    }

    #[test]
    fn test_erode_default_params() {
        let mut grid = make_grid(5, 5, 8.0);
        grid[[0, 0].as_slice()] = 1.0;
        let result = Erode.execute_default(grid).unwrap();
        assert!((result[[1, 1].as_slice()] - 1.0).abs() < 1e-10);
        assert!((result[[2, 2].as_slice()] - 8.0).abs() < 1e-10);
    }
}
