//! Morphological gradient (dilation minus erosion)
//!
//! Highlights edges and boundaries by computing the difference between
//! the dilation and erosion of the input. Both are taken in a single
//! window visit through [`local_extrema`].

use ndarray::{ArrayD, Zip};
use ndfocal_core::{
    Algorithm, Error, FloatElement, MaskEncoding, Neighborhood, NeighborhoodSpec, Numeric,
    Promote, Result,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::focal::{check_shape, local_map, LocalExtrema};

/// Parameters for morphological gradient
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradientParams {
    /// Structuring element shape
    pub neighborhood: NeighborhoodSpec,
}

/// Morphological gradient algorithm
#[derive(Debug, Clone, Default)]
pub struct Gradient;

impl Algorithm for Gradient {
    type Input = ArrayD<f64>;
    type Output = ArrayD<f64>;
    type Params = GradientParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "MorphologicalGradient"
    }

    fn description(&self) -> &'static str {
        "Morphological gradient (dilation minus erosion) for edge detection"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let element = params.neighborhood.resolve(input.ndim())?;
        gradient(&input, &element)
    }
}

/// Erosion and dilation of `src` in one pass, as `(lower, upper)`.
pub fn local_extrema<F, N>(src: &ArrayD<F>, neighborhood: &N) -> Result<(ArrayD<F>, ArrayD<F>)>
where
    F: FloatElement,
    N: Promote + ?Sized,
{
    let nb = neighborhood.promote::<F>(MaskEncoding::Flat)?;
    debug!(kind = %F::KIND, "local extrema");
    let pairs = local_map(src, &nb, &LocalExtrema)?;
    Ok((pairs.mapv(|(lower, _)| lower), pairs.mapv(|(_, upper)| upper)))
}

/// Compute the morphological gradient
///
/// Gradient = dilate - erode. Wherever the window holds a set offset the
/// result is non-negative.
pub fn gradient<F, N>(src: &ArrayD<F>, neighborhood: &N) -> Result<ArrayD<F>>
where
    F: FloatElement,
    N: Promote + ?Sized,
{
    let mut dest = ArrayD::zeros(src.raw_dim());
    gradient_into(&mut dest, src, neighborhood)?;
    Ok(dest)
}

/// Morphological gradient of `src` written into `dest`
pub fn gradient_into<S, F, N>(dest: &mut ArrayD<F>, src: &ArrayD<S>, neighborhood: &N) -> Result<()>
where
    S: Numeric,
    F: FloatElement + From<S>,
    N: Promote + ?Sized,
{
    check_shape(dest, src)?;
    let nb = neighborhood.promote::<F>(MaskEncoding::Flat)?;
    nb.check_rank(src.ndim())?;
    debug!(from = %S::KIND, to = %F::KIND, "gradient");

    let pairs = local_map(src, &nb, &LocalExtrema)?;
    Zip::from(dest)
        .and(&pairs)
        .for_each(|d, &(lower, upper)| *d = upper - lower);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, IxDyn};
    use ndfocal_core::BoxNeighborhood;

    fn make_grid(rows: usize, cols: usize, value: f64) -> ArrayD<f64> {
        ArrayD::from_elem(IxDyn(&[rows, cols]), value)
    }

    fn square() -> BoxNeighborhood {
        BoxNeighborhood::cube(2, 3).unwrap()
    }

    #[test]
    fn test_gradient_uniform_is_zero() {
        let grid = make_grid(7, 7, 5.0);
        let result = gradient(&grid, &square()).unwrap();
        for &val in result.iter() {
            assert!(
                val.abs() < 1e-10,
                "Gradient of uniform grid should be 0, got {}",
                val
            );
        }
    }

    #[test]
    fn test_gradient_detects_edge() {
        let mut grid = make_grid(9, 9, 5.0);
        // step: left half = 5, right half = 15
        for row in 0..9 {
            for col in 5..9 {
                grid[[row, col].as_slice()] = 15.0;
            }
        }

        let result = gradient(&grid, &square()).unwrap();
        let val = result[[4, 4].as_slice()];
        assert!(
            (val - 10.0).abs() < 1e-10,
            "Gradient at edge should be 10, got {}",
            val
        );
        let val_flat = result[[4, 2].as_slice()];
        assert!(
            val_flat.abs() < 1e-10,
            "Gradient in flat area should be 0, got {}",
            val_flat
        );
    }

    #[test]
    fn test_gradient_non_negative() {
        let mut grid = make_grid(9, 9, 0.0);
        for row in 0..9 {
            for col in 0..9 {
                grid[[row, col].as_slice()] = ((row * 7 + col * 3) % 20) as f64;
            }
        }

        let result = gradient(&grid, &square()).unwrap();
        for (idx, &val) in result.indexed_iter() {
            assert!(
                val >= -1e-10,
                "Gradient should be non-negative, got {} at {:?}",
                val,
                idx
            );
        }
    }

    #[test]
    fn test_local_extrema_matches_separate_passes() {
        let src = arr1(&[3.0f64, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0]).into_dyn();
        let nb = BoxNeighborhood::cube(1, 3).unwrap();
        let (lower, upper) = local_extrema(&src, &nb).unwrap();
        assert_eq!(lower, crate::morphology::erode(&src, &nb).unwrap());
        assert_eq!(upper, crate::morphology::dilate(&src, &nb).unwrap());
    }

    #[test]
    fn test_gradient_into_from_u8() {
        let src = arr1(&[0u8, 0, 255, 0]).into_dyn();
        let mut dest = ArrayD::<f64>::zeros(IxDyn(&[4]));
        gradient_into(&mut dest, &src, &BoxNeighborhood::cube(1, 3).unwrap()).unwrap();
        assert_eq!(dest.as_slice().unwrap(), &[0.0, 255.0, 255.0, 255.0]);
    }
}
