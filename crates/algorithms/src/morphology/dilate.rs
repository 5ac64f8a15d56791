//! Morphological dilation (maximum filter)
//!
//! Replaces each cell with the maximum of `v + w` over its neighborhood.
//! Expands bright regions and shrinks dark regions.

use ndarray::ArrayD;
use ndfocal_core::{
    Algorithm, Error, FloatElement, MaskEncoding, Neighborhood, NeighborhoodSpec, Numeric,
    Promote, Result,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::focal::{check_shape, local_filter, local_map, Dilation};

/// Parameters for morphological dilation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DilateParams {
    /// Structuring element shape
    pub neighborhood: NeighborhoodSpec,
}

/// Dilation algorithm
#[derive(Debug, Clone, Default)]
pub struct Dilate;

impl Algorithm for Dilate {
    type Input = ArrayD<f64>;
    type Output = ArrayD<f64>;
    type Params = DilateParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Dilate"
    }

    fn description(&self) -> &'static str {
        "Morphological dilation (maximum filter over structuring element)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let element = params.neighborhood.resolve(input.ndim())?;
        dilate(&input, &element)
    }
}

/// Perform morphological dilation
///
/// Each output cell is the maximum within the structuring element placed
/// on it, clipped to the array.
pub fn dilate<F, N>(src: &ArrayD<F>, neighborhood: &N) -> Result<ArrayD<F>>
where
    F: FloatElement,
    N: Promote + ?Sized,
{
    let nb = neighborhood.promote::<F>(MaskEncoding::Flat)?;
    debug!(kind = %F::KIND, "dilate");
    local_map(src, &nb, &Dilation)
}

/// Dilate `src` into `dest`, working in the element kind of `dest`
pub fn dilate_into<S, F, N>(dest: &mut ArrayD<F>, src: &ArrayD<S>, neighborhood: &N) -> Result<()>
where
    S: Numeric,
    F: FloatElement + From<S>,
    N: Promote + ?Sized,
{
    check_shape(dest, src)?;
    let nb = neighborhood.promote::<F>(MaskEncoding::Flat)?;
    nb.check_rank(src.ndim())?;
    debug!(from = %S::KIND, to = %F::KIND, "dilate");
    local_filter(dest, src, &nb, &Dilation)
}
