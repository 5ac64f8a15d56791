//! Morphological opening (erosion followed by dilation)
//!
//! Removes small bright features (noise, spikes) while preserving
//! the overall shape and size of larger bright regions.

use ndarray::ArrayD;
use ndfocal_core::{
    Algorithm, Error, FloatElement, MaskEncoding, Neighborhood, NeighborhoodSpec, Numeric,
    Promote, Result,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::focal::{check_shape, local_filter, local_map, Dilation, Erosion};

/// Parameters for morphological opening
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpeningParams {
    /// Structuring element shape
    pub neighborhood: NeighborhoodSpec,
}

/// Opening algorithm
#[derive(Debug, Clone, Default)]
pub struct Opening;

impl Algorithm for Opening {
    type Input = ArrayD<f64>;
    type Output = ArrayD<f64>;
    type Params = OpeningParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Opening"
    }

    fn description(&self) -> &'static str {
        "Morphological opening (erosion then dilation) to remove small bright features"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let element = params.neighborhood.resolve(input.ndim())?;
        opening(&input, &element)
    }
}

/// Perform morphological opening
///
/// Opening = erode by the structuring element, then dilate by its mirror.
/// Removes bright features the element does not fit into. The result never
/// exceeds `src` and opening it again changes nothing, for any element.
pub fn opening<F, N>(src: &ArrayD<F>, neighborhood: &N) -> Result<ArrayD<F>>
where
    F: FloatElement,
    N: Promote + ?Sized,
{
    let mut dest = ArrayD::zeros(src.raw_dim());
    opening_into(&mut dest, src, neighborhood)?;
    Ok(dest)
}

/// Open `src` into `dest`.
///
/// The neighborhood is promoted once and the eroded array is the only
/// intermediate. The dilation reads `eroded[c - k]`, so every cell is
/// rebuilt from exactly the windows its erosion was taken over.
pub fn opening_into<S, F, N>(dest: &mut ArrayD<F>, src: &ArrayD<S>, neighborhood: &N) -> Result<()>
where
    S: Numeric,
    F: FloatElement + From<S>,
    N: Promote + ?Sized,
{
    check_shape(dest, src)?;
    let nb = neighborhood.promote::<F>(MaskEncoding::Flat)?;
    nb.check_rank(src.ndim())?;
    debug!(from = %S::KIND, to = %F::KIND, "opening");

    let eroded = local_map(src, &nb, &Erosion)?;
    local_filter(dest, &eroded, &nb.reflected(), &Dilation)
}
