//! Local (focal) mean
//!
//! Weighted mean of the values under the window. Only offsets with a
//! non-zero weight count, and the divisor is the sum of the weights that
//! fell inside the array, so windows clipped at the edges average fewer
//! cells instead of padding.

use ndarray::ArrayD;
use ndfocal_core::{
    Algorithm, Error, FloatElement, MaskEncoding, Neighborhood, NeighborhoodSpec, Numeric,
    Promote, Result,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::engine::{check_shape, local_filter, local_map};
use super::reduce::WeightedMean;

/// Parameters for the local mean
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalMeanParams {
    /// Window shape; kernel coefficients act as weights
    pub neighborhood: NeighborhoodSpec,
}

/// Local mean algorithm
#[derive(Debug, Clone, Default)]
pub struct LocalMean;

impl Algorithm for LocalMean {
    type Input = ArrayD<f64>;
    type Output = ArrayD<f64>;
    type Params = LocalMeanParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "LocalMean"
    }

    fn description(&self) -> &'static str {
        "Weighted mean over a moving window that shrinks at the edges"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let element = params.neighborhood.resolve(input.ndim())?;
        local_mean(&input, &element)
    }
}

/// Local mean of `src`.
///
/// Positions whose window holds no cell with a non-zero weight are NaN.
pub fn local_mean<F, N>(src: &ArrayD<F>, neighborhood: &N) -> Result<ArrayD<F>>
where
    F: FloatElement,
    N: Promote + ?Sized,
{
    let nb = neighborhood.promote::<F>(MaskEncoding::Indicator)?;
    debug!(kind = %F::KIND, "local mean");
    local_map(src, &nb, &WeightedMean)
}

/// Local mean of `src` computed in the element kind of `dest`
pub fn local_mean_into<S, F, N>(dest: &mut ArrayD<F>, src: &ArrayD<S>, neighborhood: &N) -> Result<()>
where
    S: Numeric,
    F: FloatElement + From<S>,
    N: Promote + ?Sized,
{
    check_shape(dest, src)?;
    let nb = neighborhood.promote::<F>(MaskEncoding::Indicator)?;
    nb.check_rank(src.ndim())?;
    debug!(from = %S::KIND, to = %F::KIND, "local mean");
    local_filter(dest, src, &nb, &WeightedMean)
}
