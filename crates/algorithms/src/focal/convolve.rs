//! Weighted local sum
//!
//! Each output is `sum_j src[j] * w(j - c)` over the clipped window, i.e. a
//! correlation with the kernel as given. Boolean masks and boxes contribute
//! weight 1 on set offsets and 0 elsewhere.

use ndarray::ArrayD;
use ndfocal_core::{
    Algorithm, Error, FloatElement, MaskEncoding, Neighborhood, NeighborhoodSpec, Numeric,
    Promote, Result,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::engine::{check_shape, local_filter, local_map};
use super::reduce::Convolution;

/// Parameters for convolution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvolveParams {
    /// Kernel or window shape
    pub neighborhood: NeighborhoodSpec,
}

/// Convolution algorithm
#[derive(Debug, Clone, Default)]
pub struct Convolve;

impl Algorithm for Convolve {
    type Input = ArrayD<f64>;
    type Output = ArrayD<f64>;
    type Params = ConvolveParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Convolve"
    }

    fn description(&self) -> &'static str {
        "Weighted local sum of the values under a kernel"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let element = params.neighborhood.resolve(input.ndim())?;
        convolve(&input, &element)
    }
}

/// Convolve `src` with `neighborhood`, keeping the element kind of `src`.
pub fn convolve<F, N>(src: &ArrayD<F>, neighborhood: &N) -> Result<ArrayD<F>>
where
    F: FloatElement,
    N: Promote + ?Sized,
{
    let nb = neighborhood.promote::<F>(MaskEncoding::Indicator)?;
    debug!(kind = %F::KIND, "convolve");
    local_map(src, &nb, &Convolution)
}

/// Convolve `src` into `dest`.
///
/// The result is computed in the element kind of `dest`, which must be a
/// floating point kind `src` widens into.
pub fn convolve_into<S, F, N>(dest: &mut ArrayD<F>, src: &ArrayD<S>, neighborhood: &N) -> Result<()>
where
    S: Numeric,
    F: FloatElement + From<S>,
    N: Promote + ?Sized,
{
    check_shape(dest, src)?;
    let nb = neighborhood.promote::<F>(MaskEncoding::Indicator)?;
    nb.check_rank(src.ndim())?;
    debug!(from = %S::KIND, to = %F::KIND, "convolve");
    local_filter(dest, src, &nb, &Convolution)
}
