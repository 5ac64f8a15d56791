//! Top-hat and bottom-hat morphological transforms
//!
//! - **Top-hat** (white top-hat): original - opening. Extracts small bright
//!   features on a dark background.
//! - **Bottom-hat** (black top-hat): closing - original. Extracts small dark
//!   features on a bright background.
//!
//! The smoothed variants first suppress noise of the opposite polarity with
//! a second structuring element: the top-hat is taken of the closing of the
//! source, the bottom-hat of its opening.

use ndarray::{ArrayD, Zip};
use ndfocal_core::{Algorithm, Error, FloatElement, NeighborhoodSpec, Numeric, Promote, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::closing::closing_into;
use super::opening::opening_into;
use crate::focal::check_shape;

/// Parameters for top-hat transform
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopHatParams {
    /// Structuring element shape
    pub neighborhood: NeighborhoodSpec,
    /// Element of the closing applied first, if any
    pub smoothing: Option<NeighborhoodSpec>,
}

/// Top-hat (white top-hat) algorithm
#[derive(Debug, Clone, Default)]
pub struct TopHat;

impl Algorithm for TopHat {
    type Input = ArrayD<f64>;
    type Output = ArrayD<f64>;
    type Params = TopHatParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "TopHat"
    }

    fn description(&self) -> &'static str {
        "Top-hat transform (original minus opening) to extract bright features"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let element = params.neighborhood.resolve(input.ndim())?;
        match params.smoothing {
            Some(spec) => {
                let smoothing = spec.resolve(input.ndim())?;
                top_hat_smoothed(&input, &element, &smoothing)
            }
            None => top_hat(&input, &element),
        }
    }
}

/// Parameters for bottom-hat transform
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BottomHatParams {
    /// Structuring element shape
    pub neighborhood: NeighborhoodSpec,
    /// Element of the opening applied first, if any
    pub smoothing: Option<NeighborhoodSpec>,
}

/// Bottom-hat algorithm
#[derive(Debug, Clone, Default)]
pub struct BottomHat;

impl Algorithm for BottomHat {
    type Input = ArrayD<f64>;
    type Output = ArrayD<f64>;
    type Params = BottomHatParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "BottomHat"
    }

    fn description(&self) -> &'static str {
        "Bottom-hat transform (closing minus original) to extract dark features"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let element = params.neighborhood.resolve(input.ndim())?;
        match params.smoothing {
            Some(spec) => {
                let smoothing = spec.resolve(input.ndim())?;
                bottom_hat_smoothed(&input, &element, &smoothing)
            }
            None => bottom_hat(&input, &element),
        }
    }
}

/// Compute the top-hat (white top-hat) transform
///
/// Top-hat = original - opening. Extracts bright features smaller than
/// the structuring element. Never negative.
pub fn top_hat<F, N>(src: &ArrayD<F>, neighborhood: &N) -> Result<ArrayD<F>>
where
    F: FloatElement,
    N: Promote + ?Sized,
{
    let mut dest = ArrayD::zeros(src.raw_dim());
    top_hat_into(&mut dest, src, neighborhood)?;
    Ok(dest)
}

/// Top-hat of `src` written into `dest`
pub fn top_hat_into<S, F, N>(dest: &mut ArrayD<F>, src: &ArrayD<S>, neighborhood: &N) -> Result<()>
where
    S: Numeric,
    F: FloatElement + From<S>,
    N: Promote + ?Sized,
{
    opening_into(dest, src, neighborhood)?;
    debug!("top-hat");
    Zip::from(dest)
        .and(src)
        .for_each(|d, &s| *d = <F as From<S>>::from(s) - *d);
    Ok(())
}

/// Compute the bottom-hat (black top-hat) transform
///
/// Bottom-hat = closing - original. Extracts dark features smaller than
/// the structuring element. Never negative.
pub fn bottom_hat<F, N>(src: &ArrayD<F>, neighborhood: &N) -> Result<ArrayD<F>>
where
    F: FloatElement,
    N: Promote + ?Sized,
{
    let mut dest = ArrayD::zeros(src.raw_dim());
    bottom_hat_into(&mut dest, src, neighborhood)?;
    Ok(dest)
}

/// Bottom-hat of `src` written into `dest`
pub fn bottom_hat_into<S, F, N>(dest: &mut ArrayD<F>, src: &ArrayD<S>, neighborhood: &N) -> Result<()>
where
    S: Numeric,
    F: FloatElement + From<S>,
    N: Promote + ?Sized,
{
    closing_into(dest, src, neighborhood)?;
    debug!("bottom-hat");
    Zip::from(dest)
        .and(src)
        .for_each(|d, &s| *d = *d - <F as From<S>>::from(s));
    Ok(())
}

/// Top-hat of the closing of `src` by `smoothing`.
///
/// The closing removes dark noise first, so it does not reappear as
/// spurious bright residue.
pub fn top_hat_smoothed<F, N, M>(src: &ArrayD<F>, neighborhood: &N, smoothing: &M) -> Result<ArrayD<F>>
where
    F: FloatElement,
    N: Promote + ?Sized,
    M: Promote + ?Sized,
{
    let mut dest = ArrayD::zeros(src.raw_dim());
    top_hat_smoothed_into(&mut dest, src, neighborhood, smoothing)?;
    Ok(dest)
}

/// Smoothed top-hat of `src` written into `dest`
pub fn top_hat_smoothed_into<S, F, N, M>(
    dest: &mut ArrayD<F>,
    src: &ArrayD<S>,
    neighborhood: &N,
    smoothing: &M,
) -> Result<()>
where
    S: Numeric,
    F: FloatElement + From<S>,
    N: Promote + ?Sized,
    M: Promote + ?Sized,
{
    check_shape(dest, src)?;
    let mut smoothed = ArrayD::<F>::zeros(src.raw_dim());
    closing_into(&mut smoothed, src, smoothing)?;
    top_hat_into::<F, F, N>(dest, &smoothed, neighborhood)
}

/// Bottom-hat of the opening of `src` by `smoothing`.
pub fn bottom_hat_smoothed<F, N, M>(
    src: &ArrayD<F>,
    neighborhood: &N,
    smoothing: &M,
) -> Result<ArrayD<F>>
where
    F: FloatElement,
    N: Promote + ?Sized,
    M: Promote + ?Sized,
{
    let mut dest = ArrayD::zeros(src.raw_dim());
    bottom_hat_smoothed_into(&mut dest, src, neighborhood, smoothing)?;
    Ok(dest)
}

/// Smoothed bottom-hat of `src` written into `dest`
pub fn bottom_hat_smoothed_into<S, F, N, M>(
    dest: &mut ArrayD<F>,
    src: &ArrayD<S>,
    neighborhood: &N,
    smoothing: &M,
) -> Result<()>
where
    S: Numeric,
    F: FloatElement + From<S>,
    N: Promote + ?Sized,
    M: Promote + ?Sized,
{
    check_shape(dest, src)?;
    let mut smoothed = ArrayD::<F>::zeros(src.raw_dim());
    opening_into(&mut smoothed, src, smoothing)?;
    bottom_hat_into::<F, F, N>(dest, &smoothed, neighborhood)
}
