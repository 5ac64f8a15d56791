//! Built-in reducers
//!
//! Each reducer works in a floating point kind `F` and reads source values
//! of any kind `S` that widens into it. Weights have already been promoted
//! to `F` (see [`ndfocal_core::Promote`]).

use ndfocal_core::FloatElement;

use super::engine::LocalReduce;

/// Grey-level dilation: `max(v + w)` over the window.
///
/// With flat weights (`0` or `-inf`) this is the plain maximum over the
/// offsets whose mask flag is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dilation;

impl<S, F> LocalReduce<S, F> for Dilation
where
    F: FloatElement + From<S>,
{
    type Acc = F;
    type Output = F;

    fn seed(&self) -> F {
        F::neg_infinity()
    }

    #[inline]
    fn accumulate(&self, acc: F, value: S, weight: F) -> F {
        let v = <F as From<S>>::from(value) + weight;
        if v > acc { v } else { acc }
    }

    fn finish(&self, acc: F) -> F {
        acc
    }
}

/// Grey-level erosion: `min(v - w)` over the window.
///
/// The weight is subtracted, so a flat `-inf` weight yields `+inf` and a
/// masked out cell never wins the minimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct Erosion;

impl<S, F> LocalReduce<S, F> for Erosion
where
    F: FloatElement + From<S>,
{
    type Acc = F;
    type Output = F;

    fn seed(&self) -> F {
        F::infinity()
    }

    #[inline]
    fn accumulate(&self, acc: F, value: S, weight: F) -> F {
        let v = <F as From<S>>::from(value) - weight;
        if v < acc { v } else { acc }
    }

    fn finish(&self, acc: F) -> F {
        acc
    }
}

/// Erosion and dilation of one window in a single visit: `(lower, upper)`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalExtrema;

impl<S, F> LocalReduce<S, F> for LocalExtrema
where
    F: FloatElement + From<S>,
{
    type Acc = (F, F);
    type Output = (F, F);

    fn seed(&self) -> (F, F) {
        (F::infinity(), F::neg_infinity())
    }

    #[inline]
    fn accumulate(&self, (lower, upper): (F, F), value: S, weight: F) -> (F, F) {
        let v = <F as From<S>>::from(value);
        let low = v - weight;
        let high = v + weight;
        (
            if low < lower { low } else { lower },
            if high > upper { high } else { upper },
        )
    }

    fn finish(&self, acc: (F, F)) -> (F, F) {
        acc
    }
}

/// Weighted correlation sum: `sum(v * w)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Convolution;

impl<S, F> LocalReduce<S, F> for Convolution
where
    F: FloatElement + From<S>,
{
    type Acc = F;
    type Output = F;

    fn seed(&self) -> F {
        F::zero()
    }

    #[inline]
    fn accumulate(&self, acc: F, value: S, weight: F) -> F {
        acc + <F as From<S>>::from(value) * weight
    }

    fn finish(&self, acc: F) -> F {
        acc
    }
}

/// Weighted mean over the cells of the window with a non-zero weight.
///
/// A window without any such cell yields NaN (`0 / 0`).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedMean;

impl<S, F> LocalReduce<S, F> for WeightedMean
where
    F: FloatElement + From<S>,
{
    /// `(total weight, weighted sum)`
    type Acc = (F, F);
    type Output = F;

    fn seed(&self) -> (F, F) {
        (F::zero(), F::zero())
    }

    #[inline]
    fn accumulate(&self, (count, sum): (F, F), value: S, weight: F) -> (F, F) {
        if weight == F::zero() {
            return (count, sum);
        }
        (count + weight, sum + weight * <F as From<S>>::from(value))
    }

    fn finish(&self, (count, sum): (F, F)) -> F {
        sum / count
    }
}
