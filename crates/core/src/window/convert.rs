//! Conversion of neighborhood weights between element kinds
//!
//! Rules, for a kernel of kind `T` converted to kind `U`:
//! - same kind: identity, the coefficients stay shared;
//! - numeric to numeric: elementwise conversion into new storage;
//! - boolean to numeric: mask encoding, see [`MaskEncoding`];
//! - anything else (numeric to boolean, flat boolean to integer) is a
//!   `TypeConversion` error.

use std::any::Any;
use std::sync::Arc;

use ndarray::ArrayD;
use tracing::trace;

use super::{
    BoxNeighborhood, Coefficient, ElementKind, FloatElement, Kernel, MaskEncoding, Neighborhood,
    Region,
};
use crate::error::{Error, Result};

impl<T: Coefficient> Kernel<T> {
    /// Convert the coefficients to kind `U`.
    ///
    /// `encoding` only matters for boolean kernels converted to a numeric
    /// kind. All coefficients are checked before the new kernel is returned.
    pub fn convert<U: Coefficient>(&self, encoding: MaskEncoding) -> Result<Kernel<U>> {
        if T::KIND == U::KIND {
            let shared: Arc<dyn Any + Send + Sync> = self.coefs.clone();
            if let Ok(coefs) = shared.downcast::<ArrayD<U>>() {
                return Ok(Kernel {
                    coefs,
                    origin: self.origin.clone(),
                    region: self.region.clone(),
                });
            }
        }

        let failure = |reason: &str| Error::TypeConversion {
            from: T::KIND,
            to: U::KIND,
            reason: reason.to_string(),
        };

        let values: Vec<U> = match (T::KIND, U::KIND) {
            (_, ElementKind::Bool) => {
                return Err(failure("numeric weights have no boolean interpretation"));
            }
            (ElementKind::Bool, to) => {
                if encoding == MaskEncoding::Flat && !to.is_float() {
                    return Err(failure("flat encoding needs -inf, use a floating point kind"));
                }
                self.coefs
                    .iter()
                    .map(|&c| c.as_flag().and_then(|flag| U::from_flag(flag, encoding)))
                    .collect::<Option<Vec<U>>>()
                    .ok_or_else(|| failure("mask encoding failed"))?
            }
            _ => self
                .coefs
                .iter()
                .map(|&c| c.cast::<U>())
                .collect::<Option<Vec<U>>>()
                .ok_or_else(|| failure("coefficient not representable in target kind"))?,
        };

        trace!(from = %T::KIND, to = %U::KIND, len = values.len(), "converted kernel coefficients");

        let coefs = ArrayD::from_shape_vec(self.coefs.raw_dim(), values)
            .map_err(|e| Error::Other(e.to_string()))?;
        Ok(Kernel {
            coefs: Arc::new(coefs),
            origin: self.origin.clone(),
            region: self.region.clone(),
        })
    }
}

impl Kernel<bool> {
    /// Flat structuring function: `true -> 0`, `false -> -inf`.
    ///
    /// Dilation adds these weights and erosion subtracts them, so a masked
    /// out cell can win neither a maximum nor a minimum.
    pub fn to_flat<F: FloatElement>(&self) -> Result<Kernel<F>> {
        self.convert(MaskEncoding::Flat)
    }
}

/// A neighborhood whose weights have been promoted to a filter's working
/// kind.
#[derive(Debug, Clone)]
pub enum Promoted<F> {
    /// Box with the same weight at every offset (no coefficient storage)
    Uniform { region: Region, weight: F },
    /// Kernel with converted coefficients
    Weighted(Kernel<F>),
}

impl<F: Coefficient> Promoted<F> {
    /// Neighborhood mirrored through the origin: `w'(k) = w(-k)`.
    ///
    /// Dilation by the mirror is the adjoint of erosion by `self`, which is
    /// what the second pass of an opening or closing needs.
    pub fn reflected(&self) -> Self {
        match self {
            Promoted::Uniform { region, weight } => Promoted::Uniform {
                region: region.reflected(),
                weight: *weight,
            },
            Promoted::Weighted(kernel) => Promoted::Weighted(kernel.reflected()),
        }
    }
}

impl<F: Coefficient> Neighborhood for Promoted<F> {
    type Weight = F;

    fn bounding_box(&self) -> &Region {
        match self {
            Promoted::Uniform { region, .. } => region,
            Promoted::Weighted(kernel) => kernel.bounding_box(),
        }
    }

    fn weight(&self, offset: &[isize]) -> F {
        match self {
            Promoted::Uniform { weight, .. } => *weight,
            Promoted::Weighted(kernel) => kernel.weight(offset),
        }
    }
}

/// Neighborhoods that can be promoted to a floating point working kind.
pub trait Promote {
    /// Promote the weights to `F`, using `encoding` for boolean weights
    fn promote<F: FloatElement>(&self, encoding: MaskEncoding) -> Result<Promoted<F>>;
}

impl Promote for BoxNeighborhood {
    fn promote<F: FloatElement>(&self, encoding: MaskEncoding) -> Result<Promoted<F>> {
        let weight = F::from_flag(true, encoding).ok_or_else(|| Error::TypeConversion {
            from: ElementKind::Bool,
            to: F::KIND,
            reason: "mask encoding failed".to_string(),
        })?;
        Ok(Promoted::Uniform {
            region: self.bounding_box().clone(),
            weight,
        })
    }
}

impl<T: Coefficient> Promote for Kernel<T> {
    fn promote<F: FloatElement>(&self, encoding: MaskEncoding) -> Result<Promoted<F>> {
        Ok(Promoted::Weighted(self.convert(encoding)?))
    }
}

impl<P: Promote + ?Sized> Promote for &P {
    fn promote<F: FloatElement>(&self, encoding: MaskEncoding) -> Result<Promoted<F>> {
        (**self).promote(encoding)
    }
}
