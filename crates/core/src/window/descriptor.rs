//! Declarative neighborhood descriptions
//!
//! [`NeighborhoodSpec`] says *what* window to use without knowing the rank
//! of the array it will be applied to; [`NeighborhoodSpec::resolve`] turns it
//! into a concrete [`StructuringElement`] once the rank is known.

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use super::{
    BoxNeighborhood, FloatElement, Kernel, MaskEncoding, Neighborhood, Promote, Promoted, Region,
};
use crate::error::{Error, Result};

/// Shape of a neighborhood, as chosen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NeighborhoodSpec {
    /// Symmetric box with the same odd extent on every axis
    Extent(usize),
    /// Symmetric box with per-axis odd extents
    Extents(Vec<usize>),
    /// Box spanning explicit corner offsets
    Corners { min: Vec<isize>, max: Vec<isize> },
    /// Discrete ball of the given radius
    Ball(f64),
    /// Flat structuring element, centred
    Mask(ArrayD<bool>),
    /// Weighted kernel, centred
    Weights(ArrayD<f64>),
}

impl Default for NeighborhoodSpec {
    fn default() -> Self {
        NeighborhoodSpec::Extent(3)
    }
}

impl NeighborhoodSpec {
    /// Build the structuring element for an array with `ndim` axes
    pub fn resolve(&self, ndim: usize) -> Result<StructuringElement> {
        let element = match self {
            NeighborhoodSpec::Extent(extent) => {
                StructuringElement::Box(BoxNeighborhood::cube(ndim, *extent)?)
            }
            NeighborhoodSpec::Extents(extents) => {
                StructuringElement::Box(BoxNeighborhood::symmetric(extents)?)
            }
            NeighborhoodSpec::Corners { min, max } => {
                StructuringElement::Box(BoxNeighborhood::from_corners(min, max)?)
            }
            NeighborhoodSpec::Ball(radius) => StructuringElement::Mask(Kernel::ball(ndim, *radius)?),
            NeighborhoodSpec::Mask(mask) => {
                if mask.is_empty() {
                    return Err(Error::Construction("mask must not be empty".to_string()));
                }
                StructuringElement::Mask(Kernel::centered(mask.clone()))
            }
            NeighborhoodSpec::Weights(weights) => {
                if weights.is_empty() {
                    return Err(Error::Construction("weights must not be empty".to_string()));
                }
                StructuringElement::Weights(Kernel::centered(weights.clone()))
            }
        };
        element.check_rank(ndim)?;
        Ok(element)
    }
}

/// A resolved neighborhood: either a box or a kernel.
#[derive(Debug, Clone)]
pub enum StructuringElement {
    Box(BoxNeighborhood),
    Mask(Kernel<bool>),
    Weights(Kernel<f64>),
}

impl StructuringElement {
    /// Bounding box of the element
    pub fn bounding_box(&self) -> &Region {
        match self {
            StructuringElement::Box(b) => b.bounding_box(),
            StructuringElement::Mask(k) => k.bounding_box(),
            StructuringElement::Weights(k) => k.bounding_box(),
        }
    }

    /// Number of axes
    pub fn ndim(&self) -> usize {
        self.bounding_box().ndim()
    }

    /// Fail with `RankMismatch` unless the element has `ndim` axes
    pub fn check_rank(&self, ndim: usize) -> Result<()> {
        match self {
            StructuringElement::Box(b) => b.check_rank(ndim),
            StructuringElement::Mask(k) => k.check_rank(ndim),
            StructuringElement::Weights(k) => k.check_rank(ndim),
        }
    }

    /// Element mirrored through the origin
    pub fn reflected(&self) -> Self {
        match self {
            StructuringElement::Box(b) => StructuringElement::Box(b.reflected()),
            StructuringElement::Mask(k) => StructuringElement::Mask(k.reflected()),
            StructuringElement::Weights(k) => StructuringElement::Weights(k.reflected()),
        }
    }
}

impl From<BoxNeighborhood> for StructuringElement {
    fn from(b: BoxNeighborhood) -> Self {
        StructuringElement::Box(b)
    }
}

impl From<Kernel<bool>> for StructuringElement {
    fn from(k: Kernel<bool>) -> Self {
        StructuringElement::Mask(k)
    }
}

impl From<Kernel<f64>> for StructuringElement {
    fn from(k: Kernel<f64>) -> Self {
        StructuringElement::Weights(k)
    }
}

impl Promote for StructuringElement {
    fn promote<F: FloatElement>(&self, encoding: MaskEncoding) -> Result<Promoted<F>> {
        match self {
            StructuringElement::Box(b) => b.promote(encoding),
            StructuringElement::Mask(k) => k.promote(encoding),
            StructuringElement::Weights(k) => k.promote(encoding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_default_is_three() {
        let se = NeighborhoodSpec::default().resolve(2).unwrap();
        assert_eq!(se.bounding_box().shape(), vec![3, 3]);
        assert!(matches!(se, StructuringElement::Box(_)));
    }

    #[test]
    fn test_extent_validation() {
        let err = NeighborhoodSpec::Extent(4).resolve(1).unwrap_err();
        assert!(err.is_construction());
        assert!(NeighborhoodSpec::Extent(0).resolve(3).is_err());
    }

    #[test]
    fn test_extents_rank_mismatch() {
        let err = NeighborhoodSpec::Extents(vec![3, 3]).resolve(3).unwrap_err();
        assert!(matches!(err, Error::RankMismatch { expected: 3, actual: 2 }));
    }

    #[test]
    fn test_corners() {
        let spec = NeighborhoodSpec::Corners {
            min: vec![0, 0],
            max: vec![1, 2],
        };
        let se = spec.resolve(2).unwrap();
        assert_eq!(se.bounding_box().len(), 6);
    }

    #[test]
    fn test_ball() {
        let se = NeighborhoodSpec::Ball(2.0).resolve(2).unwrap();
        match se {
            StructuringElement::Mask(k) => assert_eq!(k.count_true(), 21),
            other => panic!("expected a mask, got {:?}", other),
        }
    }

    #[test]
    fn test_mask_and_weights() {
        let mask = NeighborhoodSpec::Mask(arr2(&[[false, true, false]]).into_dyn());
        let se = mask.resolve(2).unwrap();
        assert_eq!(se.bounding_box().min(), &[0, -1]);
        assert!(mask.resolve(1).is_err());

        let weights = NeighborhoodSpec::Weights(arr1(&[0.25, 0.5, 0.25]).into_dyn());
        assert!(matches!(
            weights.resolve(1).unwrap(),
            StructuringElement::Weights(_)
        ));
        assert!(NeighborhoodSpec::Weights(ArrayD::zeros(ndarray::IxDyn(&[0]))).resolve(1).is_err());
    }

    #[test]
    fn test_promote_structuring_element() {
        let se: StructuringElement = Kernel::centered(arr1(&[true, false, true]).into_dyn()).into();
        let p: Promoted<f64> = se.promote(MaskEncoding::Indicator).unwrap();
        assert_eq!(p.weight(&[0]), 0.0);
        assert_eq!(p.weight(&[1]), 1.0);
    }
}
