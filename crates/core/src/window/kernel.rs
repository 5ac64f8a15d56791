//! Kernels: neighborhoods backed by a coefficient array

use std::sync::Arc;

use ndarray::{ArrayD, Axis};

use super::{Coefficient, Neighborhood, Region};
use crate::error::{Error, Result};

/// A neighborhood whose weights are stored in a dense coefficient array.
///
/// The weight at relative offset `k` is the coefficient at `k + origin`.
/// Coefficients are shared between clones and identity conversions; use
/// [`Kernel::to_unshared`] for an explicit copy.
///
/// Boolean coefficients describe a flat structuring element, numeric
/// coefficients a weighted filter or a grey-level structuring function.
#[derive(Debug, Clone)]
pub struct Kernel<T> {
    pub(crate) coefs: Arc<ArrayD<T>>,
    pub(crate) origin: Vec<isize>,
    pub(crate) region: Region,
}

impl<T: Coefficient> Kernel<T> {
    /// Kernel with its origin at the geometric centre of `coefs`.
    ///
    /// On an axis of length `d` the offsets span `-(d >> 1) ..= d - 1 - (d >> 1)`,
    /// the same centring as a spectral shift.
    pub fn centered(coefs: ArrayD<T>) -> Self {
        let origin: Vec<isize> = coefs.shape().iter().map(|&d| (d >> 1) as isize).collect();
        Self::assemble(Arc::new(coefs), origin)
    }

    /// Kernel whose offset zero sits at array index `origin`.
    ///
    /// `origin` may lie outside the array, in which case the kernel does not
    /// contain the zero offset.
    pub fn with_origin(coefs: ArrayD<T>, origin: &[isize]) -> Result<Self> {
        if origin.len() != coefs.ndim() {
            return Err(Error::RankMismatch {
                expected: coefs.ndim(),
                actual: origin.len(),
            });
        }
        Ok(Self::assemble(Arc::new(coefs), origin.to_vec()))
    }

    /// Kernel whose offsets are exactly `region`.
    ///
    /// The shape of `coefs` must match the shape of `region`.
    pub fn over_region(coefs: ArrayD<T>, region: &Region) -> Result<Self> {
        if region.ndim() != coefs.ndim() {
            return Err(Error::RankMismatch {
                expected: coefs.ndim(),
                actual: region.ndim(),
            });
        }
        if region.shape() != coefs.shape() {
            return Err(Error::ShapeMismatch {
                expected: region.shape(),
                actual: coefs.shape().to_vec(),
            });
        }
        let origin: Vec<isize> = region.min().iter().map(|&m| -m).collect();
        Ok(Self::assemble(Arc::new(coefs), origin))
    }

    pub(crate) fn assemble(coefs: Arc<ArrayD<T>>, origin: Vec<isize>) -> Self {
        let min: Vec<isize> = origin.iter().map(|&o| -o).collect();
        let region = Region::from_shape(coefs.shape()).shifted(&min);
        Self {
            coefs,
            origin,
            region,
        }
    }

    /// Coefficient array
    pub fn coefficients(&self) -> &ArrayD<T> {
        &self.coefs
    }

    /// Array index of offset zero
    pub fn origin(&self) -> &[isize] {
        &self.origin
    }

    /// Whether both kernels read the same coefficient storage
    pub fn shares_storage_with<U>(&self, other: &Kernel<U>) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.coefs) as *const u8,
            Arc::as_ptr(&other.coefs) as *const u8,
        )
    }

    /// Copy of the kernel with its own coefficient storage
    pub fn to_unshared(&self) -> Self {
        Self {
            coefs: Arc::new(self.coefs.as_ref().clone()),
            origin: self.origin.clone(),
            region: self.region.clone(),
        }
    }

    /// Kernel mirrored through the origin: `w'(k) = w(-k)`
    pub fn reflected(&self) -> Self {
        let mut coefs = self.coefs.as_ref().clone();
        for axis in 0..coefs.ndim() {
            coefs.invert_axis(Axis(axis));
        }
        let origin: Vec<isize> = self
            .coefs
            .shape()
            .iter()
            .zip(&self.origin)
            .map(|(&d, &o)| d as isize - 1 - o)
            .collect();
        Self::assemble(Arc::new(coefs.as_standard_layout().into_owned()), origin)
    }
}

impl Kernel<bool> {
    /// Number of `true` cells
    pub fn count_true(&self) -> usize {
        self.coefs.iter().filter(|&&b| b).count()
    }
}

impl<T: Coefficient> Neighborhood for Kernel<T> {
    type Weight = T;

    fn bounding_box(&self) -> &Region {
        &self.region
    }

    /// # Panics
    /// If `offset` lies outside the bounding box.
    #[inline]
    fn weight(&self, offset: &[isize]) -> T {
        assert_eq!(offset.len(), self.coefs.ndim(), "offset rank differs from kernel rank");
        let mut linear = 0isize;
        for (axis, (&k, &o)) in offset.iter().zip(&self.origin).enumerate() {
            let i = k + o;
            assert!(
                i >= 0 && (i as usize) < self.coefs.shape()[axis],
                "offset {:?} outside kernel bounds {:?}",
                offset,
                self.region
            );
            linear += i * self.coefs.strides()[axis];
        }
        // SAFETY: every `offset + origin` component was checked against the
        // array shape above, so `linear` is the element offset of a valid
        // index of `coefs`.
        unsafe { *self.coefs.as_ptr().offset(linear) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, IxDyn};

    #[test]
    fn test_centered_odd() {
        let k = Kernel::centered(arr1(&[1.0, 2.0, 3.0]).into_dyn());
        assert_eq!(k.bounding_box().min(), &[-1]);
        assert_eq!(k.bounding_box().max(), &[1]);
        assert_eq!(k.weight(&[-1]), 1.0);
        assert_eq!(k.weight(&[0]), 2.0);
        assert_eq!(k.weight(&[1]), 3.0);
    }

    #[test]
    fn test_centered_even_follows_spectral_shift() {
        let k = Kernel::centered(arr1(&[10, 20, 30, 40]).into_dyn());
        // d = 4: offsets -2 ..= 1, offset zero at index 2
        assert_eq!(k.bounding_box().min(), &[-2]);
        assert_eq!(k.bounding_box().max(), &[1]);
        assert_eq!(k.weight(&[0]), 30);
        assert_eq!(k.weight(&[-2]), 10);
    }

    #[test]
    fn test_2d_weights() {
        let k = Kernel::centered(arr2(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]).into_dyn());
        assert_eq!(k.weight(&[0, 0]), 5);
        assert_eq!(k.weight(&[-1, 1]), 3);
        assert_eq!(k.weight(&[1, -1]), 7);
    }

    #[test]
    fn test_non_standard_layout() {
        let t = arr2(&[[1, 2, 3], [4, 5, 6]]).reversed_axes();
        let k = Kernel::with_origin(t.into_dyn(), &[0, 0]).unwrap();
        // transposed: [[1, 4], [2, 5], [3, 6]]
        assert_eq!(k.weight(&[0, 1]), 4);
        assert_eq!(k.weight(&[2, 0]), 3);
    }

    #[test]
    fn test_over_region() {
        let region = Region::new(vec![0, -1], vec![1, 1]).unwrap();
        let k = Kernel::over_region(ndarray::Array::from_elem(IxDyn(&[2, 3]), true), &region)
            .unwrap();
        assert_eq!(k.bounding_box(), &region);
        assert_eq!(k.origin(), &[0, 1]);

        let err = Kernel::over_region(ndarray::Array::from_elem(IxDyn(&[3, 3]), true), &region)
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_with_origin_rank_mismatch() {
        let err = Kernel::with_origin(arr1(&[1.0]).into_dyn(), &[0, 0]).unwrap_err();
        assert!(matches!(err, Error::RankMismatch { .. }));
    }

    #[test]
    fn test_sharing() {
        let k = Kernel::centered(arr1(&[true, false, true]).into_dyn());
        let c = k.clone();
        assert!(k.shares_storage_with(&c));
        let u = k.to_unshared();
        assert!(!k.shares_storage_with(&u));
        assert_eq!(u.coefficients(), k.coefficients());
        assert_eq!(k.count_true(), 2);
    }

    #[test]
    fn test_reflected() {
        let k = Kernel::centered(arr1(&[1, 2, 3, 4]).into_dyn());
        let m = k.reflected();
        assert_eq!(m.bounding_box().min(), &[-1]);
        assert_eq!(m.bounding_box().max(), &[2]);
        for offset in k.bounding_box().iter() {
            let neg: Vec<isize> = offset.iter().map(|&o| -o).collect();
            assert_eq!(m.weight(&neg), k.weight(&offset));
        }
    }

    #[test]
    #[should_panic]
    fn test_weight_outside_bounds_panics() {
        let k = Kernel::centered(arr1(&[1.0, 2.0, 3.0]).into_dyn());
        k.weight(&[2]);
    }
}
