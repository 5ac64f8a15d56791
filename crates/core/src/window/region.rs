//! Rectangular regions of multi-indices
//!
//! A [`Region`] is an inclusive axis-aligned box `[min, max]` of signed
//! multi-indices. It is used both for the valid domain of an array
//! (`[0, d - 1]` on every axis) and for the bounding box of a neighborhood
//! (offsets relative to the output position).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Inclusive N-dimensional box of multi-indices.
///
/// An axis with `max < min` is empty, and so is the whole region. Empty axes
/// are stored canonically as `max == min - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    min: Vec<isize>,
    max: Vec<isize>,
}

impl Region {
    /// Create a region from its corners
    pub fn new(min: Vec<isize>, max: Vec<isize>) -> Result<Self> {
        if min.len() != max.len() {
            return Err(Error::RankMismatch {
                expected: min.len(),
                actual: max.len(),
            });
        }
        Ok(Self::canonical(min, max))
    }

    /// Valid index domain of an array of the given shape
    pub fn from_shape(shape: &[usize]) -> Self {
        let min = vec![0; shape.len()];
        let max = shape.iter().map(|&d| d as isize - 1).collect();
        Self { min, max }
    }

    fn canonical(min: Vec<isize>, mut max: Vec<isize>) -> Self {
        for (hi, &lo) in max.iter_mut().zip(&min) {
            if *hi < lo {
                *hi = lo - 1;
            }
        }
        Self { min, max }
    }

    /// Number of axes
    pub fn ndim(&self) -> usize {
        self.min.len()
    }

    /// Lower corner
    pub fn min(&self) -> &[isize] {
        &self.min
    }

    /// Upper corner (inclusive)
    pub fn max(&self) -> &[isize] {
        &self.max
    }

    /// Number of indices along `axis`, `max(max - min + 1, 0)`
    pub fn length(&self, axis: usize) -> usize {
        (self.max[axis] - self.min[axis] + 1).max(0) as usize
    }

    /// Lengths along every axis
    pub fn shape(&self) -> Vec<usize> {
        (0..self.ndim()).map(|axis| self.length(axis)).collect()
    }

    /// Total number of indices (zero if any axis is empty)
    pub fn len(&self) -> usize {
        (0..self.ndim()).map(|axis| self.length(axis)).product()
    }

    pub fn is_empty(&self) -> bool {
        (0..self.ndim()).any(|axis| self.length(axis) == 0)
    }

    /// Whether `index` lies inside the region
    pub fn contains(&self, index: &[isize]) -> bool {
        index.len() == self.ndim()
            && index
                .iter()
                .zip(self.min.iter().zip(&self.max))
                .all(|(&i, (&lo, &hi))| lo <= i && i <= hi)
    }

    /// Intersection of two regions of the same rank.
    ///
    /// Componentwise max of the lower corners and min of the upper corners.
    pub fn intersect(&self, other: &Region) -> Region {
        debug_assert_eq!(self.ndim(), other.ndim());
        let min = self
            .min
            .iter()
            .zip(&other.min)
            .map(|(&a, &b)| a.max(b))
            .collect();
        let max = self
            .max
            .iter()
            .zip(&other.max)
            .map(|(&a, &b)| a.min(b))
            .collect();
        Self::canonical(min, max)
    }

    /// Region translated by `offset`
    pub fn shifted(&self, offset: &[isize]) -> Region {
        debug_assert_eq!(self.ndim(), offset.len());
        Region {
            min: self.min.iter().zip(offset).map(|(&a, &o)| a + o).collect(),
            max: self.max.iter().zip(offset).map(|(&a, &o)| a + o).collect(),
        }
    }

    /// Point reflection through the origin: `[-max, -min]`
    pub fn reflected(&self) -> Region {
        Region {
            min: self.max.iter().map(|&m| -m).collect(),
            max: self.min.iter().map(|&m| -m).collect(),
        }
    }

    /// Sub-region with `axis` restricted to the single coordinate `at`
    pub fn slab(&self, axis: usize, at: isize) -> Region {
        let mut min = self.min.clone();
        let mut max = self.max.clone();
        min[axis] = at.max(self.min[axis]);
        max[axis] = at.min(self.max[axis]);
        Self::canonical(min, max)
    }

    /// Row-major cursor over the indices of the region
    pub fn cursor(&self) -> RegionCursor<'_> {
        RegionCursor {
            region: self,
            current: self.min.clone(),
            state: CursorState::Fresh,
        }
    }

    /// Row-major iterator over the indices of the region.
    ///
    /// The order is fixed (last axis varies fastest) and identical on every
    /// call.
    pub fn iter(&self) -> RegionIter<'_> {
        RegionIter {
            cursor: self.cursor(),
            remaining: self.len(),
        }
    }
}

impl<'a> IntoIterator for &'a Region {
    type Item = Vec<isize>;
    type IntoIter = RegionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    Fresh,
    Running,
    Done,
}

/// Allocation-free traversal of a [`Region`].
///
/// Yields borrowed multi-indices; used by the filter engine's inner loop.
#[derive(Debug, Clone)]
pub struct RegionCursor<'a> {
    region: &'a Region,
    current: Vec<isize>,
    state: CursorState,
}

impl RegionCursor<'_> {
    /// Advance to the next index, or `None` once the region is exhausted
    pub fn next_index(&mut self) -> Option<&[isize]> {
        match self.state {
            CursorState::Done => return None,
            CursorState::Fresh => {
                if self.region.is_empty() {
                    self.state = CursorState::Done;
                    return None;
                }
                self.state = CursorState::Running;
                return Some(self.current.as_slice());
            }
            CursorState::Running => {}
        }

        for axis in (0..self.region.ndim()).rev() {
            if self.current[axis] < self.region.max[axis] {
                self.current[axis] += 1;
                return Some(self.current.as_slice());
            }
            self.current[axis] = self.region.min[axis];
        }

        self.state = CursorState::Done;
        None
    }
}

/// Owning-item iterator over a [`Region`]
#[derive(Debug, Clone)]
pub struct RegionIter<'a> {
    cursor: RegionCursor<'a>,
    remaining: usize,
}

impl Iterator for RegionIter<'_> {
    type Item = Vec<isize>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor.next_index()?.to_vec();
        self.remaining -= 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RegionIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(min: &[isize], max: &[isize]) -> Region {
        Region::new(min.to_vec(), max.to_vec()).unwrap()
    }

    #[test]
    fn test_length_and_len() {
        let r = region(&[-1, 0], &[1, 3]);
        assert_eq!(r.length(0), 3);
        assert_eq!(r.length(1), 4);
        assert_eq!(r.shape(), vec![3, 4]);
        assert_eq!(r.len(), 12);
        assert!(!r.is_empty());
    }

    #[test]
    fn test_empty_axis_is_canonical() {
        let r = region(&[2, 0], &[-5, 3]);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.length(0), 0);
        assert_eq!(r.max(), &[1, 3]);
        assert_eq!(r.iter().count(), 0);
    }

    #[test]
    fn test_rank_mismatch() {
        let err = Region::new(vec![0, 0], vec![1]).unwrap_err();
        assert!(matches!(err, Error::RankMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_intersect() {
        let domain = Region::from_shape(&[5]);
        let window = region(&[-1], &[1]).shifted(&[0]);
        let clipped = window.intersect(&domain);
        assert_eq!(clipped.min(), &[0]);
        assert_eq!(clipped.max(), &[1]);

        let far = region(&[10], &[12]).intersect(&domain);
        assert!(far.is_empty());
    }

    #[test]
    fn test_iteration_row_major_and_restartable() {
        let r = region(&[0, -1], &[1, 0]);
        let first: Vec<Vec<isize>> = r.iter().collect();
        assert_eq!(
            first,
            vec![vec![0, -1], vec![0, 0], vec![1, -1], vec![1, 0]]
        );
        let second: Vec<Vec<isize>> = (&r).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(r.iter().len(), 4);
    }

    #[test]
    fn test_zero_dimensional_region_has_one_index() {
        let r = Region::from_shape(&[]);
        assert_eq!(r.len(), 1);
        let all: Vec<Vec<isize>> = r.iter().collect();
        assert_eq!(all, vec![Vec::<isize>::new()]);
    }

    #[test]
    fn test_contains_and_reflect() {
        let r = region(&[-1, 0], &[2, 1]);
        assert!(r.contains(&[2, 0]));
        assert!(!r.contains(&[3, 0]));
        assert!(!r.contains(&[0]));
        let m = r.reflected();
        assert_eq!(m.min(), &[-2, -1]);
        assert_eq!(m.max(), &[1, 0]);
    }

    #[test]
    fn test_slab() {
        let r = Region::from_shape(&[3, 4]);
        let s = r.slab(0, 2);
        assert_eq!(s.min(), &[2, 0]);
        assert_eq!(s.max(), &[2, 3]);
        assert_eq!(s.len(), 4);
    }
}
