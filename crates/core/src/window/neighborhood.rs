//! Neighborhoods: shapes and weights around each output position

use serde::{Deserialize, Serialize};

use super::Region;
use crate::error::{Error, Result};

/// A window of relative offsets with a weight attached to each offset.
///
/// `weight` is defined exactly on the offsets inside `bounding_box`; the
/// filter engine never asks for a weight outside it.
pub trait Neighborhood {
    /// Weight type seen by the reducer
    type Weight: Copy;

    /// Smallest region containing every offset with a defined weight
    fn bounding_box(&self) -> &Region;

    /// Weight at `offset`, relative to the output position
    fn weight(&self, offset: &[isize]) -> Self::Weight;

    /// Number of axes
    fn ndim(&self) -> usize {
        self.bounding_box().ndim()
    }

    /// Fail with `RankMismatch` unless the neighborhood has `ndim` axes
    fn check_rank(&self, ndim: usize) -> Result<()> {
        if self.ndim() != ndim {
            return Err(Error::RankMismatch {
                expected: ndim,
                actual: self.ndim(),
            });
        }
        Ok(())
    }
}

/// Box-shaped neighborhood with weight `true` at every offset.
///
/// Built either symmetric about the origin from odd extents, or from an
/// arbitrary pair of corners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxNeighborhood {
    region: Region,
}

impl BoxNeighborhood {
    /// Symmetric box with the same odd extent on each of `ndim` axes
    pub fn cube(ndim: usize, extent: usize) -> Result<Self> {
        Self::symmetric(&vec![extent; ndim])
    }

    /// Symmetric box from per-axis odd extents.
    ///
    /// On an axis of extent `e` the box spans `-(e >> 1) ..= e >> 1`.
    pub fn symmetric(extents: &[usize]) -> Result<Self> {
        for (axis, &extent) in extents.iter().enumerate() {
            if extent == 0 || extent % 2 == 0 {
                return Err(Error::Construction(format!(
                    "extent {} on axis {} must be a positive odd integer",
                    extent, axis
                )));
            }
        }
        let max: Vec<isize> = extents.iter().map(|&e| (e >> 1) as isize).collect();
        let min = max.iter().map(|&k| -k).collect();
        Ok(Self {
            region: Region::new(min, max)?,
        })
    }

    /// Box spanning `min ..= max`, no parity constraint
    pub fn from_corners(min: &[isize], max: &[isize]) -> Result<Self> {
        Ok(Self {
            region: Region::new(min.to_vec(), max.to_vec())?,
        })
    }

    /// Box covering exactly `region`
    pub fn from_region(region: Region) -> Self {
        Self { region }
    }

    /// Whether the box is centred on the origin
    pub fn is_symmetric(&self) -> bool {
        self.region
            .min()
            .iter()
            .zip(self.region.max())
            .all(|(&lo, &hi)| lo == -hi)
    }

    /// Box mirrored through the origin
    pub fn reflected(&self) -> Self {
        Self {
            region: self.region.reflected(),
        }
    }
}

impl Neighborhood for BoxNeighborhood {
    type Weight = bool;

    fn bounding_box(&self) -> &Region {
        &self.region
    }

    fn weight(&self, offset: &[isize]) -> bool {
        debug_assert!(self.region.contains(offset));
        true
    }
}
