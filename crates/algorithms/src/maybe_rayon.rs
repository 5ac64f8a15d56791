//! Slab scheduling for the filter engine.
//!
//! With the `parallel` feature the slabs of the outer axis are computed on
//! rayon's thread pool. Without it they run one after another on the
//! calling thread. The concatenated outputs come back in slab order either
//! way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outputs of `slab(0)`, `slab(1)`, ..., `slab(count - 1)`, concatenated.
#[cfg(feature = "parallel")]
pub(crate) fn concat_slabs<T, F>(count: usize, slab: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> Vec<T> + Sync + Send,
{
    (0..count).into_par_iter().flat_map_iter(slab).collect()
}

/// Outputs of `slab(0)`, `slab(1)`, ..., `slab(count - 1)`, concatenated.
#[cfg(not(feature = "parallel"))]
pub(crate) fn concat_slabs<T, F>(count: usize, slab: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> Vec<T> + Sync + Send,
{
    (0..count).flat_map(slab).collect()
}
