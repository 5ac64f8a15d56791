//! Generic windowed reduction
//!
//! Every filter in this crate is one pass of [`local_filter`]: for each
//! position `c` of the source array, the neighborhood's bounding box is
//! shifted to `c`, clipped to the array domain, and every index `j` of the
//! clipped window is folded into an accumulator with the weight at `j - c`.
//! Windows shrink at the array edges; nothing is padded, clamped or wrapped.

use ndarray::ArrayD;
use tracing::debug;

use crate::maybe_rayon::concat_slabs;
use ndfocal_core::{Error, Neighborhood, Region, Result};

/// The three operations driving a local filter.
///
/// `S` is the source element type and `W` the neighborhood's weight type.
pub trait LocalReduce<S, W> {
    /// Per-position accumulator
    type Acc;
    /// Value stored in the destination
    type Output;

    /// Initial accumulator of every position
    fn seed(&self) -> Self::Acc;

    /// Fold one source value and its weight into the accumulator
    fn accumulate(&self, acc: Self::Acc, value: S, weight: W) -> Self::Acc;

    /// Turn the final accumulator into the output value
    fn finish(&self, acc: Self::Acc) -> Self::Output;
}

/// A [`LocalReduce`] built from three closures.
///
/// ```ignore
/// // number of cells actually visited at each position
/// let count = FnReduce::new(|| 0usize, |n: usize, _v: f64, _w: bool| n + 1, |n| n);
/// let sizes = local_map(&src, &BoxNeighborhood::cube(1, 3)?, &count)?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnReduce<Seed, Acc, Finish> {
    seed: Seed,
    accumulate: Acc,
    finish: Finish,
}

impl<Seed, Acc, Finish> FnReduce<Seed, Acc, Finish> {
    pub fn new(seed: Seed, accumulate: Acc, finish: Finish) -> Self {
        Self {
            seed,
            accumulate,
            finish,
        }
    }
}

impl<S, W, A, O, Seed, Acc, Finish> LocalReduce<S, W> for FnReduce<Seed, Acc, Finish>
where
    Seed: Fn() -> A,
    Acc: Fn(A, S, W) -> A,
    Finish: Fn(A) -> O,
{
    type Acc = A;
    type Output = O;

    fn seed(&self) -> A {
        (self.seed)()
    }

    fn accumulate(&self, acc: A, value: S, weight: W) -> A {
        (self.accumulate)(acc, value, weight)
    }

    fn finish(&self, acc: A) -> O {
        (self.finish)(acc)
    }
}

/// Run `reducer` over every position of `src` and store the results in `dest`.
///
/// `dest` must have the shape of `src` and `neighborhood` its rank. Both
/// are checked, and every output value is computed, before the first
/// destination cell is written: on error `dest` is left untouched.
pub fn local_filter<S, N, R>(
    dest: &mut ArrayD<R::Output>,
    src: &ArrayD<S>,
    neighborhood: &N,
    reducer: &R,
) -> Result<()>
where
    S: Copy + Sync,
    N: Neighborhood + Sync,
    R: LocalReduce<S, N::Weight> + Sync,
    R::Output: Send,
{
    check_shape(dest, src)?;
    let values = reduce_all(src, neighborhood, reducer)?;
    for (cell, value) in dest.iter_mut().zip(values) {
        *cell = value;
    }
    Ok(())
}

/// Fail with `ShapeMismatch` unless `dest` has the shape of `src`
pub fn check_shape<D, S>(dest: &ArrayD<D>, src: &ArrayD<S>) -> Result<()> {
    if dest.shape() != src.shape() {
        return Err(Error::ShapeMismatch {
            expected: src.shape().to_vec(),
            actual: dest.shape().to_vec(),
        });
    }
    Ok(())
}

/// Run `reducer` over every position of `src` into a new array
pub fn local_map<S, N, R>(src: &ArrayD<S>, neighborhood: &N, reducer: &R) -> Result<ArrayD<R::Output>>
where
    S: Copy + Sync,
    N: Neighborhood + Sync,
    R: LocalReduce<S, N::Weight> + Sync,
    R::Output: Send,
{
    let values = reduce_all(src, neighborhood, reducer)?;
    ArrayD::from_shape_vec(src.raw_dim(), values).map_err(|e| Error::Other(e.to_string()))
}

/// Output values of every position, in row-major order.
fn reduce_all<S, N, R>(src: &ArrayD<S>, neighborhood: &N, reducer: &R) -> Result<Vec<R::Output>>
where
    S: Copy + Sync,
    N: Neighborhood + Sync,
    R: LocalReduce<S, N::Weight> + Sync,
    R::Output: Send,
{
    neighborhood.check_rank(src.ndim())?;

    let ndim = src.ndim();
    let domain = Region::from_shape(src.shape());
    let bounds = neighborhood.bounding_box();

    debug!(
        shape = ?src.shape(),
        min = ?bounds.min(),
        max = ?bounds.max(),
        parallel = cfg!(feature = "parallel"),
        "local filter pass"
    );

    if domain.is_empty() {
        return Ok(Vec::new());
    }

    // Positions are independent; the outer axis is split into slabs.
    let slabs = if ndim == 0 { 1 } else { src.shape()[0] };

    let values = concat_slabs(slabs, |i| {
        let slab = if ndim == 0 {
            domain.clone()
        } else {
            domain.slab(0, i as isize)
        };
        let mut out = Vec::with_capacity(slab.len());
        let mut lo = vec![0isize; ndim];
        let mut hi = vec![0isize; ndim];
        let mut j = vec![0isize; ndim];
        let mut offset = vec![0isize; ndim];
        let mut index = vec![0usize; ndim];

        let mut positions = slab.cursor();
        while let Some(c) = positions.next_index() {
            let mut acc = reducer.seed();
            if clip_window(bounds, c, src.shape(), &mut lo, &mut hi) {
                j.copy_from_slice(&lo);
                loop {
                    for axis in 0..ndim {
                        offset[axis] = j[axis] - c[axis];
                        index[axis] = j[axis] as usize;
                    }
                    acc = reducer.accumulate(acc, src[index.as_slice()], neighborhood.weight(&offset));
                    if !advance(&mut j, &lo, &hi) {
                        break;
                    }
                }
            }
            out.push(reducer.finish(acc));
        }
        out
    });

    Ok(values)
}

/// Window of `bounds` around `c`, clipped to `[0, shape)`, written into
/// `lo..=hi`. Returns `false` when the clipped window is empty.
fn clip_window(bounds: &Region, c: &[isize], shape: &[usize], lo: &mut [isize], hi: &mut [isize]) -> bool {
    for axis in 0..c.len() {
        lo[axis] = (bounds.min()[axis] + c[axis]).max(0);
        hi[axis] = (bounds.max()[axis] + c[axis]).min(shape[axis] as isize - 1);
        if hi[axis] < lo[axis] {
            return false;
        }
    }
    true
}

/// Step `j` to the next index of `lo..=hi` in row-major order.
fn advance(j: &mut [isize], lo: &[isize], hi: &[isize]) -> bool {
    for axis in (0..j.len()).rev() {
        if j[axis] < hi[axis] {
            j[axis] += 1;
            return true;
        }
        j[axis] = lo[axis];
    }
    false
}
