//! Local filters over N-dimensional arrays
//!
//! - **engine**: the generic seed / accumulate / finish pass
//! - **reduce**: built-in reducers (extrema, weighted sum, weighted mean)
//! - **convolve**: weighted local sum
//! - **mean**: weighted local mean over windows that shrink at the edges

mod convolve;
mod engine;
mod mean;
mod reduce;

pub use convolve::{convolve, convolve_into, Convolve, ConvolveParams};
pub use engine::{check_shape, local_filter, local_map, FnReduce, LocalReduce};
pub use mean::{local_mean, local_mean_into, LocalMean, LocalMeanParams};
pub use reduce::{Convolution, Dilation, Erosion, LocalExtrema, WeightedMean};
