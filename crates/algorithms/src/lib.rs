//! # ndfocal Algorithms
//!
//! Local filters for N-dimensional arrays.
//!
//! ## Available Algorithm Categories
//!
//! - **focal**: the generic local filter engine, convolution, local mean
//! - **morphology**: erosion, dilation, opening, closing, gradient,
//!   top-hat and bottom-hat
//!
//! Every filter visits, for each cell, the neighborhood's bounding box
//! shifted onto the cell and clipped to the array. Nothing is padded.

pub mod focal;
pub mod morphology;

mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::focal::{
        convolve, convolve_into, local_filter, local_map, local_mean, local_mean_into, Convolve,
        ConvolveParams, FnReduce, LocalMean, LocalMeanParams, LocalReduce,
    };
    pub use crate::morphology::{
        bottom_hat, bottom_hat_smoothed, closing, dilate, erode, gradient, local_extrema,
        opening, top_hat, top_hat_smoothed, BottomHat, BottomHatParams, Closing, ClosingParams,
        Dilate, DilateParams, Erode, ErodeParams, Gradient, GradientParams, Opening,
        OpeningParams, TopHat, TopHatParams,
    };
    pub use ndfocal_core::prelude::*;
}
