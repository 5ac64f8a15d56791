//! # ndfocal Core
//!
//! Core types and traits for local filtering of N-dimensional arrays.
//!
//! This crate provides:
//! - `Region`: inclusive boxes of multi-indices and their traversal
//! - `Neighborhood`: boxes and coefficient kernels around each position
//! - Element kinds and the conversion rules between kernel coefficients
//! - `ball`: discrete balls for isotropic structuring elements
//! - Algorithm traits for consistent API

pub mod error;
pub mod window;

pub use error::{Error, Result};
pub use window::{
    ball, BoxNeighborhood, Coefficient, ElementKind, FloatElement, Kernel, MaskEncoding,
    Neighborhood, NeighborhoodSpec, Numeric, Promote, Promoted, Region, StructuringElement,
    MAX_BALL_CELLS,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::window::{
        ball, BoxNeighborhood, Kernel, MaskEncoding, Neighborhood, NeighborhoodSpec, Promote,
        Region, StructuringElement,
    };
    pub use crate::Algorithm;
}

/// Core trait for all filters in ndfocal.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
