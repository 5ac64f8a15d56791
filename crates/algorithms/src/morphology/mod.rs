//! Mathematical morphology on N-dimensional arrays
//!
//! Classical morphological operations, all built on the local filter engine:
//! - **Erosion**: minimum filter (shrinks bright regions)
//! - **Dilation**: maximum filter (expands bright regions)
//! - **Opening**: erosion then dilation (removes small bright features)
//! - **Closing**: dilation then erosion (fills small dark gaps)
//! - **Gradient**: dilation minus erosion (edge detection)
//! - **Top-hat**: original minus opening (bright feature extraction)
//! - **Bottom-hat**: closing minus original (dark feature extraction)
//!
//! Structuring elements are boxes, boolean masks (flat) or numeric kernels
//! (grey-level structuring functions). Every operation has an allocating
//! form working in the kind of its input and an `_into` form working in
//! the kind of its destination.

mod closing;
mod dilate;
mod erode;
mod gradient;
mod opening;
mod tophat;

pub use closing::{closing, closing_into, Closing, ClosingParams};
pub use dilate::{dilate, dilate_into, Dilate, DilateParams};
pub use erode::{erode, erode_into, Erode, ErodeParams};
pub use gradient::{gradient, gradient_into, local_extrema, Gradient, GradientParams};
pub use opening::{opening, opening_into, Opening, OpeningParams};
pub use tophat::{
    bottom_hat, bottom_hat_into, bottom_hat_smoothed, bottom_hat_smoothed_into, top_hat,
    top_hat_into, top_hat_smoothed, top_hat_smoothed_into, BottomHat, BottomHatParams, TopHat,
    TopHatParams,
};
