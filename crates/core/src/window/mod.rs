//! Windows for local filters: regions, neighborhoods and kernels

mod ball;
mod convert;
mod descriptor;
mod element;
mod kernel;
mod neighborhood;
mod region;

pub use ball::{ball, strict_floor, MAX_BALL_CELLS};
pub use convert::{Promote, Promoted};
pub use descriptor::{NeighborhoodSpec, StructuringElement};
pub use element::{Coefficient, ElementKind, FloatElement, MaskEncoding, Numeric};
pub use kernel::Kernel;
pub use neighborhood::{BoxNeighborhood, Neighborhood};
pub use region::{Region, RegionCursor, RegionIter};
