use std::fmt::Debug;

use num_traits::{Float, NumCast};

/// A trait for types that can be used as point coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Distances are computed
/// with a square root and compared against axis offsets, so only IEEE floats are accepted.
/// NaN coordinates are not supported: they never compare equal and break the ordering used
/// while routing points through the tree.
pub trait Coordinate:
    private::Sealed + Float + NumCast + Debug + Default + Send + Sync + bytemuck::Pod
{
}

impl Coordinate for f32 {}

impl Coordinate for f64 {}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
