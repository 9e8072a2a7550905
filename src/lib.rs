#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
mod point;
mod queue;
mod r#type;

pub use error::KnnIndexError;
pub use kdtree::SpatialTree;
pub use point::{distance, Point};
pub use queue::BoundedPriorityQueue;
pub use r#type::Coordinate;

#[cfg(test)]
pub(crate) mod test;
