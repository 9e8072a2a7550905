//! An incremental, unbalanced K-D Tree with k-nearest-neighbor voting.

#![warn(missing_docs)]

mod index;
mod knn;
mod traversal;

pub use index::SpatialTree;
pub use traversal::{Iter, Node};

#[cfg(test)]
mod test;
