//! A fixed-dimension point with a Euclidean metric.

use std::ops::{Index, IndexMut};

use geo_traits::{CoordTrait, Dimensions};

use crate::error::{KnnIndexError, Result};
use crate::r#type::Coordinate;

/// A point in `D`-dimensional space.
///
/// The dimension is part of the type, so two points can only be compared or measured against
/// each other when they share it. Coordinates are read and written with `point[i]`; indexing
/// past `D` panics.
///
/// ```
/// use knn_index::Point;
///
/// let mut p = Point::new([0., 0.]);
/// p[1] = 4.;
/// let q = Point::new([3., 0.]);
/// assert_eq!(p.distance(&q), 5.);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct Point<const D: usize, N: Coordinate = f64> {
    coords: [N; D],
}

// SAFETY: `Point` is a transparent wrapper around `[N; D]`, and `N` is itself `Pod`, so the
// layout has no padding and every bit pattern is valid.
unsafe impl<const D: usize, N: Coordinate> bytemuck::Zeroable for Point<D, N> {}
unsafe impl<const D: usize, N: Coordinate> bytemuck::Pod for Point<D, N> {}

impl<const D: usize, N: Coordinate> Point<D, N> {
    /// Create a point from its coordinates.
    pub const fn new(coords: [N; D]) -> Self {
        Self { coords }
    }

    /// Convert any coordinate implementing [`CoordTrait`] whose dimension is `D`.
    pub fn try_from_coord(coord: &impl CoordTrait<T = N>) -> Result<Self> {
        let actual = coord.dim().size();
        if actual != D {
            return Err(KnnIndexError::DimensionMismatch {
                expected: D,
                actual,
            });
        }
        Ok(Self {
            coords: std::array::from_fn(|i| coord.nth_or_panic(i)),
        })
    }

    /// The number of coordinates of this point.
    #[inline]
    pub const fn dimension(&self) -> usize {
        D
    }

    /// The coordinates of this point.
    #[inline]
    pub fn coords(&self) -> &[N; D] {
        &self.coords
    }

    /// Consume the point, returning its coordinate array.
    pub fn into_inner(self) -> [N; D] {
        self.coords
    }

    /// The coordinate at `index`, or `None` if `index >= D`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        self.coords.get(index).copied()
    }

    /// Iterate over the coordinates in axis order.
    pub fn iter(&self) -> impl Iterator<Item = N> + '_ {
        self.coords.iter().copied()
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn sq_distance(&self, other: &Self) -> N {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .fold(N::zero(), |acc, (&a, &b)| {
                let d = a - b;
                acc + d * d
            })
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Self) -> N {
        self.sq_distance(other).sqrt()
    }
}

/// Euclidean distance between two points of the same dimension.
#[inline]
pub fn distance<const D: usize, N: Coordinate>(a: &Point<D, N>, b: &Point<D, N>) -> N {
    a.distance(b)
}

impl<const D: usize, N: Coordinate> Default for Point<D, N> {
    /// The origin.
    fn default() -> Self {
        Self {
            coords: [N::zero(); D],
        }
    }
}

impl<const D: usize, N: Coordinate> From<[N; D]> for Point<D, N> {
    fn from(coords: [N; D]) -> Self {
        Self { coords }
    }
}

impl<const D: usize, N: Coordinate> From<Point<D, N>> for [N; D] {
    fn from(point: Point<D, N>) -> Self {
        point.coords
    }
}

impl<const D: usize, N: Coordinate> Index<usize> for Point<D, N> {
    type Output = N;

    #[inline]
    fn index(&self, index: usize) -> &N {
        &self.coords[index]
    }
}

impl<const D: usize, N: Coordinate> IndexMut<usize> for Point<D, N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut N {
        &mut self.coords[index]
    }
}

/// `x` and `y` panic for points with fewer than one and two coordinates respectively.
impl<const D: usize, N: Coordinate> CoordTrait for Point<D, N> {
    type T = N;

    fn dim(&self) -> Dimensions {
        match D {
            2 => Dimensions::Xy,
            3 => Dimensions::Xyz,
            4 => Dimensions::Xyzm,
            n => Dimensions::Unknown(n),
        }
    }

    fn x(&self) -> Self::T {
        self.coords[0]
    }

    fn y(&self) -> Self::T {
        self.coords[1]
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        self.coords[n]
    }
}
