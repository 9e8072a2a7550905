use std::ops::Index;

use log::trace;

use crate::error::{KnnIndexError, Result};
use crate::point::Point;
use crate::r#type::Coordinate;

/// One stored point. Children are indices into the owning tree's node arena.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<const D: usize, V, N: Coordinate> {
    pub(crate) point: Point<D, N>,
    pub(crate) value: V,
    /// Depth from the root. The splitting axis is `level % D`.
    pub(crate) level: usize,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
}

impl<const D: usize, V, N: Coordinate> TreeNode<D, V, N> {
    #[inline]
    pub(crate) fn axis(&self) -> usize {
        self.level % D
    }

    /// Which child `point` is routed to: strictly less goes left, greater or equal goes right.
    #[inline]
    pub(crate) fn side_of(&self, point: &Point<D, N>) -> Side {
        let axis = self.axis();
        if point[axis] < self.point[axis] {
            Side::Left
        } else {
            Side::Right
        }
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Result of walking the tree towards a point.
enum Slot {
    Occupied(usize),
    /// Where a new node for the point would be linked. `parent` is `None` for an empty tree.
    Vacant {
        parent: Option<(usize, Side)>,
        level: usize,
    },
}

/// An unbalanced k-d tree mapping `D`-dimensional points to values.
///
/// Points are inserted one at a time. At depth `d` a point is compared with the node on axis
/// `d % D`: a strictly smaller coordinate goes to the left subtree and a greater or equal one
/// to the right. The tree is never rebalanced and points are never removed.
///
/// Nodes live in a single arena owned by the tree, so cloning is a structural deep copy and
/// dropping releases every node exactly once.
///
/// ```
/// use knn_index::{Point, SpatialTree};
///
/// let mut tree = SpatialTree::new();
/// tree.insert(Point::new([0., 0.]), "A");
/// tree.insert(Point::new([10., 10.]), "B");
/// tree.insert(Point::new([11., 11.]), "B");
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.at(&Point::new([0., 0.])).unwrap(), &"A");
/// assert_eq!(tree.knn_value(&Point::new([10.5, 10.5]), 2), "B");
/// ```
#[derive(Debug, Clone)]
pub struct SpatialTree<const D: usize, V, N: Coordinate = f64> {
    /// The root, when present, is always the first node.
    pub(crate) nodes: Vec<TreeNode<D, V, N>>,
}

impl<const D: usize, V, N: Coordinate> SpatialTree<D, V, N> {
    const NONZERO_DIMENSION: () = assert!(D > 0, "SpatialTree dimension must be at least 1");

    /// Create an empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty tree with room for `capacity` points before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO_DIMENSION;
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Build a tree from a flat `[x0, y0, ..., x1, y1, ...]` coordinate buffer and one value per
    /// point. Points are inserted in buffer order.
    pub fn from_interleaved(coords: &[N], values: Vec<V>) -> Result<Self> {
        let points: &[Point<D, N>] =
            bytemuck::try_cast_slice(coords).map_err(|_| KnnIndexError::InterleavedLength {
                len: coords.len(),
                dimension: D,
            })?;
        if points.len() != values.len() {
            return Err(KnnIndexError::LengthMismatch {
                points: points.len(),
                values: values.len(),
            });
        }

        let mut tree = Self::with_capacity(points.len());
        for (point, value) in points.iter().zip(values) {
            tree.insert(*point, value);
        }
        Ok(tree)
    }

    /// The dimension of the points stored in this tree.
    #[inline]
    pub const fn dimension(&self) -> usize {
        D
    }

    /// The number of distinct points in this tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no point has been inserted yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub(crate) fn root_index(&self) -> Option<usize> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    fn locate(&self, point: &Point<D, N>) -> Slot {
        let mut current = self.root_index();
        let mut parent = None;
        let mut level = 0;

        while let Some(index) = current {
            let node = &self.nodes[index];
            if node.point == *point {
                return Slot::Occupied(index);
            }
            let side = node.side_of(point);
            parent = Some((index, side));
            current = node.child(side);
            level += 1;
        }

        Slot::Vacant { parent, level }
    }

    fn find(&self, point: &Point<D, N>) -> Option<usize> {
        match self.locate(point) {
            Slot::Occupied(index) => Some(index),
            Slot::Vacant { .. } => None,
        }
    }

    /// Append a new node and hook it under `parent`.
    fn link(
        &mut self,
        point: Point<D, N>,
        value: V,
        parent: Option<(usize, Side)>,
        level: usize,
    ) -> usize {
        let index = self.nodes.len();
        self.nodes.push(TreeNode {
            point,
            value,
            level,
            left: None,
            right: None,
        });

        if let Some((parent, side)) = parent {
            let parent = &mut self.nodes[parent];
            match side {
                Side::Left => parent.left = Some(index),
                Side::Right => parent.right = Some(index),
            }
        }

        trace!("linked node {} at level {}", index, level);
        index
    }

    /// Whether a point equal to `point` has been inserted.
    pub fn contains(&self, point: &Point<D, N>) -> bool {
        self.find(point).is_some()
    }

    /// Associate `value` with `point`.
    ///
    /// If the point is already present its value is replaced and the previous value returned;
    /// the number of points does not change.
    pub fn insert(&mut self, point: Point<D, N>, value: V) -> Option<V> {
        match self.locate(&point) {
            Slot::Occupied(index) => {
                trace!("overwrote value of node {}", index);
                Some(std::mem::replace(&mut self.nodes[index].value, value))
            }
            Slot::Vacant { parent, level } => {
                self.link(point, value, parent, level);
                None
            }
        }
    }

    /// A reference to the value at `point`, if present.
    pub fn get(&self, point: &Point<D, N>) -> Option<&V> {
        self.find(point).map(|index| &self.nodes[index].value)
    }

    /// A mutable reference to the value at `point`, if present.
    pub fn get_mut(&mut self, point: &Point<D, N>) -> Option<&mut V> {
        self.find(point).map(|index| &mut self.nodes[index].value)
    }

    /// A reference to the value at `point`.
    ///
    /// Fails with [`KnnIndexError::PointNotFound`] if the point was never inserted. This never
    /// inserts; see [`entry_or_default`][Self::entry_or_default] for that.
    pub fn at(&self, point: &Point<D, N>) -> Result<&V> {
        self.get(point).ok_or(KnnIndexError::PointNotFound)
    }

    /// A mutable reference to the value at `point`.
    ///
    /// Fails with [`KnnIndexError::PointNotFound`] if the point was never inserted.
    pub fn at_mut(&mut self, point: &Point<D, N>) -> Result<&mut V> {
        self.get_mut(point).ok_or(KnnIndexError::PointNotFound)
    }

    /// A mutable reference to the value at `point`, inserting `V::default()` first if the point
    /// is absent.
    ///
    /// ```
    /// use knn_index::{Point, SpatialTree};
    ///
    /// let mut counts: SpatialTree<2, u32> = SpatialTree::new();
    /// let p = Point::new([1., 1.]);
    /// *counts.entry_or_default(p) += 1;
    /// *counts.entry_or_default(p) += 1;
    /// assert_eq!(counts[&p], 2);
    /// ```
    pub fn entry_or_default(&mut self, point: Point<D, N>) -> &mut V
    where
        V: Default,
    {
        let index = match self.locate(&point) {
            Slot::Occupied(index) => index,
            Slot::Vacant { parent, level } => self.link(point, V::default(), parent, level),
        };
        &mut self.nodes[index].value
    }
}

impl<const D: usize, V, N: Coordinate> Default for SpatialTree<D, V, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize, V, N: Coordinate> Index<&Point<D, N>> for SpatialTree<D, V, N> {
    type Output = V;

    /// Panics if `point` is not in the tree.
    fn index(&self, point: &Point<D, N>) -> &V {
        match self.get(point) {
            Some(value) => value,
            None => panic!("point {:?} not found in SpatialTree", point.coords()),
        }
    }
}

impl<const D: usize, V, N: Coordinate> Extend<(Point<D, N>, V)> for SpatialTree<D, V, N> {
    fn extend<I: IntoIterator<Item = (Point<D, N>, V)>>(&mut self, iter: I) {
        for (point, value) in iter {
            self.insert(point, value);
        }
    }
}

impl<const D: usize, V, N: Coordinate> FromIterator<(Point<D, N>, V)> for SpatialTree<D, V, N> {
    fn from_iter<I: IntoIterator<Item = (Point<D, N>, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
