//! Utilities to traverse the SpatialTree structure.

use tinyvec::TinyVec;

use crate::kdtree::index::{SpatialTree, TreeNode};
use crate::point::Point;
use crate::r#type::Coordinate;

/// A read-only handle onto one node of a [`SpatialTree`].
#[derive(Debug)]
pub struct Node<'a, const D: usize, V, N: Coordinate> {
    /// The tree that this node is a reference onto
    tree: &'a SpatialTree<D, V, N>,
    index: usize,
}

// Derived impls would require `V: Clone`.
impl<const D: usize, V, N: Coordinate> Clone for Node<'_, D, V, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<const D: usize, V, N: Coordinate> Copy for Node<'_, D, V, N> {}

impl<'a, const D: usize, V, N: Coordinate> Node<'a, D, V, N> {
    pub(crate) fn new(tree: &'a SpatialTree<D, V, N>, index: usize) -> Self {
        Self { tree, index }
    }

    #[inline]
    fn node(&self) -> &'a TreeNode<D, V, N> {
        &self.tree.nodes[self.index]
    }

    /// The point stored at this node.
    pub fn point(&self) -> &'a Point<D, N> {
        &self.node().point
    }

    /// The value stored at this node.
    pub fn value(&self) -> &'a V {
        &self.node().value
    }

    /// Depth of this node; the root is at level 0.
    pub fn level(&self) -> usize {
        self.node().level
    }

    /// The coordinate axis this node splits its children on.
    pub fn axis(&self) -> usize {
        self.node().axis()
    }

    /// The subtree of points whose coordinate on [`axis`][Self::axis] is strictly less than
    /// this node's.
    pub fn left_child(&self) -> Option<Node<'a, D, V, N>> {
        self.node().left.map(|index| Node::new(self.tree, index))
    }

    /// The subtree of points whose coordinate on [`axis`][Self::axis] is greater than or equal
    /// to this node's.
    pub fn right_child(&self) -> Option<Node<'a, D, V, N>> {
        self.node().right.map(|index| Node::new(self.tree, index))
    }

    /// Returns `true` if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        let node = self.node();
        node.left.is_none() && node.right.is_none()
    }

    /// Returns `true` if this node has at least one child.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}

/// Pre-order iterator over the points and values of a [`SpatialTree`].
#[derive(Debug)]
pub struct Iter<'a, const D: usize, V, N: Coordinate> {
    tree: &'a SpatialTree<D, V, N>,
    // Use TinyVec to avoid heap allocations for shallow trees
    stack: TinyVec<[usize; 32]>,
}

impl<'a, const D: usize, V, N: Coordinate> Iterator for Iter<'a, D, V, N> {
    type Item = (&'a Point<D, N>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.tree.nodes[index];
        // Pushed in backwards order to what gets popped
        if let Some(right) = node.right {
            self.stack.push(right);
        }
        if let Some(left) = node.left {
            self.stack.push(left);
        }
        Some((&node.point, &node.value))
    }
}

impl<const D: usize, V, N: Coordinate> SpatialTree<D, V, N> {
    /// Access the root node of the tree for manual traversal.
    pub fn root(&self) -> Option<Node<'_, D, V, N>> {
        self.root_index().map(|index| Node::new(self, index))
    }

    /// Iterate over all points and their values in pre-order.
    pub fn iter(&self) -> Iter<'_, D, V, N> {
        let mut stack = TinyVec::new();
        if let Some(root) = self.root_index() {
            stack.push(root);
        }
        Iter { tree: self, stack }
    }
}

impl<'a, const D: usize, V, N: Coordinate> IntoIterator for &'a SpatialTree<D, V, N> {
    type Item = (&'a Point<D, N>, &'a V);
    type IntoIter = Iter<'a, D, V, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
