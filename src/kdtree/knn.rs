use std::collections::BTreeMap;

use log::debug;
use tinyvec::TinyVec;

use crate::kdtree::index::SpatialTree;
use crate::point::Point;
use crate::queue::BoundedPriorityQueue;
use crate::r#type::Coordinate;

impl<const D: usize, V, N: Coordinate> SpatialTree<D, V, N> {
    /// Find the `k` stored points nearest to `query`.
    ///
    /// Returns `(point, value, distance)` for each neighbor, nearest first. Fewer than `k`
    /// results are returned when the tree holds fewer than `k` points. Among neighbors at exactly
    /// the same distance, the ones visited first by the search are kept.
    pub fn knn(&self, query: &Point<D, N>, k: usize) -> Vec<(&Point<D, N>, &V, N)> {
        let mut queue: BoundedPriorityQueue<usize, N> = BoundedPriorityQueue::new(k);

        // Each frame is (node index, far). With `far == false` the node is visited; with
        // `far == true` its near subtree is done and the far subtree is considered for descent.
        // Use TinyVec to avoid heap allocations
        let mut stack: TinyVec<[(usize, bool); 32]> = TinyVec::new();
        if let Some(root) = self.root_index() {
            if k > 0 {
                stack.push((root, false));
            }
        }

        let mut visited = 0usize;
        let mut pruned = 0usize;

        while let Some((index, far)) = stack.pop() {
            let node = &self.nodes[index];
            let near_side = node.side_of(query);

            if far {
                let Some(far_child) = node.child(near_side.opposite()) else {
                    continue;
                };
                // Descend if the candidate hypersphere still crosses this splitting plane.
                let axis = node.axis();
                let plane_distance = (query[axis] - node.point[axis]).abs();
                let crosses = !queue.is_full()
                    || queue.worst().map_or(true, |worst| plane_distance < worst);
                if crosses {
                    stack.push((far_child, false));
                } else {
                    pruned += 1;
                }
                continue;
            }

            visited += 1;
            queue.enqueue(index, node.point.distance(query));

            // Pushed in backwards order to what gets popped
            stack.push((index, true));
            if let Some(near_child) = node.child(near_side) {
                stack.push((near_child, false));
            }
        }

        debug!(
            "knn k={} over {} points: visited {}, pruned {} subtrees",
            k,
            self.len(),
            visited,
            pruned
        );

        queue
            .into_sorted_vec()
            .into_iter()
            .map(|(index, distance)| {
                let node = &self.nodes[index];
                (&node.point, &node.value, distance)
            })
            .collect()
    }

    /// The most frequent value among the `k` stored points nearest to `query`.
    ///
    /// Neighbors are scanned nearest first and the first value whose count is strictly greater
    /// than every count seen before it wins, so on an exact tie in counts the value reaching the
    /// top count earliest in that scan is returned. An empty tree or `k == 0` yields
    /// `V::default()`.
    ///
    /// ```
    /// use knn_index::{Point, SpatialTree};
    ///
    /// let tree: SpatialTree<1, &str> = [
    ///     (Point::new([0.]), "low"),
    ///     (Point::new([1.]), "low"),
    ///     (Point::new([9.]), "high"),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// assert_eq!(tree.knn_value(&Point::new([8.]), 1), "high");
    /// assert_eq!(tree.knn_value(&Point::new([8.]), 3), "low");
    /// assert_eq!(tree.knn_value(&Point::new([8.]), 0), "");
    /// ```
    pub fn knn_value(&self, query: &Point<D, N>, k: usize) -> V
    where
        V: Clone + Default + Ord,
    {
        let neighbors = self.knn(query, k);

        let mut counts: BTreeMap<&V, usize> = BTreeMap::new();
        for (_, value, _) in &neighbors {
            *counts.entry(*value).or_insert(0) += 1;
        }

        let mut most_frequent: Option<&V> = None;
        let mut max_count = 0;
        for (_, value, _) in &neighbors {
            let count = counts.get(value).copied().unwrap_or(0);
            if count > max_count {
                most_frequent = Some(*value);
                max_count = count;
            }
        }

        most_frequent.cloned().unwrap_or_default()
    }
}
