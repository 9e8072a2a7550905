//! A priority queue that keeps only the `max_size` lowest priorities it has seen.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{KnnIndexError, Result};
use crate::r#type::Coordinate;

/// A retained item with its priority and arrival order.
#[derive(Debug, Clone)]
struct QueueEntry<T, N: Coordinate> {
    item: T,
    priority: N,
    seq: u64,
}

impl<T, N: Coordinate> PartialEq for QueueEntry<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, N: Coordinate> Eq for QueueEntry<T, N> {}

impl<T, N: Coordinate> Ord for QueueEntry<T, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // NaN priorities are not allowed, so this only panics on NaN
        self.priority
            .partial_cmp(&other.priority)
            .unwrap()
            .then(self.seq.cmp(&other.seq))
    }
}

impl<T, N: Coordinate> PartialOrd for QueueEntry<T, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A size-capped min-priority queue.
///
/// Once full, an incoming entry is kept only if its priority is strictly lower than the current
/// [`worst`][Self::worst], in which case the worst entry is evicted. Entries with equal priority
/// are dequeued in the order they were enqueued. Priorities must not be NaN.
///
/// ```
/// use knn_index::BoundedPriorityQueue;
///
/// let mut queue = BoundedPriorityQueue::new(2);
/// queue.enqueue("far", 9.);
/// queue.enqueue("near", 1.);
/// queue.enqueue("middle", 4.);
///
/// assert_eq!(queue.len(), 2);
/// assert_eq!(queue.worst().unwrap(), 4.);
/// assert_eq!(queue.dequeue_min().unwrap(), ("near", 1.));
/// ```
#[derive(Debug, Clone)]
pub struct BoundedPriorityQueue<T, N: Coordinate = f64> {
    /// Max-heap on `(priority, seq)`: the top is the worst entry, and the latest arrival among
    /// equally bad ones.
    heap: BinaryHeap<QueueEntry<T, N>>,
    max_size: usize,
    next_seq: u64,
}

impl<T, N: Coordinate> BoundedPriorityQueue<T, N> {
    /// Create an empty queue that retains at most `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            max_size,
            next_seq: 0,
        }
    }

    /// Offer `item` with `priority`.
    ///
    /// Returns `true` if the item was retained.
    pub fn enqueue(&mut self, item: T, priority: N) -> bool {
        if self.is_full() {
            match self.heap.peek() {
                Some(worst) if priority < worst.priority => {
                    self.heap.pop();
                }
                // Also reached when max_size is 0.
                _ => return false,
            }
        }

        self.heap.push(QueueEntry {
            item,
            priority,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        true
    }

    /// Remove and return the entry with the lowest priority.
    ///
    /// This scans and rebuilds the heap, so it costs O(len).
    pub fn dequeue_min(&mut self) -> Result<(T, N)> {
        let mut entries = std::mem::take(&mut self.heap).into_vec();
        let (index, _) = entries
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .ok_or(KnnIndexError::EmptyQueue)?;
        let entry = entries.swap_remove(index);
        self.heap = BinaryHeap::from(entries);
        Ok((entry.item, entry.priority))
    }

    /// The priority of the worst (highest priority value) retained entry.
    pub fn worst(&self) -> Result<N> {
        self.heap
            .peek()
            .map(|entry| entry.priority)
            .ok_or(KnnIndexError::EmptyQueue)
    }

    /// The priority of the best (lowest priority value) retained entry.
    pub fn best(&self) -> Result<N> {
        self.heap
            .iter()
            .min()
            .map(|entry| entry.priority)
            .ok_or(KnnIndexError::EmptyQueue)
    }

    /// The number of retained entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// The most entries this queue will retain.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Whether no entry is retained.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether another entry can only be retained by evicting the worst one.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.max_size
    }

    /// Iterate over the retained entries from best to worst.
    pub fn iter(&self) -> impl Iterator<Item = (&T, N)> + '_ {
        let mut entries: Vec<&QueueEntry<T, N>> = self.heap.iter().collect();
        entries.sort_unstable();
        entries.into_iter().map(|entry| (&entry.item, entry.priority))
    }

    /// Consume the queue, returning its entries from best to worst.
    pub fn into_sorted_vec(self) -> Vec<(T, N)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|entry| (entry.item, entry.priority))
            .collect()
    }
}
