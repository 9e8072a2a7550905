//! Helpers shared by the randomized tests: seeded point sets and a brute-force k-NN scan.

use rand::rngs::StdRng;
use rand::Rng;

use crate::point::Point;


/// `n` points with coordinates in `[-100, 100)`, labelled with one of `num_labels` classes.
pub(crate) fn random_points<const D: usize>(
    rng: &mut StdRng,
    n: usize,
    num_labels: u8,
) -> Vec<(Point<D>, u8)> {
    (0..n)
        .map(|_| {
            let coords: [f64; D] = std::array::from_fn(|_| rng.gen_range(-100.0..100.0));
            (Point::new(coords), rng.gen_range(0..num_labels))
        })
        .collect()
}

/// The `k` entries nearest to `query` by linear scan, nearest first.
pub(crate) fn brute_force_knn<const D: usize>(
    entries: &[(Point<D>, u8)],
    query: &Point<D>,
    k: usize,
) -> Vec<(Point<D>, u8, f64)> {
    let mut all: Vec<(Point<D>, u8, f64)> = entries
        .iter()
        .map(|(point, label)| (*point, *label, point.distance(query)))
        .collect();
    all.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap());
    all.truncate(k);
    all
}

/// Majority vote over labels given nearest first: the first label whose count beats every
/// earlier maximum wins.
pub(crate) fn brute_force_vote(labels: &[u8]) -> u8 {
    let mut best = u8::default();
    let mut best_count = 0;
    for label in labels {
        let count = labels.iter().filter(|l| *l == label).count();
        if count > best_count {
            best = *label;
            best_count = count;
        }
    }
    best
}
