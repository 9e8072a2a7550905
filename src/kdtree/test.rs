use crate::error::KnnIndexError;
use crate::kdtree::SpatialTree;
use crate::point::Point;

fn points() -> Vec<[f64; 2]> {
    let coords: Vec<[i32; 2]> = vec![
        [54, 1],
        [97, 21],
        [65, 35],
        [33, 54],
        [95, 39],
        [54, 3],
        [53, 54],
        [84, 72],
        [33, 34],
        [43, 15],
        [52, 83],
        [81, 23],
        [1, 61],
        [38, 74],
        [11, 91],
        [24, 56],
        [90, 31],
        [25, 57],
        [46, 61],
        [29, 69],
    ];

    coords
        .into_iter()
        .map(|[x, y]| [x.into(), y.into()])
        .collect()
}

fn make_index() -> SpatialTree<2, usize> {
    points()
        .into_iter()
        .enumerate()
        .map(|(i, coords)| (Point::new(coords), i))
        .collect()
}

#[test]
fn empty_tree() {
    let tree: SpatialTree<3, String> = SpatialTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.dimension(), 3);
    assert!(tree.root().is_none());
    assert_eq!(tree.iter().count(), 0);
    assert!(!tree.contains(&Point::new([0., 0., 0.])));
}

#[test]
fn size_counts_distinct_points() {
    let mut tree = make_index();
    assert_eq!(tree.len(), 20);

    // Re-inserting every point must not grow the tree.
    for (i, coords) in points().into_iter().enumerate() {
        assert_eq!(tree.insert(Point::new(coords), i + 100), Some(i));
    }
    assert_eq!(tree.len(), 20);
}

#[test]
fn inserted_points_are_found() {
    let tree = make_index();
    for (i, coords) in points().into_iter().enumerate() {
        let point = Point::new(coords);
        assert!(tree.contains(&point), "contains {:?}", coords);
        assert_eq!(tree.at(&point), Ok(&i));
        assert_eq!(tree[&point], i);
    }
    assert!(!tree.contains(&Point::new([54., 2.])));
}

#[test]
fn reinsert_overwrites_value() {
    let mut tree = SpatialTree::new();
    let p = Point::new([1., 2., 3.]);
    assert_eq!(tree.insert(p, "old"), None);
    assert_eq!(tree.insert(p, "new"), Some("old"));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.at(&p), Ok(&"new"));
}

#[test]
fn at_missing_point_is_not_found() {
    let mut tree = make_index();
    let missing = Point::new([-1., -1.]);
    assert_eq!(tree.at(&missing), Err(KnnIndexError::PointNotFound));
    assert_eq!(tree.at_mut(&missing), Err(KnnIndexError::PointNotFound));
    assert_eq!(tree.get(&missing), None);
    // Lookups never insert.
    assert_eq!(tree.len(), 20);
    assert!(!tree.contains(&missing));
}

#[test]
fn at_mut_updates_in_place() {
    let mut tree = make_index();
    let p = Point::new([65., 35.]);
    *tree.at_mut(&p).unwrap() = 1000;
    *tree.get_mut(&Point::new([97., 21.])).unwrap() += 1;
    assert_eq!(tree.at(&p), Ok(&1000));
    assert_eq!(tree[&Point::new([97., 21.])], 2);
    assert_eq!(tree.len(), 20);
}

#[test]
fn entry_or_default_inserts_missing_point() {
    let mut tree = make_index();
    let missing = Point::new([-1., -1.]);

    assert_eq!(*tree.entry_or_default(missing), 0);
    assert!(tree.contains(&missing));
    assert_eq!(tree.len(), 21);

    *tree.entry_or_default(missing) = 7;
    assert_eq!(tree.at(&missing), Ok(&7));
    assert_eq!(tree.len(), 21);

    // Existing points keep their value.
    assert_eq!(*tree.entry_or_default(Point::new([54., 1.])), 0);
    assert_eq!(*tree.entry_or_default(Point::new([97., 21.])), 1);
}

#[test]
#[should_panic]
fn index_missing_point_panics() {
    let tree = make_index();
    let _value = tree[&Point::new([-1., -1.])];
}

#[test]
fn equal_split_coordinate_routes_right() {
    let mut tree = SpatialTree::new();
    tree.insert(Point::new([5., 5.]), 'r');
    // Same x as the root: not strictly less, so it must go right.
    tree.insert(Point::new([5., 0.]), 'a');
    // Strictly less x goes left.
    tree.insert(Point::new([4.9, 9.]), 'b');
    // At level 1 the split is on y; equal y goes right again.
    tree.insert(Point::new([6., 0.]), 'c');

    let root = tree.root().unwrap();
    assert_eq!(root.level(), 0);
    assert_eq!(root.axis(), 0);

    let right = root.right_child().unwrap();
    assert_eq!(right.point(), &Point::new([5., 0.]));
    assert_eq!(right.level(), 1);
    assert_eq!(right.axis(), 1);
    assert!(right.left_child().is_none());

    let right_right = right.right_child().unwrap();
    assert_eq!(right_right.value(), &'c');
    assert_eq!(right_right.level(), 2);
    assert_eq!(right_right.axis(), 0);
    assert!(right_right.is_leaf());

    let left = root.left_child().unwrap();
    assert_eq!(left.value(), &'b');
    assert!(root.is_parent());

    for c in ['r', 'a', 'b', 'c'] {
        let (point, _) = tree.iter().find(|(_, v)| **v == c).unwrap();
        assert!(tree.contains(point));
    }
}

#[test]
fn levels_follow_insertion_depth() {
    // Sorted input degenerates into a right-leaning chain.
    let tree: SpatialTree<1, usize> = (0..50).map(|i| (Point::new([i as f64]), i)).collect();

    let mut node = tree.root();
    let mut depth = 0;
    while let Some(current) = node {
        assert_eq!(current.level(), depth);
        assert_eq!(*current.value(), depth);
        assert!(current.left_child().is_none());
        node = current.right_child();
        depth += 1;
    }
    assert_eq!(depth, 50);
}

#[test]
fn iter_is_pre_order() {
    let mut tree = SpatialTree::new();
    tree.insert(Point::new([5.]), 0);
    tree.insert(Point::new([2.]), 1);
    tree.insert(Point::new([8.]), 2);
    tree.insert(Point::new([1.]), 3);
    tree.insert(Point::new([3.]), 4);
    tree.insert(Point::new([9.]), 5);

    let values: Vec<i32> = tree.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, vec![0, 1, 3, 4, 2, 5]);

    let from_ref: Vec<i32> = (&tree).into_iter().map(|(_, v)| *v).collect();
    assert_eq!(from_ref, values);
}

#[test]
fn clone_is_independent() {
    let original = make_index();
    let mut copy = original.clone();
    let extra = Point::new([500., 500.]);

    copy.insert(extra, 99);
    *copy.at_mut(&Point::new([54., 1.])).unwrap() = 42;
    assert_eq!(copy.len(), 21);
    assert_eq!(original.len(), 20);
    assert!(!original.contains(&extra));
    assert_eq!(original.at(&Point::new([54., 1.])), Ok(&0));

    let mut original = original;
    let other = Point::new([-500., -500.]);
    original.insert(other, 1);
    assert!(!copy.contains(&other));
    assert_eq!(copy.len(), 21);
}

#[test]
fn assign_over_existing_tree() {
    let source = make_index();
    let mut target: SpatialTree<2, usize> = (0..5)
        .map(|i| (Point::new([i as f64, 0.]), i))
        .collect();
    assert_eq!(target.len(), 5);

    target = source.clone();
    assert_eq!(target.len(), source.len());
    assert!(!target.contains(&Point::new([1., 0.])));
    for (point, value) in source.iter() {
        assert_eq!(target.at(point), Ok(value));
    }
}

#[test]
fn from_interleaved() {
    let coords = [0., 0., 10., 10., 11., 11.];
    let tree: SpatialTree<2, &str> =
        SpatialTree::from_interleaved(&coords[..], vec!["A", "B", "B"]).unwrap();
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.at(&Point::new([10., 10.])), Ok(&"B"));

    let err = SpatialTree::<2, &str>::from_interleaved(&coords[..5], vec!["A", "B"]).unwrap_err();
    assert_eq!(
        err,
        KnnIndexError::InterleavedLength {
            len: 5,
            dimension: 2
        }
    );

    let err = SpatialTree::<3, &str>::from_interleaved(&coords[..], vec!["A"]).unwrap_err();
    assert_eq!(
        err,
        KnnIndexError::LengthMismatch {
            points: 2,
            values: 1
        }
    );
}

#[test]
fn knn_value_concrete_scenario() {
    let mut tree = SpatialTree::new();
    tree.insert(Point::new([0., 0.]), "A");
    tree.insert(Point::new([10., 10.]), "B");
    tree.insert(Point::new([11., 11.]), "B");

    assert_eq!(tree.knn_value(&Point::new([10.5, 10.5]), 2), "B");
    assert_eq!(tree.knn_value(&Point::new([1., 1.]), 1), "A");
    // Every point takes part when k exceeds the size.
    assert_eq!(tree.knn_value(&Point::new([0., 0.]), 10), "B");
}

#[test]
fn knn_value_of_stored_point_with_k_1() {
    let tree = make_index();
    for (i, coords) in points().into_iter().enumerate() {
        assert_eq!(tree.knn_value(&Point::new(coords), 1), i);
    }
}

#[test]
fn knn_value_on_empty_tree_is_default() {
    let tree: SpatialTree<2, String> = SpatialTree::new();
    for k in [0, 1, 5] {
        assert_eq!(tree.knn_value(&Point::new([3., 4.]), k), String::new());
    }
}

#[test]
fn knn_value_with_k_0_is_default() {
    let tree = make_index();
    assert_eq!(tree.knn_value(&Point::new([54., 1.]), 0), 0);
    assert!(tree.knn(&Point::new([54., 1.]), 0).is_empty());
}

#[test]
fn knn_value_tie_goes_to_nearest_first_maximum() {
    let mut tree = SpatialTree::new();
    tree.insert(Point::new([0.]), 'z');
    tree.insert(Point::new([2.]), 'a');
    tree.insert(Point::new([-3.]), 'z');
    tree.insert(Point::new([4.]), 'a');

    // Both values appear twice among the 4 nearest; 'z' is scanned first.
    assert_eq!(tree.knn_value(&Point::new([0.1]), 4), 'z');
    // Nearest first is now 'a', which reaches count 2 before 'z' can exceed it.
    assert_eq!(tree.knn_value(&Point::new([2.1]), 4), 'a');
}

#[test]
fn knn_returns_neighbors_nearest_first() {
    let tree = make_index();
    let query = Point::new([50., 50.]);
    let neighbors = tree.knn(&query, 4);

    let ids: Vec<usize> = neighbors.iter().map(|(_, id, _)| **id).collect();
    // (53, 54), (46, 61), (33, 54), (65, 35)
    assert_eq!(ids, vec![6, 18, 3, 2]);

    for window in neighbors.windows(2) {
        assert!(window[0].2 <= window[1].2);
    }
    for (point, _, distance) in &neighbors {
        assert_eq!(point.distance(&query), *distance);
    }
}
