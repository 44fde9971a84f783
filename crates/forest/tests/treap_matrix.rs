use split_forest::{ForestError, Treap};

#[test]
fn order_statistics_scenario_matrix() {
    let mut tree = Treap::with_seed(1);
    for key in [5, 3, 8, 1, 4] {
        tree.insert(key);
    }
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.select(3), Ok(&4));
    assert_eq!(tree.rank(&8), 4);

    assert!(tree.delete(&3));
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.rank(&8), 3);
    assert_eq!(tree.select(1), Ok(&1));
    assert_eq!(tree.select(4), Ok(&8));
    assert!(tree.is_well_formed());
}

#[test]
fn select_out_of_range_is_an_error_not_a_clamp() {
    let tree: Treap<i32> = [10, 20, 30].into_iter().collect();
    assert_eq!(
        tree.select(0),
        Err(ForestError::OutOfRange { rank: 0, len: 3 })
    );
    assert_eq!(
        tree.select(4),
        Err(ForestError::OutOfRange { rank: 4, len: 3 })
    );

    let empty: Treap<i32> = Treap::new();
    assert_eq!(
        empty.select(1),
        Err(ForestError::OutOfRange { rank: 1, len: 0 })
    );
}

#[test]
fn duplicate_keys_form_a_multiset() {
    let mut tree = Treap::with_seed(2);
    for key in [7, 7, 7, 3, 3, 9] {
        tree.insert(key);
    }
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.rank(&7), 2); // strictly less: the two 3s
    assert_eq!(tree.select(3), Ok(&7));
    assert_eq!(tree.select(5), Ok(&7));
    assert_eq!(tree.count_range(&7, &7), 3);

    // delete removes exactly one occurrence
    assert!(tree.delete(&7));
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.count_range(&7, &7), 2);
    assert!(tree.is_well_formed());
}

#[test]
fn deleting_an_absent_key_is_a_noop() {
    let mut tree: Treap<i32> = [1, 2, 3].into_iter().collect();
    assert!(!tree.delete(&42));
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);

    assert!(tree.delete(&2));
    assert!(!tree.delete(&2)); // second delete of the same key: unchanged
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn contains_and_count_range() {
    let tree: Treap<i32> = [2, 4, 6, 8, 10].into_iter().collect();
    assert!(tree.contains(&6));
    assert!(!tree.contains(&5));
    assert_eq!(tree.count_range(&3, &9), 3); // 4, 6, 8
    assert_eq!(tree.count_range(&4, &4), 1);
    assert_eq!(tree.count_range(&9, &3), 0); // inverted bounds
    assert_eq!(tree.first(), Some(&2));
    assert_eq!(tree.last(), Some(&10));
}

#[test]
fn from_sorted_and_iteration() {
    let tree = Treap::from_sorted(vec![1, 1, 2, 3, 5, 8, 13]);
    assert_eq!(tree.len(), 7);
    assert!(tree.is_well_formed());
    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        vec![1, 1, 2, 3, 5, 8, 13]
    );
    assert_eq!(tree.into_sorted_vec(), vec![1, 1, 2, 3, 5, 8, 13]);
}

#[test]
fn split_off_then_append_is_the_identity() {
    let mut tree: Treap<i32> = (1..=20).collect();
    let tail = tree.split_off_at(12);
    assert_eq!(tree.len(), 12);
    assert_eq!(tail.len(), 8);
    assert_eq!(tree.last(), Some(&12));
    assert_eq!(tail.first(), Some(&13));
    assert!(tree.is_well_formed());
    assert!(tail.is_well_formed());

    tree.append(tail);
    assert_eq!(tree.len(), 20);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), (1..=20).collect::<Vec<_>>());
    assert!(tree.is_well_formed());
}

#[test]
fn split_off_past_the_end_yields_an_empty_tree() {
    let mut tree: Treap<i32> = (1..=5).collect();
    let tail = tree.split_off_at(9);
    assert!(tail.is_empty());
    assert_eq!(tree.len(), 5);
}

#[test]
fn interleaved_inserts_and_deletes_stay_well_formed() {
    let mut tree = Treap::with_seed(3);
    for key in 0..200 {
        tree.insert(key * 37 % 101);
    }
    for key in 0..100 {
        tree.delete(&(key * 53 % 101));
    }
    assert!(tree.is_well_formed());
    assert_eq!(tree.len(), 100);

    // rank/select inverse on the survivors (duplicates shift ranks, so walk
    // via select only)
    for k in 1..=tree.len() {
        let key = *tree.select(k).unwrap();
        assert!(tree.rank(&key) < k);
        assert!(tree.rank(&key) + tree.count_range(&key, &key) >= k);
    }
}
