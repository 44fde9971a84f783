use split_forest::ForestError;
use split_forest_versioned::{VersionError, VersionId, VersionStore};

#[test]
fn version_zero_is_the_committed_empty_tree() {
    let store: VersionStore<i32> = VersionStore::new();
    assert_eq!(store.version_count(), 1);
    assert_eq!(store.latest(), VersionId(0));
    let v0 = store.checkout(VersionId(0)).unwrap();
    assert!(v0.is_empty());
    assert_eq!(v0.to_vec(), Vec::<i32>::new());
}

#[test]
fn old_versions_keep_their_answers_after_later_writes() {
    let mut store = VersionStore::with_seed(5);
    let mut v = store.latest();
    for key in [5, 3, 8, 1, 4] {
        v = store.insert(v, key).unwrap();
    }
    assert_eq!(store.select(v, 3), Ok(&4));
    assert_eq!(store.rank(v, &8), Ok(4));

    let before = v;
    let after = store.delete(v, &3).unwrap();
    assert_eq!(store.rank(after, &8), Ok(3));
    assert_eq!(store.len(after), Ok(4));

    // the pre-delete version is frozen
    assert_eq!(store.rank(before, &8), Ok(4));
    assert_eq!(store.len(before), Ok(5));
    assert_eq!(store.select(before, 3), Ok(&4));
    assert_eq!(store.checkout(before).unwrap().to_vec(), vec![1, 3, 4, 5, 8]);
}

#[test]
fn every_intermediate_version_stays_queryable() {
    let mut store = VersionStore::with_seed(9);
    let mut versions = vec![store.latest()];
    for key in 0..50 {
        let v = store.insert(*versions.last().unwrap(), key).unwrap();
        versions.push(v);
    }
    for (i, v) in versions.iter().enumerate() {
        assert_eq!(store.len(*v), Ok(i));
        let snapshot = store.checkout(*v).unwrap().to_vec();
        assert_eq!(snapshot, (0..i as i32).collect::<Vec<_>>());
    }
}

#[test]
fn branching_histories_do_not_interfere() {
    let mut store = VersionStore::with_seed(13);
    let mut base = store.latest();
    for key in [10, 20, 30] {
        base = store.insert(base, key).unwrap();
    }

    // two divergent branches from the same base
    let left = store.insert(base, 15).unwrap();
    let right = store.delete(base, &20).unwrap();

    assert_eq!(store.checkout(base).unwrap().to_vec(), vec![10, 20, 30]);
    assert_eq!(store.checkout(left).unwrap().to_vec(), vec![10, 15, 20, 30]);
    assert_eq!(store.checkout(right).unwrap().to_vec(), vec![10, 30]);
}

#[test]
fn deleting_an_absent_key_commits_an_identical_version() {
    let mut store = VersionStore::with_seed(17);
    let v1 = store.insert(VersionId(0), 7).unwrap();
    let v2 = store.delete(v1, &99).unwrap();
    assert_ne!(v1, v2);
    assert_eq!(store.checkout(v2).unwrap().to_vec(), vec![7]);
    // a miss copies no nodes at all
    assert_eq!(store.node_count(), 1);
}

#[test]
fn unknown_versions_are_rejected() {
    let mut store: VersionStore<i32> = VersionStore::new();
    let missing = VersionId(99);
    assert_eq!(
        store.checkout(missing).err(),
        Some(VersionError::UnknownVersion(missing))
    );
    assert_eq!(
        store.insert(missing, 1).err(),
        Some(VersionError::UnknownVersion(missing))
    );
}

#[test]
fn select_out_of_range_surfaces_through_version_queries() {
    let mut store = VersionStore::with_seed(21);
    let v = store.insert(VersionId(0), 5).unwrap();
    assert_eq!(
        store.select(v, 2),
        Err(VersionError::Forest(ForestError::OutOfRange {
            rank: 2,
            len: 1
        }))
    );
}

#[test]
fn duplicates_and_multiset_semantics_per_version() {
    let mut store = VersionStore::with_seed(23);
    let mut v = store.latest();
    for key in [4, 4, 4] {
        v = store.insert(v, key).unwrap();
    }
    assert_eq!(store.len(v), Ok(3));
    let fewer = store.delete(v, &4).unwrap();
    assert_eq!(store.len(fewer), Ok(2));
    assert_eq!(store.len(v), Ok(3));

    let view = store.checkout(fewer).unwrap();
    assert!(view.contains(&4));
    assert_eq!(view.rank(&4), 0);
    assert_eq!(view.rank(&5), 2);
}

#[test]
fn shared_subtrees_keep_allocation_logarithmic_per_commit() {
    let mut store = VersionStore::with_seed(29);
    let mut v = store.latest();
    for key in 0..256 {
        v = store.insert(v, key).unwrap();
    }
    // Path copying allocates O(log n) expected nodes per commit; with 256
    // commits the pool must stay far below the quadratic worst case of
    // cloning whole trees.
    assert!(store.node_count() < 256 * 64);
}
