use super::*;

#[test]
fn test_set_then_get_at_later_version() {
    let store = VersionedStore::new();
    let mut wtx = store.begin_write();
    wtx.set(b"k".to_vec(), b"v1".to_vec());
    let cv = wtx.commit().unwrap();
    assert_eq!(cv, 1);

    let rtx = store.begin_read(None);
    assert_eq!(rtx.get(b"k").unwrap(), Some(b"v1".to_vec()));
}

#[test]
fn test_snapshot_isolation_ignores_later_commit() {
    let store = VersionedStore::new();
    let mut w1 = store.begin_write();
    w1.set(b"k".to_vec(), b"v1".to_vec());
    w1.commit().unwrap();

    let rtx = store.begin_read(None);
    assert_eq!(rtx.get(b"k").unwrap(), Some(b"v1".to_vec()));

    let mut w2 = store.begin_write();
    w2.set(b"k".to_vec(), b"v2".to_vec());
    w2.commit().unwrap();

    // rtx captured its read_version before w2 committed: it must still see v1.
    assert_eq!(rtx.get(b"k").unwrap(), Some(b"v1".to_vec()));

    let latest = store.begin_read(None);
    assert_eq!(latest.get(b"k").unwrap(), Some(b"v2".to_vec()));
}

#[test]
fn test_clear_removes_value() {
    let store = VersionedStore::new();
    let mut w1 = store.begin_write();
    w1.set(b"k".to_vec(), b"v".to_vec());
    w1.commit().unwrap();

    let mut w2 = store.begin_write();
    w2.clear(b"k".to_vec());
    w2.commit().unwrap();

    let rtx = store.begin_read(None);
    assert_eq!(rtx.get(b"k").unwrap(), None);
}

#[test]
fn test_clear_range_removes_interior_keys() {
    let store = VersionedStore::new();
    let mut w1 = store.begin_write();
    w1.set(b"a".to_vec(), b"1".to_vec());
    w1.set(b"b".to_vec(), b"2".to_vec());
    w1.set(b"c".to_vec(), b"3".to_vec());
    w1.commit().unwrap();

    let mut w2 = store.begin_write();
    w2.clear_range(b"b".to_vec(), b"c".to_vec());
    w2.commit().unwrap();

    let rtx = store.begin_read(None);
    assert_eq!(rtx.get(b"a").unwrap(), Some(b"1".to_vec()));
    assert_eq!(rtx.get(b"b").unwrap(), None);
    assert_eq!(rtx.get(b"c").unwrap(), Some(b"3".to_vec()));
}

#[test]
fn test_conflicting_writers_second_commit_fails() {
    let store = VersionedStore::new();
    let mut seed = store.begin_write();
    seed.set(b"k".to_vec(), b"0".to_vec());
    seed.commit().unwrap();

    let mut t1 = store.begin_write();
    let mut t2 = store.begin_write();

    assert_eq!(t1.get(b"k").unwrap(), Some(b"0".to_vec()));
    assert_eq!(t2.get(b"k").unwrap(), Some(b"0".to_vec()));

    t1.set(b"k".to_vec(), b"1".to_vec());
    t1.commit().unwrap();

    t2.set(b"k".to_vec(), b"2".to_vec());
    let err = t2.commit().unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
}

#[test]
fn test_non_overlapping_writers_both_commit() {
    let store = VersionedStore::new();
    let mut t1 = store.begin_write();
    let mut t2 = store.begin_write();

    t1.get(b"a").unwrap();
    t2.get(b"b").unwrap();

    t1.set(b"a".to_vec(), b"1".to_vec());
    t1.commit().unwrap();

    t2.set(b"b".to_vec(), b"2".to_vec());
    t2.commit().unwrap();

    let rtx = store.begin_read(None);
    assert_eq!(rtx.get(b"a").unwrap(), Some(b"1".to_vec()));
    assert_eq!(rtx.get(b"b").unwrap(), Some(b"2".to_vec()));
}

#[test]
fn test_read_your_own_writes() {
    let store = VersionedStore::new();
    let mut wtx = store.begin_write();
    wtx.set(b"k".to_vec(), b"1".to_vec());
    assert_eq!(wtx.get(b"k").unwrap(), Some(b"1".to_vec()));
    wtx.atomic(b"k".to_vec(), ops::AtomicKind::Add, vec![1]);
    assert_eq!(wtx.get(b"k").unwrap(), Some(vec![b'1' + 1]));
}

#[test]
fn test_get_range_respects_bounds_and_limit() {
    let store = VersionedStore::new();
    let mut wtx = store.begin_write();
    for k in ["a", "b", "c", "d"] {
        wtx.set(k.as_bytes().to_vec(), k.as_bytes().to_vec());
    }
    wtx.commit().unwrap();

    let rtx = store.begin_read(None);
    let opts = RangeOptions {
        limit: Some(2),
        ..Default::default()
    };
    let got = rtx
        .get_range(
            &selector::KeySelector::first_greater_or_equal(b"b".to_vec()),
            &selector::KeySelector::first_greater_or_equal(b"z".to_vec()),
            &opts,
        )
        .unwrap();
    assert_eq!(
        got,
        vec![(b"b".to_vec(), b"b".to_vec()), (b"c".to_vec(), b"c".to_vec())]
    );
}

#[test]
fn test_discarded_txn_commit_is_cancelled() {
    let store = VersionedStore::new();
    let mut wtx = store.begin_write();
    wtx.set(b"k".to_vec(), b"v".to_vec());
    wtx.discard();
    assert_eq!(wtx.commit().unwrap_err(), Error::Cancelled);

    let rtx = store.begin_read(None);
    assert_eq!(rtx.get(b"k").unwrap(), None);
}
