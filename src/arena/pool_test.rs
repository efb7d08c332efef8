use super::*;

#[test]
fn test_checkout_and_release_recycles() {
    let pool = BuilderPool::new(2);
    {
        let mut h = pool.checkout();
        h.append(b"hello");
    }
    let stats = pool.stats();
    assert_eq!(stats.parked_count, 1);
    assert_eq!(stats.bytes_loaned, 0);

    // recycled builder comes back cleared.
    let h = pool.checkout();
    assert!(h.is_empty());
}

#[test]
fn test_pool_disposes_beyond_capacity() {
    let pool = BuilderPool::new(1);
    let h1 = pool.checkout();
    let h2 = pool.checkout();
    drop(h1);
    drop(h2);
    // only one slot, so at most one builder is parked.
    assert_eq!(pool.stats().parked_count, 1);
}

#[test]
fn test_loaned_counter_tracks_outstanding_checkouts() {
    let pool = BuilderPool::new(4);
    let h1 = pool.checkout();
    let h2 = pool.checkout();
    assert!(pool.stats().bytes_loaned > 0);
    drop(h1);
    drop(h2);
    assert_eq!(pool.stats().bytes_loaned, 0);
}
