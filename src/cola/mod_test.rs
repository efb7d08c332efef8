use super::*;

#[test]
fn test_insert_tracks_bit_pattern() {
    let mut cola: Cola<i32, NaturalOrd> = Cola::new(NaturalOrd);
    for i in 0..20 {
        cola.insert(i).unwrap();
        cola.debug_check_invariants();
        assert_eq!(cola.len(), (i + 1) as u64);
    }
}

#[test]
fn test_find_hit_and_miss() {
    let mut cola: Cola<i32, NaturalOrd> = Cola::new(NaturalOrd);
    for i in [5, 2, 8, 9, 1, 7] {
        cola.insert(i).unwrap();
    }
    assert!(matches!(cola.find(&8), Found::Hit { .. }));
    assert!(matches!(cola.find(&100), Found::Miss));
}

#[test]
fn test_remove_shrinks_and_keeps_order() {
    let mut cola: Cola<i32, NaturalOrd> = Cola::new(NaturalOrd);
    for i in 0..16 {
        cola.insert(i).unwrap();
    }
    assert!(cola.remove(&7).unwrap());
    cola.debug_check_invariants();
    assert_eq!(cola.len(), 15);
    let got: Vec<i32> = cola.iter().collect();
    let mut expect: Vec<i32> = (0..16).filter(|&x| x != 7).collect();
    expect.sort();
    assert_eq!(got, expect);
    assert!(!cola.remove(&7).unwrap());
}

#[test]
fn test_iterate_non_decreasing_and_exact_count() {
    let mut cola: Cola<i32, NaturalOrd> = Cola::new(NaturalOrd);
    let mut rng_state: u64 = 0x1234_5678_9abc_def0;
    let mut inserted = std::collections::BTreeSet::new();
    for _ in 0..200 {
        // xorshift for a reproducible pseudo-random sequence without a
        // `rand` dependency in this unit test.
        rng_state ^= rng_state << 13;
        rng_state ^= rng_state >> 7;
        rng_state ^= rng_state << 17;
        let v = (rng_state % 1000) as i32;
        if inserted.insert(v) {
            cola.insert(v).unwrap();
        }
    }
    cola.debug_check_invariants();
    let got: Vec<i32> = cola.iter().collect();
    assert_eq!(got.len(), inserted.len());
    assert!(got.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_set_at_requires_equal_key() {
    let mut cola: Cola<(i32, i32), ByFirst> = Cola::new(ByFirst);
    cola.insert((1, 100)).unwrap();
    let found = cola.find(&(1, 0));
    if let Found::Hit { level, offset } = found {
        cola.set_at(level, offset, (1, 200)).unwrap();
        assert_eq!(cola.get_at(level, offset), Some(&(1, 200)));
        assert!(cola.set_at(level, offset, (2, 200)).is_err());
    } else {
        panic!("expected hit");
    }
}
