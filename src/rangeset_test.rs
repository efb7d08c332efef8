use super::*;

fn assert_disjoint_and_ordered(rs: &RangeSet<i32>) {
    let ivs = rs.intervals();
    for w in ivs.windows(2) {
        assert!(w[0].begin < w[1].begin, "not ordered by begin");
        assert!(w[0].end <= w[1].begin, "intervals overlap or touch without merge");
    }
}

#[test]
fn test_mark_disjoint_ranges() {
    let mut rs: RangeSet<i32> = RangeSet::new();
    rs.mark(0, 5).unwrap();
    rs.mark(10, 15).unwrap();
    assert_disjoint_and_ordered(&rs);
    assert_eq!(rs.intervals().len(), 2);
    assert_eq!(rs.bounds(), Some((0, 15)));
}

#[test]
fn test_mark_merges_touching_ranges() {
    let mut rs: RangeSet<i32> = RangeSet::new();
    rs.mark(0, 5).unwrap();
    rs.mark(5, 10).unwrap();
    assert_disjoint_and_ordered(&rs);
    assert_eq!(rs.intervals(), vec![Interval::new(0, 10)]);
}

#[test]
fn test_mark_merges_overlapping_ranges() {
    let mut rs: RangeSet<i32> = RangeSet::new();
    rs.mark(0, 5).unwrap();
    rs.mark(3, 10).unwrap();
    assert_eq!(rs.intervals(), vec![Interval::new(0, 10)]);
}

#[test]
fn test_mark_bridges_gap_between_two_ranges() {
    let mut rs: RangeSet<i32> = RangeSet::new();
    rs.mark(0, 2).unwrap();
    rs.mark(8, 10).unwrap();
    rs.mark(2, 8).unwrap();
    assert_eq!(rs.intervals(), vec![Interval::new(0, 10)]);
}

#[test]
fn test_mark_point() {
    let mut rs: RangeSet<i32> = RangeSet::new();
    rs.mark_point(5).unwrap();
    assert_eq!(rs.intervals(), vec![Interval::new(5, 6)]);
    rs.mark_point(6).unwrap();
    assert_eq!(rs.intervals(), vec![Interval::new(5, 7)]);
}

#[test]
fn test_bounds_empty() {
    let rs: RangeSet<i32> = RangeSet::new();
    assert_eq!(rs.bounds(), None);
}
