use super::*;

#[test]
fn test_s2_ordered_set_duplicate_safe_insert() {
    let mut set: OrderedSet<i32> = OrderedSet::new();
    assert!(set.insert(5).is_ok());
    assert!(set.insert(2).is_ok());
    assert!(set.insert(8).is_ok());
    assert!(set.insert(2).is_err());
    assert!(set.insert(5).is_err());
    assert!(set.insert(9).is_ok());

    let got: Vec<i32> = set.iter().collect();
    assert_eq!(got, vec![2, 5, 8, 9]);
    assert!(set.contains(&2));
    assert!(!set.contains(&7));
}

#[test]
fn test_set_overwrites_in_place() {
    let mut set: OrderedSet<i32> = OrderedSet::new();
    set.insert(1).unwrap();
    set.set(1).unwrap();
    assert_eq!(set.len(), 1);
    assert!(set.contains(&1));
}

#[test]
fn test_capacity_for_is_power_of_two_minus_one() {
    assert_eq!(OrderedSet::<i32>::capacity_for(0), 0);
    assert_eq!(OrderedSet::<i32>::capacity_for(1), 1);
    assert_eq!(OrderedSet::<i32>::capacity_for(2), 3);
    assert_eq!(OrderedSet::<i32>::capacity_for(3), 3);
    assert_eq!(OrderedSet::<i32>::capacity_for(4), 7);
}

#[test]
fn test_remove_present_and_absent() {
    let mut set: OrderedSet<i32> = OrderedSet::new();
    set.insert(42).unwrap();
    assert!(set.remove(&42).unwrap());
    assert!(!set.remove(&42).unwrap());
    assert!(!set.contains(&42));
}
