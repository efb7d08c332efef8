use super::*;

#[test]
fn test_append_and_to_slice() {
    let mut b = Builder::new();
    b.append(b"hello");
    b.append(b" world");
    assert_eq!(b.to_slice(), b"hello world");
    assert_eq!(b.len(), 11);
}

#[test]
fn test_set_replaces_contents() {
    let mut b = Builder::new();
    b.append(b"xxxxxxxxxx");
    b.set(b"yz");
    assert_eq!(b.to_slice(), b"yz");
}

#[test]
fn test_resize_fill() {
    let mut b = Builder::new();
    b.resize(4, 0xAB);
    assert_eq!(b.to_slice(), &[0xAB, 0xAB, 0xAB, 0xAB]);
}

#[test]
fn test_capacity_is_power_of_two() {
    let b = Builder::with_capacity(100);
    assert!(b.capacity().is_power_of_two());
    assert!(b.capacity() >= 100);
}

#[test]
fn test_allocate_returns_view_of_reserved_region() {
    let mut b = Builder::new();
    b.append(b"prefix-");
    let view = b.allocate(3, true);
    assert_eq!(view.len(), 3);
}

#[test]
fn test_swap_exchanges_buffers() {
    let mut a = Builder::new();
    let mut b = Builder::new();
    a.append(b"aaa");
    b.append(b"bbbbb");
    a.swap(&mut b);
    assert_eq!(a.to_slice(), b"bbbbb");
    assert_eq!(b.to_slice(), b"aaa");
}
