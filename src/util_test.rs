use std::io::{Read, Seek, SeekFrom, Write};

use super::*;

#[test]
fn test_next_power_of_two() {
    assert_eq!(next_power_of_two(0), 1);
    assert_eq!(next_power_of_two(1), 1);
    assert_eq!(next_power_of_two(2), 2);
    assert_eq!(next_power_of_two(3), 4);
    assert_eq!(next_power_of_two(1023), 1024);
    assert_eq!(next_power_of_two(1024), 1024);
    for x in 1..=2048_u64 {
        let p = next_power_of_two(x);
        assert!(p >= x, "{} >= {}", p, x);
        if x.is_power_of_two() {
            assert_eq!(p, x);
        }
    }
}

#[test]
fn test_lowest_highest_bit() {
    for k in 0..63 {
        let pow = 1_u64 << k;
        assert_eq!(lowest_bit(pow), k);
        assert_eq!(highest_bit(pow), k);
        if k > 0 {
            let ones = pow - 1;
            assert_eq!(lowest_bit(ones), 0);
            assert_eq!(highest_bit(ones), k - 1);
        }
    }
}

#[test]
fn test_open_file_w_r_roundtrip() {
    let mut path = std::env::temp_dir();
    path.push(format!("pndb.util.test.{}.bin", std::process::id()));
    let file = path.to_str().unwrap().to_string();

    fs::remove_file(&file).ok();

    let mut fd = open_file_w(&file, false).expect("create file");
    fd.write_all(b"hello world").expect("write");
    drop(fd);

    // reuse=false on an existing file truncates/recreates.
    let mut fd = open_file_w(&file, true).expect("reopen for append");
    fd.seek(SeekFrom::End(0)).expect("seek");
    fd.write_all(b"!").expect("append");
    drop(fd);

    let mut fd = open_file_r(&file).expect("open for read");
    let mut buf = String::new();
    fd.read_to_string(&mut buf).expect("read");
    assert_eq!(buf, "hello world!");

    fs::remove_file(&file).ok();
}

#[test]
fn test_try_convert_int() {
    let v: Result<u8, Error> = try_convert_int(255_u32, "u32->u8");
    assert_eq!(v.unwrap(), 255_u8);

    let v: Result<u8, Error> = try_convert_int(256_u32, "u32->u8");
    assert!(v.is_err());
}
