//! `Successor` backs the single-point `mark(x)` convenience on
//! [crate::rangeset::RangeSet] and [crate::rangedict::RangeDict] (spec
//! §4.3: "`mark(x)` is equivalent to `mark(x, x+1)` under the comparator's
//! notion of successor; if the key type has no successor operation,
//! single-point support may be omitted"). Implemented for the integer
//! scalar types likely to back an interval key space; a caller whose key
//! type has no natural successor simply never calls `mark_point` and loses
//! nothing, since the two-endpoint `mark(b, e)` is always available.

pub trait Successor: Sized {
    fn successor(&self) -> Self;
}

macro_rules! impl_successor_int {
    ($($t:ty),*) => {
        $(
            impl Successor for $t {
                fn successor(&self) -> Self {
                    self.wrapping_add(1)
                }
            }
        )*
    };
}

impl_successor_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
