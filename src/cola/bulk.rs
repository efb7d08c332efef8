//! Bulk load: build a fresh [super::Cola] from a sequence of `M` elements
//! in one pass, without the O(log N) per-element cascade (spec §4.1 "Bulk
//! load"). If the caller already has the data sorted (`ordered = true`),
//! runs are placed directly; otherwise the data is sorted first.

use super::{Cola, Comparator};
use crate::error::Result;

pub fn bulk_load<T, C>(data: Vec<T>, ordered: bool, cmp: C) -> Result<Cola<T, C>>
where
    T: Clone,
    C: Comparator<T>,
{
    bulk_load_with_max_levels(data, ordered, cmp, super::DEFAULT_MAX_LEVELS)
}

pub fn bulk_load_with_max_levels<T, C>(
    mut data: Vec<T>,
    ordered: bool,
    cmp: C,
    max_levels: u32,
) -> Result<Cola<T, C>>
where
    T: Clone,
    C: Comparator<T>,
{
    if !ordered {
        data.sort_by(|a, b| cmp.compare(a, b));
    }
    let mut cola = Cola::with_max_levels(cmp, max_levels);
    cola.load_sorted(data)?;
    Ok(cola)
}
