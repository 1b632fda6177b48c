//! Scalar comparison primitive and the sequential key helpers built on it.

use std::cmp::Ordering;
use std::ptr;

use crate::error::OrderError;
use crate::order::Order;
use crate::selector::KeySelector;

/// Compares two optional values of an intrinsically ordered type.
///
/// * the same referenced value is equal without calling `Ord::cmp`
/// * an absent value sorts before any present value
/// * two absent values are equal
pub fn compare_values<K: Ord + ?Sized>(a: Option<&K>, b: Option<&K>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if ptr::eq(a, b) => Ordering::Equal,
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(b),
    }
}

/// Compares `a` and `b` by each selector in turn and returns the first
/// result that is not `Equal`. Later selectors are never evaluated once
/// one of them decides the comparison.
pub fn compare_values_by<T: ?Sized>(
    a: &T,
    b: &T,
    selectors: &[KeySelector<T>],
) -> Result<Ordering, OrderError> {
    require_selectors(selectors)?;
    Ok(first_difference(selectors, a, b))
}

/// Like [`compare_values_by`], but for optional operands: identical or
/// absent operands are decided before any selector runs, with absent
/// values first.
pub fn compare_options_by<T: ?Sized>(
    a: Option<&T>,
    b: Option<&T>,
    selectors: &[KeySelector<T>],
) -> Result<Ordering, OrderError> {
    require_selectors(selectors)?;
    Ok(match (a, b) {
        (Some(a), Some(b)) if ptr::eq(a, b) => Ordering::Equal,
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => first_difference(selectors, a, b),
    })
}

/// Projects both operands with `selector` and compares the keys with
/// [`compare_values`].
pub fn compare_values_by_key<T: ?Sized, K: Ord>(
    a: &T,
    b: &T,
    selector: impl Fn(&T) -> K,
) -> Ordering {
    compare_values(Some(&selector(a)), Some(&selector(b)))
}

/// Projects both operands with `selector` and compares the keys with an
/// explicit ordering over the key type.
pub fn compare_values_by_key_with<T: ?Sized, K>(
    a: &T,
    b: &T,
    order: &Order<K>,
    selector: impl Fn(&T) -> K,
) -> Ordering {
    order.compare(&selector(a), &selector(b))
}

pub(crate) fn require_selectors<T: ?Sized>(selectors: &[KeySelector<T>]) -> Result<(), OrderError> {
    if selectors.is_empty() {
        return Err(OrderError::InvalidArgument(
            "at least one key selector is required".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn first_difference<T: ?Sized>(selectors: &[KeySelector<T>], a: &T, b: &T) -> Ordering {
    for selector in selectors {
        let diff = selector.compare(a, b);
        if diff != Ordering::Equal {
            return diff;
        }
    }
    Ordering::Equal
}
