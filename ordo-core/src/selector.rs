//! Orderings derived by projecting values to comparison keys.

use std::cmp::Ordering;

use crate::compare::{compare_values, first_difference, require_selectors};
use crate::error::OrderError;
use crate::nulls::NullPolicy;
use crate::order::{Comparator, Order};

/// One step of a sequential comparison: a projection to some key type
/// together with the ordering of that key.
///
/// The key type is erased so that steps with different key types can
/// share one list.
pub struct KeySelector<T: ?Sized> {
    compare: Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>,
}

impl<T: ?Sized + 'static> KeySelector<T> {
    /// Compares keys by their intrinsic order, absent keys first.
    pub fn new<K: Ord + 'static>(selector: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        KeySelector {
            compare: Box::new(move |a: &T, b: &T| {
                compare_values(Some(&selector(a)), Some(&selector(b)))
            }),
        }
    }

    /// Compares keys with an explicit ordering.
    pub fn with_order<K: 'static>(
        order: Order<K>,
        selector: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Self {
        KeySelector {
            compare: Box::new(move |a: &T, b: &T| order.compare(&selector(a), &selector(b))),
        }
    }
}

impl<T: ?Sized> KeySelector<T> {
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }
}

struct SelectorComparator<T: ?Sized, K> {
    selector: Box<dyn Fn(&T) -> K + Send + Sync>,
    keys: Order<K>,
}

impl<T: ?Sized, K> Comparator<T> for SelectorComparator<T, K> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        let left = (self.selector)(a);
        let right = (self.selector)(b);
        self.keys.compare(&left, &right)
    }
}

struct SequentialComparator<T: ?Sized> {
    selectors: Vec<KeySelector<T>>,
}

impl<T: ?Sized> Comparator<T> for SequentialComparator<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        first_difference(&self.selectors, a, b)
    }
}

impl<T: ?Sized + 'static> Order<T> {
    /// Orders values by the intrinsic order of a projected key.
    pub fn by_key<K: Ord + 'static>(selector: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        Order::by_key_with(&Order::natural(), selector)
    }

    /// Orders values by a projected key, largest key first.
    ///
    /// For `Option` keys this puts absent keys last.
    pub fn by_key_descending<K: Ord + 'static>(
        selector: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Self {
        Order::by_key_with(&Order::natural_reversed(), selector)
    }

    /// Orders values by a projected key compared with `keys`.
    pub fn by_key_with<K: 'static>(
        keys: &Order<K>,
        selector: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Self {
        Order::leaf(
            "by_key",
            SelectorComparator {
                selector: Box::new(selector),
                keys: keys.clone(),
            },
        )
    }

    /// Orders values by a projected key compared with `keys` reversed.
    pub fn by_key_with_descending<K: 'static>(
        keys: &Order<K>,
        selector: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Self {
        Order::by_key_with(&keys.reversed(), selector)
    }

    /// Orders values by an optional key, ranking absent keys by `policy`.
    pub fn by_optional_key<K: Ord + 'static>(
        selector: impl Fn(&T) -> Option<K> + Send + Sync + 'static,
        policy: NullPolicy,
    ) -> Self {
        Order::by_key_with(&Order::natural().nulls(policy), selector)
    }

    /// Orders values by each selector in turn; the first one that does
    /// not tie decides.
    pub fn by_keys(selectors: Vec<KeySelector<T>>) -> Result<Self, OrderError> {
        require_selectors(&selectors)?;
        Ok(Order::leaf("by_keys", SequentialComparator { selectors }))
    }

    pub fn then_by<K: Ord + 'static>(
        &self,
        selector: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Order<T> {
        self.then(&Order::by_key(selector))
    }

    pub fn then_by_with<K: 'static>(
        &self,
        keys: &Order<K>,
        selector: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Order<T> {
        self.then(&Order::by_key_with(keys, selector))
    }

    /// Breaks ties by a projected key, largest key first.
    ///
    /// The fallback is the ascending selector ordering reversed, so
    /// reversing it again yields the ascending form.
    pub fn then_by_descending<K: Ord + 'static>(
        &self,
        selector: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Order<T> {
        self.then_descending(&Order::by_key(selector))
    }

    pub fn then_by_descending_with<K: 'static>(
        &self,
        keys: &Order<K>,
        selector: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Order<T> {
        self.then_descending(&Order::by_key_with(keys, selector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderKind;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        last: &'static str,
        first: &'static str,
        age: u32,
        nickname: Option<&'static str>,
    }

    fn person(last: &'static str, first: &'static str, age: u32) -> Person {
        Person {
            last,
            first,
            age,
            nickname: None,
        }
    }

    #[test]
    fn sorts_by_sequential_selectors() {
        let order = Order::by_keys(vec![
            KeySelector::new(|p: &Person| p.last),
            KeySelector::new(|p: &Person| p.first),
        ])
        .expect("selectors");

        let mut people = vec![
            person("Lee", "Ann", 30),
            person("Lee", "Bob", 20),
            person("Han", "Zoe", 40),
        ];
        order.sort(&mut people);

        let names: Vec<_> = people.iter().map(|p| (p.last, p.first)).collect();
        assert_eq!(names, vec![("Han", "Zoe"), ("Lee", "Ann"), ("Lee", "Bob")]);
    }

    #[test]
    fn empty_selector_list_is_rejected() {
        let err = Order::<Person>::by_keys(Vec::new()).unwrap_err();
        assert!(matches!(err, OrderError::InvalidArgument(_)));
    }

    #[test]
    fn reversed_selector_sorts_descending() {
        let order = Order::by_key(|p: &Person| p.age).reversed();
        let mut people = vec![person("a", "a", 3), person("b", "b", 1), person("c", "c", 2)];
        order.sort(&mut people);
        let ages: Vec<_> = people.iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![3, 2, 1]);
    }

    #[test]
    fn custom_key_ordering_is_used() {
        let by_length = Order::<&'static str>::from_fn(|a, b| a.len().cmp(&b.len()));
        let order = Order::by_key_with(&by_length, |p: &Person| p.first);
        let mut people = vec![person("x", "Alexander", 1), person("y", "Al", 2)];
        order.sort(&mut people);
        assert_eq!(people[0].first, "Al");

        let descending = Order::by_key_with_descending(&by_length, |p: &Person| p.first);
        descending.sort(&mut people);
        assert_eq!(people[0].first, "Alexander");
    }

    #[test]
    fn descending_optional_keys_put_absent_last() {
        let order = Order::by_key_descending(|p: &Person| p.nickname);
        let mut people = vec![
            person("a", "a", 1),
            Person {
                nickname: Some("ace"),
                ..person("b", "b", 2)
            },
            Person {
                nickname: Some("zed"),
                ..person("c", "c", 3)
            },
        ];
        order.sort(&mut people);
        let nicknames: Vec<_> = people.iter().map(|p| p.nickname).collect();
        assert_eq!(nicknames, vec![Some("zed"), Some("ace"), None]);
    }

    #[test]
    fn optional_key_policy_is_explicit() {
        let first = Order::by_optional_key(|p: &Person| p.nickname, NullPolicy::First);
        let last = Order::by_optional_key(|p: &Person| p.nickname, NullPolicy::Last);
        let plain = person("a", "a", 1);
        let named = Person {
            nickname: Some("ace"),
            ..person("b", "b", 2)
        };
        assert_eq!(first.compare(&plain, &named), Ordering::Less);
        assert_eq!(last.compare(&plain, &named), Ordering::Greater);
    }

    #[test]
    fn then_by_chains_selectors() {
        let order = Order::by_key(|p: &Person| p.last)
            .then_by(|p: &Person| p.age)
            .then_by_with(&Order::natural_reversed(), |p: &Person| p.first);
        let mut people = vec![
            person("Lee", "Ann", 30),
            person("Lee", "Bob", 30),
            person("Lee", "Cid", 20),
            person("Han", "Zoe", 40),
        ];
        order.sort(&mut people);
        let firsts: Vec<_> = people.iter().map(|p| p.first).collect();
        assert_eq!(firsts, vec!["Zoe", "Cid", "Bob", "Ann"]);
    }

    #[test]
    fn then_by_descending_matches_swapped_operands() {
        let primary = Order::by_key(|p: &Person| p.last);
        let reversed_form = primary.then_by_descending(|p: &Person| p.age);
        let swapped_form = primary.then_comparing(|a: &Person, b: &Person| b.age.cmp(&a.age));

        let people = vec![
            person("Lee", "Ann", 30),
            person("Lee", "Bob", 20),
            person("Han", "Zoe", 40),
            person("Lee", "Cid", 30),
        ];
        for a in &people {
            for b in &people {
                assert_eq!(reversed_form.compare(a, b), swapped_form.compare(a, b));
            }
        }

        let with_order = primary.then_by_descending_with(&Order::natural(), |p: &Person| p.age);
        for a in &people {
            for b in &people {
                assert_eq!(with_order.compare(a, b), swapped_form.compare(a, b));
            }
        }
    }

    #[test]
    fn descending_fallback_collapses_when_reversed_again() {
        let ascending = Order::by_key(|p: &Person| p.age);
        let descending = ascending.reversed();
        assert_eq!(descending.kind(), OrderKind::Reversed);
        assert!(Order::ptr_eq(&descending.reversed(), &ascending));
    }

    #[test]
    fn nullable_elements_sort_absent_first() {
        let order = Order::by_key(|score: &u32| *score).nulls_first();
        let mut scores = vec![Some(5), None, Some(2), None];
        order.sort(&mut scores);
        assert_eq!(scores, vec![None, None, Some(2), Some(5)]);
    }

    #[test]
    #[should_panic(expected = "projection failed")]
    fn projection_panics_propagate_unchanged() {
        let order = Order::by_key(|value: &i32| -> i32 {
            if *value < 0 {
                panic!("projection failed");
            }
            *value
        });
        order.compare(&1, &-1);
    }
}
