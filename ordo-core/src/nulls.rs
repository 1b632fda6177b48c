//! Null-aware orderings over `Option<T>`.
//!
//! A null-aware ordering carries its own [`NullPolicy`]. Reversing it
//! flips the policy and re-wrapping it replaces the policy, so neither
//! operation stacks a second null-aware layer.

use std::cmp::Ordering;
use std::fmt;
use std::ptr;

use crate::order::{Node, Order};

/// Where absent values rank relative to present ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullPolicy {
    /// Absent values sort before every present value.
    First,
    /// Absent values sort after every present value.
    Last,
}

impl NullPolicy {
    pub fn flipped(self) -> NullPolicy {
        match self {
            NullPolicy::First => NullPolicy::Last,
            NullPolicy::Last => NullPolicy::First,
        }
    }

    /// Result of comparing an absent value with a present one.
    fn absent_against_present(self) -> Ordering {
        match self {
            NullPolicy::First => Ordering::Less,
            NullPolicy::Last => Ordering::Greater,
        }
    }
}

/// Operations the ordering object needs from a null-aware node without
/// knowing the element type behind the `Option`.
pub(crate) trait NullAware<T: ?Sized>: Send + Sync {
    fn compare(&self, a: &T, b: &T) -> Ordering;
    fn policy(&self) -> NullPolicy;
    fn with_policy(&self, policy: NullPolicy) -> Order<T>;
    fn reversed(&self) -> Order<T>;
    fn fmt_node(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// How two present values are compared.
enum Present<S> {
    /// Unwrapped values go to an ordering over `S`.
    Values(Order<S>),
    /// The original `Option` operands go to an ordering over `Option<S>`.
    Options(Order<Option<S>>),
}

impl<S: 'static> Present<S> {
    fn reversed(&self) -> Present<S> {
        match self {
            Present::Values(order) => Present::Values(order.reversed()),
            Present::Options(order) => Present::Options(order.reversed()),
        }
    }
}

impl<S> Clone for Present<S> {
    fn clone(&self) -> Self {
        match self {
            Present::Values(order) => Present::Values(order.clone()),
            Present::Options(order) => Present::Options(order.clone()),
        }
    }
}

struct NullsComparator<S> {
    present: Present<S>,
    policy: NullPolicy,
}

impl<S: 'static> NullsComparator<S> {
    fn wrap(present: Present<S>, policy: NullPolicy) -> Order<Option<S>> {
        Order::from_node(Node::NullAware(Box::new(NullsComparator { present, policy })))
    }
}

impl<S: 'static> NullAware<Option<S>> for NullsComparator<S> {
    fn compare(&self, a: &Option<S>, b: &Option<S>) -> Ordering {
        if ptr::eq(a, b) {
            return Ordering::Equal;
        }
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => self.policy.absent_against_present(),
            (Some(_), None) => self.policy.absent_against_present().reverse(),
            (Some(x), Some(y)) => match &self.present {
                Present::Values(order) => order.compare(x, y),
                Present::Options(order) => order.compare(a, b),
            },
        }
    }

    fn policy(&self) -> NullPolicy {
        self.policy
    }

    fn with_policy(&self, policy: NullPolicy) -> Order<Option<S>> {
        NullsComparator::wrap(self.present.clone(), policy)
    }

    fn reversed(&self) -> Order<Option<S>> {
        NullsComparator::wrap(self.present.reversed(), self.policy.flipped())
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut node = f.debug_struct("NullAware");
        node.field("policy", &self.policy);
        match &self.present {
            Present::Values(order) => node.field("present", order),
            Present::Options(order) => node.field("present", order),
        };
        node.finish()
    }
}

impl<T: 'static> Order<T> {
    /// Extends this ordering to optional values, absent values first.
    pub fn nulls_first(&self) -> Order<Option<T>> {
        self.nulls(NullPolicy::First)
    }

    /// Extends this ordering to optional values, absent values last.
    pub fn nulls_last(&self) -> Order<Option<T>> {
        self.nulls(NullPolicy::Last)
    }

    pub fn nulls(&self, policy: NullPolicy) -> Order<Option<T>> {
        NullsComparator::wrap(Present::Values(self.clone()), policy)
    }
}

impl<T: 'static> Order<Option<T>> {
    pub fn with_nulls_first(&self) -> Order<Option<T>> {
        self.with_null_policy(NullPolicy::First)
    }

    pub fn with_nulls_last(&self) -> Order<Option<T>> {
        self.with_null_policy(NullPolicy::Last)
    }

    /// Gives absent values a fixed rank under an ordering that already
    /// accepts `Option<T>`.
    ///
    /// A null-aware ordering has its policy replaced. Any other ordering
    /// gains one null-aware layer that hands present pairs to it as-is.
    pub fn with_null_policy(&self, policy: NullPolicy) -> Order<Option<T>> {
        match self.node() {
            Node::NullAware(nulls) => nulls.with_policy(policy),
            _ => NullsComparator::wrap(Present::Options(self.clone()), policy),
        }
    }
}

/// Natural ordering of `T` with absent values first.
pub fn nulls_first<T: Ord + 'static>() -> Order<Option<T>> {
    Order::natural().nulls_first()
}

/// Natural ordering of `T` with absent values last.
pub fn nulls_last<T: Ord + 'static>() -> Order<Option<T>> {
    Order::natural().nulls_last()
}
