//! The ordering object and its structural combinators.
//!
//! An [`Order<T>`] is a shared handle to an immutable node. Each
//! combinator is a node case, so the collapse rules (reversing twice,
//! re-wrapping a null-aware ordering) are plain matches on the case
//! instead of runtime type tests.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ptr;
use std::sync::Arc;

use crate::compare::compare_values;
use crate::nulls::{NullAware, NullPolicy};

/// A two-argument comparison.
///
/// Implementations must be pure: the same pair always yields the same
/// result and no state is observed or changed.
pub trait Comparator<T: ?Sized>: Send + Sync {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering + Send + Sync,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Top-level shape of an [`Order`], used to observe wrapper depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    /// A comparator with no sub-ordering of the same type.
    Leaf,
    /// Arguments are swapped before delegating.
    Reversed,
    /// A primary ordering with a tie-breaking fallback.
    Chained,
    /// Absent values are ranked by the carried policy.
    NullAware(NullPolicy),
}

pub(crate) enum Node<T: ?Sized> {
    Leaf {
        label: &'static str,
        comparator: Box<dyn Comparator<T>>,
    },
    Reversed(Order<T>),
    Chained {
        primary: Order<T>,
        fallback: Order<T>,
    },
    NullAware(Box<dyn NullAware<T>>),
}

/// A reusable, composable ordering over `T`.
///
/// Cloning is cheap and yields the same underlying instance; see
/// [`Order::ptr_eq`]. Orderings have no equality beyond identity.
pub struct Order<T: ?Sized> {
    node: Arc<Node<T>>,
}

impl<T: ?Sized> Clone for Order<T> {
    fn clone(&self) -> Self {
        Order {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T: ?Sized> Order<T> {
    pub(crate) fn from_node(node: Node<T>) -> Self {
        Order {
            node: Arc::new(node),
        }
    }

    pub(crate) fn node(&self) -> &Node<T> {
        &self.node
    }

    /// Compares `a` with `b`.
    ///
    /// The same referenced value is always equal to itself; no
    /// comparator or selector runs in that case.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        if ptr::eq(a, b) {
            return Ordering::Equal;
        }
        match self.node() {
            Node::Leaf { comparator, .. } => comparator.compare(a, b),
            Node::Reversed(inner) => inner.compare(b, a),
            Node::Chained { primary, fallback } => match primary.compare(a, b) {
                Ordering::Equal => fallback.compare(a, b),
                decided => decided,
            },
            Node::NullAware(nulls) => nulls.compare(a, b),
        }
    }

    /// Returns true when both handles point at the same ordering instance.
    pub fn ptr_eq(a: &Order<T>, b: &Order<T>) -> bool {
        Arc::ptr_eq(&a.node, &b.node)
    }

    pub fn kind(&self) -> OrderKind {
        match self.node() {
            Node::Leaf { .. } => OrderKind::Leaf,
            Node::Reversed(_) => OrderKind::Reversed,
            Node::Chained { .. } => OrderKind::Chained,
            Node::NullAware(nulls) => OrderKind::NullAware(nulls.policy()),
        }
    }

    /// The policy of a null-aware ordering, `None` for every other case.
    pub fn null_policy(&self) -> Option<NullPolicy> {
        match self.node() {
            Node::NullAware(nulls) => Some(nulls.policy()),
            _ => None,
        }
    }

    /// Returns the ordering with its arguments swapped.
    ///
    /// * reversing a reversed ordering returns the original instance
    /// * reversing a null-aware ordering reverses the present-value
    ///   ordering and flips the null policy, so no layer is added
    pub fn reversed(&self) -> Order<T> {
        match self.node() {
            Node::Reversed(inner) => inner.clone(),
            Node::NullAware(nulls) => nulls.reversed(),
            _ => Order::from_node(Node::Reversed(self.clone())),
        }
    }

    /// Uses `fallback` only when this ordering reports a tie.
    pub fn then(&self, fallback: &Order<T>) -> Order<T> {
        Order::from_node(Node::Chained {
            primary: self.clone(),
            fallback: fallback.clone(),
        })
    }

    /// Uses `fallback` with its arguments swapped when this ordering ties.
    pub fn then_descending(&self, fallback: &Order<T>) -> Order<T> {
        self.then(&fallback.reversed())
    }
}

impl<T: ?Sized + 'static> Order<T> {
    pub fn from_comparator(comparator: impl Comparator<T> + 'static) -> Self {
        Order::leaf("comparator", comparator)
    }

    /// Builds an ordering from a comparison function.
    pub fn from_fn(compare: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        Order::leaf("fn", compare)
    }

    /// Falls back to a comparison function when this ordering ties.
    pub fn then_comparing(
        &self,
        compare: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    ) -> Order<T> {
        self.then(&Order::from_fn(compare))
    }

    pub(crate) fn leaf(label: &'static str, comparator: impl Comparator<T> + 'static) -> Self {
        Order::from_node(Node::Leaf {
            label,
            comparator: Box::new(comparator),
        })
    }
}

impl<T: Ord + ?Sized + 'static> Order<T> {
    /// The intrinsic ordering of `T`.
    pub fn natural() -> Self {
        Order::leaf("natural", Natural(PhantomData))
    }

    pub fn natural_reversed() -> Self {
        Order::natural().reversed()
    }
}

impl<T> Order<T> {
    /// Stable sort of `items`.
    pub fn sort(&self, items: &mut [T]) {
        items.sort_by(|a, b| self.compare(a, b));
    }

    pub fn sort_unstable(&self, items: &mut [T]) {
        items.sort_unstable_by(|a, b| self.compare(a, b));
    }

    pub fn is_sorted(&self, items: &[T]) -> bool {
        items
            .windows(2)
            .all(|pair| self.compare(&pair[0], &pair[1]) != Ordering::Greater)
    }

    /// The last greatest element, as with [`Iterator::max_by`].
    pub fn max_of<'a>(&self, items: impl IntoIterator<Item = &'a T>) -> Option<&'a T>
    where
        T: 'a,
    {
        items.into_iter().max_by(|a, b| self.compare(a, b))
    }

    /// The first least element, as with [`Iterator::min_by`].
    pub fn min_of<'a>(&self, items: impl IntoIterator<Item = &'a T>) -> Option<&'a T>
    where
        T: 'a,
    {
        items.into_iter().min_by(|a, b| self.compare(a, b))
    }
}

impl<T: ?Sized> Comparator<T> for Order<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        Order::compare(self, a, b)
    }
}

impl<T: ?Sized> fmt::Debug for Order<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Leaf { label, .. } => f.debug_tuple("Leaf").field(label).finish(),
            Node::Reversed(inner) => f.debug_tuple("Reversed").field(inner).finish(),
            Node::Chained { primary, fallback } => f
                .debug_struct("Chained")
                .field("primary", primary)
                .field("fallback", fallback)
                .finish(),
            Node::NullAware(nulls) => nulls.fmt_node(f),
        }
    }
}

struct Natural<T: ?Sized>(PhantomData<fn(&T, &T)>);

impl<T: Ord + ?Sized> Comparator<T> for Natural<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        compare_values(Some(a), Some(b))
    }
}
