//! Composable orderings for the Ordo toolchain.
//!
//! The crate builds comparison functions out of small pieces:
//!
//!   scalar primitive  (compare_values: absent-first, identity fast path)
//!     -> selectors    (project a value to a key, compare the keys)
//!     -> combinators  (reverse, null-aware wrapping, tie-break chaining)
//!     -> Order<T>     (the shared, immutable ordering object)
//!
//! Every `Order<T>` is immutable after construction and can be shared
//! across threads and reused for any number of comparisons. Sorting is
//! left to the standard library; `Order` only answers `compare(a, b)`.
//!
//! The `record` and `sort_key` modules are the text-oriented consumer
//! used by the `ordo` command line tool.

// ---------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------

pub mod error;

// ---------------------------------------------------------------------
// Ordering engine
// ---------------------------------------------------------------------

pub mod compare;
pub mod order;
pub mod selector;
pub mod nulls;

// ---------------------------------------------------------------------
// Delimited records and sort keys
// ---------------------------------------------------------------------

pub mod record;
pub mod sort_key;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use compare::{
    compare_options_by, compare_values, compare_values_by, compare_values_by_key,
    compare_values_by_key_with,
};
pub use error::OrderError;
pub use nulls::{NullPolicy, nulls_first, nulls_last};
pub use order::{Comparator, Order, OrderKind};
pub use record::{Delimiter, Field, FieldType, Record, split_records};
pub use selector::KeySelector;
pub use sort_key::{SortKey, build_order, validate_records};
