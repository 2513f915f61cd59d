//! Ordered key-value collections with validated keys.
//!
//! [`Collection`] is an ordered map from [`Key`]s (integers or strings) to values. Entries iterate
//! in insertion order and can be addressed like the elements of an associative array, and the
//! collection provides functional bulk operations such as [`map`], [`filter`], [`reduce`], and
//! [`chunk`].
//!
//! ```rust
//! use keyed::prelude::*;
//!
//! let mut xs = collection!["a" => 1, "b" => 2, "c" => 3];
//! xs.filter(|x, _| *x != 2).transform(|x| x * 10);
//! assert_eq!(xs.get("c"), Ok(&30));
//! assert_eq!(xs.reduce(|sum, x| sum + x), Some(40));
//!
//! // Floating-point numbers are not keys.
//! assert!(xs.has(&1.5).is_err());
//! ```
//!
//! [`chunk`]: crate::collection::Collection::chunk
//! [`filter`]: crate::collection::Collection::filter
//! [`map`]: crate::collection::Collection::map
//! [`reduce`]: crate::collection::Collection::reduce

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::cloned_instead_of_copied,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::flat_map_option,
    clippy::from_iter_instead_of_collect,
    clippy::if_not_else,
    clippy::manual_ok_or,
    clippy::map_unwrap_or,
    clippy::match_same_arms,
    clippy::redundant_closure_for_method_calls,
    clippy::redundant_else,
    clippy::unreadable_literal,
    clippy::unused_self
)]

pub mod collection;
pub mod error;
pub mod key;
pub mod keyed;

pub mod prelude {
    pub use crate::collection::Collection;
    pub use crate::error::Error;
    pub use crate::key::{AsKey as _, IntoKey as _, Key};
    pub use crate::keyed::Keyed as _;
    pub use crate::collection;
}

pub use collection::Collection;
pub use error::Error;
pub use key::Key;

/// Constructs a [`Collection`] from `key => value` pairs.
///
/// Each key is converted with [`Into<Key>`], so only infallible key types (string slices, strings,
/// and integers that fit into an `i64`) can be used. Key types may be mixed.
///
/// ```rust
/// use keyed::collection;
///
/// let xs = collection!["a" => 'a', 0 => 'b'];
/// assert_eq!(xs.len(), 2);
/// ```
#[macro_export]
macro_rules! collection {
    () => {
        $crate::collection::Collection::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::core::iter::Iterator::collect::<$crate::collection::Collection<_>>(
            ::core::iter::IntoIterator::into_iter([
                $((::core::convert::Into::<$crate::key::Key>::into($key), $value),)+
            ]),
        )
    };
}

// Trace events are emitted under the target `keyed::collection` when the `tracing` feature is
// enabled and compile to nothing otherwise.
macro_rules! trace {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::trace!(target: "keyed::collection", $($arg)+);
        }
    };
}
pub(crate) use trace;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::collection::Collection;
    use crate::key::Key;

    #[rstest]
    fn collection_with_mixed_keys_then_insertion_order() {
        let xs = collection!["a" => 1, 0 => 2, String::from("b") => 3, -7i64 => 4];
        assert_eq!(
            xs.keys(),
            Collection::from_values([Key::from("a"), Key::Int(0), Key::from("b"), Key::Int(-7)]),
        );
        assert_eq!(xs.get("a"), Ok(&1));
        assert_eq!(xs.get(&0), Ok(&2));
        assert_eq!(xs.get(&-7), Ok(&4));
    }

    #[rstest]
    fn collection_with_trailing_comma_then_eq_from_array() {
        let xs = collection![0 => 'x', 1 => 'y',];
        assert_eq!(xs, Collection::from([(0, 'x'), (1, 'y')]));
    }

    #[rstest]
    fn collection_without_entries_then_empty() {
        let xs: Collection<i32> = collection![];
        assert!(xs.is_empty());
    }
}
