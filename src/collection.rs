//! An ordered collection of values indexed by [`Key`]s.
//!
//! [`Collection`] behaves like an associative array: entries are addressed by integer or string
//! keys and iterate in insertion order. Besides indexed access it provides bulk operations that
//! either mutate the collection in place ([`transform`], [`filter`]) or produce a new collection
//! and leave the source untouched ([`map`], [`chunk`], [`keys`]).
//!
//! Every accessor classifies its key argument first and fails with a [`KeyTypeError`] if it has
//! no key representation. No lookup or mutation occurs in that case.
//!
//! [`chunk`]: Collection::chunk
//! [`filter`]: Collection::filter
//! [`keys`]: Collection::keys
//! [`map`]: Collection::map
//! [`transform`]: Collection::transform

#[cfg(feature = "arbitrary")]
use arbitrary::{Arbitrary, Unstructured};
use core::fmt::{self, Debug, Formatter};
use core::mem;
use core::num::NonZeroUsize;
use core::ops::{Index, IndexMut};
use indexmap::map::{self as index_map, IndexMap};
use itertools::Itertools as _;

use crate::error::{ChunkLengthError, Error, KeyNotFoundError, KeyTypeError};
use crate::key::{AsKey, IntoKey, Key};
use crate::trace;

pub type Chunks<V> = Collection<Collection<V>>;

#[derive(Clone)]
pub struct Collection<V> {
    items: IndexMap<Key, V>,
}

impl<V> Collection<V> {
    pub fn new() -> Self {
        Collection {
            items: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Collection {
            items: IndexMap::with_capacity(capacity),
        }
    }

    pub fn from_index_map(items: IndexMap<Key, V>) -> Self {
        Collection { items }
    }

    /// Constructs a list-like collection from `values`, keyed `0..n` in iteration order.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| (Key::from_index(index), value))
            .collect()
    }

    /// Constructs a collection from key-value pairs, classifying each key.
    ///
    /// Later entries overwrite earlier entries with the same key, but keep the position of the
    /// first occurrence.
    ///
    /// # Errors
    ///
    /// Returns an error if any key is neither an integer nor a string.
    pub fn try_from_iter<K, I>(items: I) -> Result<Self, KeyTypeError>
    where
        K: IntoKey,
        I: IntoIterator<Item = (K, V)>,
    {
        items
            .into_iter()
            .map(|(key, value)| key.into_key().map(|key| (key, value)))
            .collect()
    }

    pub fn into_index_map(self) -> IndexMap<Key, V> {
        self.items
    }

    pub fn into_values(self) -> index_map::IntoValues<Key, V> {
        self.items.into_values()
    }

    pub fn exists<Q>(&self, key: &Q) -> Result<bool, KeyTypeError>
    where
        Q: AsKey + ?Sized,
    {
        let key = key.as_key()?;
        Ok(self.items.contains_key(&key))
    }

    /// Gets the value at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyType`] if `key` is neither an integer nor a string and
    /// [`Error::KeyNotFound`] if there is no entry at `key`. Use [`get_or_default`] to query keys
    /// that may be absent.
    ///
    /// [`get_or_default`]: Collection::get_or_default
    pub fn get<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        Q: AsKey + ?Sized,
    {
        let key = key.as_key()?;
        self.items
            .get(&key)
            .ok_or_else(|| KeyNotFoundError::from_key(key.to_key()).into())
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        Q: AsKey + ?Sized,
    {
        let key = key.as_key()?;
        self.items
            .get_mut(&key)
            .ok_or_else(|| KeyNotFoundError::from_key(key.to_key()).into())
    }

    /// Inserts `value` at `key`, returning the replaced value if any.
    ///
    /// A new key is appended to the end of the collection. An existing key keeps its position.
    pub fn set<K>(&mut self, key: K, value: V) -> Result<Option<V>, KeyTypeError>
    where
        K: IntoKey,
    {
        let key = key.into_key()?;
        trace!(?key, len = self.items.len(), "set");
        Ok(self.items.insert(key, value))
    }

    /// Removes the entry at `key`. Removing an absent key does nothing.
    pub fn unset<Q>(&mut self, key: &Q) -> Result<(), KeyTypeError>
    where
        Q: AsKey + ?Sized,
    {
        let key = key.as_key()?;
        trace!(?key, len = self.items.len(), "unset");
        self.items.shift_remove(&key);
        Ok(())
    }

    pub fn has<Q>(&self, key: &Q) -> Result<bool, KeyTypeError>
    where
        Q: AsKey + ?Sized,
    {
        let key = key.as_key()?;
        Ok(self.items.contains_key(&key))
    }

    pub fn get_or_default<'a, Q>(
        &'a self,
        key: &Q,
        default: &'a V,
    ) -> Result<&'a V, KeyTypeError>
    where
        Q: AsKey + ?Sized,
    {
        let key = key.as_key()?;
        Ok(self.items.get(&key).unwrap_or(default))
    }

    pub fn set_value<K>(&mut self, key: K, value: V) -> Result<Option<V>, KeyTypeError>
    where
        K: IntoKey,
    {
        self.set(key, value)
    }

    /// Removes and returns the value at `key`, or `None` if there is no such entry.
    ///
    /// Unlike [`get`], an absent key is not an error. The relative order of the remaining entries
    /// is preserved.
    ///
    /// [`get`]: Collection::get
    pub fn remove<Q>(&mut self, key: &Q) -> Result<Option<V>, KeyTypeError>
    where
        Q: AsKey + ?Sized,
    {
        let key = key.as_key()?;
        let value = self.items.shift_remove(&key);
        trace!(?key, removed = value.is_some(), "remove");
        Ok(value)
    }

    /// Returns a new list-like collection of the keys of `self` in iteration order.
    pub fn keys(&self) -> Collection<Key> {
        Collection::from_values(self.items.keys().cloned())
    }

    /// Splits the collection into consecutive chunks of at most `length` entries.
    ///
    /// The final chunk may be shorter. Chunks are keyed `0..n`. If `preserve_keys` is `true`, each
    /// chunk retains the keys of its entries; otherwise each chunk is keyed `0..length`.
    ///
    /// # Errors
    ///
    /// Returns an error if `length` is zero.
    pub fn chunk(&self, length: usize, preserve_keys: bool) -> Result<Chunks<V>, ChunkLengthError>
    where
        V: Clone,
    {
        let length = NonZeroUsize::new(length).ok_or(ChunkLengthError)?;
        Ok(chunked(
            self.items
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
            length,
            preserve_keys,
        ))
    }

    /// Splits the collection into chunks like [`chunk`], consuming it.
    ///
    /// [`chunk`]: Collection::chunk
    pub fn into_chunks(
        self,
        length: usize,
        preserve_keys: bool,
    ) -> Result<Chunks<V>, ChunkLengthError> {
        let length = NonZeroUsize::new(length).ok_or(ChunkLengthError)?;
        Ok(chunked(self.items.into_iter(), length, preserve_keys))
    }

    /// Replaces each value with `f(value)` in place and returns `self` for chaining.
    pub fn transform<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(V) -> V,
    {
        let items = mem::take(&mut self.items);
        self.items = transformed(items, f);
        trace!(len = self.items.len(), "transform");
        self
    }

    /// Replaces each value with `f(value)`, changing the value type of the collection.
    pub fn transform_into<U, F>(self, f: F) -> Collection<U>
    where
        F: FnMut(V) -> U,
    {
        Collection {
            items: transformed(self.items, f),
        }
    }

    /// Returns a new collection with the same keys and the values `f(&value)`.
    pub fn map<U, F>(&self, mut f: F) -> Collection<U>
    where
        F: FnMut(&V) -> U,
    {
        self.items
            .iter()
            .map(|(key, value)| (key.clone(), f(value)))
            .collect()
    }

    /// Retains only the entries for which `f(value, key)` is `true` and returns `self` for
    /// chaining.
    pub fn filter<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(&V, &Key) -> bool,
    {
        self.items.retain(|key, value| f(value, key));
        trace!(len = self.items.len(), "filter");
        self
    }

    /// Returns a new collection of the entries for which `f(value, key)` is `true`.
    ///
    /// This is the non-mutating counterpart to [`filter`].
    ///
    /// [`filter`]: Collection::filter
    pub fn filtered<F>(&self, mut f: F) -> Self
    where
        V: Clone,
        F: FnMut(&V, &Key) -> bool,
    {
        self.items
            .iter()
            .filter(|(key, value)| f(value, key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Folds the values in iteration order, seeded with the first value.
    ///
    /// Returns `None` if the collection is empty. A collection with one entry reduces to a copy of
    /// that value without calling `f`.
    pub fn reduce<F>(&self, f: F) -> Option<V>
    where
        V: Clone,
        F: FnMut(V, &V) -> V,
    {
        let mut values = self.items.values();
        let seed = values.next()?.clone();
        Some(values.fold(seed, f))
    }

    /// Folds the values like [`reduce`], consuming the collection.
    ///
    /// [`reduce`]: Collection::reduce
    pub fn into_reduce<F>(self, f: F) -> Option<V>
    where
        F: FnMut(V, V) -> V,
    {
        self.items.into_values().reduce(f)
    }

    /// Folds the values in iteration order, seeded with `init`.
    pub fn fold<A, F>(&self, init: A, f: F) -> A
    where
        F: FnMut(A, &V) -> A,
    {
        self.items.values().fold(init, f)
    }

    pub fn clear(&mut self) {
        self.items.clear()
    }

    pub fn first(&self) -> Option<(&Key, &V)> {
        self.items.first()
    }

    pub fn last(&self) -> Option<(&Key, &V)> {
        self.items.last()
    }

    pub fn iter(&self) -> index_map::Iter<'_, Key, V> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> index_map::IterMut<'_, Key, V> {
        self.items.iter_mut()
    }

    pub fn values(&self) -> index_map::Values<'_, Key, V> {
        self.items.values()
    }

    pub fn values_mut(&mut self) -> index_map::ValuesMut<'_, Key, V> {
        self.items.values_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_index_map(&self) -> &IndexMap<Key, V> {
        &self.items
    }
}

#[cfg(feature = "arbitrary")]
#[cfg_attr(docsrs, doc(cfg(feature = "arbitrary")))]
impl<'a, V> Arbitrary<'a> for Collection<V>
where
    V: Arbitrary<'a>,
{
    fn arbitrary(unstructured: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        unstructured.arbitrary_iter::<(Key, V)>()?.collect()
    }
}

impl<V> Debug for Collection<V>
where
    V: Debug,
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.items.iter()).finish()
    }
}

impl<V> Default for Collection<V> {
    fn default() -> Self {
        Collection::new()
    }
}

impl<V> Eq for Collection<V> where V: Eq {}

impl<V> Extend<(Key, V)> for Collection<V> {
    fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (Key, V)>,
    {
        self.items.extend(items)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Collection<V>
where
    K: Into<Key>,
{
    fn from(items: [(K, V); N]) -> Self {
        items
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect()
    }
}

impl<V> From<IndexMap<Key, V>> for Collection<V> {
    fn from(items: IndexMap<Key, V>) -> Self {
        Collection::from_index_map(items)
    }
}

impl<V> FromIterator<(Key, V)> for Collection<V> {
    fn from_iter<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (Key, V)>,
    {
        Collection {
            items: items.into_iter().collect(),
        }
    }
}

/// Direct indexed access.
///
/// # Panics
///
/// Panics if the key is neither an integer nor a string or if there is no entry at the key. Use
/// [`Collection::get`] to handle these cases.
impl<V, Q> Index<&'_ Q> for Collection<V>
where
    Q: AsKey + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        match self.get(key) {
            Ok(value) => value,
            Err(error) => panic!("{}", error),
        }
    }
}

impl<V, Q> IndexMut<&'_ Q> for Collection<V>
where
    Q: AsKey + ?Sized,
{
    fn index_mut(&mut self, key: &Q) -> &mut Self::Output {
        match self.get_mut(key) {
            Ok(value) => value,
            Err(error) => panic!("{}", error),
        }
    }
}

impl<V> IntoIterator for Collection<V> {
    type Item = (Key, V);
    type IntoIter = index_map::IntoIter<Key, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Collection<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = index_map::Iter<'a, Key, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut Collection<V> {
    type Item = (&'a Key, &'a mut V);
    type IntoIter = index_map::IterMut<'a, Key, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

// Equality is sensitive to order, unlike `IndexMap`.
impl<V> PartialEq for Collection<V>
where
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len() && self.items.iter().eq(other.items.iter())
    }
}

fn chunked<V, I>(items: I, length: NonZeroUsize, preserve_keys: bool) -> Chunks<V>
where
    I: Iterator<Item = (Key, V)>,
{
    let chunks = items.chunks(length.get());
    let chunks = (&chunks).into_iter().map(|chunk| {
        if preserve_keys {
            chunk.collect()
        }
        else {
            Collection::from_values(chunk.map(|(_, value)| value))
        }
    });
    let chunks = Collection::from_values(chunks);
    trace!(len = chunks.len(), length = length.get(), preserve_keys, "chunk");
    chunks
}

fn transformed<V, U, F>(items: IndexMap<Key, V>, mut f: F) -> IndexMap<Key, U>
where
    F: FnMut(V) -> U,
{
    items
        .into_iter()
        .map(|(key, value)| (key, f(value)))
        .collect()
}

#[cfg(test)]
pub mod harness {
    use rstest::fixture;

    use crate::collection::Collection;
    use crate::key::Key;

    /// A collection with the string keys `"a"`, `"b"`, ... and the values `1..=n`.
    #[fixture]
    pub fn xs(#[default(3)] n: u8) -> Collection<i32> {
        (0..n)
            .map(|index| {
                let key = char::from(b'a' + index).to_string();
                (Key::from(key), i32::from(index) + 1)
            })
            .collect()
    }

    #[fixture]
    pub fn empty() -> Collection<i32> {
        Collection::new()
    }
}
