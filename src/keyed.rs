//! The capability contract of keyed collections.

use indexmap::map as index_map;

use crate::collection::{Chunks, Collection};
use crate::error::{ChunkLengthError, Error, KeyTypeError};
use crate::key::{AsKey, IntoKey, Key};

/// Ordered collections of values indexed by validated [`Key`]s.
///
/// Every operation that accepts a key classifies it independently and fails with a
/// [`KeyTypeError`] before reading or writing any entry if the key is neither an integer nor a
/// string. See [`Collection`] for the semantics of each operation.
pub trait Keyed {
    type Value;
    type Iter<'a>: Iterator<Item = (&'a Key, &'a Self::Value)>
    where
        Self: 'a;

    fn exists<Q>(&self, key: &Q) -> Result<bool, KeyTypeError>
    where
        Q: AsKey + ?Sized;

    fn get<Q>(&self, key: &Q) -> Result<&Self::Value, Error>
    where
        Q: AsKey + ?Sized;

    fn set<K>(&mut self, key: K, value: Self::Value) -> Result<Option<Self::Value>, KeyTypeError>
    where
        K: IntoKey;

    fn unset<Q>(&mut self, key: &Q) -> Result<(), KeyTypeError>
    where
        Q: AsKey + ?Sized;

    fn has<Q>(&self, key: &Q) -> Result<bool, KeyTypeError>
    where
        Q: AsKey + ?Sized;

    fn get_or_default<'a, Q>(
        &'a self,
        key: &Q,
        default: &'a Self::Value,
    ) -> Result<&'a Self::Value, KeyTypeError>
    where
        Q: AsKey + ?Sized;

    fn set_value<K>(
        &mut self,
        key: K,
        value: Self::Value,
    ) -> Result<Option<Self::Value>, KeyTypeError>
    where
        K: IntoKey;

    fn remove<Q>(&mut self, key: &Q) -> Result<Option<Self::Value>, KeyTypeError>
    where
        Q: AsKey + ?Sized;

    fn keys(&self) -> Collection<Key>;

    fn chunk(
        &self,
        length: usize,
        preserve_keys: bool,
    ) -> Result<Chunks<Self::Value>, ChunkLengthError>
    where
        Self::Value: Clone;

    fn transform<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(Self::Value) -> Self::Value;

    fn map<U, F>(&self, f: F) -> Collection<U>
    where
        F: FnMut(&Self::Value) -> U;

    fn filter<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&Self::Value, &Key) -> bool;

    fn reduce<F>(&self, f: F) -> Option<Self::Value>
    where
        Self::Value: Clone,
        F: FnMut(Self::Value, &Self::Value) -> Self::Value;

    fn iter(&self) -> Self::Iter<'_>;
}

impl<V> Keyed for Collection<V> {
    type Value = V;
    type Iter<'a>
        = index_map::Iter<'a, Key, V>
    where
        V: 'a;

    fn exists<Q>(&self, key: &Q) -> Result<bool, KeyTypeError>
    where
        Q: AsKey + ?Sized,
    {
        Collection::exists(self, key)
    }

    fn get<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        Q: AsKey + ?Sized,
    {
        Collection::get(self, key)
    }

    fn set<K>(&mut self, key: K, value: V) -> Result<Option<V>, KeyTypeError>
    where
        K: IntoKey,
    {
        Collection::set(self, key, value)
    }

    fn unset<Q>(&mut self, key: &Q) -> Result<(), KeyTypeError>
    where
        Q: AsKey + ?Sized,
    {
        Collection::unset(self, key)
    }

    fn has<Q>(&self, key: &Q) -> Result<bool, KeyTypeError>
    where
        Q: AsKey + ?Sized,
    {
        Collection::has(self, key)
    }

    fn get_or_default<'a, Q>(&'a self, key: &Q, default: &'a V) -> Result<&'a V, KeyTypeError>
    where
        Q: AsKey + ?Sized,
    {
        Collection::get_or_default(self, key, default)
    }

    fn set_value<K>(&mut self, key: K, value: V) -> Result<Option<V>, KeyTypeError>
    where
        K: IntoKey,
    {
        Collection::set_value(self, key, value)
    }

    fn remove<Q>(&mut self, key: &Q) -> Result<Option<V>, KeyTypeError>
    where
        Q: AsKey + ?Sized,
    {
        Collection::remove(self, key)
    }

    fn keys(&self) -> Collection<Key> {
        Collection::keys(self)
    }

    fn chunk(&self, length: usize, preserve_keys: bool) -> Result<Chunks<V>, ChunkLengthError>
    where
        V: Clone,
    {
        Collection::chunk(self, length, preserve_keys)
    }

    fn transform<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(V) -> V,
    {
        Collection::transform(self, f)
    }

    fn map<U, F>(&self, f: F) -> Collection<U>
    where
        F: FnMut(&V) -> U,
    {
        Collection::map(self, f)
    }

    fn filter<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&V, &Key) -> bool,
    {
        Collection::filter(self, f)
    }

    fn reduce<F>(&self, f: F) -> Option<V>
    where
        V: Clone,
        F: FnMut(V, &V) -> V,
    {
        Collection::reduce(self, f)
    }

    fn iter(&self) -> Self::Iter<'_> {
        Collection::iter(self)
    }
}
