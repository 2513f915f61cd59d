//! Keys of a [`Collection`].
//!
//! A [`Key`] is either a whole number or a string. Accessors accept any type that implements
//! [`AsKey`] (for queries) or [`IntoKey`] (for insertion) and classify the input before touching
//! the collection. Inputs that have no key representation, such as floating-point numbers,
//! booleans, and null (`()` or [`None`]), are rejected with a [`KeyTypeError`].
//!
//! [`Collection`]: crate::collection::Collection

#[cfg(feature = "arbitrary")]
use arbitrary::{Arbitrary, Unstructured};
use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use indexmap::Equivalent;

use crate::error::KeyTypeError;

/// The shape of an input that cannot be used as a key.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum KeyKind {
    Float,
    Boolean,
    Null,
    /// An integer that does not fit into an `i64`.
    OutOfRange,
}

impl KeyKind {
    pub const fn name(self) -> &'static str {
        match self {
            KeyKind::Float => "float",
            KeyKind::Boolean => "boolean",
            KeyKind::Null => "null",
            KeyKind::OutOfRange => "out-of-range integer",
        }
    }
}

impl Display for KeyKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

#[derive(Clone, Eq, Ord, PartialEq, PartialOrd)]
pub enum Key {
    Int(i64),
    Text(String),
}

impl Key {
    // LINT: Indices are bounded by the length of a collection, which never exceeds `isize::MAX`.
    //       `isize::MAX` is at most `i64::MAX` on all supported targets, so this cast never wraps.
    #[allow(clippy::cast_possible_wrap)]
    pub(crate) fn from_index(index: usize) -> Self {
        Key::Int(index as i64)
    }

    pub fn as_key_ref(&self) -> KeyRef<'_> {
        match self {
            Key::Int(n) => KeyRef::Int(*n),
            Key::Text(text) => KeyRef::Text(text),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Text(text) => Some(text),
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Key::Text(_))
    }
}

#[cfg(feature = "arbitrary")]
#[cfg_attr(docsrs, doc(cfg(feature = "arbitrary")))]
impl<'a> Arbitrary<'a> for Key {
    fn arbitrary(unstructured: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        if unstructured.arbitrary()? {
            unstructured.arbitrary().map(Key::Int)
        }
        else {
            unstructured.arbitrary().map(Key::Text)
        }
    }
}

impl Debug for Key {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.as_key_ref(), formatter)
    }
}

impl Display for Key {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.as_key_ref(), formatter)
    }
}

impl From<&'_ str> for Key {
    fn from(text: &str) -> Self {
        Key::Text(text.into())
    }
}

impl From<String> for Key {
    fn from(text: String) -> Self {
        Key::Text(text)
    }
}

impl From<KeyRef<'_>> for Key {
    fn from(key: KeyRef<'_>) -> Self {
        key.to_key()
    }
}

// `Hash` must agree with `KeyRef` so that borrowed queries find owned keys.
impl Hash for Key {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.as_key_ref().hash(state)
    }
}

/// A borrowed [`Key`].
///
/// Queries are classified into a `KeyRef` so that lookups never allocate.
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum KeyRef<'a> {
    Int(i64),
    Text(&'a str),
}

impl KeyRef<'_> {
    pub fn to_key(self) -> Key {
        match self {
            KeyRef::Int(n) => Key::Int(n),
            KeyRef::Text(text) => Key::Text(text.into()),
        }
    }
}

impl Debug for KeyRef<'_> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            KeyRef::Int(n) => Debug::fmt(n, formatter),
            KeyRef::Text(text) => Debug::fmt(text, formatter),
        }
    }
}

impl Display for KeyRef<'_> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            KeyRef::Int(n) => Display::fmt(n, formatter),
            KeyRef::Text(text) => Display::fmt(text, formatter),
        }
    }
}

impl Equivalent<Key> for KeyRef<'_> {
    fn equivalent(&self, key: &Key) -> bool {
        *self == key.as_key_ref()
    }
}

impl Hash for KeyRef<'_> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        match self {
            KeyRef::Int(n) => {
                state.write_u8(0);
                n.hash(state);
            },
            KeyRef::Text(text) => {
                state.write_u8(1);
                text.hash(state);
            },
        }
    }
}

/// Types that can be classified as a borrowed [`Key`].
///
/// This is the query side of key validation: [`exists`], [`get`], [`remove`], and friends accept
/// `&Q` where `Q: AsKey` and fail with a [`KeyTypeError`] when `Q` has no key representation.
///
/// [`exists`]: crate::collection::Collection::exists
/// [`get`]: crate::collection::Collection::get
/// [`remove`]: crate::collection::Collection::remove
pub trait AsKey {
    fn as_key(&self) -> Result<KeyRef<'_>, KeyTypeError>;
}

/// Types that can be classified as an owned [`Key`].
pub trait IntoKey {
    fn into_key(self) -> Result<Key, KeyTypeError>;
}

impl<T> AsKey for &'_ T
where
    T: AsKey + ?Sized,
{
    fn as_key(&self) -> Result<KeyRef<'_>, KeyTypeError> {
        T::as_key(self)
    }
}

impl<T> IntoKey for &'_ T
where
    T: AsKey + ?Sized,
{
    fn into_key(self) -> Result<Key, KeyTypeError> {
        self.as_key().map(KeyRef::to_key)
    }
}

impl AsKey for Key {
    fn as_key(&self) -> Result<KeyRef<'_>, KeyTypeError> {
        Ok(self.as_key_ref())
    }
}

impl IntoKey for Key {
    fn into_key(self) -> Result<Key, KeyTypeError> {
        Ok(self)
    }
}

impl AsKey for KeyRef<'_> {
    fn as_key(&self) -> Result<KeyRef<'_>, KeyTypeError> {
        Ok(*self)
    }
}

impl IntoKey for KeyRef<'_> {
    fn into_key(self) -> Result<Key, KeyTypeError> {
        Ok(self.to_key())
    }
}

impl AsKey for str {
    fn as_key(&self) -> Result<KeyRef<'_>, KeyTypeError> {
        Ok(KeyRef::Text(self))
    }
}

impl AsKey for String {
    fn as_key(&self) -> Result<KeyRef<'_>, KeyTypeError> {
        Ok(KeyRef::Text(self))
    }
}

impl IntoKey for String {
    fn into_key(self) -> Result<Key, KeyTypeError> {
        Ok(Key::Text(self))
    }
}

impl<T> AsKey for Option<T>
where
    T: AsKey,
{
    fn as_key(&self) -> Result<KeyRef<'_>, KeyTypeError> {
        match self {
            Some(key) => key.as_key(),
            None => Err(KeyTypeError::from_kind(KeyKind::Null)),
        }
    }
}

impl<T> IntoKey for Option<T>
where
    T: IntoKey,
{
    fn into_key(self) -> Result<Key, KeyTypeError> {
        self.ok_or(KeyTypeError::from_kind(KeyKind::Null))
            .and_then(IntoKey::into_key)
    }
}

macro_rules! impl_key_for_integer {
    ($($T:ty),+ $(,)?) => {
        $(
            impl From<$T> for $crate::key::Key {
                fn from(n: $T) -> Self {
                    $crate::key::Key::Int(i64::from(n))
                }
            }

            impl $crate::key::AsKey for $T {
                fn as_key(&self) -> Result<$crate::key::KeyRef<'_>, KeyTypeError> {
                    Ok($crate::key::KeyRef::Int(i64::from(*self)))
                }
            }

            impl $crate::key::IntoKey for $T {
                fn into_key(self) -> Result<$crate::key::Key, KeyTypeError> {
                    Ok(self.into())
                }
            }
        )+
    };
}
impl_key_for_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_key_for_wide_integer {
    ($($T:ty),+ $(,)?) => {
        $(
            impl $crate::key::AsKey for $T {
                fn as_key(&self) -> Result<$crate::key::KeyRef<'_>, KeyTypeError> {
                    i64::try_from(*self)
                        .map($crate::key::KeyRef::Int)
                        .map_err(|_| KeyTypeError::from_kind(KeyKind::OutOfRange))
                }
            }

            impl $crate::key::IntoKey for $T {
                fn into_key(self) -> Result<$crate::key::Key, KeyTypeError> {
                    self.as_key().map($crate::key::KeyRef::to_key)
                }
            }
        )+
    };
}
impl_key_for_wide_integer!(i128, isize, u64, u128, usize);

macro_rules! impl_key_for_rejected {
    ($($T:ty => $kind:expr),+ $(,)?) => {
        $(
            impl $crate::key::AsKey for $T {
                fn as_key(&self) -> Result<$crate::key::KeyRef<'_>, KeyTypeError> {
                    Err(KeyTypeError::from_kind($kind))
                }
            }

            impl $crate::key::IntoKey for $T {
                fn into_key(self) -> Result<$crate::key::Key, KeyTypeError> {
                    Err(KeyTypeError::from_kind($kind))
                }
            }
        )+
    };
}
impl_key_for_rejected!(
    f32 => KeyKind::Float,
    f64 => KeyKind::Float,
    bool => KeyKind::Boolean,
    () => KeyKind::Null,
);

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;
    use rstest::rstest;
    use std::hash::RandomState;

    use crate::key::{AsKey, IntoKey, Key, KeyKind, KeyRef};

    #[rstest]
    #[case::text(Key::from("a"))]
    #[case::int(Key::Int(-3))]
    #[case::zero(Key::Int(0))]
    fn hash_of_key_eq_hash_of_key_ref(#[case] key: Key) {
        let state = RandomState::new();
        assert_eq!(state.hash_one(&key), state.hash_one(key.as_key_ref()));
    }

    #[rstest]
    fn text_and_int_keys_are_distinct() {
        assert_ne!(Key::from("1"), Key::Int(1));
        assert_ne!("1".as_key().unwrap(), 1i32.as_key().unwrap());
    }

    #[rstest]
    #[case::float(1.5f64.as_key().map(KeyRef::to_key), KeyKind::Float)]
    #[case::whole_float(1.0f32.as_key().map(KeyRef::to_key), KeyKind::Float)]
    #[case::boolean(true.into_key(), KeyKind::Boolean)]
    #[case::unit(().into_key(), KeyKind::Null)]
    #[case::none(Option::<&str>::None.into_key(), KeyKind::Null)]
    #[case::wide(u64::MAX.into_key(), KeyKind::OutOfRange)]
    #[case::narrow(i128::MIN.into_key(), KeyKind::OutOfRange)]
    fn classify_rejected_input_then_key_type_error(
        #[case] key: Result<Key, crate::error::KeyTypeError>,
        #[case] expected: KeyKind,
    ) {
        assert_eq!(key.unwrap_err().kind(), expected);
    }

    #[rstest]
    #[case::str("a".into_key(), Key::Text("a".into()))]
    #[case::string(String::from("a").into_key(), Key::Text("a".into()))]
    #[case::some(Some(7u8).into_key(), Key::Int(7))]
    #[case::negative((-7i64).into_key(), Key::Int(-7))]
    #[case::usize(3usize.into_key(), Key::Int(3))]
    fn classify_accepted_input_then_key(
        #[case] key: Result<Key, crate::error::KeyTypeError>,
        #[case] expected: Key,
    ) {
        assert_eq!(key.unwrap(), expected);
    }

    #[rstest]
    #[case::first(0, Key::Int(0))]
    #[case::later(41, Key::Int(41))]
    #[case::max(isize::MAX as usize, Key::Int(isize::MAX as i64))]
    fn key_from_index_then_int_key_eq_index(#[case] index: usize, #[case] expected: Key) {
        assert_eq!(Key::from_index(index), expected);
    }

    #[rstest]
    fn format_key_then_eq_payload() {
        assert_eq!(format!("{}", Key::from("a")), "a");
        assert_eq!(format!("{:?}", Key::from("a")), "\"a\"");
        assert_eq!(format!("{:?}", Key::Int(-2)), "-2");
    }
}
