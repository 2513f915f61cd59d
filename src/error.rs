//! Errors of collection accessors.

use core::error::Error as StdError;
use core::fmt::{self, Debug, Display, Formatter};

use crate::key::{Key, KeyKind};

/// An input that is neither an integer nor a string has been used as a key.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct KeyTypeError {
    kind: KeyKind,
}

impl KeyTypeError {
    pub(crate) const fn from_kind(kind: KeyKind) -> Self {
        KeyTypeError { kind }
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }
}

impl Display for KeyTypeError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "key must be an integer or string, found {}", self.kind)
    }
}

impl StdError for KeyTypeError {}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct KeyNotFoundError<Q> {
    key: Q,
}

impl<Q> KeyNotFoundError<Q> {
    pub(crate) const fn from_key(key: Q) -> Self {
        KeyNotFoundError { key }
    }

    pub fn key(&self) -> &Q {
        &self.key
    }

    pub fn into_key(self) -> Q {
        self.key
    }

    pub fn take(self) -> (Q, KeyNotFoundError<()>) {
        let KeyNotFoundError { key } = self;
        (key, KeyNotFoundError::from_key(()))
    }

    pub fn take_and_drop(self) -> KeyNotFoundError<()> {
        self.take().1
    }
}

impl<Q> Display for KeyNotFoundError<Q>
where
    Q: Debug,
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "key {:?} not found", &self.key)
    }
}

impl<Q> StdError for KeyNotFoundError<Q> where Q: Debug {}

/// A collection has been split into chunks of zero entries.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ChunkLengthError;

impl Display for ChunkLengthError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "chunk length must be greater than zero")
    }
}

impl StdError for ChunkLengthError {}

/// Any error raised by a [`Collection`].
///
/// Most operations return the narrowest applicable error. This type unifies them so that
/// callers can propagate with `?` across operations.
///
/// [`Collection`]: crate::collection::Collection
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    InvalidKeyType(KeyTypeError),
    KeyNotFound(KeyNotFoundError<Key>),
    InvalidArgument(ChunkLengthError),
}

impl Error {
    pub fn is_invalid_key_type(&self) -> bool {
        matches!(self, Error::InvalidKeyType(_))
    }

    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Error::KeyNotFound(_))
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyType(error) => Display::fmt(error, formatter),
            Error::KeyNotFound(error) => Display::fmt(error, formatter),
            Error::InvalidArgument(error) => Display::fmt(error, formatter),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::InvalidKeyType(error) => Some(error),
            Error::KeyNotFound(error) => Some(error),
            Error::InvalidArgument(error) => Some(error),
        }
    }
}

impl From<ChunkLengthError> for Error {
    fn from(error: ChunkLengthError) -> Self {
        Error::InvalidArgument(error)
    }
}

impl From<KeyNotFoundError<Key>> for Error {
    fn from(error: KeyNotFoundError<Key>) -> Self {
        Error::KeyNotFound(error)
    }
}

impl From<KeyTypeError> for Error {
    fn from(error: KeyTypeError) -> Self {
        Error::InvalidKeyType(error)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::error::{ChunkLengthError, Error, KeyNotFoundError, KeyTypeError};
    use crate::key::{Key, KeyKind};

    #[rstest]
    #[case::key_type(
        KeyTypeError::from_kind(KeyKind::Float).into(),
        "key must be an integer or string, found float",
    )]
    #[case::key_not_found(
        KeyNotFoundError::from_key(Key::from("a")).into(),
        "key \"a\" not found",
    )]
    #[case::chunk_length(ChunkLengthError.into(), "chunk length must be greater than zero")]
    fn display_error_then_eq_message(#[case] error: Error, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn take_key_not_found_error_then_key_eq() {
        let (key, _) = KeyNotFoundError::from_key(Key::Int(3)).take();
        assert_eq!(key, Key::Int(3));
    }
}
