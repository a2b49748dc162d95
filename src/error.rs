//! Unified error type for all store operations.

/// Things that can go wrong when using the store.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// File system problem (read, write, directory creation).
    Io(String),
    /// The config file isn't a valid document, or nests too deeply.
    Parse(String),
    /// The file was written by a different config version.
    VersionMismatch {
        /// Version this crate writes.
        expected: String,
        /// Version found in the file.
        found: String,
    },
    /// `modify_typed` was called on a key that isn't stored.
    KeyNotFound(String),
    /// A stored value couldn't be decoded as the requested type.
    Deserialize(String),
    /// A value couldn't be encoded to JSON text.
    Serialize(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Parse(msg) => write!(f, "parse error: {msg}"),
            Error::VersionMismatch { expected, found } => write!(
                f,
                "config version mismatch: expected {expected:?}, found {found:?}"
            ),
            Error::KeyNotFound(key) => write!(f, "key not found: {key:?}"),
            Error::Deserialize(msg) => write!(f, "deserialization error: {msg}"),
            Error::Serialize(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
