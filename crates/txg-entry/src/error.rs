//! Error types for entry encoding, identity, and wire I/O.

use txg_codec::CodecError;
use txg_types::Hash;

/// Errors from the canonical encoder.
///
/// Callers must discard whatever was written to the sink before the error.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// A primitive could not be written (out-of-range integer, oversized
    /// byte string, sink failure).
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A record field failed to encode.
    #[error("writing field {index} ({record}.{name}): {source}")]
    Field {
        /// Name of the enclosing record.
        record: &'static str,
        /// Position of the field in declaration order.
        index: usize,
        /// Name of the field.
        name: &'static str,
        source: Box<EncodeError>,
    },

    /// A list element failed to encode.
    #[error("writing list element {index}: {source}")]
    Element {
        /// Position of the element.
        index: usize,
        source: Box<EncodeError>,
    },
}

/// Convenience alias for encoder results.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors that can occur while building, hashing, or decoding entries.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// The entry body could not be canonically encoded.
    #[error("encoding entry body: {0}")]
    Encode(#[from] EncodeError),

    /// A wire primitive could not be read or written.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A version number outside the understood set.
    #[error("unrecognized {what} version {version}")]
    UnrecognizedVersion {
        /// What the version number belongs to.
        what: &'static str,
        /// The value read from the wire.
        version: u64,
    },

    /// An accessor needed the spent output, but the spend's back-reference
    /// has not been resolved.
    #[error("unresolved reference to spent output {0}")]
    UnresolvedReference(Hash),

    /// An output offered to resolve a spend does not hash to the spend's
    /// `spent_output` ID.
    #[error("reference mismatch: spend expects {expected}, output is {actual}")]
    MismatchedReference {
        /// The ID recorded in the spend body.
        expected: Hash,
        /// The ID of the offered output.
        actual: Hash,
    },

    /// An entry with this ID is already in the graph.
    #[error("duplicate entry: {0}")]
    DuplicateEntry(Hash),

    /// Wraps another error with the field being read or written.
    #[error("{field}: {source}")]
    Field {
        /// Description of the field, e.g. `"reading asset version"`.
        field: &'static str,
        source: Box<EntryError>,
    },
}

impl EntryError {
    /// Strip any [`EntryError::Field`] wrappers and return the root cause.
    pub fn root(&self) -> &EntryError {
        match self {
            Self::Field { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Convenience alias for entry results.
pub type EntryResult<T> = Result<T, EntryError>;

/// Attach the field being read or written to any error convertible into an
/// [`EntryError`].
pub trait Context<T> {
    fn context(self, field: &'static str) -> EntryResult<T>;
}

impl<T, E: Into<EntryError>> Context<T> for Result<T, E> {
    fn context(self, field: &'static str) -> EntryResult<T> {
        self.map_err(|e| EntryError::Field {
            field,
            source: Box::new(e.into()),
        })
    }
}
