use thiserror::Error;

/// Errors produced while reading or writing wire primitives.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("value {value} does not fit in {bits} bits")]
    OutOfRange { value: u64, bits: u32 },

    #[error("varint overflows 64 bits")]
    VarintOverflow,

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("{len} trailing bytes in extensible string")]
    TrailingData { len: usize },

    #[error("{field}: {source}")]
    Field {
        field: &'static str,
        source: Box<CodecError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Strip any [`CodecError::Field`] wrappers and return the root cause.
    pub fn root(&self) -> &CodecError {
        match self {
            Self::Field { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Attach the name of the field being read or written to an error.
pub trait Context<T> {
    fn context(self, field: &'static str) -> CodecResult<T>;
}

impl<T> Context<T> for CodecResult<T> {
    fn context(self, field: &'static str) -> CodecResult<T> {
        self.map_err(|e| CodecError::Field {
            field,
            source: Box::new(e),
        })
    }
}
