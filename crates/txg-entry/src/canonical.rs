//! Canonical encoding of entry bodies.
//!
//! Entry bodies are described as [`Value`] trees. The set of shapes is
//! closed, so the encoder is an exhaustive match rather than a runtime type
//! walk. Records carry their field list, in declaration order, together with
//! a per-field exclusion flag; excluded fields contribute nothing to the
//! stream and therefore nothing to the entry ID.
//!
//! Field order is part of the wire contract. Reordering the fields of a
//! record changes every hash derived from it.

use std::io::Write;

use txg_codec::{write_varint31, write_varint63, write_varstr31, write_varstr_list, CodecError};
use txg_types::{AssetId, Hash};

use crate::error::{EncodeError, EncodeResult};

/// A canonically encodable value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// One raw byte.
    Byte(u8),
    /// varint63.
    U64(u64),
    /// varstr31.
    Bytes(Vec<u8>),
    /// varint31 count, then varstr31 elements.
    BytesList(Vec<Vec<u8>>),
    /// UTF-8 bytes as a varstr31.
    Str(String),
    /// 32 raw bytes, no prefix.
    Hash(Hash),
    /// varint31 count, then each element.
    List(Vec<Value>),
    /// Fields in declaration order; no prefix of its own.
    Record(Record),
}

/// A named-field composite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    name: &'static str,
    fields: Vec<Field>,
}

/// One field of a [`Record`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub value: Value,
    /// Excluded fields are skipped by the encoder.
    pub excluded: bool,
}

impl Record {
    /// Start an empty record. `name` only appears in error messages.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Append a hashed field.
    pub fn field(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.fields.push(Field {
            name,
            value: value.into(),
            excluded: false,
        });
        self
    }

    /// Append a field that is carried along but never encoded.
    pub fn excluded(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.fields.push(Field {
            name,
            value: value.into(),
            excluded: true,
        });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// Types that describe themselves as a canonical [`Value`].
///
/// Entry bodies implement this; the returned record's field list is the
/// hashed layout of the body.
pub trait Encodable {
    fn to_value(&self) -> Value;
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Byte(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<Vec<Vec<u8>>> for Value {
    fn from(v: Vec<Vec<u8>>) -> Self {
        Value::BytesList(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<Hash> for Value {
    fn from(v: Hash) -> Self {
        Value::Hash(v)
    }
}

impl From<AssetId> for Value {
    fn from(v: AssetId) -> Self {
        Value::Hash(v.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

/// Write the canonical encoding of `value` to `w`.
///
/// On error, `w` holds a partial encoding and must be discarded.
pub fn encode<W: Write + ?Sized>(w: &mut W, value: &Value) -> EncodeResult<()> {
    match value {
        Value::Byte(b) => w.write_all(&[*b]).map_err(CodecError::from)?,
        Value::U64(v) => {
            write_varint63(w, *v)?;
        }
        Value::Bytes(b) => {
            write_varstr31(w, b)?;
        }
        Value::BytesList(list) => {
            write_varstr_list(w, list)?;
        }
        Value::Str(s) => {
            write_varstr31(w, s.as_bytes())?;
        }
        Value::Hash(h) => w.write_all(h.as_bytes()).map_err(CodecError::from)?,
        Value::List(items) => {
            write_varint31(w, items.len() as u64)?;
            for (index, item) in items.iter().enumerate() {
                encode(w, item).map_err(|e| EncodeError::Element {
                    index,
                    source: Box::new(e),
                })?;
            }
        }
        Value::Record(record) => {
            for (index, field) in record.fields.iter().enumerate() {
                if field.excluded {
                    continue;
                }
                encode(w, &field.value).map_err(|e| EncodeError::Field {
                    record: record.name,
                    index,
                    name: field.name,
                    source: Box::new(e),
                })?;
            }
        }
    }
    Ok(())
}

/// Canonical encoding of `value` as a fresh buffer. Never returns partial
/// output.
pub fn encode_to_vec(value: &Value) -> EncodeResult<Vec<u8>> {
    let mut buf = Vec::new();
    encode(&mut buf, value)?;
    Ok(buf)
}
