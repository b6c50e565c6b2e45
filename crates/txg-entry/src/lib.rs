//! Transaction entries: canonical encoding, entry IDs, outputs, and spends.
//!
//! Every entry has a type tag and a body. The body is described as a
//! [`Value`] tree and hashed through the canonical encoder; the entry ID is
//! `SHA3-256("entryid:" ‖ tag ‖ ":" ‖ SHA3-256(body))`. Outputs also have a
//! wire form, read and written with the primitives from `txg-codec`.
//!
//! Spends name the output they consume by ID. [`EntryGraph`] owns a set of
//! entries and resolves those references into shared handles.

pub mod canonical;
pub mod commitment;
pub mod entry;
pub mod error;
pub mod graph;
pub mod output;
pub mod spend;

pub use canonical::{encode, encode_to_vec, Encodable, Field, Record, Value};
pub use commitment::{AssetAmount, OutputCommitment, ASSET_VERSION_1, CLAIM_VERSION_1};
pub use entry::{downgrade, entry_id, Entry, ENTRY_ID_PREFIX};
pub use error::{Context, EncodeError, EncodeResult, EntryError, EntryResult};
pub use graph::EntryGraph;
pub use output::{write_ref_data, TxOutput, OUTPUT_TYPE};
pub use spend::{Spend, ValueDestination, SPEND_TYPE};
