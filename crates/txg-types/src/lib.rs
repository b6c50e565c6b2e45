//! Foundation types for the transaction entry graph (TXG).
//!
//! Every other TXG crate depends on `txg-types`.
//!
//! # Key Types
//!
//! - [`Hash`]: 256-bit digest used for entry IDs and content commitments
//! - [`AssetId`]: 256-bit identifier of an issued asset

pub mod error;
pub mod hash;

pub use error::TypeError;
pub use hash::{AssetId, Hash};
