//! Hashing primitives for the transaction entry graph.
//!
//! Every digest in TXG is SHA3-256. Hasher state is drawn from a bounded
//! pool; a checked-out hasher is reset and returned when its guard drops,
//! whichever way the caller exits.
//!
//! All crypto operations wrap established libraries; there is no custom cryptography.

pub mod hasher;

pub use hasher::{
    configure_pool, empty_string_hash, sum256, HasherPool, PooledHasher, DEFAULT_POOL_CAPACITY,
    EMPTY_STRING_HASH,
};
