//! The [`Entry`] abstraction and entry ID computation.

use std::sync::{Arc, Weak};

use tracing::trace;
use txg_crypto::HasherPool;
use txg_types::Hash;

use crate::canonical::{self, Value};
use crate::error::EntryResult;

/// Domain-separation prefix of every entry ID preimage.
pub const ENTRY_ID_PREFIX: &[u8] = b"entryid:";

/// One node of a transaction's entry graph.
pub trait Entry: Send + Sync {
    /// Fixed tag naming the entry kind, e.g. `"spend1"`. Never changes once
    /// assigned.
    fn type_tag(&self) -> &'static str;

    /// The hashed part of the entry.
    fn body(&self) -> Value;

    /// Position of the originating input or output within its transaction,
    /// or `None` for entries that did not come from one.
    fn ordinal(&self) -> Option<usize>;

    /// This entry's ID.
    fn id(&self) -> EntryResult<Hash> {
        entry_id(Some(self))
    }
}

/// Compute the ID of an entry.
///
/// `SHA3-256("entryid:" ‖ type_tag ‖ ":" ‖ SHA3-256(canonical(body)))`.
/// An absent entry has the all-zero ID.
pub fn entry_id<E: Entry + ?Sized>(entry: Option<&E>) -> EntryResult<Hash> {
    let Some(entry) = entry else {
        return Ok(Hash::zero());
    };

    let pool = HasherPool::global();

    let mut body_hasher = pool.checkout();
    canonical::encode(&mut body_hasher, &entry.body())?;
    let inner = body_hasher.finalize();

    let mut hasher = pool.checkout();
    hasher.update(ENTRY_ID_PREFIX);
    hasher.update(entry.type_tag());
    hasher.update(b":");
    hasher.update(inner.as_bytes());
    let id = hasher.finalize();

    trace!(kind = entry.type_tag(), id = %id.short_hex(), "computed entry id");
    Ok(id)
}

/// A non-owning link to a shared entry, for destinations and other
/// back-references that must not keep their target alive.
pub fn downgrade<E: Entry + 'static>(entry: &Arc<E>) -> Weak<dyn Entry> {
    let weak: Weak<E> = Arc::downgrade(entry);
    weak
}
