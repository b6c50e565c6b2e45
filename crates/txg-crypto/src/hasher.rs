use std::fmt;
use std::io;
use std::sync::{Mutex, OnceLock, PoisonError};

use sha3::{Digest, Sha3_256};
use tracing::debug;
use txg_types::Hash;

/// Number of idle hashers the global pool keeps when not configured.
pub const DEFAULT_POOL_CAPACITY: usize = 16;

/// SHA3-256 of the empty byte string.
pub const EMPTY_STRING_HASH: Hash = Hash::from_bytes([
    0xa7, 0xff, 0xc6, 0xf8, 0xbf, 0x1e, 0xd7, 0x66, 0x51, 0xc1, 0x47, 0x56, 0xa0, 0x61, 0xd6,
    0x62, 0xf5, 0x80, 0xff, 0x4d, 0xe4, 0x3b, 0x49, 0xfa, 0x82, 0xd8, 0x0a, 0x4b, 0x80, 0xf8,
    0x43, 0x4a,
]);

static GLOBAL_POOL: OnceLock<HasherPool> = OnceLock::new();

/// A bounded pool of reusable SHA3-256 hasher states.
///
/// Hashers are handed out as [`PooledHasher`] guards. A guard resets its
/// hasher and gives it back when dropped, so no partial digest state can
/// leak from one computation into the next, even when the holder bails out
/// early with an error. Hashers beyond `capacity` are simply discarded.
pub struct HasherPool {
    idle: Mutex<Vec<Sha3_256>>,
    capacity: usize,
}

impl HasherPool {
    /// Create an empty pool that retains at most `capacity` idle hashers.
    pub fn new(capacity: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// The process-wide pool.
    ///
    /// Created with [`DEFAULT_POOL_CAPACITY`] unless [`configure_pool`] ran
    /// first.
    pub fn global() -> &'static HasherPool {
        GLOBAL_POOL.get_or_init(|| HasherPool::new(DEFAULT_POOL_CAPACITY))
    }

    /// Take a hasher out of the pool, allocating a fresh one if none is idle.
    pub fn checkout(&self) -> PooledHasher<'_> {
        let hasher = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_default();
        PooledHasher { hasher, pool: self }
    }

    /// Maximum number of idle hashers retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of hashers currently sitting idle in the pool.
    pub fn idle(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn checkin(&self, mut hasher: Sha3_256) {
        Digest::reset(&mut hasher);
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
        if idle.len() < self.capacity {
            idle.push(hasher);
        }
    }
}

impl fmt::Debug for HasherPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HasherPool")
            .field("capacity", &self.capacity)
            .field("idle", &self.idle())
            .finish()
    }
}

/// Set the capacity of the global pool.
///
/// Only takes effect before the pool is first used; returns `false` if the
/// global pool already exists.
pub fn configure_pool(capacity: usize) -> bool {
    let installed = GLOBAL_POOL.set(HasherPool::new(capacity)).is_ok();
    if installed {
        debug!(capacity, "configured global hasher pool");
    }
    installed
}

/// A hasher checked out of a [`HasherPool`].
///
/// Implements [`io::Write`] so encoders can stream straight into it.
pub struct PooledHasher<'a> {
    hasher: Sha3_256,
    pool: &'a HasherPool,
}

impl PooledHasher<'_> {
    /// Feed bytes into the digest.
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        Digest::update(&mut self.hasher, data);
    }

    /// Finish the digest. The hasher goes back to its pool.
    pub fn finalize(mut self) -> Hash {
        let out = self.hasher.finalize_reset();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&out);
        Hash::from_bytes(bytes)
    }
}

impl io::Write for PooledHasher<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for PooledHasher<'_> {
    fn drop(&mut self) {
        let hasher = std::mem::take(&mut self.hasher);
        self.pool.checkin(hasher);
    }
}

/// SHA3-256 of `data`, using a hasher from the global pool.
pub fn sum256(data: impl AsRef<[u8]>) -> Hash {
    let mut h = HasherPool::global().checkout();
    h.update(data);
    h.finalize()
}

/// Hash of the empty byte string, used wherever a witness commitment is
/// required but no witness data exists yet.
pub fn empty_string_hash() -> Hash {
    EMPTY_STRING_HASH
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_string_hash_matches_digest() {
        assert_eq!(sum256(b""), EMPTY_STRING_HASH);
        assert_eq!(
            EMPTY_STRING_HASH.to_hex(),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn known_vector_abc() {
        assert_eq!(
            sum256(b"abc").to_hex(),
            "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
        );
    }

    #[test]
    fn sum_is_deterministic() {
        assert_eq!(sum256(b"hello world"), sum256(b"hello world"));
        assert_ne!(sum256(b"hello"), sum256(b"world"));
    }

    #[test]
    fn hasher_returns_to_pool() {
        let pool = HasherPool::new(4);
        assert_eq!(pool.idle(), 0);
        {
            let mut h = pool.checkout();
            h.update(b"data");
            let _ = h.finalize();
        }
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn abandoned_hasher_is_reset_before_reuse() {
        let pool = HasherPool::new(1);
        {
            let mut h = pool.checkout();
            h.update(b"partial state that must not leak");
            // dropped without finalizing, as on an error path
        }
        assert_eq!(pool.idle(), 1);
        let h = pool.checkout();
        assert_eq!(pool.idle(), 0);
        assert_eq!(h.finalize(), EMPTY_STRING_HASH);
    }

    #[test]
    fn pool_discards_beyond_capacity() {
        let pool = HasherPool::new(2);
        let a = pool.checkout();
        let b = pool.checkout();
        let c = pool.checkout();
        drop((a, b, c));
        assert_eq!(pool.idle(), 2);
        assert_eq!(pool.capacity(), 2);
    }

    #[test]
    fn write_impl_matches_update() {
        let pool = HasherPool::new(1);
        let mut h = pool.checkout();
        h.write_all(b"ab").unwrap();
        h.write_all(b"c").unwrap();
        assert_eq!(h.finalize(), sum256(b"abc"));
    }

    #[test]
    fn empty_string_hash_fn_matches_const() {
        assert_eq!(empty_string_hash(), EMPTY_STRING_HASH);
        assert_eq!(hex::encode(empty_string_hash().as_bytes()).len(), 64);
    }
}
