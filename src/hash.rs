//! Key hashing: the polynomial string hash and bucket index mapping.

/// Computes a 32-bit hash code for a key.
///
/// `StringHashSet` is generic over this trait so that tests and callers can
/// substitute their own distribution. Implementations must be deterministic:
/// the same key must always produce the same hash for a given hasher value.
pub trait KeyHasher {
    fn hash_key(&self, key: &str) -> i32;
}

/// The `h = 31 * h + c` recurrence over UTF-16 code units, with wrapping
/// 32-bit arithmetic.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Polynomial31;

impl KeyHasher for Polynomial31 {
    #[inline]
    fn hash_key(&self, key: &str) -> i32 {
        string_hash(key)
    }
}

/// Polynomial rolling hash of `key`.
///
/// Overflow wraps, so long keys regularly produce negative values.
pub fn string_hash(key: &str) -> i32 {
    key.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Maps a (possibly negative) hash onto `[0, capacity)`.
///
/// A negative hash is shifted up by 2^31 before the modulo.
///
/// # Panics
/// Panics if `capacity` is zero.
#[inline]
pub(crate) fn bucket_index(hash: i32, capacity: usize) -> usize {
    assert!(capacity > 0, "bucket_index on a table with no buckets");
    let normalized = if hash < 0 {
        (i64::from(hash) + (1i64 << 31)) as u64
    } else {
        hash as u64
    };
    (normalized % capacity as u64) as usize
}
