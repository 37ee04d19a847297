//! StringHashSet: separately chained buckets with doubling rehash and a
//! generation counter for fail-fast cursors.

use crate::chain::{Chain, ChainIter};
use crate::cursor::Cursor;
use crate::generation::{Generation, SetId};
use crate::hash::{bucket_index, KeyHasher, Polynomial31};
use core::fmt;
use core::iter::FusedIterator;
use log::{debug, trace};
use thiserror::Error;

/// Bucket count of a new or cleared set.
pub const DEFAULT_CAPACITY: usize = 5;

/// An insert that would push `len / capacity` above this doubles the
/// bucket array first.
pub const MAX_LOAD_FACTOR: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("a string hash set needs at least one bucket")]
    Zero,
}

pub struct StringHashSet<H = Polynomial31> {
    hasher: H,
    buckets: Vec<Chain>,
    len: usize,
    generation: Generation,
    id: SetId,
}

fn empty_buckets(capacity: usize) -> Vec<Chain> {
    core::iter::repeat_with(Chain::new).take(capacity).collect()
}

impl StringHashSet {
    pub fn new() -> Self {
        Self::with_hasher(Polynomial31)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_capacity_and_hasher(capacity, Polynomial31)
    }
}

impl Default for StringHashSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: KeyHasher> StringHashSet<H> {
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            hasher,
            buckets: empty_buckets(DEFAULT_CAPACITY),
            len: 0,
            generation: Generation::new(),
            id: SetId::fresh(),
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: H) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError::Zero);
        }
        Ok(Self {
            buckets: empty_buckets(capacity),
            ..Self::with_hasher(hasher)
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Counter bumped by every structural mutation.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Bucket that `key` maps to under the current capacity.
    pub fn index_of(&self, key: &str) -> usize {
        bucket_index(self.hasher.hash_key(key), self.capacity())
    }

    pub(crate) fn id(&self) -> SetId {
        self.id
    }

    pub(crate) fn buckets(&self) -> &[Chain] {
        &self.buckets
    }

    /// Inserts `key` unless already present. Returns whether the set changed.
    ///
    /// The key is only converted into an owned `String` once it is known to be
    /// new. If the insert would exceed `MAX_LOAD_FACTOR`, the table doubles and
    /// rehashes before the key is placed.
    pub fn add<K>(&mut self, key: K) -> bool
    where
        K: AsRef<str> + Into<String>,
    {
        let hash = self.hasher.hash_key(key.as_ref());
        let mut index = bucket_index(hash, self.capacity());
        if self.buckets[index].contains(key.as_ref()) {
            return false;
        }
        if self.len + 1 > MAX_LOAD_FACTOR * self.capacity() {
            self.grow();
            index = bucket_index(hash, self.capacity());
        }
        self.buckets[index].add(key.into());
        self.len += 1;
        self.generation.bump();
        true
    }

    /// Inserts every key; returns true if any single insert changed the set.
    pub fn add_all<I, K>(&mut self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str> + Into<String>,
    {
        let mut changed = false;
        for key in keys {
            changed |= self.add(key);
        }
        changed
    }

    pub fn contains(&self, key: &str) -> bool {
        self.buckets[self.index_of(key)].contains(key)
    }

    /// Membership test that also moves a hit to the front of its bucket.
    ///
    /// Reordering invalidates outstanding cursors, so the generation is bumped
    /// whenever the key actually moves.
    pub fn promote(&mut self, key: &str) -> bool {
        let index = self.index_of(key);
        let chain = &mut self.buckets[index];
        if chain.front() == Some(key) {
            return true;
        }
        if chain.move_to_front(key) {
            self.generation.bump();
            true
        } else {
            false
        }
    }

    /// Removes `key` and hands back the stored string.
    pub fn take(&mut self, key: &str) -> Option<String> {
        let index = self.index_of(key);
        let removed = self.buckets[index].take(key)?;
        self.len -= 1;
        self.generation.bump();
        Some(removed)
    }

    /// Removes `key`; returns whether it was present. Capacity never shrinks.
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Drops every key and resets to `DEFAULT_CAPACITY` buckets.
    pub fn clear(&mut self) {
        trace!(
            "clearing string set: {} keys, {} buckets",
            self.len,
            self.capacity()
        );
        self.buckets = empty_buckets(DEFAULT_CAPACITY);
        self.len = 0;
        self.generation.bump();
    }

    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity * 2;
        debug!(
            "growing string set from {} to {} buckets at {} keys",
            old_capacity, new_capacity, self.len
        );
        let mut fresh = empty_buckets(new_capacity);
        for mut chain in core::mem::take(&mut self.buckets) {
            while let Ok(key) = chain.pop() {
                let index = bucket_index(self.hasher.hash_key(&key), new_capacity);
                fresh[index].add(key);
            }
        }
        self.buckets = fresh;
        self.generation.bump();
    }

    /// Borrowing iterator in bucket order, then chain order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
            remaining: self.len,
        }
    }

    /// Detached cursor over the keys, validated against this set on every step.
    ///
    /// Each step re-walks the current bucket from its head, so draining a
    /// bucket of n keys costs O(n²). Use [`iter`](Self::iter) when the
    /// mutation guard is not needed.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.id, self.generation)
    }

    /// Bucket layout, one line per index: `"<index>: <keys...> null"`.
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        for (index, chain) in self.buckets.iter().enumerate() {
            out.push_str(&index.to_string());
            out.push_str(": ");
            for key in chain {
                out.push_str(key);
                out.push(' ');
            }
            out.push_str("null\n");
        }
        out
    }
}

impl<H: KeyHasher + Clone> Clone for StringHashSet<H> {
    fn clone(&self) -> Self {
        Self {
            hasher: self.hasher.clone(),
            buckets: self.buckets.clone(),
            len: self.len,
            generation: self.generation,
            id: SetId::fresh(),
        }
    }
}

impl<H: KeyHasher> PartialEq for StringHashSet<H> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|key| other.contains(key))
    }
}

impl<H: KeyHasher> Eq for StringHashSet<H> {}

impl<H: KeyHasher> fmt::Debug for StringHashSet<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringHashSet")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("generation", &self.generation.get())
            .field("buckets", &self.buckets)
            .finish()
    }
}

impl<H: KeyHasher> fmt::Display for StringHashSet<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, key) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(key)?;
        }
        f.write_str("]")
    }
}

impl<H, K> Extend<K> for StringHashSet<H>
where
    H: KeyHasher,
    K: AsRef<str> + Into<String>,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<H, K> FromIterator<K> for StringHashSet<H>
where
    H: KeyHasher + Default,
    K: AsRef<str> + Into<String>,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::with_hasher(H::default());
        set.add_all(iter);
        set
    }
}

/// Borrowing iterator over a `StringHashSet`. See [`StringHashSet::iter`].
pub struct Iter<'a> {
    buckets: core::slice::Iter<'a, Chain>,
    current: Option<ChainIter<'a>>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(key) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(key);
            }
            self.current = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a, H: KeyHasher> IntoIterator for &'a StringHashSet<H> {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
