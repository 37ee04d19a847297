//! Cursor: a detached, mutation-guarded walk over a `StringHashSet`.
//!
//! Unlike [`Iter`](crate::Iter), a cursor holds no borrow of the set, so the
//! set may be mutated between steps. Each step is handed the set explicitly
//! and checks, in order:
//! - the set is the one the cursor was created from (`WrongSet`);
//! - the set's generation still matches the captured one
//!   (`ConcurrentModification`, after which the cursor is permanently
//!   invalidated);
//! - there is a key left (`Exhausted`).
//!
//! A cursor stores a (bucket, offset) position rather than a node pointer,
//! so each step re-walks the current bucket from its head. Draining a bucket
//! of n keys costs O(n²). Under the default hash and the load bound chains
//! stay short and a step is O(1) on average; with heavy collisions prefer
//! [`StringHashSet::iter`] when the mutation guard is not needed.

use crate::generation::{Generation, SetId};
use crate::hash::KeyHasher;
use crate::string_hash_set::StringHashSet;
use log::trace;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IterError {
    #[error("cursor advanced past the last key")]
    Exhausted,
    #[error("set was modified after the cursor was created")]
    ConcurrentModification,
    #[error("cursor used with a set other than the one that created it")]
    WrongSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Created, nothing yielded yet.
    Fresh,
    /// The next key is looked up from `offset` within bucket `bucket`.
    InProgress { bucket: usize, offset: usize },
    Invalidated,
    Exhausted,
}

/// Detached walk over a set, validated against it on every step.
///
/// Each step costs the offset of the next key within its bucket; see the
/// module docs.
#[derive(Debug, Clone)]
pub struct Cursor {
    owner: SetId,
    generation: Generation,
    state: CursorState,
}

impl Cursor {
    pub(crate) fn new(owner: SetId, generation: Generation) -> Self {
        Self {
            owner,
            generation,
            state: CursorState::Fresh,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    fn validate<H: KeyHasher>(&self, set: &StringHashSet<H>) -> Result<(), IterError> {
        if set.id() != self.owner {
            return Err(IterError::WrongSet);
        }
        if self.state == CursorState::Invalidated || set.generation() != self.generation.get() {
            return Err(IterError::ConcurrentModification);
        }
        Ok(())
    }

    /// Position of the next key at or after (`bucket`, `offset`).
    fn seek<'a, H: KeyHasher>(
        &self,
        set: &'a StringHashSet<H>,
    ) -> Option<(usize, usize, &'a str)> {
        let (mut bucket, mut offset) = match self.state {
            CursorState::Fresh => (0, 0),
            CursorState::InProgress { bucket, offset } => (bucket, offset),
            CursorState::Invalidated | CursorState::Exhausted => return None,
        };
        while let Some(chain) = set.buckets().get(bucket) {
            if let Some(key) = chain.iter().nth(offset) {
                return Some((bucket, offset, key));
            }
            bucket += 1;
            offset = 0;
        }
        None
    }

    /// Whether another key would be yielded by `next_key`.
    pub fn has_next<H: KeyHasher>(&self, set: &StringHashSet<H>) -> Result<bool, IterError> {
        self.validate(set)?;
        Ok(self.seek(set).is_some())
    }

    /// Yields the next key or the reason the walk cannot continue.
    pub fn next_key<'a, H: KeyHasher>(
        &mut self,
        set: &'a StringHashSet<H>,
    ) -> Result<&'a str, IterError> {
        if let Err(e) = self.validate(set) {
            if e == IterError::ConcurrentModification && self.state != CursorState::Invalidated {
                trace!(
                    "cursor invalidated: generation {} -> {}",
                    self.generation.get(),
                    set.generation()
                );
                self.state = CursorState::Invalidated;
            }
            return Err(e);
        }
        match self.seek(set) {
            Some((bucket, offset, key)) => {
                self.state = CursorState::InProgress {
                    bucket,
                    offset: offset + 1,
                };
                Ok(key)
            }
            None => {
                self.state = CursorState::Exhausted;
                Err(IterError::Exhausted)
            }
        }
    }

    /// Drains the remaining keys into owned strings, stopping at the first
    /// failure other than exhaustion.
    pub fn collect_remaining<H: KeyHasher>(
        &mut self,
        set: &StringHashSet<H>,
    ) -> Result<Vec<String>, IterError> {
        let mut out = Vec::new();
        loop {
            match self.next_key(set) {
                Ok(key) => out.push(key.to_owned()),
                Err(IterError::Exhausted) => return Ok(out),
                Err(e) => return Err(e),
            }
        }
    }
}
