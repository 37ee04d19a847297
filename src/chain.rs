//! Chain: the singly linked list of keys that occupies one bucket.
//!
//! Nodes are exclusively owned through `Option<Box<Node>>` links. Every walk
//! over the chain is an iterative cursor over those links, so a pathological
//! collision chain costs heap, never stack.

use core::fmt;
use core::iter::FusedIterator;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("cannot pop from an empty chain")]
    Empty,
}

struct Node {
    key: String,
    next: Link,
}

type Link = Option<Box<Node>>;

/// Keys in head-to-tail order. The empty chain is the empty bucket.
#[derive(Default)]
pub struct Chain {
    head: Link,
}

impl Chain {
    pub const fn new() -> Self {
        Self { head: None }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of keys in the chain. Walks the whole chain.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn front(&self) -> Option<&str> {
        self.head.as_deref().map(|n| n.key.as_str())
    }

    /// Pushes `key` in front of the current head. Does not check for duplicates.
    pub fn add(&mut self, key: String) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { key, next }));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the stored key equal to `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|k| *k == key)
    }

    /// Unlinks the first key equal to `key` and returns it.
    pub fn take(&mut self, key: &str) -> Option<String> {
        let position = self.iter().position(|k| k == key)?;
        let mut link = &mut self.head;
        for _ in 0..position {
            link = &mut link.as_mut()?.next;
        }
        // `link` now holds the matching node.
        let node = link.take()?;
        let Node { key: found, next } = *node;
        *link = next;
        Some(found)
    }

    /// Removes the first key equal to `key`; returns whether one was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    pub fn pop(&mut self) -> Result<String, ChainError> {
        let node = self.head.take().ok_or(ChainError::Empty)?;
        let Node { key, next } = *node;
        self.head = next;
        Ok(key)
    }

    /// Moves `key` to the head of the chain. Returns false, leaving the chain
    /// untouched, if the key is absent.
    pub fn move_to_front(&mut self, key: &str) -> bool {
        match self.take(key) {
            Some(k) => {
                self.add(k);
                true
            }
            None => false,
        }
    }

    /// Fresh head-to-tail iterator; does not mutate the chain.
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            next: self.head.as_deref(),
        }
    }
}

impl Drop for Chain {
    fn drop(&mut self) {
        // Unlink one node at a time so long chains do not recurse in Box's drop.
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl Clone for Chain {
    fn clone(&self) -> Self {
        let keys: Vec<&str> = self.iter().collect();
        let mut out = Chain::new();
        for key in keys.into_iter().rev() {
            out.add(key.to_string());
        }
        out
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("null");
        }
        for (i, key) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(key)?;
        }
        Ok(())
    }
}

/// Borrowing iterator over a `Chain`.
#[derive(Clone)]
pub struct ChainIter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            node.key.as_str()
        })
    }
}

impl FusedIterator for ChainIter<'_> {}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a str;
    type IntoIter = ChainIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
