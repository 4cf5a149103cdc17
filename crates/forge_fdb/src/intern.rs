//! The deduplicated string pool backing item names, keys and string values.

use indexmap::IndexSet;

use crate::error::{Error, Result};

/// Default upper bound on interned string length, in bytes.
///
/// Longer values belong in a blob attribute.
pub const DEFAULT_MAX_STRING_LEN: usize = 1024;

/// Stable handle to a string in a [`StringPool`]
///
/// Handles stay valid for the pool's whole lifetime; interning the same text twice yields
/// the same handle. A handle is only meaningful to the pool that minted it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StringHandle(pub(crate) u32);

/// Deduplicated pool of every string used while building an item tree
///
/// Owned by one build session; there is no process-wide shared pool. Handles are assigned
/// in insertion order, while the on-disk ordinals come from sorting the contents at save
/// time via [`StringPool::sorted_ordinals`].
#[derive(Debug)]
pub struct StringPool {
    strings: IndexSet<String>,
    max_len: usize,
}

impl Default for StringPool {
    fn default() -> Self {
        StringPool::new()
    }
}

impl StringPool {
    /// Create a pool with the [default length limit](DEFAULT_MAX_STRING_LEN).
    pub fn new() -> StringPool {
        StringPool::with_max_len(DEFAULT_MAX_STRING_LEN)
    }

    /// Create a pool rejecting strings longer than `max_len` bytes.
    pub fn with_max_len(max_len: usize) -> StringPool {
        StringPool {
            strings: IndexSet::new(),
            max_len,
        }
    }

    /// Intern `text`, returning the existing handle if it was seen before.
    ///
    /// Strings containing a nul byte cannot be stored nul-terminated and are rejected, as
    /// are strings over the configured length limit.
    pub fn intern(&mut self, text: &str) -> Result<StringHandle> {
        if text.len() > self.max_len {
            return Err(Error::StringTooLong {
                len: text.len(),
                max: self.max_len,
            });
        }

        if text.as_bytes().contains(&0) {
            return Err(Error::StringContainsNul);
        }

        if let Some(index) = self.strings.get_index_of(text) {
            return Ok(StringHandle(index as u32));
        }

        let (index, _) = self.strings.insert_full(text.to_owned());
        Ok(StringHandle(index as u32))
    }

    /// Resolve a handle back to its text.
    pub fn resolve(&self, handle: StringHandle) -> &str {
        self.strings
            .get_index(handle.0 as usize)
            .map(String::as_str)
            .expect("string handles are only minted by their own pool")
    }

    /// Number of unique strings interned so far.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the pool holds no strings.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Every handle in insertion order.
    pub fn handles(&self) -> impl Iterator<Item = StringHandle> + '_ {
        (0..self.strings.len()).map(|index| StringHandle(index as u32))
    }

    /// Every handle and its text, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (StringHandle, &str)> {
        self.strings
            .iter()
            .enumerate()
            .map(|(index, text)| (StringHandle(index as u32), text.as_str()))
    }

    /// Sort the pool's contents for serialization.
    pub(crate) fn sorted_ordinals(&self) -> SortedStrings {
        let mut by_ordinal: Vec<StringHandle> = self.handles().collect();
        by_ordinal.sort_by_key(|&handle| self.resolve(handle));

        let mut ordinal_of = vec![0u32; by_ordinal.len()];
        for (ordinal, handle) in by_ordinal.iter().enumerate() {
            ordinal_of[handle.0 as usize] = ordinal as u32;
        }

        SortedStrings {
            by_ordinal,
            ordinal_of,
        }
    }
}

/// The pool's contents in on-disk order, produced once per save
pub(crate) struct SortedStrings {
    /// Ordinal to handle, lexicographically sorted by text
    pub by_ordinal: Vec<StringHandle>,

    /// Handle index to ordinal
    pub ordinal_of: Vec<u32>,
}
