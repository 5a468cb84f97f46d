//! Stable names for opaque action kinds.

use std::collections::HashMap;

use cadence_core::TickKind;
use indexmap::IndexMap;

/// Bidirectional mapping between kinds and their persisted names.
///
/// The scheduler never needs names; only save and load do. A kind
/// without a name is skipped on save, and a name that no longer
/// resolves is skipped on load.
pub trait KindNames<K> {
    /// Persisted name of `kind`.
    fn name_of(&self, kind: K) -> Option<&str>;

    /// Kind registered under `name`.
    fn resolve(&self, name: &str) -> Option<K>;
}

/// [`KindNames`] backed by an insertion-ordered table.
///
/// # Examples
///
/// ```
/// use cadence_save::{KindNames, NameTable};
///
/// let mut names = NameTable::new();
/// assert!(names.register("piston", 1u8));
/// assert!(!names.register("piston", 2u8));
///
/// assert_eq!(names.name_of(1), Some("piston"));
/// assert_eq!(names.resolve("piston"), Some(1));
/// assert_eq!(names.resolve("lever"), None);
/// ```
#[derive(Clone, Debug)]
pub struct NameTable<K: TickKind> {
    by_name: IndexMap<String, K>,
    by_kind: HashMap<K, usize>,
}

impl<K: TickKind> NameTable<K> {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            by_name: IndexMap::new(),
            by_kind: HashMap::new(),
        }
    }

    /// Bind `name` to `kind`.
    ///
    /// Returns `false` and leaves the table unchanged if either side is
    /// already bound.
    pub fn register(&mut self, name: impl Into<String>, kind: K) -> bool {
        let name = name.into();
        if self.by_name.contains_key(&name) || self.by_kind.contains_key(&kind) {
            return false;
        }
        let (index, _) = self.by_name.insert_full(name, kind);
        self.by_kind.insert(kind, index);
        true
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no names are bound.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Bound `(name, kind)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, K)> + '_ {
        self.by_name.iter().map(|(name, &kind)| (name.as_str(), kind))
    }
}

impl<K: TickKind> Default for NameTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TickKind> KindNames<K> for NameTable<K> {
    fn name_of(&self, kind: K) -> Option<&str> {
        let &index = self.by_kind.get(&kind)?;
        self.by_name.get_index(index).map(|(name, _)| name.as_str())
    }

    fn resolve(&self, name: &str) -> Option<K> {
        self.by_name.get(name).copied()
    }
}

impl<K: TickKind, S: Into<String>> FromIterator<(S, K)> for NameTable<K> {
    fn from_iter<I: IntoIterator<Item = (S, K)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, kind) in iter {
            table.register(name, kind);
        }
        table
    }
}
