use indexmap::IndexMap;

/// Read-only, string-keyed reference data populated once at construction.
///
/// Lookup of an unknown key returns `None`; callers report the miss as a
/// decision instead of trapping an error.
#[derive(Debug, Clone)]
pub struct ReferenceStore<V> {
    entries: IndexMap<String, V>,
}

impl<V> ReferenceStore<V> {
    /// Builds the store from `(key, value)` pairs, keeping insertion order.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (String, V)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Looks up a record by key.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// True when the key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<V> FromIterator<(String, V)> for ReferenceStore<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_of_unknown_key_is_none() {
        let store: ReferenceStore<u32> = ReferenceStore::from_entries([("thabo".into(), 1)]);
        assert_eq!(store.lookup("thabo"), Some(&1));
        assert!(store.lookup("unknown_user").is_none());
        assert!(!store.contains("unknown_user"));
    }

    #[test]
    fn preserves_insertion_order() {
        let store: ReferenceStore<u32> =
            ReferenceStore::from_entries([("b".into(), 2), ("a".into(), 1)]);
        let keys: Vec<_> = store.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
