use crate::model::RemoteObject;
use std::collections::HashMap;
use std::rc::Rc;

/// Parent objects already fetched during this run, keyed by id.
///
/// Entries are never replaced or evicted: the hierarchy is assumed stable
/// for the duration of a run, and its size is bounded by the number of
/// folders rather than the number of listed files.
#[derive(Debug, Default)]
pub struct AncestorCache {
    entries: HashMap<String, Rc<RemoteObject>>,
}

impl AncestorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Rc<RemoteObject>> {
        self.entries.get(id).cloned()
    }

    /// Insert `object` under `id` unless already present, returning the
    /// cached entry.
    pub fn put(&mut self, id: impl Into<String>, object: RemoteObject) -> Rc<RemoteObject> {
        self.entries
            .entry(id.into())
            .or_insert_with(|| Rc::new(object))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_after_put() {
        let mut cache = AncestorCache::new();
        assert!(cache.is_empty());
        assert!(cache.get("f1").is_none());

        cache.put("f1", RemoteObject::new("f1", "Folder"));
        let hit = cache.get("f1").expect("cached");
        assert_eq!(hit.title, "Folder");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_never_replaces() {
        let mut cache = AncestorCache::new();
        cache.put("f1", RemoteObject::new("f1", "First"));
        let kept = cache.put("f1", RemoteObject::new("f1", "Second"));
        assert_eq!(kept.title, "First");
        assert_eq!(cache.get("f1").expect("cached").title, "First");
        assert_eq!(cache.len(), 1);
    }
}
