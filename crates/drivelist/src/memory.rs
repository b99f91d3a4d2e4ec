//! In-memory directory service.
//!
//! Serves a fixed hierarchy with a configurable page size, counts every
//! call, and can be told to fail specific calls a given number of times.
//! Cursors are the decimal offset of the next page.

use crate::error::{DriveError, Result};
use crate::model::{Page, RemoteObject};
use crate::service::DirectoryService;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Default)]
struct Failures {
    list_page: HashMap<Option<String>, usize>,
    get_object: HashMap<String, usize>,
    list_parents: HashMap<String, usize>,
}

#[derive(Default)]
struct State {
    listing: Vec<String>,
    objects: HashMap<String, RemoteObject>,
    parents: HashMap<String, Vec<String>>,
    failures: Failures,
    cursors: Vec<Option<String>>,
    get_object_calls: HashMap<String, usize>,
    list_parents_calls: HashMap<String, usize>,
}

pub struct MemoryDirectory {
    page_size: usize,
    state: RefCell<State>,
}

impl MemoryDirectory {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            state: RefCell::new(State::default()),
        }
    }

    /// Add a listed object with the given parent ids.
    pub fn add_object(&self, object: RemoteObject, parents: &[&str]) {
        let mut state = self.state.borrow_mut();
        state.listing.push(object.id.clone());
        state.parents.insert(
            object.id.clone(),
            parents.iter().map(|p| p.to_string()).collect(),
        );
        state.objects.insert(object.id.clone(), object);
    }

    pub fn add_root(&self, object: RemoteObject) {
        self.add_object(object, &[]);
    }

    pub fn add_child(&self, object: RemoteObject, parent: &str) {
        self.add_object(object, &[parent]);
    }

    /// Forget an object. Lookups of its id fail with `NotFound`.
    pub fn remove(&self, id: &str) {
        self.state.borrow_mut().objects.remove(id);
    }

    pub fn object(&self, id: &str) -> Option<RemoteObject> {
        self.state.borrow().objects.get(id).cloned()
    }

    /// Fail the next `times` page requests carrying `cursor`.
    pub fn fail_list_page(&self, cursor: Option<&str>, times: usize) {
        self.state
            .borrow_mut()
            .failures
            .list_page
            .insert(cursor.map(str::to_string), times);
    }

    /// Fail the next `times` lookups of `id`.
    pub fn fail_get_object(&self, id: &str, times: usize) {
        self.state
            .borrow_mut()
            .failures
            .get_object
            .insert(id.to_string(), times);
    }

    /// Fail the next `times` parent lookups of `id`.
    pub fn fail_list_parents(&self, id: &str, times: usize) {
        self.state
            .borrow_mut()
            .failures
            .list_parents
            .insert(id.to_string(), times);
    }

    pub fn list_page_calls(&self) -> usize {
        self.state.borrow().cursors.len()
    }

    /// The cursor passed to each page request, in call order.
    pub fn cursors_seen(&self) -> Vec<Option<String>> {
        self.state.borrow().cursors.clone()
    }

    pub fn get_object_calls(&self, id: &str) -> usize {
        self.state
            .borrow()
            .get_object_calls
            .get(id)
            .copied()
            .unwrap_or(0)
    }

    pub fn list_parents_calls(&self, id: &str) -> usize {
        self.state
            .borrow()
            .list_parents_calls
            .get(id)
            .copied()
            .unwrap_or(0)
    }
}

fn take_failure(remaining: Option<&mut usize>) -> bool {
    match remaining {
        Some(n) if *n > 0 => {
            *n -= 1;
            true
        }
        _ => false,
    }
}

impl DirectoryService for MemoryDirectory {
    fn list_page(&self, cursor: Option<&str>) -> Result<Page> {
        let mut state = self.state.borrow_mut();
        let key = cursor.map(str::to_string);
        state.cursors.push(key.clone());
        if take_failure(state.failures.list_page.get_mut(&key)) {
            return Err(DriveError::transient("simulated listing failure"));
        }

        let start = match cursor {
            None => 0,
            Some(c) => c
                .parse::<usize>()
                .map_err(|_| DriveError::transient(format!("invalid page token {c:?}")))?,
        };
        let end = (start + self.page_size).min(state.listing.len());
        let items = state
            .listing
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .filter_map(|id| state.objects.get(id).cloned())
            .collect();
        let next_cursor = (end < state.listing.len()).then(|| end.to_string());
        Ok(Page { items, next_cursor })
    }

    fn get_object(&self, id: &str) -> Result<RemoteObject> {
        let mut state = self.state.borrow_mut();
        *state.get_object_calls.entry(id.to_string()).or_default() += 1;
        if take_failure(state.failures.get_object.get_mut(id)) {
            return Err(DriveError::transient(format!("simulated failure fetching {id}")));
        }
        state
            .objects
            .get(id)
            .cloned()
            .ok_or_else(|| DriveError::not_found(id))
    }

    fn list_parents(&self, id: &str) -> Result<Vec<String>> {
        let mut state = self.state.borrow_mut();
        *state.list_parents_calls.entry(id.to_string()).or_default() += 1;
        if take_failure(state.failures.list_parents.get_mut(id)) {
            return Err(DriveError::transient(format!("simulated failure listing parents of {id}")));
        }
        Ok(state.parents.get(id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_and_cursors() {
        let dir = MemoryDirectory::new(2);
        for id in ["a", "b", "c"] {
            dir.add_root(RemoteObject::new(id, id.to_uppercase()));
        }
        let first = dir.list_page(None).expect("page");
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.next_cursor.as_deref(), Some("2"));
        let second = dir.list_page(Some("2")).expect("page");
        assert_eq!(second.items.len(), 1);
        assert!(second.next_cursor.is_none());
    }

    #[test]
    fn test_injected_failures_run_out() {
        let dir = MemoryDirectory::new(2);
        dir.add_root(RemoteObject::new("a", "A"));
        dir.fail_get_object("a", 1);
        dir.fail_list_parents("a", 2);

        assert!(dir.get_object("a").is_err());
        assert!(dir.get_object("a").is_ok());
        assert!(dir.list_parents("a").is_err());
        assert!(dir.list_parents("a").is_err());
        assert!(dir.list_parents("a").is_ok());
        assert_eq!(dir.get_object_calls("a"), 2);
        assert_eq!(dir.list_parents_calls("a"), 3);
    }

    #[test]
    fn test_removed_object_is_not_found() {
        let dir = MemoryDirectory::new(2);
        dir.add_root(RemoteObject::new("a", "A"));
        dir.remove("a");
        assert!(matches!(dir.get_object("a"), Err(DriveError::NotFound { .. })));
    }
}
