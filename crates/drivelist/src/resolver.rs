use crate::cache::AncestorCache;
use crate::error::{DriveError, Result};
use crate::model::{RemoteObject, render_field};
use crate::service::DirectoryService;
use diagnostics::*;
use std::rc::Rc;

/// Parent chains longer than this are treated as corrupt.
pub const MAX_DEPTH: usize = 512;

/// Builds `/`-rooted paths by climbing parent links.
///
/// Only the first parent of an object is followed. Objects filed under
/// several folders therefore resolve to a single path.
pub struct PathResolver<'a, S: DirectoryService + ?Sized> {
    service: &'a S,
    cache: AncestorCache,
    fields: Vec<String>,
}

impl<'a, S: DirectoryService + ?Sized> PathResolver<'a, S> {
    /// `fields` are the additional columns appended to original objects,
    /// in output order.
    pub fn new(service: &'a S, fields: Vec<String>) -> Self {
        Self {
            service,
            cache: AncestorCache::new(),
            fields,
        }
    }

    pub fn cache(&self) -> &AncestorCache {
        &self.cache
    }

    /// Resolve the full path of `object`.
    ///
    /// When `is_original` is set the additional fields are appended to
    /// this object's segment. Ancestors are always resolved without them.
    /// Errors propagate immediately; retrying is the caller's job.
    pub fn resolve(&mut self, object: &RemoteObject, is_original: bool) -> Result<String> {
        self.resolve_at(object, is_original, 0)
    }

    fn resolve_at(&mut self, object: &RemoteObject, is_original: bool, depth: usize) -> Result<String> {
        if depth > MAX_DEPTH {
            return Err(DriveError::HierarchyTooDeep {
                id: object.id.clone(),
                depth: MAX_DEPTH,
            });
        }

        let suffix = if is_original {
            self.extra_fields(object)
        } else {
            String::new()
        };

        let parents = self.service.list_parents(&object.id)?;
        let Some(parent_id) = parents.first() else {
            return Ok(format!("/{}{}", object.title, suffix));
        };

        let parent = self.parent(parent_id)?;
        let parent_path = self.resolve_at(&parent, false, depth + 1)?;
        Ok(format!("{}/{}{}", parent_path, object.title, suffix))
    }

    fn parent(&mut self, id: &str) -> Result<Rc<RemoteObject>> {
        if let Some(hit) = self.cache.get(id) {
            debug!("Ancestor cache hit for {id}", id: id);
            return Ok(hit);
        }
        debug!("Ancestor cache miss for {id}", id: id);
        let fetched = self.service.get_object(id)?;
        Ok(self.cache.put(id, fetched))
    }

    /// The `,`-prefixed additional columns for `object`.
    pub fn extra_fields(&self, object: &RemoteObject) -> String {
        self.fields
            .iter()
            .map(|name| {
                let value = object
                    .field(name)
                    .map(|v| render_field(&v))
                    .unwrap_or_default();
                format!(",{value}")
            })
            .collect()
    }
}
