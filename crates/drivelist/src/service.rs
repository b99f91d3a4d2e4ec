use crate::error::Result;
use crate::model::{Page, RemoteObject};

/// The remote calls the listing engine depends on.
///
/// Implemented by [`crate::client::DriveClient`] for the real service and
/// by [`crate::memory::MemoryDirectory`] for tests.
pub trait DirectoryService {
    /// Fetch one page of the full object listing. `cursor` is the opaque
    /// continuation token from the previous page.
    fn list_page(&self, cursor: Option<&str>) -> Result<Page>;

    /// Fetch one object by id.
    fn get_object(&self, id: &str) -> Result<RemoteObject>;

    /// Parent ids of an object in service order. Empty for a root.
    fn list_parents(&self, id: &str) -> Result<Vec<String>>;
}

impl<S: DirectoryService + ?Sized> DirectoryService for &S {
    fn list_page(&self, cursor: Option<&str>) -> Result<Page> {
        (**self).list_page(cursor)
    }

    fn get_object(&self, id: &str) -> Result<RemoteObject> {
        (**self).get_object(id)
    }

    fn list_parents(&self, id: &str) -> Result<Vec<String>> {
        (**self).list_parents(id)
    }
}
