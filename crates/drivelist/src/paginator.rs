use crate::error::Result;
use crate::model::{Page, RemoteObject};
use crate::retry::RetryPolicy;
use crate::service::DirectoryService;
use diagnostics::*;

/// Iterator over listing pages, following the continuation cursor.
///
/// A failed page leaves the cursor untouched, so calling `next` again
/// re-requests the same page.
pub struct PageCall<'a, S: DirectoryService + ?Sized> {
    service: &'a S,
    cursor: Option<String>,
    done: bool,
}

impl<'a, S: DirectoryService + ?Sized> PageCall<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            cursor: None,
            done: false,
        }
    }

    /// The cursor the next request will carry.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }
}

impl<S: DirectoryService + ?Sized> Iterator for PageCall<'_, S> {
    type Item = Result<Vec<RemoteObject>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.service.list_page(self.cursor.as_deref()) {
            Ok(Page { items, next_cursor }) => {
                let count = items.len();
                let more = next_cursor.is_some();
                debug!("Fetched page of {count} objects, more: {more}", count: count, more: more);
                self.done = next_cursor.is_none();
                self.cursor = next_cursor;
                Some(Ok(items))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

/// Enumerates every object the service lists, in service order.
pub struct Paginator<'a, S: DirectoryService + ?Sized> {
    service: &'a S,
    policy: RetryPolicy,
}

impl<'a, S: DirectoryService + ?Sized> Paginator<'a, S> {
    pub fn new(service: &'a S, policy: RetryPolicy) -> Self {
        Self { service, policy }
    }

    /// Collect all pages. One retry budget covers the whole listing: a
    /// retry resumes from the cursor of the page that failed. Once the
    /// budget is spent the listing fails and nothing is returned.
    pub fn list_all(&self) -> Result<Vec<RemoteObject>> {
        let mut pages = PageCall::new(self.service);
        let mut result = Vec::new();

        let listed = self.policy.retry("list files", || {
            while let Some(items) = pages.next().transpose()? {
                result.extend(items);
            }
            Ok(())
        });

        if let Err(err) = listed {
            let error = err.to_string();
            log_error!("Listing aborted: {error}", error: error);
            return Err(err);
        }

        let count = result.len();
        info!("Listed {count} objects", count: count);
        Ok(result)
    }
}
