use crate::error::Result;
use crate::model::RemoteObject;
use crate::paginator::Paginator;
use crate::resolver::PathResolver;
use crate::retry::RetryPolicy;
use crate::service::DirectoryService;
use crate::sink::RecordSink;
use diagnostics::*;

/// What happened to one listed object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Emitted(String),
    Skipped,
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub listed: usize,
    pub emitted: usize,
    pub skipped: usize,
}

/// Drives one listing run: enumerate everything, then resolve and write
/// each object in listing order.
pub struct Fetcher<'a, S: DirectoryService + ?Sized, W: RecordSink> {
    service: &'a S,
    resolver: PathResolver<'a, S>,
    policy: RetryPolicy,
    sink: W,
}

impl<'a, S: DirectoryService + ?Sized, W: RecordSink> Fetcher<'a, S, W> {
    pub fn new(service: &'a S, fields: Vec<String>, policy: RetryPolicy, sink: W) -> Self {
        Self {
            service,
            resolver: PathResolver::new(service, fields),
            policy,
            sink,
        }
    }

    pub fn resolver(&self) -> &PathResolver<'a, S> {
        &self.resolver
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    /// List every object. Failure here is fatal to the run.
    pub fn list_files(&self) -> Result<Vec<RemoteObject>> {
        Paginator::new(self.service, self.policy).list_all()
    }

    /// Resolve one object and write its record.
    ///
    /// Resolution gets its own retry budget; when that runs out the object
    /// is skipped. Only a sink failure is returned as an error.
    pub fn fetch_file(&mut self, object: &RemoteObject) -> Result<FetchOutcome> {
        let operation = format!("resolve {}", object.id);
        let resolver = &mut self.resolver;

        let path = match self.policy.retry(&operation, || resolver.resolve(object, true)) {
            Ok(path) => path,
            Err(err) => {
                let id = object.id.as_str();
                let error = err.to_string();
                warn!("Skipping {id}: {error}", id: id, error: error);
                return Ok(FetchOutcome::Skipped);
            }
        };

        if path.is_empty() {
            return Ok(FetchOutcome::Skipped);
        }

        self.sink.append(&path)?;
        Ok(FetchOutcome::Emitted(path))
    }

    /// List, resolve and write everything.
    pub fn run(&mut self) -> Result<RunSummary> {
        let objects = self.list_files()?;
        let mut summary = RunSummary {
            listed: objects.len(),
            ..RunSummary::default()
        };

        for object in &objects {
            match self.fetch_file(object)? {
                FetchOutcome::Emitted(_) => summary.emitted += 1,
                FetchOutcome::Skipped => summary.skipped += 1,
            }
        }

        let RunSummary {
            listed,
            emitted,
            skipped,
        } = summary;
        let cached = self.resolver.cache().len();
        info!(
            "Run complete: {listed} listed, {emitted} written, {skipped} skipped, {cached} ancestors cached",
            listed: listed,
            emitted: emitted,
            skipped: skipped,
            cached: cached
        );
        Ok(summary)
    }
}
