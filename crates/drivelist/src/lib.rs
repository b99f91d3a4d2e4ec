//! Lists every object in a Drive account with its full folder path.
//!
//! The engine enumerates the account with [`Paginator`], then resolves
//! each object's ancestor chain with [`PathResolver`] and writes one record
//! per object to a [`RecordSink`]. [`Fetcher`] ties the pieces together.

pub mod cache;
pub mod client;
pub mod config;
pub mod constant;
pub mod error;
pub mod fetcher;
pub mod memory;
pub mod model;
pub mod paginator;
pub mod resolver;
pub mod retry;
pub mod service;
pub mod sink;

pub use crate::cache::AncestorCache;
pub use crate::client::DriveClient;
pub use crate::config::{Config, RetryConfig, create_example_config, load_config, validate_config};
pub use crate::error::{DriveError, Result};
pub use crate::fetcher::{FetchOutcome, Fetcher, RunSummary};
pub use crate::memory::MemoryDirectory;
pub use crate::model::{KNOWN_FIELDS, Page, RemoteObject, render_field};
pub use crate::paginator::{PageCall, Paginator};
pub use crate::resolver::PathResolver;
pub use crate::retry::RetryPolicy;
pub use crate::service::DirectoryService;
pub use crate::sink::{FileSink, RecordSink};
