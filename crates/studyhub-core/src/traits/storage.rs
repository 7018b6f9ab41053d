//! Storage provider trait for the physical file store.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for writing uploaded file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Hierarchical file store addressed by relative paths such as
/// `pdf_files/1/2/calc.pdf`.
///
/// Mutations of absent sources are no-ops, so best-effort cleanup and
/// compensation can call them unconditionally. The trait is defined here
/// in `studyhub-core` and implemented in `studyhub-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write a byte stream to `path`, creating parent directories and
    /// overwriting any existing file. Returns the number of bytes written.
    async fn save(&self, path: &str, stream: ByteStream) -> AppResult<u64>;

    /// Read a file into memory.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Rename a file in place. No-op if `from` does not exist.
    async fn rename(&self, from: &str, to: &str) -> AppResult<()>;

    /// Move a file. The destination's parent directories are always
    /// created; the move itself is a no-op if `from` does not exist.
    async fn move_file(&self, from: &str, to: &str) -> AppResult<()>;

    /// Delete a file. No-op if it does not exist.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Delete a directory and all its contents. No-op if it does not exist.
    async fn delete_dir(&self, path: &str) -> AppResult<()>;

    /// Check whether a file or directory exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;
}
