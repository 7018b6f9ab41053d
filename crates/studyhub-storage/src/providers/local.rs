//! Local filesystem storage provider.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use studyhub_core::error::{AppError, ErrorKind};
use studyhub_core::result::AppResult;
use studyhub_core::traits::storage::{ByteStream, StorageProvider};

/// Local filesystem storage provider.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored files.
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative path to a path within the root.
    ///
    /// Only plain components are accepted; `..`, absolute paths and drive
    /// prefixes are rejected so nothing escapes the root.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path);
        let mut resolved = self.root.clone();
        let mut depth = 0usize;
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    resolved.push(part);
                    depth += 1;
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(AppError::validation(format!(
                        "Invalid storage path: {path}"
                    )));
                }
            }
        }
        if depth == 0 {
            return Err(AppError::validation("Storage path must not be empty"));
        }
        Ok(resolved)
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn path_exists(&self, path: &Path) -> AppResult<bool> {
        fs::try_exists(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to check path: {}", path.display()),
                e,
            )
        })
    }

    async fn relocate(&self, from: &str, to: &str, create_parents: bool) -> AppResult<()> {
        let from_path = self.resolve(from)?;
        let to_path = self.resolve(to)?;

        if create_parents {
            self.ensure_parent(&to_path).await?;
        }
        if !self.path_exists(&from_path).await? {
            debug!(from, to, "Source missing, nothing to relocate");
            return Ok(());
        }

        if let Err(e) = fs::rename(&from_path, &to_path).await {
            if e.kind() == std::io::ErrorKind::NotFound && !self.path_exists(&from_path).await? {
                return Ok(());
            }
            return Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to move {from} -> {to}"),
                e,
            ));
        }

        debug!(from, to, "Relocated file");
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        match fs::metadata(&self.root).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(_) => Ok(false),
        }
    }

    async fn save(&self, path: &str, mut stream: ByteStream) -> AppResult<u64> {
        let full_path = self.resolve(path)?;
        self.ensure_parent(&full_path).await?;

        let mut file = fs::File::create(&full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create file: {path}"),
                e,
            )
        })?;

        let mut total_bytes = 0u64;
        let mut failure = None;
        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    failure = Some(AppError::with_source(
                        ErrorKind::Storage,
                        "Stream read error",
                        e,
                    ));
                    break;
                }
            };
            if let Err(e) = file.write_all(&chunk).await {
                failure = Some(AppError::with_source(
                    ErrorKind::Storage,
                    "Failed to write chunk",
                    e,
                ));
                break;
            }
            total_bytes += chunk.len() as u64;
        }

        if failure.is_none() {
            if let Err(e) = file.flush().await {
                failure = Some(AppError::with_source(
                    ErrorKind::Storage,
                    "Failed to flush file",
                    e,
                ));
            }
        }

        if let Some(err) = failure {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&full_path).await {
                warn!(path, error = %cleanup, "Failed to remove partial file");
            }
            return Err(err);
        }

        debug!(path, bytes = total_bytes, "Wrote file from stream");
        Ok(total_bytes)
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(path)?;
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read file: {path}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn rename(&self, from: &str, to: &str) -> AppResult<()> {
        self.relocate(from, to, false).await
    }

    async fn move_file(&self, from: &str, to: &str) -> AppResult<()> {
        self.relocate(from, to, true).await
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(path, "Deleted file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {path}"),
                e,
            )),
        }
    }

    async fn delete_dir(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        match fs::remove_dir_all(&full_path).await {
            Ok(()) => {
                debug!(path, "Deleted directory");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete directory: {path}"),
                e,
            )),
        }
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let full_path = self.resolve(path)?;
        self.path_exists(&full_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_of(chunks: &[&'static str]) -> ByteStream {
        let items: Vec<Result<Bytes, std::io::Error>> = chunks
            .iter()
            .map(|c| Ok(Bytes::from_static(c.as_bytes())))
            .collect();
        Box::pin(futures::stream::iter(items))
    }

    async fn provider() -> (tempfile::TempDir, LocalStorageProvider) {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        (dir, provider)
    }

    #[tokio::test]
    async fn test_save_read_delete() {
        let (_dir, provider) = provider().await;

        let written = provider
            .save("pdf_files/1/2/a.pdf", stream_of(&["hello ", "world"]))
            .await
            .unwrap();
        assert_eq!(written, 11);
        assert!(provider.exists("pdf_files/1/2/a.pdf").await.unwrap());
        assert_eq!(
            provider.read_bytes("pdf_files/1/2/a.pdf").await.unwrap(),
            Bytes::from("hello world")
        );

        provider.delete("pdf_files/1/2/a.pdf").await.unwrap();
        assert!(!provider.exists("pdf_files/1/2/a.pdf").await.unwrap());
        // Deleting again is a no-op.
        provider.delete("pdf_files/1/2/a.pdf").await.unwrap();
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let (_dir, provider) = provider().await;
        provider.save("f.pdf", stream_of(&["first"])).await.unwrap();
        provider.save("f.pdf", stream_of(&["2nd"])).await.unwrap();
        assert_eq!(provider.read_bytes("f.pdf").await.unwrap(), Bytes::from("2nd"));
    }

    #[tokio::test]
    async fn test_failed_stream_leaves_no_file() {
        let (_dir, provider) = provider().await;
        let items: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::other("client went away")),
        ];
        let err = provider
            .save("pdf_files/1/1/x.pdf", Box::pin(futures::stream::iter(items)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert!(!provider.exists("pdf_files/1/1/x.pdf").await.unwrap());
    }

    #[tokio::test]
    async fn test_rename_and_move() {
        let (_dir, provider) = provider().await;
        provider
            .save("pdf_files/1/1/a.pdf", stream_of(&["x"]))
            .await
            .unwrap();

        provider
            .rename("pdf_files/1/1/a.pdf", "pdf_files/1/1/b.pdf")
            .await
            .unwrap();
        assert!(!provider.exists("pdf_files/1/1/a.pdf").await.unwrap());
        assert!(provider.exists("pdf_files/1/1/b.pdf").await.unwrap());

        provider
            .move_file("pdf_files/1/1/b.pdf", "pdf_files/1/9/b.pdf")
            .await
            .unwrap();
        assert!(provider.exists("pdf_files/1/9/b.pdf").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_source_is_noop() {
        let (_dir, provider) = provider().await;
        provider.rename("nope.pdf", "other.pdf").await.unwrap();
        provider
            .move_file("pdf_files/1/1/nope.pdf", "pdf_files/1/2/nope.pdf")
            .await
            .unwrap();
        assert!(!provider.exists("other.pdf").await.unwrap());
        assert!(!provider.exists("pdf_files/1/2/nope.pdf").await.unwrap());
        assert!(provider.exists("pdf_files/1/2").await.unwrap());
        provider.delete_dir("pdf_files/404").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_dir_recursive() {
        let (_dir, provider) = provider().await;
        provider
            .save("pdf_files/1/2/a.pdf", stream_of(&["a"]))
            .await
            .unwrap();
        provider.delete_dir("pdf_files/1/2").await.unwrap();
        assert!(!provider.exists("pdf_files/1/2").await.unwrap());
        assert!(provider.exists("pdf_files/1").await.unwrap());
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let (_dir, provider) = provider().await;
        for bad in ["../escape.pdf", "/etc/passwd", "pdf_files/../../x", ""] {
            let err = provider.exists(bad).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "path {bad:?}");
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let (_dir, provider) = provider().await;
        assert!(provider.health_check().await.unwrap());
    }
}
