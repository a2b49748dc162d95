//! Disk I/O helpers: read-or-create the config file and overwrite it.
//!
//! Writes truncate the file and write it in full. They are not atomic: a
//! crash mid-write can leave a partial file behind.

use crate::document::ConfigDocument;
use crate::error::{Error, Result};
use crate::serializer::JsonSerializer;
use std::path::Path;

/// Reads and decodes the file at `path`. A missing file is replaced by a fresh
/// [`ConfigDocument`], which is written to disk before returning.
pub fn load_or_create(path: &Path, serializer: &JsonSerializer) -> Result<ConfigDocument> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let doc = ConfigDocument::new();
            write_document(path, &doc, serializer)?;
            tracing::info!(path = %path.display(), "created default config file");
            return Ok(doc);
        }
        Err(e) => return Err(Error::Io(e.to_string())),
    };
    serializer.decode_document(&bytes)
}

/// Encode `doc` and overwrite `path`, creating parent directories first.
pub fn write_document(path: &Path, doc: &ConfigDocument, serializer: &JsonSerializer) -> Result<()> {
    let bytes = serializer.encode_document(doc)?;
    if let Some(parent) = parent_dir(path) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Same as [`load_or_create`] on tokio's file API.
#[cfg(feature = "async")]
pub async fn load_or_create_async(
    path: &Path,
    serializer: &JsonSerializer,
) -> Result<ConfigDocument> {
    let bytes = match tokio::fs::read(path).await {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let doc = ConfigDocument::new();
            write_document_async(path, &doc, serializer).await?;
            tracing::info!(path = %path.display(), "created default config file");
            return Ok(doc);
        }
        Err(e) => return Err(Error::Io(e.to_string())),
    };
    serializer.decode_document(&bytes)
}

/// Same as [`write_document`] on tokio's file API.
#[cfg(feature = "async")]
pub async fn write_document_async(
    path: &Path,
    doc: &ConfigDocument,
    serializer: &JsonSerializer,
) -> Result<()> {
    let bytes = serializer.encode_document(doc)?;
    if let Some(parent) = parent_dir(path) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

// `Path::parent` gives `Some("")` for bare file names.
fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}
