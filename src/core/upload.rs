//! Uploaded logo files
//!
//! Logos are written under a per-entity directory with a generated name.
//! Removal is best effort: a file that cannot be deleted is logged and
//! forgotten, never reported to the caller.

use crate::config::UploadConfig;
use crate::core::error::{CatalogResult, RequestError, UploadError, ValidationError};
use axum::body::Bytes;
use chrono::Utc;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Which entity a file belongs to, selecting its directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Brand,
    Category,
}

/// A file part received in a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// A file written to the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub kind: UploadKind,
    /// Name recorded on the entity
    pub file_name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    brands: String,
    categories: String,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            root: config.root.clone(),
            brands: config.brands.clone(),
            categories: config.categories.clone(),
            max_bytes: config.max_bytes,
        }
    }

    pub fn dir(&self, kind: UploadKind) -> PathBuf {
        match kind {
            UploadKind::Brand => self.root.join(&self.brands),
            UploadKind::Category => self.root.join(&self.categories),
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Check and write `upload`, returning where it landed
    pub async fn store(&self, kind: UploadKind, upload: &UploadedFile) -> CatalogResult<StoredFile> {
        if upload.bytes.is_empty() {
            return Err(ValidationError::field(&upload.field, "uploaded file is empty").into());
        }
        if upload.bytes.len() > self.max_bytes {
            return Err(ValidationError::field(
                &upload.field,
                format!("uploaded file exceeds {} bytes", self.max_bytes),
            )
            .into());
        }

        let content_type = upload.content_type.as_deref().unwrap_or_default();
        let Some(subtype) = content_type.strip_prefix("image/") else {
            return Err(RequestError::UnsupportedMediaType {
                field: upload.field.clone(),
                content_type: content_type.to_string(),
            }
            .into());
        };

        let extension = upload
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(sanitize_extension)
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| sanitize_extension(subtype));

        let dir = self.dir(kind);
        let file_name = format!("{}-{}.{}", Utc::now().timestamp_millis(), Uuid::new_v4().simple(), extension);
        let path = dir.join(&file_name);

        tokio::fs::create_dir_all(&dir).await.map_err(|e| UploadError::Io {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        write_whole(&path, &upload.bytes).await?;

        tracing::debug!(path = %path.display(), bytes = upload.bytes.len(), "stored upload");
        Ok(StoredFile {
            kind,
            file_name,
            path,
        })
    }

    pub async fn discard(&self, file: &StoredFile) {
        remove_quietly(&file.path).await;
    }

    /// Remove a file recorded on an entity
    ///
    /// Only the final path component of `file_name` is used.
    pub async fn discard_named(&self, kind: UploadKind, file_name: &str) {
        match Path::new(file_name).file_name() {
            Some(name) => remove_quietly(&self.dir(kind).join(name)).await,
            None => tracing::warn!(file_name, "refusing to remove upload with no file name"),
        }
    }
}

/// Write `bytes` to `path`; a failed write leaves no partial file behind
async fn write_whole(path: &Path, bytes: &[u8]) -> Result<(), UploadError> {
    if let Err(e) = tokio::fs::write(path, bytes).await {
        remove_quietly(path).await;
        return Err(UploadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        });
    }
    Ok(())
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove upload");
    }
}

fn sanitize_extension(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(8)
        .collect::<String>()
        .to_ascii_lowercase()
}
