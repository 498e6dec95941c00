//! Multipart form reading for create and update requests

use crate::core::error::{CatalogResult, RequestError};
use crate::core::upload::UploadedFile;
use crate::core::validation::filters::normalize_text;
use axum::extract::Multipart;
use std::collections::HashMap;

/// Text fields and file parts of one submitted form
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    texts: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl FormFields {
    /// Drain `multipart`, keeping the last value of repeated text fields
    pub async fn read(mut multipart: Multipart) -> CatalogResult<Self> {
        let mut form = FormFields::default();

        while let Some(field) = multipart.next_field().await.map_err(invalid_body)? {
            let name = field.name().unwrap_or_default().to_string();

            if field.file_name().is_some() {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(invalid_body)?;
                form.files.push(UploadedFile {
                    field: name,
                    file_name,
                    content_type,
                    bytes,
                });
            } else {
                let value = field.text().await.map_err(invalid_body)?;
                form.texts.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Normalized text of `name`, empty when absent
    pub fn text(&self, name: &str) -> String {
        self.texts.get(name).map(|v| normalize_text(v)).unwrap_or_default()
    }

    /// First non-empty file part named `name`
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.field == name && !f.bytes.is_empty())
    }

    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.texts.insert(name.to_string(), value.to_string());
        self
    }
}

fn invalid_body(err: axum::extract::multipart::MultipartError) -> RequestError {
    RequestError::InvalidBody {
        message: err.body_text(),
    }
}
