//! Types for file uploads

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A file ready to be sent as multipart form data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: None,
            bytes,
        }
    }

    /// Set the MIME type of the part
    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// Read a file from disk; the file name is taken from the path
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string());
        Ok(Self::new(&file_name, bytes))
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Wrap the bytes into a form under `field`
    pub fn into_form(self, field: &str) -> Result<Form> {
        if self.bytes.is_empty() {
            return Err(Error::validation("Please select a file to upload"));
        }
        let mut part = Part::bytes(self.bytes).file_name(self.file_name);
        if let Some(content_type) = self.content_type {
            part = part.mime_str(&content_type)?;
        }
        Ok(Form::new().part(field.to_string(), part))
    }
}

/// Where the server stored an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    #[serde(alias = "file_url")]
    pub url: String,
    #[serde(default, alias = "file_name")]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UploadFromUrl<'a> {
    pub url: &'a str,
}
