//! Generic file uploads

mod types;

use std::sync::Arc;

use crate::error::Result;
use crate::fetch::HttpClient;

pub use types::*;

/// Client for `/upload`
#[derive(Debug, Clone)]
pub struct UploadsApi {
    http: Arc<HttpClient>,
}

impl UploadsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn upload_file(&self, file: FileUpload) -> Result<UploadedFile> {
        self.http
            .post("/upload")
            .multipart(file.into_form("file")?)
            .execute()
            .await
    }

    /// Ask the server to download `url` and store it
    pub async fn upload_from_url(&self, url: &str) -> Result<UploadedFile> {
        self.http
            .post("/upload/from-url")
            .json(&UploadFromUrl { url })?
            .execute()
            .await
    }
}
