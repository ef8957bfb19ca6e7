//! Hotel search and hotel administration

mod types;

use std::sync::Arc;

use crate::error::Result;
use crate::fetch::HttpClient;
use crate::types::{BulkDeleteRequest, BulkDeleteResult, Id, Page};
use crate::uploads::FileUpload;

pub use types::*;

/// Client for `/hotels` and `/admin/hotels`
#[derive(Debug, Clone)]
pub struct HotelsApi {
    http: Arc<HttpClient>,
}

impl HotelsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn search(&self, params: &HotelSearchParams) -> Result<Page<Hotel>> {
        self.http.get("/hotels/search").query(params)?.execute().await
    }

    pub async fn get(&self, id: Id) -> Result<Hotel> {
        self.http.get(&format!("/hotels/{}", id)).execute().await
    }

    pub async fn list(&self, query: &HotelQuery) -> Result<Page<Hotel>> {
        self.http.get("/admin/hotels").query(query)?.execute().await
    }

    pub async fn create(&self, form: &HotelForm) -> Result<Hotel> {
        self.http.post("/admin/hotels").json(form)?.execute().await
    }

    pub async fn update(&self, id: Id, form: &HotelForm) -> Result<Hotel> {
        self.http
            .put(&format!("/admin/hotels/{}", id))
            .json(form)?
            .execute()
            .await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.http.delete(&format!("/admin/hotels/{}", id)).send().await
    }

    pub async fn bulk_delete(&self, ids: &[Id]) -> Result<BulkDeleteResult> {
        self.http
            .post("/admin/hotels/bulk-delete")
            .json(&BulkDeleteRequest { ids })?
            .execute()
            .await
    }

    pub async fn set_featured(&self, id: Id, featured: bool) -> Result<Hotel> {
        let flags = HotelFlags {
            is_featured: Some(featured),
            ..Default::default()
        };
        self.http
            .patch(&format!("/admin/hotels/{}", id))
            .json(&flags)?
            .execute()
            .await
    }

    pub async fn set_availability(&self, id: Id, available: bool) -> Result<Hotel> {
        let flags = HotelFlags {
            is_available: Some(available),
            ..Default::default()
        };
        self.http
            .patch(&format!("/admin/hotels/{}", id))
            .json(&flags)?
            .execute()
            .await
    }

    /// Upload image bytes as multipart form data
    pub async fn upload_image(&self, id: Id, file: FileUpload, is_cover: bool) -> Result<HotelImage> {
        let form = file
            .into_form("file")?
            .text("is_cover", is_cover.to_string());
        self.http
            .post(&format!("/admin/hotels/{}/images", id))
            .multipart(form)
            .execute()
            .await
    }

    /// Let the server fetch the image itself
    pub async fn add_image_from_url(&self, id: Id, url: &str, is_cover: bool) -> Result<HotelImage> {
        self.http
            .post(&format!("/admin/hotels/{}/images/from-url", id))
            .json(&ImageFromUrl { url, is_cover })?
            .execute()
            .await
    }

    /// Flag one image as cover; the server unflags the previous one
    pub async fn set_cover_image(&self, id: Id, image_id: Id) -> Result<Hotel> {
        self.http
            .put(&format!("/admin/hotels/{}/images/{}/cover", id, image_id))
            .execute()
            .await
    }

    pub async fn delete_image(&self, id: Id, image_id: Id) -> Result<()> {
        self.http
            .delete(&format!("/admin/hotels/{}/images/{}", id, image_id))
            .send()
            .await
    }
}
