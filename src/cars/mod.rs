//! Car rental search and fleet administration

mod types;

use std::sync::Arc;

use crate::error::Result;
use crate::fetch::HttpClient;
use crate::types::{Id, Page};

pub use types::*;

/// Client for `/cars` and `/admin/cars`
#[derive(Debug, Clone)]
pub struct CarsApi {
    http: Arc<HttpClient>,
}

impl CarsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn search(&self, params: &CarSearchParams) -> Result<Page<Car>> {
        self.http.get("/cars/search").query(params)?.execute().await
    }

    pub async fn get(&self, id: Id) -> Result<Car> {
        self.http.get(&format!("/cars/{}", id)).execute().await
    }

    pub async fn list(&self, page: u32, per_page: u32) -> Result<Page<Car>> {
        self.http
            .get("/admin/cars")
            .query(&serde_json::json!({ "page": page, "perPage": per_page }))?
            .execute()
            .await
    }

    pub async fn create(&self, form: &CarForm) -> Result<Car> {
        self.http.post("/admin/cars").json(form)?.execute().await
    }

    pub async fn update(&self, id: Id, form: &CarForm) -> Result<Car> {
        self.http
            .put(&format!("/admin/cars/{}", id))
            .json(form)?
            .execute()
            .await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.http.delete(&format!("/admin/cars/{}", id)).send().await
    }
}
