//! Payment processing and verification

mod types;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::fetch::HttpClient;
use crate::types::Id;
use crate::uploads::{FileUpload, UploadedFile};

pub use types::*;

/// The two calls a checkout needs. Implemented by `PaymentsApi`; tests and
/// alternative transports can supply their own.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn process(&self, request: &PaymentRequest) -> Result<PaymentResponse>;
    async fn upload_proof(&self, file: FileUpload) -> Result<UploadedFile>;
}

/// Client for `/payments`
#[derive(Debug, Clone)]
pub struct PaymentsApi {
    http: Arc<HttpClient>,
}

impl PaymentsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn process(&self, request: &PaymentRequest) -> Result<PaymentResponse> {
        self.http.post("/payments/process").json(request)?.execute().await
    }

    pub async fn get(&self, id: Id) -> Result<Payment> {
        self.http.get(&format!("/payments/{}", id)).execute().await
    }

    pub async fn for_booking(&self, booking_id: Id) -> Result<Vec<Payment>> {
        self.http
            .get(&format!("/payments/booking/{}", booking_id))
            .execute()
            .await
    }

    /// Confirm a redirect-based payment after the customer returns
    pub async fn verify(&self, reference: &str) -> Result<Payment> {
        self.http
            .get("/payments/verify")
            .segment(reference)
            .execute()
            .await
    }

    pub async fn gateways(&self) -> Result<Vec<GatewayInfo>> {
        self.http.get("/payments/gateways").execute().await
    }

    pub async fn upload_proof(&self, file: FileUpload) -> Result<UploadedFile> {
        self.http
            .post("/payments/upload-proof")
            .multipart(file.into_form("file")?)
            .execute()
            .await
    }
}

#[async_trait]
impl PaymentProcessor for PaymentsApi {
    async fn process(&self, request: &PaymentRequest) -> Result<PaymentResponse> {
        PaymentsApi::process(self, request).await
    }

    async fn upload_proof(&self, file: FileUpload) -> Result<UploadedFile> {
        PaymentsApi::upload_proof(self, file).await
    }
}
