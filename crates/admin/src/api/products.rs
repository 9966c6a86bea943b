//! Product endpoints, addressed by slug.

use serde_json::Value;
use tracing::instrument;

use selam_core::{ProductStatus, Slug};

use super::{ApiClient, ApiError, Envelope, StatusRequest};
use crate::models::{Product, ProductDraft, ProductPatch};

impl ApiClient {
    /// List every product (`GET /products`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Envelope<Vec<Product>>, ApiError> {
        self.get(&["products"]).await
    }

    /// Fetch one product (`GET /products/:slug`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product(&self, slug: &Slug) -> Result<Envelope<Product>, ApiError> {
        self.get(&["products", slug.as_str()]).await
    }

    /// Create a product (`POST /products`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self, draft), fields(slug = %draft.slug))]
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Envelope<Product>, ApiError> {
        self.post(&["products"], draft).await
    }

    /// Replace a product (`PUT /products/:slug`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self, draft), fields(slug = %slug))]
    pub async fn update_product(
        &self,
        slug: &Slug,
        draft: &ProductDraft,
    ) -> Result<Envelope<Product>, ApiError> {
        self.put(&["products", slug.as_str()], draft).await
    }

    /// Partially update a product (`PATCH /products/:slug`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self, patch), fields(slug = %slug))]
    pub async fn patch_product(
        &self,
        slug: &Slug,
        patch: &ProductPatch,
    ) -> Result<Envelope<Product>, ApiError> {
        self.patch(&["products", slug.as_str()], patch).await
    }

    /// Archive a product (`DELETE /products/:slug`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn delete_product(&self, slug: &Slug) -> Result<Envelope<Value>, ApiError> {
        self.delete(&["products", slug.as_str()]).await
    }

    /// Change a product's catalogue status (`POST /products/:slug/status`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self), fields(slug = %slug, %status))]
    pub async fn update_product_status(
        &self,
        slug: &Slug,
        status: ProductStatus,
    ) -> Result<Envelope<Product>, ApiError> {
        let body = StatusRequest {
            status,
            handler_id: None,
        };
        self.post(&["products", slug.as_str(), "status"], &body)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_status_change_posts_to_status_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/products/acme-suite/status"))
            .and(body_json(json!({"status": "DISCONTINUED"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let base = Url::parse(&format!("{}/api/v1", server.uri())).unwrap();
        let client = ApiClient::new(base, Duration::from_secs(5)).unwrap();
        let slug = Slug::parse("acme-suite").unwrap();
        let env = client
            .update_product_status(&slug, ProductStatus::Discontinued)
            .await
            .unwrap();
        assert!(env.success);
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/products/ghost"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such product"))
            .mount(&server)
            .await;

        let base = Url::parse(&format!("{}/api/v1", server.uri())).unwrap();
        let client = ApiClient::new(base, Duration::from_secs(5)).unwrap();
        let err = client
            .delete_product(&Slug::parse("ghost").unwrap())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
