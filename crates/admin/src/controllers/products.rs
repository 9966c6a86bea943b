//! Product catalogue management.

use std::borrow::Cow;

use tracing::instrument;

use selam_core::{ProductStatus, Slug, Workflow};

use super::{HasStatus, ListController, Resource};
use crate::api::{ApiClient, ApiError, Envelope};
use crate::error::AppError;
use crate::models::{Product, ProductDraft, ProductPatch};

impl Resource for Product {
    const NAME: &'static str = "product";
    const COLLECTION: &'static str = "products";
    const FACETS: &'static [&'static str] = &["status", "category"];

    fn key(&self) -> &str {
        self.slug.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.category.as_str(),
            self.short_description.as_str(),
        ]
    }

    fn facet(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "category" => Some(Cow::Borrowed(self.category.as_str())),
            _ => None,
        }
    }

    async fn fetch_all(client: &ApiClient) -> Result<Envelope<Vec<Self>>, ApiError> {
        client.list_products().await
    }
}

impl HasStatus for Product {
    type Status = ProductStatus;

    fn status(&self) -> ProductStatus {
        self.status
    }

    fn set_status(&mut self, status: ProductStatus) {
        self.status = status;
    }
}

impl ListController<Product> {
    /// Create a product. Name, category and short description are required,
    /// and the slug must not already be taken.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the request failure.
    #[instrument(skip(self, draft), fields(slug = %draft.slug))]
    pub async fn create(&mut self, draft: ProductDraft) -> Result<(), AppError> {
        self.validate("create product", &draft)?;
        if self.get(draft.slug.as_str()).is_some() {
            return Err(self.fail(
                "create product",
                AppError::Validation(format!("A product with slug {} already exists", draft.slug)),
            ));
        }

        let result = self.client().create_product(&draft).await;
        self.accept("create product", result)?;

        self.succeed("Product created successfully");
        let _ = self.load().await;
        Ok(())
    }

    /// Partially update a product. The slug is never sent.
    ///
    /// # Errors
    ///
    /// Returns the request failure after notifying.
    #[instrument(skip(self, patch))]
    pub async fn update(&mut self, slug: &Slug, patch: ProductPatch) -> Result<(), AppError> {
        let result = self.client().patch_product(slug, &patch).await;
        self.accept("update product", result)?;

        self.succeed("Product updated successfully");
        self.refresh_after(slug.as_str()).await;
        Ok(())
    }

    /// Replace a product wholesale (`PUT`). The draft's slug must match.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the request failure.
    #[instrument(skip(self, draft))]
    pub async fn replace(&mut self, slug: &Slug, draft: ProductDraft) -> Result<(), AppError> {
        self.validate("update product", &draft)?;
        if draft.slug != *slug {
            return Err(self.fail(
                "update product",
                AppError::Validation("A product's slug cannot be changed".to_string()),
            ));
        }

        let result = self.client().update_product(slug, &draft).await;
        self.accept("update product", result)?;

        self.succeed("Product updated successfully");
        self.refresh_after(slug.as_str()).await;
        Ok(())
    }

    /// Change catalogue status.
    ///
    /// # Errors
    ///
    /// Returns a validation error under a strict policy, or the request failure.
    #[instrument(skip(self))]
    pub async fn update_status(&mut self, slug: &Slug, status: ProductStatus) -> Result<(), AppError> {
        self.check_transition(slug.as_str(), status)?;
        let result = self.client().update_product_status(slug, status).await;
        self.accept("update product status", result)?;

        self.succeed(format!("Product status updated to {}", status.label()));
        self.refresh_status(slug.as_str(), status).await;
        Ok(())
    }

    /// Archive a product.
    ///
    /// # Errors
    ///
    /// Returns the request failure after notifying; the collection is unchanged.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, slug: &Slug) -> Result<(), AppError> {
        let result = self.client().delete_product(slug).await;
        self.accept("archive product", result)?;

        self.succeed("Product archived successfully");
        self.deselect(slug.as_str());
        let _ = self.load().await;
        Ok(())
    }

    /// Distinct categories, for the category facet.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .items()
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    fn validate(&self, action: &str, draft: &ProductDraft) -> Result<(), AppError> {
        self.require(
            action,
            &[
                ("name", draft.name.as_str()),
                ("category", draft.category.as_str()),
                ("short description", draft.short_description.as_str()),
            ],
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use selam_core::TransitionPolicy;

    use super::super::ListFilter;
    use super::super::test_support::controller;
    use super::*;
    use crate::notifications::Variant;

    #[tokio::test]
    async fn test_filter_by_category_and_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": [
                {"slug": "acme-hr", "name": "Acme HR", "category": "HR", "status": "ACTIVE"},
                {"slug": "acme-pay", "name": "Acme Pay", "category": "Finance", "status": "COMING_SOON"},
                {"slug": "ledger", "name": "Ledger", "category": "Finance", "status": "ACTIVE",
                 "shortDescription": "Bookkeeping for Acme customers"}
            ]})))
            .mount(&server)
            .await;

        let mut products = controller::<Product>(&server, TransitionPolicy::Permissive);
        products.load().await.unwrap();

        let finance_active = products.filter(
            &ListFilter::new()
                .facet("category", "Finance")
                .facet("status", "ACTIVE"),
        );
        assert_eq!(finance_active.len(), 1);
        assert_eq!(finance_active[0].slug.as_str(), "ledger");

        // Term hits the short description too.
        assert_eq!(products.filter(&ListFilter::new().term("acme")).len(), 3);
        assert_eq!(products.categories(), vec!["Finance", "HR"]);
    }

    #[tokio::test]
    async fn test_replace_rejects_slug_change() {
        let server = MockServer::start().await;
        let mut products = controller::<Product>(&server, TransitionPolicy::Permissive);
        let draft = ProductDraft {
            slug: Slug::parse("new-slug").unwrap(),
            name: "Acme".to_string(),
            category: "HR".to_string(),
            short_description: "HR suite".to_string(),
            long_description: String::new(),
            features: vec![],
            gallery: vec![],
            hero_image_url: String::new(),
            price_model: "Free".to_string(),
            rating: 0.0,
            users_count: 0,
            status: ProductStatus::Active,
        };
        let err = products
            .replace(&Slug::parse("old-slug").unwrap(), draft)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_archive_closes_selection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": [
                {"slug": "acme-hr", "name": "Acme HR", "category": "HR"}
            ]})))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/products/acme-hr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let mut products = controller::<Product>(&server, TransitionPolicy::Permissive);
        products.load().await.unwrap();
        products.select("acme-hr").unwrap();

        products.delete(&Slug::parse("acme-hr").unwrap()).await.unwrap();
        assert!(products.selected().is_none());
        assert_eq!(products.notifier().count(Variant::Success), 1);
    }
}
