//! Catalogue products, keyed by slug.

use serde::{Deserialize, Serialize};

use selam_core::{ProductStatus, Slug};

use super::serde_helpers::{lenient_f64, lenient_status, lenient_u64, null_as_default};

/// Highest rating shown in the UI.
pub const MAX_RATING: f64 = 5.0;

/// A product as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub slug: Slug,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub long_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gallery: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hero_image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_model: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: f64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub users_count: u64,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: ProductStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_archived: bool,
}

impl Product {
    /// Rating clamped to `0..=5`. NaN shows as 0.
    #[must_use]
    pub fn display_rating(&self) -> f64 {
        if self.rating.is_nan() {
            0.0
        } else {
            self.rating.clamp(0.0, MAX_RATING)
        }
    }
}

/// Body for `POST /products` and `PUT /products/:slug`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub slug: Slug,
    pub name: String,
    pub category: String,
    pub short_description: String,
    pub long_description: String,
    pub features: Vec<String>,
    pub gallery: Vec<String>,
    pub hero_image_url: String,
    pub price_model: String,
    pub rating: f64,
    pub users_count: u64,
    pub status: ProductStatus,
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            short_description: product.short_description.clone(),
            long_description: product.long_description.clone(),
            features: product.features.clone(),
            gallery: product.gallery.clone(),
            hero_image_url: product.hero_image_url.clone(),
            price_model: product.price_model.clone(),
            rating: product.rating,
            users_count: product.users_count,
            status: product.status,
        }
    }
}

/// Partial update (`PATCH /products/:slug`).
///
/// There is no `slug` field: a product's slug never changes once created.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_count: Option<u64>,
}

impl ProductPatch {
    /// Whether the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_lenient_numbers() {
        let product: Product = serde_json::from_value(json!({
            "slug": "acme-suite",
            "name": "Acme Suite",
            "rating": "4.5",
            "usersCount": "1200",
            "status": "COMING_SOON"
        }))
        .unwrap();
        assert!((product.rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(product.users_count, 1200);
        assert_eq!(product.status, ProductStatus::ComingSoon);

        let garbage: Product = serde_json::from_value(json!({
            "slug": "x",
            "name": "X",
            "rating": "n/a",
            "usersCount": null
        }))
        .unwrap();
        assert!(garbage.rating.abs() < f64::EPSILON);
        assert_eq!(garbage.users_count, 0);
    }

    #[test]
    fn test_display_rating_is_clamped() {
        let mut product: Product =
            serde_json::from_value(json!({"slug": "x", "name": "X", "rating": 7})).unwrap();
        assert!((product.display_rating() - 5.0).abs() < f64::EPSILON);
        product.rating = -1.0;
        assert!(product.display_rating().abs() < f64::EPSILON);
    }

    #[test]
    fn test_null_status_name_and_flag_default() {
        let product: Product = serde_json::from_value(json!({
            "slug": "acme-suite",
            "name": null,
            "status": null,
            "isArchived": null
        }))
        .unwrap();
        assert!(product.name.is_empty());
        assert_eq!(product.status, ProductStatus::Active);
        assert!(!product.is_archived);
    }

    #[test]
    fn test_missing_slug_is_rejected() {
        assert!(serde_json::from_value::<Product>(json!({"name": "No Slug"})).is_err());
    }

    #[test]
    fn test_patch_never_carries_slug() {
        let patch = ProductPatch {
            name: Some("Renamed".to_string()),
            ..ProductPatch::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({"name": "Renamed"}));
    }
}
