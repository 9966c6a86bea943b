//! Form state for creating and editing jobs and products.
//!
//! Forms hold what an operator typed; `into_draft` turns that into the wire
//! body, applying the same defaults and conversions on every path.

use chrono::{DateTime, Utc};

use selam_core::{ProductStatus, Slug};

use crate::error::AppError;
use crate::models::{JobDraft, JobPosting, Product, ProductDraft, ProductPatch, parse_timestamp};

/// Hero image used until a real one is uploaded.
pub const PLACEHOLDER_HERO_IMAGE: &str = "/placeholder.svg?height=200&width=300";

/// Price model assumed when none is chosen.
pub const DEFAULT_PRICE_MODEL: &str = "Free";

/// `datetime-local` input format.
const DATETIME_LOCAL: &str = "%Y-%m-%dT%H:%M";

/// Split a textarea into list items. Blank lines are dropped.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Format a timestamp for a `datetime-local` input. Timestamps are UTC.
#[must_use]
pub fn to_datetime_local(value: Option<DateTime<Utc>>) -> String {
    value.map(|d| d.format(DATETIME_LOCAL).to_string()).unwrap_or_default()
}

fn parse_optional_date(field: &str, raw: &str) -> Result<Option<DateTime<Utc>>, AppError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_timestamp(raw)
        .map(Some)
        .ok_or_else(|| AppError::Validation(format!("{field} is not a valid date: {raw}")))
}

/// Job create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobForm {
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub description: String,
    /// One requirement per line.
    pub requirements_text: String,
    /// One responsibility per line.
    pub responsibilities_text: String,
    pub compensation_range: String,
    pub is_published: bool,
    /// `datetime-local` value, or blank.
    pub publish_at: String,
    /// `datetime-local` value, or blank.
    pub close_at: String,
}

impl JobForm {
    /// Prefill the form from an existing posting.
    #[must_use]
    pub fn from_posting(job: &JobPosting) -> Self {
        Self {
            title: job.title.clone(),
            department: job.department.clone(),
            location: job.location.clone(),
            employment_type: job.employment_type.clone(),
            description: job.description.clone(),
            requirements_text: job.requirements.join("\n"),
            responsibilities_text: job.responsibilities.join("\n"),
            compensation_range: job.compensation_range.clone(),
            is_published: job.is_published,
            publish_at: to_datetime_local(job.publish_at),
            close_at: to_datetime_local(job.close_at),
        }
    }

    /// Build the request body.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a date cannot be parsed or the
    /// closing date precedes the publish date.
    pub fn into_draft(self) -> Result<JobDraft, AppError> {
        let publish_at = parse_optional_date("Publish date", &self.publish_at)?;
        let close_at = parse_optional_date("Close date", &self.close_at)?;
        if let (Some(open), Some(close)) = (publish_at, close_at) {
            if close < open {
                return Err(AppError::Validation(
                    "Close date must be after the publish date".to_string(),
                ));
            }
        }

        Ok(JobDraft {
            requirements: split_lines(&self.requirements_text),
            responsibilities: split_lines(&self.responsibilities_text),
            title: self.title.trim().to_owned(),
            department: self.department.trim().to_owned(),
            location: self.location.trim().to_owned(),
            employment_type: self.employment_type,
            description: self.description,
            compensation_range: self.compensation_range,
            is_published: self.is_published,
            publish_at,
            close_at,
        })
    }
}

/// Product create/edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub short_description: String,
    pub long_description: String,
    /// One feature per line.
    pub features_text: String,
    pub hero_image_url: String,
    pub price_model: String,
    pub rating: Option<f64>,
    pub users_count: Option<u64>,
    pub status: Option<ProductStatus>,
}

impl ProductForm {
    /// Prefill the form from an existing product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            short_description: product.short_description.clone(),
            long_description: product.long_description.clone(),
            features_text: product.features.join("\n"),
            hero_image_url: product.hero_image_url.clone(),
            price_model: product.price_model.clone(),
            rating: Some(product.rating),
            users_count: Some(product.users_count),
            status: Some(product.status),
        }
    }

    /// Build a creation body, deriving the slug from the name.
    ///
    /// Unset fields take the catalogue defaults: status `ACTIVE`, price
    /// model `Free`, the placeholder hero image, the short description as
    /// the long description, and zero rating and users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is blank.
    pub fn into_draft(self) -> Result<ProductDraft, AppError> {
        let slug = Slug::from_name(&self.name)
            .map_err(|_| AppError::Validation("Product name is required".to_string()))?;

        let long_description = if self.long_description.trim().is_empty() {
            self.short_description.clone()
        } else {
            self.long_description
        };

        Ok(ProductDraft {
            slug,
            name: self.name.trim().to_owned(),
            category: self.category.trim().to_owned(),
            short_description: self.short_description,
            long_description,
            features: split_lines(&self.features_text),
            gallery: Vec::new(),
            hero_image_url: non_blank_or(self.hero_image_url, PLACEHOLDER_HERO_IMAGE),
            price_model: non_blank_or(self.price_model, DEFAULT_PRICE_MODEL),
            rating: self.rating.unwrap_or(0.0),
            users_count: self.users_count.unwrap_or(0),
            status: self.status.unwrap_or_default(),
        })
    }

    /// Fields that differ from `original`. The slug is never included.
    #[must_use]
    pub fn diff(&self, original: &Product) -> ProductPatch {
        fn changed(new: &str, old: &str) -> Option<String> {
            (new != old).then(|| new.to_owned())
        }

        let features = split_lines(&self.features_text);
        ProductPatch {
            name: changed(&self.name, &original.name),
            category: changed(&self.category, &original.category),
            short_description: changed(&self.short_description, &original.short_description),
            long_description: changed(&self.long_description, &original.long_description),
            features: (features != original.features).then_some(features),
            gallery: None,
            hero_image_url: changed(&self.hero_image_url, &original.hero_image_url),
            price_model: changed(&self.price_model, &original.price_model),
            rating: self
                .rating
                .filter(|r| (r - original.rating).abs() > f64::EPSILON),
            users_count: self.users_count.filter(|u| *u != original.users_count),
        }
    }
}

fn non_blank_or(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_owned()
    } else {
        value
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_split_lines_drops_blanks() {
        assert_eq!(
            split_lines("Rust\n\n  SQL  \r\n\nDocker\n"),
            vec!["Rust", "SQL", "Docker"]
        );
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_job_form_round_trips_dates() {
        let job: JobPosting = serde_json::from_value(json!({
            "id": "j-1",
            "title": "Engineer",
            "requirements": ["Rust", "SQL"],
            "publishAt": "2024-05-01T09:30:00Z"
        }))
        .unwrap();

        let form = JobForm::from_posting(&job);
        assert_eq!(form.publish_at, "2024-05-01T09:30");
        assert_eq!(form.requirements_text, "Rust\nSQL");

        let draft = form.into_draft().unwrap();
        assert_eq!(draft.publish_at, job.publish_at);
        assert_eq!(draft.requirements, vec!["Rust", "SQL"]);
        assert!(draft.close_at.is_none());
    }

    #[test]
    fn test_job_form_rejects_bad_dates() {
        let form = JobForm {
            publish_at: "next tuesday".to_string(),
            ..JobForm::default()
        };
        assert!(matches!(form.into_draft(), Err(AppError::Validation(_))));

        let form = JobForm {
            publish_at: "2024-06-01T00:00".to_string(),
            close_at: "2024-05-01T00:00".to_string(),
            ..JobForm::default()
        };
        assert!(matches!(form.into_draft(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_product_form_defaults() {
        let form = ProductForm {
            name: "Acme  Suite".to_string(),
            category: "HR".to_string(),
            short_description: "HR in a box".to_string(),
            ..ProductForm::default()
        };
        let draft = form.into_draft().unwrap();
        assert_eq!(draft.slug.as_str(), "acme-suite");
        assert_eq!(draft.status, ProductStatus::Active);
        assert_eq!(draft.price_model, "Free");
        assert_eq!(draft.hero_image_url, PLACEHOLDER_HERO_IMAGE);
        assert_eq!(draft.long_description, "HR in a box");
        assert!(draft.features.is_empty());
        assert!(draft.gallery.is_empty());
        assert_eq!(draft.users_count, 0);
    }

    #[test]
    fn test_product_form_blank_name() {
        assert!(matches!(
            ProductForm::default().into_draft(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_product_diff_only_changed_fields() {
        let product: Product = serde_json::from_value(json!({
            "slug": "acme-suite",
            "name": "Acme Suite",
            "category": "HR",
            "rating": 4.0
        }))
        .unwrap();

        let mut form = ProductForm::from_product(&product);
        assert!(form.diff(&product).is_empty());

        form.name = "Acme Suite Pro".to_string();
        form.rating = Some(4.5);
        let patch = form.diff(&product);
        assert_eq!(patch.name.as_deref(), Some("Acme Suite Pro"));
        assert_eq!(patch.rating, Some(4.5));
        assert!(patch.category.is_none());
    }
}
