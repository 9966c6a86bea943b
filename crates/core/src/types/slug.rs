//! Product slug type.
//!
//! Products are keyed by a slug derived from the product name when the
//! product is first created. After that the slug never changes, even if the
//! product is renamed.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The source name (or slug) is empty after trimming.
    #[error("slug cannot be empty")]
    Empty,
    /// An existing slug contains whitespace.
    #[error("slug cannot contain whitespace: {0:?}")]
    Whitespace(String),
}

/// A stable product identifier.
///
/// ```
/// use selam_core::Slug;
///
/// let slug = Slug::from_name("Acme  Suite Pro").unwrap();
/// assert_eq!(slug.as_str(), "acme-suite-pro");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derive a slug from a product name.
    ///
    /// The name is lower-cased and every run of whitespace becomes a single
    /// hyphen. Nothing else is stripped, so punctuation survives as typed.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::Empty`] if the name is blank.
    pub fn from_name(name: &str) -> Result<Self, SlugError> {
        let slug = name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");

        if slug.is_empty() {
            return Err(SlugError::Empty);
        }
        Ok(Self(slug))
    }

    /// Wrap a slug that already exists on the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is blank or contains whitespace.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(SlugError::Whitespace(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
