//! Status enums for the records managed from the admin.
//!
//! The backend is the authority on which status changes are legal. These
//! types give the client a typed view of the fixed enumerations, their
//! display labels, and an optional client-side mirror of the workflow graph
//! (see [`TransitionPolicy`]).

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a status string is not a known value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} status: {value:?}")]
pub struct StatusParseError {
    /// Which status family was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// How strictly status changes are checked before they reach the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionPolicy {
    /// Any status may move to any other status.
    #[default]
    Permissive,
    /// Only edges of the workflow graph are allowed.
    Strict,
}

/// A fixed status enumeration with a workflow graph.
pub trait Workflow: Copy + Eq + fmt::Debug + 'static {
    /// Human name of the status family, used in errors.
    const KIND: &'static str;

    /// Every status, in display order.
    fn all() -> &'static [Self];

    /// Wire value (e.g. `IN_REVIEW`).
    fn as_str(self) -> &'static str;

    /// Display label (e.g. `In Review`).
    fn label(self) -> &'static str;

    /// Statuses reachable from `self` under the strict workflow.
    fn successors(self) -> &'static [Self];

    /// Whether moving from `self` to `next` is allowed under `policy`.
    ///
    /// Re-applying the current status is always allowed.
    fn can_transition_to(self, next: Self, policy: TransitionPolicy) -> bool {
        match policy {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => self == next || self.successors().contains(&next),
        }
    }

    /// Parse a wire value, tolerating case and `-`/space separators.
    ///
    /// # Errors
    ///
    /// Returns [`StatusParseError`] if the value matches no status.
    fn parse_status(s: &str) -> Result<Self, StatusParseError> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| StatusParseError {
                kind: Self::KIND,
                value: s.to_owned(),
            })
    }
}

macro_rules! impl_status_traits {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = StatusParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_status(s)
            }
        }
    };
}

/// Job application review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[default]
    Submitted,
    InReview,
    Shortlisted,
    Hired,
    Rejected,
    Withdrawn,
}

impl Workflow for ApplicationStatus {
    const KIND: &'static str = "application";

    fn all() -> &'static [Self] {
        &[
            Self::Submitted,
            Self::InReview,
            Self::Shortlisted,
            Self::Hired,
            Self::Rejected,
            Self::Withdrawn,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::InReview => "IN_REVIEW",
            Self::Shortlisted => "SHORTLISTED",
            Self::Hired => "HIRED",
            Self::Rejected => "REJECTED",
            Self::Withdrawn => "WITHDRAWN",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::InReview => "In Review",
            Self::Shortlisted => "Shortlisted",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
            Self::Withdrawn => "Withdrawn",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Self::Submitted => &[Self::InReview, Self::Rejected, Self::Withdrawn],
            Self::InReview => &[Self::Shortlisted, Self::Rejected, Self::Withdrawn],
            Self::Shortlisted => &[Self::InReview, Self::Hired, Self::Rejected, Self::Withdrawn],
            // Rejected candidates may be reconsidered.
            Self::Rejected => &[Self::InReview],
            Self::Hired | Self::Withdrawn => &[],
        }
    }
}

impl_status_traits!(ApplicationStatus);

/// Contact message handling status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    #[default]
    New,
    InProgress,
    Resolved,
    Dismissed,
}

impl Workflow for MessageStatus {
    const KIND: &'static str = "message";

    fn all() -> &'static [Self] {
        &[Self::New, Self::InProgress, Self::Resolved, Self::Dismissed]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Dismissed => "DISMISSED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Dismissed => "Dismissed",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Self::New => &[Self::InProgress, Self::Resolved, Self::Dismissed],
            Self::InProgress => &[Self::Resolved, Self::Dismissed],
            Self::Resolved => &[Self::InProgress],
            Self::Dismissed => &[Self::New],
        }
    }
}

impl_status_traits!(MessageStatus);

/// Product catalogue status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    #[default]
    Active,
    ComingSoon,
    Discontinued,
}

impl Workflow for ProductStatus {
    const KIND: &'static str = "product";

    fn all() -> &'static [Self] {
        &[Self::Active, Self::ComingSoon, Self::Discontinued]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::ComingSoon => "COMING_SOON",
            Self::Discontinued => "DISCONTINUED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::ComingSoon => "Coming Soon",
            Self::Discontinued => "Discontinued",
        }
    }

    fn successors(self) -> &'static [Self] {
        match self {
            Self::Active => &[Self::ComingSoon, Self::Discontinued],
            Self::ComingSoon => &[Self::Active, Self::Discontinued],
            Self::Discontinued => &[Self::Active],
        }
    }
}

impl_status_traits!(ProductStatus);

/// Publication state of a job posting.
///
/// Derived from the posting's `isPublished`/`isArchived` flags; archived
/// wins over published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationState {
    Draft,
    Published,
    Archived,
}

impl PublicationState {
    /// Derive the state from the two posting flags.
    #[must_use]
    pub const fn from_flags(is_published: bool, is_archived: bool) -> Self {
        if is_archived {
            Self::Archived
        } else if is_published {
            Self::Published
        } else {
            Self::Draft
        }
    }

    /// Facet value used by list filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::Archived => "Archived",
        }
    }
}

impl fmt::Display for PublicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_application_status_wire_format() {
        let json = serde_json::to_string(&ApplicationStatus::InReview).unwrap();
        assert_eq!(json, "\"IN_REVIEW\"");

        let parsed: ApplicationStatus = serde_json::from_str("\"HIRED\"").unwrap();
        assert_eq!(parsed, ApplicationStatus::Hired);
        assert_eq!(parsed.label(), "Hired");
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_separators() {
        assert_eq!(
            "in-progress".parse::<MessageStatus>().unwrap(),
            MessageStatus::InProgress
        );
        assert_eq!(
            "coming soon".parse::<ProductStatus>().unwrap(),
            ProductStatus::ComingSoon
        );
        let err = "archived".parse::<ProductStatus>().unwrap_err();
        assert_eq!(err.kind, "product");
    }

    #[test]
    fn test_permissive_policy_allows_everything() {
        for &from in ApplicationStatus::all() {
            for &to in ApplicationStatus::all() {
                assert!(from.can_transition_to(to, TransitionPolicy::Permissive));
            }
        }
    }

    #[test]
    fn test_strict_policy_follows_graph() {
        let strict = TransitionPolicy::Strict;
        assert!(ApplicationStatus::Submitted.can_transition_to(ApplicationStatus::InReview, strict));
        assert!(!ApplicationStatus::Submitted.can_transition_to(ApplicationStatus::Hired, strict));
        assert!(!ApplicationStatus::Hired.can_transition_to(ApplicationStatus::Rejected, strict));
        assert!(MessageStatus::Dismissed.can_transition_to(MessageStatus::New, strict));
        assert!(!MessageStatus::Resolved.can_transition_to(MessageStatus::New, strict));
    }

    #[test]
    fn test_strict_policy_allows_same_status() {
        for &status in ApplicationStatus::all() {
            assert!(status.can_transition_to(status, TransitionPolicy::Strict));
        }
    }

    #[test]
    fn test_publication_state_from_flags() {
        assert_eq!(PublicationState::from_flags(false, false), PublicationState::Draft);
        assert_eq!(PublicationState::from_flags(true, false), PublicationState::Published);
        assert_eq!(PublicationState::from_flags(true, true), PublicationState::Archived);
    }
}
