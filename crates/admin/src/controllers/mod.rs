//! List controllers: one per managed collection.
//!
//! A [`ListController`] owns a collection fetched from the backend, the
//! record currently open in the detail view, and a handle to the shared
//! [`Notifier`]. Every mutation goes to the backend first; on success the
//! collection is reloaded wholesale, never patched optimistically.
//!
//! Per-resource operations live in `impl ListController<JobPosting>` and
//! friends, one module per resource.

mod applications;
mod contact;
mod filter;
mod jobs;
mod products;

pub use filter::{ALL, Facet, ListFilter};

use std::borrow::Cow;
use std::future::Future;

use tracing::{debug, info};

use selam_core::{TransitionPolicy, Workflow};

use crate::api::{ApiClient, ApiError, Envelope};
use crate::error::AppError;
use crate::notifications::Notifier;

/// A record type managed by a [`ListController`].
pub trait Resource: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Singular noun for messages ("job").
    const NAME: &'static str;
    /// Plural noun for messages ("jobs").
    const COLLECTION: &'static str;
    /// Facet keys accepted by [`Resource::facet`].
    const FACETS: &'static [&'static str];

    /// Stable backend identifier (id or slug).
    fn key(&self) -> &str;

    /// Text searched by the filter term.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of facet `key`, or `None` if the resource has no such facet.
    fn facet(&self, key: &str) -> Option<Cow<'_, str>>;

    /// Fetch the whole collection.
    fn fetch_all(
        client: &ApiClient,
    ) -> impl Future<Output = Result<Envelope<Vec<Self>>, ApiError>> + Send;
}

/// A resource with a workflow status.
pub trait HasStatus: Resource {
    type Status: Workflow + std::fmt::Display;

    fn status(&self) -> Self::Status;

    fn set_status(&mut self, status: Self::Status);
}

/// Identifies one load request. Only the latest ticket's response is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

/// What happened to a load response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The collection was replaced; holds the new length.
    Applied(usize),
    /// A newer load was started after this one; the response was dropped.
    Stale,
}

/// Owns one collection and the selected record.
#[derive(Debug)]
pub struct ListController<R> {
    client: ApiClient,
    notifier: Notifier,
    policy: TransitionPolicy,
    items: Vec<R>,
    selected: Option<R>,
    latest_ticket: u64,
    loaded: bool,
}

impl<R: Resource> ListController<R> {
    #[must_use]
    pub const fn new(client: ApiClient, notifier: Notifier, policy: TransitionPolicy) -> Self {
        Self {
            client,
            notifier,
            policy,
            items: Vec::new(),
            selected: None,
            latest_ticket: 0,
            loaded: false,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[R] {
        &self.items
    }

    /// Whether at least one load has been applied.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub const fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    #[must_use]
    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Record with backend key `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&R> {
        self.items.iter().find(|r| r.key() == key)
    }

    /// Records matching `filter`. Pure: the collection is not touched.
    #[must_use]
    pub fn filter(&self, filter: &ListFilter) -> Vec<&R> {
        filter.apply(&self.items)
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&R> {
        self.selected.as_ref()
    }

    /// Open `key` in the detail view.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record is not loaded.
    pub fn select(&mut self, key: &str) -> Result<&R, AppError> {
        let record = self
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("{} {key}", R::NAME)))?;
        Ok(self.selected.insert(record))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Start a load. Any response for an earlier ticket becomes stale.
    pub const fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        LoadTicket(self.latest_ticket)
    }

    /// Apply the response to a load started with `ticket`.
    ///
    /// A failed or rejected response leaves the collection unchanged and
    /// records exactly one failure notification.
    ///
    /// # Errors
    ///
    /// Returns the failure after notifying.
    pub fn apply(
        &mut self,
        ticket: LoadTicket,
        result: Result<Envelope<Vec<R>>, ApiError>,
    ) -> Result<LoadOutcome, AppError> {
        if ticket.0 != self.latest_ticket {
            debug!(
                collection = R::COLLECTION,
                ticket = ticket.0,
                latest = self.latest_ticket,
                "Discarding stale load response"
            );
            return Ok(LoadOutcome::Stale);
        }

        let items = self
            .accept(&format!("load {}", R::COLLECTION), result)?
            .unwrap_or_default();

        debug!(collection = R::COLLECTION, count = items.len(), "Loaded");
        self.items = items;
        self.loaded = true;
        Ok(LoadOutcome::Applied(self.items.len()))
    }

    /// Fetch and replace the collection.
    ///
    /// # Errors
    ///
    /// Returns the failure after notifying; the collection is unchanged.
    pub async fn load(&mut self) -> Result<usize, AppError> {
        let ticket = self.begin_load();
        let result = R::fetch_all(&self.client).await;
        match self.apply(ticket, result)? {
            LoadOutcome::Applied(count) => Ok(count),
            LoadOutcome::Stale => Ok(self.items.len()),
        }
    }

    /// Check a mutation response, notifying on failure.
    pub(crate) fn accept<T>(
        &self,
        action: &str,
        result: Result<Envelope<T>, ApiError>,
    ) -> Result<Option<T>, AppError> {
        result
            .map_err(AppError::from)
            .and_then(Envelope::accepted)
            .map_err(|e| self.fail(action, e))
    }

    /// Notify and log a failure, handing the error back.
    pub(crate) fn fail(&self, action: &str, err: AppError) -> AppError {
        err.report(action);
        let description = match &err {
            AppError::Validation(msg) => msg.clone(),
            _ => format!("Failed to {action}"),
        };
        self.notifier.error("Error", description);
        err
    }

    /// Reject blank required fields before any request.
    pub(crate) fn require(&self, action: &str, fields: &[(&str, &str)]) -> Result<(), AppError> {
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(self.fail(
                action,
                AppError::Validation(format!(
                    "Please fill in all required fields: {}",
                    missing.join(", ")
                )),
            ))
        }
    }

    /// Reload after a successful mutation and refresh the selection.
    ///
    /// A failed reload has already been notified; the mutation itself stood.
    pub(crate) async fn refresh_after(&mut self, key: &str) {
        let _ = self.load().await;
        if self.selected.as_ref().is_some_and(|s| s.key() == key) {
            if let Some(fresh) = self.get(key).cloned() {
                self.selected = Some(fresh);
            }
        }
    }

    /// Drop the selection if it points at `key`.
    pub(crate) fn deselect(&mut self, key: &str) {
        if self.selected.as_ref().is_some_and(|s| s.key() == key) {
            self.selected = None;
        }
    }

    pub(crate) fn succeed(&self, description: impl Into<String>) {
        self.notifier.success("Success", description);
    }
}

impl<R: HasStatus> ListController<R> {
    /// Reject `next` under a strict policy when the current status forbids it.
    pub(crate) fn check_transition(&self, key: &str, next: R::Status) -> Result<(), AppError> {
        let current = self
            .get(key)
            .or(self.selected.as_ref().filter(|s| s.key() == key))
            .map(HasStatus::status);

        match current {
            Some(current) if !current.can_transition_to(next, self.policy) => Err(self.fail(
                "update status",
                AppError::Validation(format!(
                    "Cannot move {} from {} to {}",
                    R::NAME,
                    current.label(),
                    next.label()
                )),
            )),
            _ => Ok(()),
        }
    }

    /// Refresh after a status change, patching the selection locally if the
    /// reloaded collection no longer holds it.
    pub(crate) async fn refresh_status(&mut self, key: &str, status: R::Status) {
        self.refresh_after(key).await;
        if let Some(selected) = self.selected.as_mut().filter(|s| s.key() == key) {
            if self.items.iter().all(|r| r.key() != key) {
                selected.set_status(status);
            }
        }
        info!(collection = R::COLLECTION, key, %status, "Status updated");
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use url::Url;
    use wiremock::MockServer;

    use super::*;

    #[allow(clippy::unwrap_used)]
    pub fn controller<R: Resource>(
        server: &MockServer,
        policy: TransitionPolicy,
    ) -> ListController<R> {
        let base = Url::parse(&format!("{}/api/v1", server.uri())).unwrap();
        let client = ApiClient::new(base, Duration::from_secs(5)).unwrap();
        ListController::new(client, Notifier::new(), policy)
    }
}
