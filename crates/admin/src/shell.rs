//! Dashboard shell: navigation and the objects every view shares.

use core::fmt;
use core::str::FromStr;

use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::config::AdminConfig;
use crate::controllers::ListController;
use crate::error::AppError;
use crate::models::{ContactMessage, JobApplication, JobPosting, Product};
use crate::notifications::Notifier;
use crate::overview::OverviewStats;
use crate::session::SessionStore;

/// Top-level pages, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DashboardView {
    #[default]
    Overview,
    Jobs,
    Applicants,
    Products,
    Messages,
    Revenue,
}

impl DashboardView {
    pub const ALL: [Self; 6] = [
        Self::Overview,
        Self::Jobs,
        Self::Applicants,
        Self::Products,
        Self::Messages,
        Self::Revenue,
    ];

    /// Sidebar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Jobs => "Job Vacancies",
            Self::Applicants => "Applicants",
            Self::Products => "Products",
            Self::Messages => "Contact Messages",
            Self::Revenue => "Revenue",
        }
    }

    /// Identifier used on the command line.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Jobs => "jobs",
            Self::Applicants => "applicants",
            Self::Products => "products",
            Self::Messages => "messages",
            Self::Revenue => "revenue",
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DashboardView {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        match wanted.as_str() {
            "contact" => Ok(Self::Messages),
            "applications" => Ok(Self::Applicants),
            _ => Self::ALL
                .into_iter()
                .find(|v| v.id() == wanted)
                .ok_or_else(|| AppError::Validation(format!("Unknown view: {s}"))),
        }
    }
}

/// Everything a signed-in operator works with.
///
/// One [`ApiClient`] and one [`Notifier`] are shared by the session store
/// and every controller.
#[derive(Debug)]
pub struct Dashboard {
    pub session: SessionStore,
    pub jobs: ListController<JobPosting>,
    pub applications: ListController<JobApplication>,
    pub products: ListController<Product>,
    pub messages: ListController<ContactMessage>,
    notifier: Notifier,
    current: DashboardView,
}

impl Dashboard {
    /// Wire up the dashboard from configuration. No requests are sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &AdminConfig) -> Result<Self, AppError> {
        let client = ApiClient::from_config(config)?;
        Ok(Self::new(client, config))
    }

    #[must_use]
    pub fn new(client: ApiClient, config: &AdminConfig) -> Self {
        let notifier = Notifier::new();
        let policy = config.transition_policy;
        Self {
            session: SessionStore::from_config(client.clone(), config),
            jobs: ListController::new(client.clone(), notifier.clone(), policy),
            applications: ListController::new(client.clone(), notifier.clone(), policy),
            products: ListController::new(client.clone(), notifier.clone(), policy),
            messages: ListController::new(client, notifier.clone(), policy),
            notifier,
            current: DashboardView::Overview,
        }
    }

    #[must_use]
    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    #[must_use]
    pub const fn current(&self) -> DashboardView {
        self.current
    }

    /// Fail unless someone is signed in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthenticated`] otherwise.
    pub fn require_session(&self) -> Result<(), AppError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::Unauthenticated)
        }
    }

    /// Switch to `view` and load what it shows.
    ///
    /// The overview loads every collection; a collection that fails to load
    /// is reported through the notifier and the others still load.
    ///
    /// # Errors
    ///
    /// Returns an error if no one is signed in, or if the view's only
    /// collection fails to load.
    #[instrument(skip(self))]
    pub async fn navigate(&mut self, view: DashboardView) -> Result<(), AppError> {
        self.require_session()?;
        self.current = view;
        info!(view = view.id(), "Navigating");

        let result = match view {
            DashboardView::Overview => {
                let results = [
                    self.jobs.load().await.err(),
                    self.applications.load().await.err(),
                    self.products.load().await.err(),
                    self.messages.load().await.err(),
                ];
                results.into_iter().flatten().for_each(|e| {
                    self.observe_error(&e);
                });
                Ok(())
            }
            DashboardView::Jobs => self.jobs.load().await.map(drop),
            DashboardView::Applicants => self.applications.load().await.map(drop),
            DashboardView::Products => self.products.load().await.map(drop),
            DashboardView::Messages => self.messages.load().await.map(drop),
            DashboardView::Revenue => Ok(()),
        };
        self.observe(result)
    }

    /// Statistics over whatever has been loaded.
    #[must_use]
    pub fn overview(&self) -> OverviewStats {
        OverviewStats::compute(
            self.jobs.items(),
            self.applications.items(),
            self.products.items(),
            self.messages.items(),
        )
    }

    /// Pass `result` through, ending the session on a 401/403.
    ///
    /// # Errors
    ///
    /// Returns `result`'s error unchanged.
    pub fn observe<T>(&mut self, result: Result<T, AppError>) -> Result<T, AppError> {
        if let Err(e) = &result {
            self.observe_error(e);
        }
        result
    }

    fn observe_error(&mut self, err: &AppError) {
        if let Some(api) = err.api_error() {
            self.session.handle_api_error(api);
        }
    }
}
