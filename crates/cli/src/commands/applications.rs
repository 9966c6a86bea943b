//! Applicant tracking commands.

use std::io::Write;

use clap::Subcommand;

use selam_admin::controllers::ListFilter;
use selam_admin::detail::DetailView;
use selam_admin::{Dashboard, DashboardView, render};
use selam_core::{ApplicationId, ApplicationStatus};

use crate::error::CliError;

#[derive(Subcommand)]
pub enum ApplicationAction {
    /// List applications
    List {
        /// Search candidate name, email and job
        #[arg(short, long)]
        search: Option<String>,

        /// Status (e.g. in_review) or all
        #[arg(long, default_value = "all")]
        status: String,

        /// Job ID or all
        #[arg(long, default_value = "all")]
        job: String,
    },
    /// Show one application and its status options
    Show { id: String },
    /// Move an application to a new status
    SetStatus {
        id: String,
        /// submitted, in_review, shortlisted, hired, rejected or withdrawn
        status: ApplicationStatus,
    },
}

pub async fn run<W: Write>(
    dashboard: &mut Dashboard,
    out: &mut W,
    action: ApplicationAction,
) -> Result<(), CliError> {
    match action {
        ApplicationAction::List {
            search,
            status,
            job,
        } => {
            dashboard.navigate(DashboardView::Applicants).await?;
            let status = normalize_status(&status);
            let filter = ListFilter::new()
                .term(search.as_deref().unwrap_or(""))
                .facet("status", &status)
                .facet("job", &job);
            render::applications(out, &dashboard.applications.filter(&filter))?;
        }
        ApplicationAction::Show { id } => {
            dashboard.navigate(DashboardView::Applicants).await?;
            dashboard.applications.select(&id)?;
            if let Some(view) = DetailView::of(&dashboard.applications) {
                render::detail(out, &view)?;
                writeln!(out)?;
                render::status_options(out, &view.status_options())?;
            }
        }
        ApplicationAction::SetStatus { id, status } => {
            dashboard.navigate(DashboardView::Applicants).await?;
            dashboard.applications.select(&id)?;
            let result = dashboard
                .applications
                .update_status(&ApplicationId::new(id), status)
                .await;
            dashboard.observe(result)?;
            if let Some(view) = DetailView::of(&dashboard.applications) {
                writeln!(out, "{}: {}", view.heading(), view.status_label())?;
            }
        }
    }
    Ok(())
}

/// Accept `in-review` and `In Review` as well as `IN_REVIEW`.
pub(crate) fn normalize_status(raw: &str) -> String {
    raw.trim().to_uppercase().replace(['-', ' '], "_")
}
