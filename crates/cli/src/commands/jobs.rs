//! Job posting commands.

use std::io::Write;

use clap::{Args, Subcommand};

use selam_admin::controllers::ListFilter;
use selam_admin::detail::DetailView;
use selam_admin::forms::{JobForm, split_lines};
use selam_admin::models::JobPatch;
use selam_admin::{AppError, Dashboard, DashboardView, render};
use selam_core::JobId;

use crate::error::CliError;

#[derive(Subcommand)]
pub enum JobAction {
    /// List postings
    List {
        /// Search title, department and location
        #[arg(short, long)]
        search: Option<String>,

        /// draft, published, archived or all
        #[arg(long, default_value = "all")]
        status: String,

        #[arg(long, default_value = "all")]
        department: String,

        /// Employment type
        #[arg(long = "type", default_value = "all")]
        employment_type: String,
    },
    /// Show one posting
    Show { id: String },
    /// Create a posting
    Create(JobArgs),
    /// Change some fields of a posting
    Update {
        id: String,
        #[command(flatten)]
        changes: JobChanges,
    },
    /// Replace every field of a posting
    Replace {
        id: String,
        #[command(flatten)]
        job: JobArgs,
    },
    /// Make a posting visible on the careers page
    Publish { id: String },
    /// Hide a posting from the careers page
    Unpublish { id: String },
    /// Archive a posting
    Archive { id: String },
}

#[derive(Args)]
pub struct JobArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    department: String,
    #[arg(long)]
    location: String,
    /// Employment type (e.g. Full-time)
    #[arg(long = "type", default_value = "Full-time")]
    employment_type: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Repeat for each requirement
    #[arg(long = "requirement")]
    requirements: Vec<String>,
    /// Repeat for each responsibility
    #[arg(long = "responsibility")]
    responsibilities: Vec<String>,
    #[arg(long, default_value = "")]
    compensation: String,
    /// Publish immediately
    #[arg(long)]
    published: bool,
    /// YYYY-MM-DDTHH:MM
    #[arg(long, default_value = "")]
    publish_at: String,
    /// YYYY-MM-DDTHH:MM
    #[arg(long, default_value = "")]
    close_at: String,
}

impl From<JobArgs> for JobForm {
    fn from(args: JobArgs) -> Self {
        Self {
            title: args.title,
            department: args.department,
            location: args.location,
            employment_type: args.employment_type,
            description: args.description,
            requirements_text: args.requirements.join("\n"),
            responsibilities_text: args.responsibilities.join("\n"),
            compensation_range: args.compensation,
            is_published: args.published,
            publish_at: args.publish_at,
            close_at: args.close_at,
        }
    }
}

#[derive(Args)]
pub struct JobChanges {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long = "type")]
    employment_type: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Newline-separated; replaces the whole list
    #[arg(long)]
    requirements: Option<String>,
    /// Newline-separated; replaces the whole list
    #[arg(long)]
    responsibilities: Option<String>,
    #[arg(long)]
    compensation: Option<String>,
}

impl From<JobChanges> for JobPatch {
    fn from(changes: JobChanges) -> Self {
        Self {
            title: changes.title,
            department: changes.department,
            location: changes.location,
            employment_type: changes.employment_type,
            description: changes.description,
            requirements: changes.requirements.as_deref().map(split_lines),
            responsibilities: changes.responsibilities.as_deref().map(split_lines),
            compensation_range: changes.compensation,
            publish_at: None,
            close_at: None,
        }
    }
}

pub async fn run<W: Write>(
    dashboard: &mut Dashboard,
    out: &mut W,
    action: JobAction,
) -> Result<(), CliError> {
    match action {
        JobAction::List {
            search,
            status,
            department,
            employment_type,
        } => {
            dashboard.navigate(DashboardView::Jobs).await?;
            let filter = ListFilter::new()
                .term(search.as_deref().unwrap_or(""))
                .facet("status", &status)
                .facet("department", &department)
                .facet("type", &employment_type);
            render::jobs(out, &dashboard.jobs.filter(&filter))?;
        }
        JobAction::Show { id } => {
            dashboard.navigate(DashboardView::Jobs).await?;
            dashboard.jobs.select(&id)?;
            if let Some(view) = DetailView::of(&dashboard.jobs) {
                render::detail(out, &view)?;
            }
        }
        JobAction::Create(args) => {
            let draft = JobForm::from(args).into_draft()?;
            let result = dashboard.jobs.create(draft).await;
            dashboard.observe(result)?;
            writeln!(out, "Job created.")?;
        }
        JobAction::Update { id, changes } => {
            let patch = JobPatch::from(changes);
            if patch.is_empty() {
                return Err(AppError::Validation("Nothing to update".to_string()).into());
            }
            let result = dashboard.jobs.update(&JobId::new(id), patch).await;
            dashboard.observe(result)?;
            writeln!(out, "Job updated.")?;
        }
        JobAction::Replace { id, job } => {
            let draft = JobForm::from(job).into_draft()?;
            let result = dashboard.jobs.replace(&JobId::new(id), draft).await;
            dashboard.observe(result)?;
            writeln!(out, "Job updated.")?;
        }
        JobAction::Publish { id } => {
            let result = dashboard.jobs.publish(&JobId::new(id), true).await;
            dashboard.observe(result)?;
            writeln!(out, "Job published.")?;
        }
        JobAction::Unpublish { id } => {
            let result = dashboard.jobs.publish(&JobId::new(id), false).await;
            dashboard.observe(result)?;
            writeln!(out, "Job unpublished.")?;
        }
        JobAction::Archive { id } => {
            let result = dashboard.jobs.delete(&JobId::new(id)).await;
            dashboard.observe(result)?;
            writeln!(out, "Job archived.")?;
        }
    }
    Ok(())
}
