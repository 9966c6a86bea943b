//! Contact message commands.

use std::io::Write;

use clap::Subcommand;

use selam_admin::controllers::ListFilter;
use selam_admin::detail::DetailView;
use selam_admin::{Dashboard, DashboardView, render};
use selam_core::{MessageId, MessageStatus};

use crate::error::CliError;

#[derive(Subcommand)]
pub enum MessageAction {
    /// List messages
    List {
        /// Search sender, subject and body
        #[arg(short, long)]
        search: Option<String>,

        /// new, in_progress, resolved, dismissed or all
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Show one message and its status options
    Show { id: String },
    /// Change a message's status
    SetStatus {
        id: String,
        status: MessageStatus,

        /// Record the signed-in admin as the handler
        #[arg(long)]
        handled_by_me: bool,
    },
}

pub async fn run<W: Write>(
    dashboard: &mut Dashboard,
    out: &mut W,
    action: MessageAction,
) -> Result<(), CliError> {
    match action {
        MessageAction::List { search, status } => {
            dashboard.navigate(DashboardView::Messages).await?;
            let status = super::applications::normalize_status(&status);
            let filter = ListFilter::new()
                .term(search.as_deref().unwrap_or(""))
                .facet("status", &status);
            render::messages(out, &dashboard.messages.filter(&filter))?;
            writeln!(out, "\n{} open", dashboard.messages.open_count())?;
        }
        MessageAction::Show { id } => {
            dashboard.navigate(DashboardView::Messages).await?;
            dashboard.messages.select(&id)?;
            if let Some(view) = DetailView::of(&dashboard.messages) {
                render::detail(out, &view)?;
                writeln!(out)?;
                render::status_options(out, &view.status_options())?;
            }
        }
        MessageAction::SetStatus {
            id,
            status,
            handled_by_me,
        } => {
            let handler = if handled_by_me {
                dashboard.session.user().and_then(|u| u.id.clone())
            } else {
                None
            };
            if handled_by_me && handler.is_none() {
                tracing::warn!("Signed-in admin has no id; sending without a handler");
            }

            dashboard.navigate(DashboardView::Messages).await?;
            dashboard.messages.select(&id)?;
            let result = dashboard
                .messages
                .update_status(&MessageId::new(id), status, handler.as_ref())
                .await;
            dashboard.observe(result)?;
            if let Some(view) = DetailView::of(&dashboard.messages) {
                writeln!(out, "{}: {}", view.heading(), view.status_label())?;
            }
        }
    }
    Ok(())
}
