//! Dashboard pages and backend diagnostics.

use std::io::Write;

use selam_admin::analytics::{RevenueReport, TimeRange};
use selam_admin::{AppError, Dashboard, DashboardView, render};

use crate::error::CliError;

pub async fn overview<W: Write>(dashboard: &mut Dashboard, out: &mut W) -> Result<(), CliError> {
    dashboard.navigate(DashboardView::Overview).await?;
    render::overview(out, &dashboard.overview())?;
    Ok(())
}

pub fn revenue<W: Write>(out: &mut W, range: TimeRange) -> Result<(), CliError> {
    render::revenue(out, &RevenueReport::compute(range))?;
    Ok(())
}

pub async fn health<W: Write>(dashboard: &mut Dashboard, out: &mut W) -> Result<(), CliError> {
    let result = dashboard.session.client().health_check().await;
    let envelope = dashboard.observe(result.map_err(AppError::from))?;

    let status = envelope
        .data
        .as_ref()
        .and_then(|h| h.status.clone())
        .unwrap_or_else(|| if envelope.success { "ok" } else { "degraded" }.to_string());
    writeln!(out, "Backend: {status}")?;
    if let Some(health) = envelope.data {
        for (key, value) in &health.extra {
            writeln!(out, "  {key}: {value}")?;
        }
    }
    Ok(())
}

pub async fn audit_logs<W: Write>(dashboard: &mut Dashboard, out: &mut W) -> Result<(), CliError> {
    let result = dashboard.session.client().list_audit_logs().await;
    let entries = dashboard.observe(
        result
            .map_err(AppError::from)
            .and_then(selam_admin::Envelope::accepted),
    )?;
    render::audit_logs(out, &entries.unwrap_or_default())?;
    Ok(())
}
