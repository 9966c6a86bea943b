//! Plain-text rendering of views: tables, detail cards, summaries.
//!
//! Everything writes to an `io::Write` so the CLI can target stdout and
//! tests can target a `Vec<u8>`.

use std::io::{self, Write};

use rust_decimal::Decimal;
use selam_core::{Money, Workflow};

use crate::analytics::{QUARTERLY_GROWTH, REVENUE_BY_SERVICE, RevenueReport, TOP_CLIENTS};
use crate::detail::{Detail, DetailView, StatusOption};
use crate::models::{AuditLog, ContactMessage, JobApplication, JobPosting, Product};
use crate::notifications::{Notification, Variant};
use crate::overview::OverviewStats;
use crate::shell::DashboardView;

/// Column-aligned text table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    empty_message: String,
}

impl Table {
    #[must_use]
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| (*h).to_owned()).collect(),
            rows: Vec::new(),
            empty_message: "No records found.".to_owned(),
        }
    }

    #[must_use]
    pub fn row(mut self, cells: Vec<String>) -> Self {
        self.rows.push(cells);
        self
    }

    #[must_use]
    pub fn empty_message(mut self, message: &str) -> Self {
        message.clone_into(&mut self.empty_message);
        self
    }

    /// Write the table. Cells are truncated to one line.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        if self.rows.is_empty() {
            return writeln!(w, "{}", self.empty_message);
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|c| first_line(c)).collect())
            .collect();

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        write_row(w, &self.headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|n| "-".repeat(*n)).collect();
        write_row(w, &rule, &widths)?;
        for row in &cells {
            write_row(w, row, &widths)?;
        }
        Ok(())
    }
}

fn write_row<W: Write>(w: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let cell = cells.get(i).map_or("", String::as_str);
            format!("{cell:<width$}")
        })
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(w, "{}", line.trim_end())
}

const MAX_CELL: usize = 48;

fn first_line(text: &str) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() > MAX_CELL {
        let cut: String = line.chars().take(MAX_CELL - 1).collect();
        format!("{cut}…")
    } else {
        line.to_owned()
    }
}

/// Job postings table.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn jobs<W: Write>(w: &mut W, jobs: &[&JobPosting]) -> io::Result<()> {
    jobs.iter()
        .fold(
            Table::new(&["ID", "Title", "Department", "Location", "Type", "Status"])
                .empty_message("No job postings found."),
            |table, job| {
                table.row(vec![
                    job.id.to_string(),
                    job.title.clone(),
                    job.department.clone(),
                    job.location.clone(),
                    job.employment_type.clone(),
                    job.publication_state().label().to_owned(),
                ])
            },
        )
        .write_to(w)
}

/// Applications table.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn applications<W: Write>(w: &mut W, applications: &[&JobApplication]) -> io::Result<()> {
    applications
        .iter()
        .fold(
            Table::new(&["ID", "Candidate", "Email", "Job", "Status"])
                .empty_message("No applicants found."),
            |table, app| {
                table.row(vec![
                    app.id.to_string(),
                    app.candidate_name.clone(),
                    app.candidate_email.clone(),
                    app.job_id.to_string(),
                    app.status.label().to_owned(),
                ])
            },
        )
        .write_to(w)
}

/// Products table.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn products<W: Write>(w: &mut W, products: &[&Product]) -> io::Result<()> {
    products
        .iter()
        .fold(
            Table::new(&["Slug", "Name", "Category", "Price", "Rating", "Users", "Status"])
                .empty_message("No products found."),
            |table, product| {
                table.row(vec![
                    product.slug.to_string(),
                    product.name.clone(),
                    product.category.clone(),
                    product.price_model.clone(),
                    format!("{:.1}/5", product.display_rating()),
                    product.users_count.to_string(),
                    product.status.label().to_owned(),
                ])
            },
        )
        .write_to(w)
}

/// Contact messages table.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn messages<W: Write>(w: &mut W, messages: &[&ContactMessage]) -> io::Result<()> {
    messages
        .iter()
        .fold(
            Table::new(&["ID", "From", "Subject", "Status"]).empty_message("No messages found."),
            |table, msg| {
                table.row(vec![
                    msg.id.to_string(),
                    format!("{} <{}>", msg.name, msg.email),
                    msg.subject.clone(),
                    msg.status.label().to_owned(),
                ])
            },
        )
        .write_to(w)
}

/// Audit trail table.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn audit_logs<W: Write>(w: &mut W, entries: &[AuditLog]) -> io::Result<()> {
    entries
        .iter()
        .fold(
            Table::new(&["When", "Actor", "Action", "Entity"]).empty_message("No audit entries."),
            |table, entry| {
                table.row(vec![
                    entry
                        .created_at
                        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default(),
                    entry.actor_id.clone().unwrap_or_default(),
                    entry.action.clone(),
                    format!("{} {}", entry.entity_type, entry.entity_id),
                ])
            },
        )
        .write_to(w)
}

/// Detail card for the selected record.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn detail<W: Write, R: Detail>(w: &mut W, view: &DetailView<'_, R>) -> io::Result<()> {
    let heading = view.heading();
    writeln!(w, "{heading}")?;
    writeln!(w, "{}", "=".repeat(heading.chars().count().max(1)))?;

    let fields = view.fields();
    let width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (label, value) in fields {
        let mut lines = value.lines();
        writeln!(w, "{label:<width$}  {}", lines.next().unwrap_or("-"))?;
        for line in lines {
            writeln!(w, "{:<width$}  {line}", "")?;
        }
    }
    Ok(())
}

/// Status picker: `*` marks the current status, `x` an unavailable one.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn status_options<W: Write, S: Workflow>(
    w: &mut W,
    options: &[StatusOption<S>],
) -> io::Result<()> {
    writeln!(w, "Status:")?;
    for option in options {
        let marker = match (option.current, option.available) {
            (true, _) => '*',
            (false, true) => ' ',
            (false, false) => 'x',
        };
        writeln!(w, "  [{marker}] {:<14} {}", option.status.as_str(), option.label)?;
    }
    Ok(())
}

/// Overview cards.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn overview<W: Write>(w: &mut W, stats: &OverviewStats) -> io::Result<()> {
    writeln!(w, "Dashboard Overview")?;
    writeln!(w)?;
    writeln!(
        w,
        "Active Jobs       {:>5}   ({} draft, {} archived)",
        stats.active_jobs, stats.draft_jobs, stats.archived_jobs
    )?;
    writeln!(w, "Total Applicants  {:>5}", stats.total_applicants)?;
    for (status, count) in &stats.applicants_by_status {
        writeln!(w, "  {:<16}{count:>5}", status.label())?;
    }
    writeln!(w, "Products          {:>5}", stats.total_products)?;
    for (status, count) in &stats.products_by_status {
        writeln!(w, "  {:<16}{count:>5}", status.label())?;
    }
    writeln!(
        w,
        "Open Messages     {:>5}   (of {})",
        stats.open_messages, stats.total_messages
    )
}

/// Revenue analytics page.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn revenue<W: Write>(w: &mut W, report: &RevenueReport) -> io::Result<()> {
    writeln!(w, "Revenue Analytics ({})", report.range)?;
    writeln!(w)?;
    writeln!(
        w,
        "Total Revenue    {:>8}   {}",
        report.total_revenue.compact(),
        signed_percent(report.growth_percent)
    )?;
    writeln!(w, "Monthly Average  {:>8}", report.average_revenue.compact())?;
    writeln!(
        w,
        "Total Profit     {:>8}   {}% margin",
        report.total_profit.compact(),
        report.profit_margin_percent
    )?;
    writeln!(w, "Active Clients   {:>8}", report.active_clients)?;
    writeln!(w)?;

    report
        .months
        .iter()
        .fold(
            Table::new(&["Month", "Revenue", "Expenses", "Profit", "Clients"]),
            |table, m| {
                table.row(vec![
                    m.month.to_owned(),
                    Money::usd(m.revenue).compact(),
                    Money::usd(m.expenses).compact(),
                    Money::usd(m.profit).compact(),
                    m.clients.to_string(),
                ])
            },
        )
        .write_to(w)?;
    writeln!(w)?;

    REVENUE_BY_SERVICE
        .iter()
        .fold(Table::new(&["Service", "Share", "Revenue"]), |table, s| {
            table.row(vec![
                s.service.to_owned(),
                format!("{}%", s.percent),
                Money::usd(s.revenue).compact(),
            ])
        })
        .write_to(w)?;
    writeln!(w)?;

    QUARTERLY_GROWTH
        .iter()
        .fold(Table::new(&["Quarter", "Revenue", "Growth"]), |table, q| {
            table.row(vec![
                q.quarter.to_owned(),
                Money::usd(q.revenue).compact(),
                format!("+{:.1}%", q.growth_percent),
            ])
        })
        .write_to(w)?;
    writeln!(w)?;

    TOP_CLIENTS
        .iter()
        .fold(
            Table::new(&["Client", "Revenue", "Projects", "Status"]),
            |table, c| {
                table.row(vec![
                    c.name.to_owned(),
                    Money::usd(c.revenue).compact(),
                    c.projects.to_string(),
                    c.status.to_owned(),
                ])
            },
        )
        .write_to(w)
}

fn signed_percent(value: Decimal) -> String {
    if value.is_sign_negative() {
        format!("{value}%")
    } else {
        format!("+{value}%")
    }
}

/// Sidebar, marking the current view.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn navigation<W: Write>(w: &mut W, current: DashboardView) -> io::Result<()> {
    for view in DashboardView::ALL {
        let marker = if view == current { '>' } else { ' ' };
        writeln!(w, "{marker} {:<12} {}", view.id(), view.label())?;
    }
    Ok(())
}

/// Toasts, one per line.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn notifications<W: Write>(w: &mut W, notifications: &[Notification]) -> io::Result<()> {
    for n in notifications {
        let tag = match n.variant {
            Variant::Destructive => "error",
            Variant::Success => "ok",
            Variant::Info => "info",
            Variant::Default => "note",
        };
        match &n.description {
            Some(description) => writeln!(w, "[{tag}] {}: {description}", n.title)?,
            None => writeln!(w, "[{tag}] {}", n.title)?,
        }
    }
    Ok(())
}
