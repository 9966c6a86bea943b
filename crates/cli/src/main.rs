//! Selam CLI - back-office administration from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the token is kept for later commands)
//! selam login -e admin@selamsoftware.com
//!
//! # Dashboard summary and revenue figures
//! selam overview
//! selam revenue --range 6months
//!
//! # Manage records
//! selam jobs list --status published
//! selam jobs publish job-42
//! selam applications set-status app-1 hired
//! selam products create --name "Acme Suite" --category HR --summary "HR in a box"
//! selam messages set-status msg-7 resolved --handled-by-me
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` - Session management
//! - `overview` / `revenue` / `views` - Dashboard pages
//! - `jobs`, `applications`, `products`, `messages` - Record management
//! - `health` / `audit-logs` - Backend diagnostics

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use selam_admin::analytics::TimeRange;
use selam_admin::{AdminConfig, Dashboard};

mod commands;
mod error;
mod telemetry;

use commands::applications::ApplicationAction;
use commands::jobs::JobAction;
use commands::messages::MessageAction;
use commands::products::ProductAction;
use error::CliError;

#[derive(Parser)]
#[command(name = "selam")]
#[command(author, version, about = "Selam back-office admin")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Password (prompted for when omitted)
        #[arg(short, long, env = "SELAM_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign out and forget the session
    Logout,
    /// Show the signed-in admin
    Whoami,
    /// Dashboard summary statistics
    Overview,
    /// Revenue analytics
    Revenue {
        /// Time range: 3months, 6months or 12months
        #[arg(short, long, default_value = "12months")]
        range: TimeRange,
    },
    /// List dashboard pages
    Views,
    /// Manage job postings
    Jobs {
        #[command(subcommand)]
        action: JobAction,
    },
    /// Review job applications
    Applications {
        #[command(subcommand)]
        action: ApplicationAction,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Triage contact messages
    Messages {
        #[command(subcommand)]
        action: MessageAction,
    },
    /// Check backend health
    Health,
    /// Show recent audit log entries
    AuditLogs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AdminConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(io::stderr(), "selam: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = telemetry::init_sentry(&config);
    telemetry::init_tracing(&config);

    let mut dashboard = match Dashboard::from_config(&config) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            tracing::error!("Failed to start: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    let result = run(cli, &mut dashboard, &mut stdout).await;

    let mut stderr = io::stderr().lock();
    let _ = selam_admin::render::notifications(&mut stderr, &dashboard.notifier().drain());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            let _ = writeln!(stderr, "selam: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run<W: Write>(cli: Cli, dashboard: &mut Dashboard, out: &mut W) -> Result<(), CliError> {
    let needs_session = !matches!(
        cli.command,
        Commands::Login { .. } | Commands::Logout | Commands::Views | Commands::Revenue { .. }
    );
    if needs_session {
        commands::auth::restore(dashboard).await?;
    }

    match cli.command {
        Commands::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => commands::auth::prompt_password()?,
            };
            commands::auth::login(dashboard, out, &email, &password).await
        }
        Commands::Logout => commands::auth::logout(dashboard, out).await,
        Commands::Whoami => commands::auth::whoami(dashboard, out),
        Commands::Overview => commands::system::overview(dashboard, out).await,
        Commands::Revenue { range } => commands::system::revenue(out, range),
        Commands::Views => {
            selam_admin::render::navigation(out, dashboard.current())?;
            Ok(())
        }
        Commands::Jobs { action } => commands::jobs::run(dashboard, out, action).await,
        Commands::Applications { action } => {
            commands::applications::run(dashboard, out, action).await
        }
        Commands::Products { action } => commands::products::run(dashboard, out, action).await,
        Commands::Messages { action } => commands::messages::run(dashboard, out, action).await,
        Commands::Health => commands::system::health(dashboard, out).await,
        Commands::AuditLogs => commands::system::audit_logs(dashboard, out).await,
    }
}
