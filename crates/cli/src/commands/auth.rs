//! Session commands.

use std::io::{self, BufRead, Write};

use selam_admin::Dashboard;

use crate::error::CliError;

/// Restore the persisted session or fail.
pub async fn restore(dashboard: &mut Dashboard) -> Result<(), CliError> {
    if dashboard.session.restore_session().await {
        Ok(())
    } else {
        Err(CliError::NotSignedIn)
    }
}

/// Read a password from stdin, prompting on stderr.
pub fn prompt_password() -> Result<String, CliError> {
    let mut stderr = io::stderr().lock();
    write!(stderr, "Password: ")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

pub async fn login<W: Write>(
    dashboard: &mut Dashboard,
    out: &mut W,
    email: &str,
    password: &str,
) -> Result<(), CliError> {
    if !dashboard.session.login(email, password).await? {
        return Err(CliError::LoginRefused);
    }
    whoami(dashboard, out)
}

pub async fn logout<W: Write>(dashboard: &mut Dashboard, out: &mut W) -> Result<(), CliError> {
    dashboard.session.logout().await;
    writeln!(out, "Signed out.")?;
    Ok(())
}

pub fn whoami<W: Write>(dashboard: &Dashboard, out: &mut W) -> Result<(), CliError> {
    let user = dashboard.session.user().ok_or(CliError::NotSignedIn)?;
    if user.display_name.is_empty() {
        writeln!(out, "Signed in as {}", user.email)?;
    } else {
        writeln!(out, "Signed in as {} <{}>", user.display_name, user.email)?;
    }
    if !user.role.is_empty() {
        writeln!(out, "Role: {}", user.role)?;
    }
    Ok(())
}
