//! `hrms employee` commands.

use crate::cli::AddArgs;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::employee::{EmployeeRecord, EmployeeStatus, NewEmployee};
use crate::login_id::LoginId;
use crate::onboarding::{Onboarding, OnboardingSettings};

use super::CommandError;

/// Execute `employee add`.
///
/// The welcome message, including the temporary password, goes out through
/// the context's notifier; this command only reports the outcome.
///
/// # Errors
///
/// Returns the onboarding failure with its exit code.
pub async fn add(ctx: &ServiceContext, config: &Config, args: &AddArgs) -> Result<(), CommandError> {
    let new = NewEmployee {
        organization: args.org.clone(),
        first_name: args.first.clone(),
        last_name: args.last.clone(),
        email: args.email.clone(),
        joined_on: args.joined.unwrap_or_else(|| ctx.clock.now().date_naive()),
        role: args.role,
    };

    let onboarded = Onboarding::new(ctx, OnboardingSettings::from(config))
        .onboard(args.actor, new)
        .await?;

    println!(
        "Created {} for {} ({})",
        onboarded.login_id,
        onboarded.record.full_name(),
        onboarded.record.organization
    );
    if !onboarded.notified {
        eprintln!(
            "Warning: the welcome message for {} was not delivered; reset the password before handing over the account.",
            onboarded.login_id
        );
    }
    Ok(())
}

/// Execute `employee list`.
///
/// # Errors
///
/// Returns an error string if the store cannot be read.
pub async fn list(ctx: &ServiceContext, organization: Option<&str>) -> Result<(), CommandError> {
    let records = ctx.store.list(organization).await.map_err(|e| e.to_string())?;
    if records.is_empty() {
        println!("No employees found.");
        return Ok(());
    }
    println!("{:<18} {:<24} {:<16} {:<10} {:<8} STATUS", "LOGIN ID", "NAME", "ORGANIZATION", "JOINED", "ROLE");
    for record in &records {
        println!("{}", list_row(record));
    }
    Ok(())
}

/// Execute `employee show`.
///
/// # Errors
///
/// Returns a usage error for a malformed login id, or an error if the
/// employee does not exist or the store cannot be read.
pub async fn show(ctx: &ServiceContext, login_id: &str) -> Result<(), CommandError> {
    let login_id: LoginId = login_id
        .trim()
        .to_uppercase()
        .parse()
        .map_err(|e| CommandError::usage(format!("invalid login id {login_id:?}: {e}")))?;
    let record = ctx
        .store
        .get(&login_id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("no employee with login id {login_id}"))?;
    print!("{}", describe(&record));
    Ok(())
}

fn status_label(status: EmployeeStatus) -> &'static str {
    match status {
        EmployeeStatus::Active => "active",
        EmployeeStatus::Inactive => "inactive",
    }
}

fn list_row(record: &EmployeeRecord) -> String {
    format!(
        "{:<18} {:<24} {:<16} {:<10} {:<8} {}",
        record.login_id,
        record.full_name(),
        record.organization,
        record.joined_on,
        record.role.to_string(),
        status_label(record.status)
    )
}

fn describe(record: &EmployeeRecord) -> String {
    format!(
        "Login ID:     {}\n\
         Name:         {}\n\
         Email:        {}\n\
         Organization: {}\n\
         Joined:       {}\n\
         Role:         {}\n\
         Status:       {}\n\
         Created:      {}\n",
        record.login_id,
        record.full_name(),
        record.email,
        record.organization,
        record.joined_on,
        record.role,
        status_label(record.status),
        record.created_at.to_rfc3339(),
    )
}
