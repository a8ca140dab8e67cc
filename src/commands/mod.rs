//! Command dispatch and handlers.

pub mod employee;
pub mod login_id;
pub mod password;

use std::env;
use std::future::Future;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command, EmployeeCommand, LoginIdCommand, PasswordCommand};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::onboarding::OnboardError;

/// A failed command: what to tell the user and how to exit.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CommandError {
    /// Message printed to stderr.
    pub message: String,
    /// Process exit code.
    pub exit_code: u8,
}

impl CommandError {
    /// A failure caused by the caller's input (exit code 2).
    pub fn usage(message: impl Into<String>) -> Self {
        Self { message: message.into(), exit_code: 2 }
    }
}

impl From<String> for CommandError {
    fn from(message: String) -> Self {
        Self { message, exit_code: 1 }
    }
}

impl From<OnboardError> for CommandError {
    fn from(err: OnboardError) -> Self {
        Self { exit_code: err.exit_code(), message: err.to_string() }
    }
}

/// Dispatch a parsed command to its handler.
///
/// When `HRMS_RECORD` is set to a directory path, the clock, id generator,
/// store and notifier interactions are recorded to per-port cassette files
/// in a timestamped directory under it.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the selected command
/// handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), CommandError> {
    let config = Config::load()
        .map_err(|e| e.to_string())?
        .with_data_dir(cli.data_dir.clone());

    let session = match env::var("HRMS_RECORD") {
        Ok(dir) => Some(RecordingSession::new(&PathBuf::from(dir))?),
        Err(_) => None,
    };
    let ctx = match &session {
        Some(session) => ServiceContext::recording(&config, session),
        None => ServiceContext::live(&config),
    };

    let result = dispatch_with_context(&cli.command, &ctx, &config);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &Config,
) -> Result<(), CommandError> {
    match command {
        Command::Employee { command } => match command {
            EmployeeCommand::Add(args) => block_on(employee::add(ctx, config, args)),
            EmployeeCommand::List { org } => block_on(employee::list(ctx, org.as_deref())),
            EmployeeCommand::Show { login_id } => block_on(employee::show(ctx, login_id)),
        },
        Command::LoginId { command: LoginIdCommand::Preview { org, first, last, joined } } => {
            block_on(login_id::preview(ctx, org, first, last, *joined))
        }
        Command::Password { command: PasswordCommand::Generate { length } } => {
            password::generate(ctx, length.unwrap_or(config.password_length))
        }
    }
}

/// Run an async handler to completion on a current-thread runtime.
fn block_on<F>(handler: F) -> Result<(), CommandError>
where
    F: Future<Output = Result<(), CommandError>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    runtime.block_on(handler)
}

/// Finish a recording session and report the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    info!(dir = %output_dir.display(), "recording saved");
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::AllocationError;

    #[test]
    fn caller_mistakes_exit_with_two() {
        let err: CommandError =
            OnboardError::Forbidden { role: crate::employee::Role::Employee }.into();
        assert_eq!(err.exit_code, 2);
        assert_eq!(CommandError::usage("bad").exit_code, 2);
    }

    #[test]
    fn infrastructure_failures_exit_with_one() {
        let err: CommandError = OnboardError::from(AllocationError::AllocationExhausted {
            scope: "TechCorp/2024".into(),
            attempts: 100,
        })
        .into();
        assert_eq!(err.exit_code, 1);
        assert!(err.message.contains("TechCorp/2024"));
        assert_eq!(CommandError::from("disk full".to_string()).exit_code, 1);
    }
}
