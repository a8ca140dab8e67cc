//! Employee onboarding core: login id allocation and temporary credentials.
//!
//! [`allocator`] turns an organization, a name and a join date into a
//! unique login id such as `EMPTEAVLE20240001`. [`credential`] produces and
//! hashes the temporary password. [`onboarding`] ties both to the employee
//! store and the welcome notifier through the [`ports`] of a
//! [`context::ServiceContext`].

pub mod adapters;
pub mod allocator;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod credential;
pub mod employee;
pub mod login_id;
pub mod onboarding;
pub mod ports;

#[cfg(test)]
mod test_support;

use clap::Parser;

use crate::commands::CommandError;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print to stdout and succeed.
///
/// # Errors
///
/// Returns a usage error when argument parsing fails, or the command's
/// error when execution fails.
pub fn run<I, T>(args: I) -> Result<(), CommandError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(CommandError::usage(err.to_string().trim_end())),
    };
    commands::dispatch(&cli)
}
