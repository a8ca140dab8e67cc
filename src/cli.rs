//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::employee::Role;

/// Top-level CLI parser for `hrms`.
#[derive(Debug, Parser)]
#[command(name = "hrms", version, about = "Onboard employees with login ids and temporary passwords")]
pub struct Cli {
    /// Directory holding employee records; overrides `HRMS_DATA_DIR`.
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create and inspect employee records.
    Employee {
        /// Employee subcommand.
        #[command(subcommand)]
        command: EmployeeCommand,
    },
    /// Work with login ids.
    LoginId {
        /// Login id subcommand.
        #[command(subcommand)]
        command: LoginIdCommand,
    },
    /// Work with temporary passwords.
    Password {
        /// Password subcommand.
        #[command(subcommand)]
        command: PasswordCommand,
    },
}

/// `hrms employee ...`
#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// Onboard a new employee and print their welcome message.
    Add(AddArgs),
    /// List employees ordered by login id.
    List {
        /// Only list employees of this organization.
        #[arg(long)]
        org: Option<String>,
    },
    /// Show one employee.
    Show {
        /// Login id to look up.
        login_id: String,
    },
}

/// Attributes of `hrms employee add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Organization name.
    #[arg(long)]
    pub org: String,
    /// Given name.
    #[arg(long)]
    pub first: String,
    /// Family name.
    #[arg(long)]
    pub last: String,
    /// Contact address for the welcome message.
    #[arg(long)]
    pub email: String,
    /// Join date (YYYY-MM-DD); defaults to today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub joined: Option<NaiveDate>,
    /// Access level of the new account.
    #[arg(long, value_enum, default_value_t = Role::Employee)]
    pub role: Role,
    /// Role of the person running the command. Only `hr` and `admin` may
    /// onboard.
    #[arg(long = "as", value_enum, value_name = "ROLE")]
    pub actor: Role,
}

/// `hrms login-id ...`
#[derive(Debug, Subcommand)]
pub enum LoginIdCommand {
    /// Show the login id the next onboarding would receive. Writes nothing.
    Preview {
        /// Organization name.
        #[arg(long)]
        org: String,
        /// Given name.
        #[arg(long)]
        first: String,
        /// Family name.
        #[arg(long)]
        last: String,
        /// Join date (YYYY-MM-DD); defaults to today.
        #[arg(long, value_name = "YYYY-MM-DD")]
        joined: Option<NaiveDate>,
    },
}

/// `hrms password ...`
#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    /// Print a freshly generated password.
    Generate {
        /// Number of characters; defaults to `HRMS_PASSWORD_LENGTH`.
        #[arg(long)]
        length: Option<usize>,
    },
}
