//! Command-line arguments for the `taskmaster` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::api::types::{Priority, TaskStatus};

#[derive(Parser, Debug)]
#[command(name = "taskmaster", version, about = "Command-line client for Task Master")]
pub struct Args {
    /// API base URL (overrides TASKMASTER_API_URL / VITE_APP_API_BASE_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Where session credentials are kept
    #[arg(long, value_enum, default_value_t = StoreKind::File, global = true)]
    pub store: StoreKind,

    /// Credentials file for `--store file` (default: <config dir>/taskmaster/credentials.json)
    #[arg(long, global = true)]
    pub credentials_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    File,
    Keychain,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the session and forget stored credentials
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Request a password reset email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with the token from the reset email
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
    },
    #[command(subcommand)]
    Profile(ProfileCommand),
    #[command(subcommand)]
    Category(CategoryCommand),
    #[command(subcommand)]
    Task(TaskCommand),
    /// Search your tasks by title
    Search { term: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ProfileCommand {
    /// Change your display name
    Update {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        picture: Option<String>,
    },
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CategoryCommand {
    List,
    Show { id: i64 },
    /// List the tasks in a category
    Tasks { id: i64 },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change a category; omitted fields keep their current value
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TaskCommand {
    Show { id: i64 },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        due_date: Option<String>,
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        #[arg(long, value_enum, default_value_t = TaskStatus::Pending)]
        status: TaskStatus,
    },
    /// Change a task; omitted fields keep their current value
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        due_date: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long, value_enum)]
        status: Option<TaskStatus>,
    },
    Delete { id: i64 },
}

impl Command {
    /// Commands that run without a stored session.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Command::Register { .. }
                | Command::Login { .. }
                | Command::Logout
                | Command::ForgotPassword { .. }
                | Command::ResetPassword { .. }
        )
    }
}
