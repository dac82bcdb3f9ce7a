//! Handlers behind each `taskmaster` subcommand.
//!
//! These play the part of the web frontend's pages: they guard on session
//! state, run the form checks, call the API and print the result. When the
//! client reports that the session cannot be refreshed, the stored
//! credentials are cleared and the user is sent back to `login`.

use std::io::Write;

use thiserror::Error;

use crate::api::types::{Category, Task, TaskDraft};
use crate::api::{categories, tasks, user, ApiClient, ApiError};
use crate::cli::{CategoryCommand, Command, ProfileCommand, TaskCommand};
use crate::forms::{self, FormErrors};
use crate::store::{self, CredentialStore, StoreError};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}. Please log in again with `taskmaster login`.")]
    SessionExpired(ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Form(#[from] FormErrors),

    #[error("Not logged in. Run `taskmaster login` first.")]
    NotLoggedIn,

    #[error("Already logged in as {0}. Run `taskmaster logout` first.")]
    AlreadyLoggedIn(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CommandError {
    /// Message for the user, preferring the backend's own wording.
    pub fn user_message(&self) -> String {
        match self {
            CommandError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Run one command against the API, writing human-readable output to `out`.
pub async fn run<S: CredentialStore, W: Write>(
    client: &ApiClient<S>,
    command: Command,
    out: &mut W,
) -> Result<(), CommandError> {
    let logged_in = store::is_authenticated(client.store())?;

    if !command.is_public() && !logged_in {
        return Err(CommandError::NotLoggedIn);
    }
    if logged_in && matches!(command, Command::Login { .. } | Command::Register { .. }) {
        let name = store::load_user(client.store())?
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "another user".to_string());
        return Err(CommandError::AlreadyLoggedIn(name));
    }

    match dispatch(client, command, out).await {
        Err(CommandError::Api(e)) if e.is_session_error() => {
            log::warn!("Session ended: {}", e);
            store::clear_session(client.store())?;
            Err(CommandError::SessionExpired(e))
        }
        other => other,
    }
}

async fn dispatch<S: CredentialStore, W: Write>(
    client: &ApiClient<S>,
    command: Command,
    out: &mut W,
) -> Result<(), CommandError> {
    match command {
        Command::Register {
            name,
            email,
            password,
        } => {
            forms::check_register(&name, &email, &password)?;
            user::register(client, &name, &email, &password).await?;
            writeln!(out, "Registration successful! Please log in.")?;
        }
        Command::Login { email, password } => {
            forms::check_login(&email, &password)?;
            let profile = user::login(client, &email, &password).await?;
            writeln!(out, "Welcome, {}!", profile.display_name())?;
        }
        Command::Logout => {
            user::logout(client).await?;
            writeln!(out, "Logged out.")?;
        }
        Command::Whoami => match store::load_user(client.store())? {
            Some(profile) => {
                writeln!(out, "{}", profile.display_name())?;
                writeln!(out, "  email: {}", profile.email)?;
            }
            None => writeln!(out, "Logged in (no cached profile)")?,
        },
        Command::ForgotPassword { email } => {
            forms::check_forgot_password(&email)?;
            let message = user::forgot_password(client, &email).await?;
            writeln!(
                out,
                "{}",
                message.unwrap_or_else(|| "Password reset link sent.".to_string())
            )?;
        }
        Command::ResetPassword { token, password } => {
            forms::check_reset_password(&token, &password)?;
            user::reset_password(client, &token, &password).await?;
            writeln!(
                out,
                "Your password has been reset. You can now log in with your new password."
            )?;
        }
        Command::Profile(command) => profile(client, command, out).await?,
        Command::Category(command) => category(client, command, out).await?,
        Command::Task(command) => task(client, command, out).await?,
        Command::Search { term } => {
            let found = tasks::search(client, &term).await?;
            if found.is_empty() {
                writeln!(out, "No tasks match \"{}\".", term)?;
            }
            for task in &found {
                write_task_line(out, task)?;
            }
        }
    }
    Ok(())
}

async fn profile<S: CredentialStore, W: Write>(
    client: &ApiClient<S>,
    command: ProfileCommand,
    out: &mut W,
) -> Result<(), CommandError> {
    match command {
        ProfileCommand::Update { full_name, picture } => {
            forms::check_profile(&full_name)?;
            user::update_profile(client, &full_name, picture.as_deref()).await?;
            writeln!(out, "Profile updated successfully!")?;
        }
        ProfileCommand::ChangePassword { current, new } => {
            forms::check_change_password(&current, &new)?;
            user::change_password(client, &current, &new).await?;
            writeln!(out, "Password changed successfully!")?;
        }
    }
    Ok(())
}

async fn category<S: CredentialStore, W: Write>(
    client: &ApiClient<S>,
    command: CategoryCommand,
    out: &mut W,
) -> Result<(), CommandError> {
    match command {
        CategoryCommand::List => {
            let list = categories::list(client).await?;
            if list.is_empty() {
                writeln!(out, "No categories yet.")?;
            }
            for category in &list {
                write_category_line(out, category)?;
            }
        }
        CategoryCommand::Show { id } => {
            let category = categories::get(client, id).await?;
            write_category_line(out, &category)?;
        }
        CategoryCommand::Tasks { id } => {
            let filed = categories::tasks(client, id).await?;
            if filed.is_empty() {
                writeln!(out, "No tasks in this category.")?;
            }
            for task in &filed {
                write_task_line(out, task)?;
            }
        }
        CategoryCommand::Create { name, description } => {
            forms::check_category(&name)?;
            let created = categories::create(client, &name, description.as_deref()).await?;
            writeln!(out, "Category added successfully! (#{})", created.id)?;
        }
        CategoryCommand::Edit {
            id,
            name,
            description,
        } => {
            let current = categories::get(client, id).await?;
            let name = name.unwrap_or(current.name);
            let description = description.or(current.description);
            forms::check_category(&name)?;
            categories::edit(client, id, &name, description.as_deref()).await?;
            writeln!(out, "Category updated successfully!")?;
        }
        CategoryCommand::Delete { id } => {
            categories::delete(client, id).await?;
            writeln!(out, "Category deleted.")?;
        }
    }
    Ok(())
}

async fn task<S: CredentialStore, W: Write>(
    client: &ApiClient<S>,
    command: TaskCommand,
    out: &mut W,
) -> Result<(), CommandError> {
    match command {
        TaskCommand::Show { id } => {
            let task = tasks::get(client, id).await?;
            write_task_detail(out, &task)?;
        }
        TaskCommand::Create {
            title,
            category,
            description,
            due_date,
            priority,
            status,
        } => {
            let category = forms::check_task(&title, category)?;
            let draft = TaskDraft {
                title,
                description,
                due_date,
                priority,
                status,
                category,
            };
            let created = tasks::create(client, &draft).await?;
            writeln!(out, "Task added successfully! (#{})", created.id)?;
        }
        TaskCommand::Edit {
            id,
            title,
            category,
            description,
            due_date,
            priority,
            status,
        } => {
            let current = tasks::get(client, id).await?;
            let mut draft = TaskDraft::from_task(&current);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(category) = category {
                draft.category = category;
            }
            if description.is_some() {
                draft.description = description;
            }
            if due_date.is_some() {
                draft.due_date = due_date;
            }
            if let Some(priority) = priority {
                draft.priority = priority;
            }
            if let Some(status) = status {
                draft.status = status;
            }
            forms::check_task(&draft.title, Some(draft.category))?;
            tasks::edit(client, id, &draft).await?;
            writeln!(out, "Task updated successfully!")?;
        }
        TaskCommand::Delete { id } => {
            tasks::delete(client, id).await?;
            writeln!(out, "Task deleted.")?;
        }
    }
    Ok(())
}

fn write_category_line<W: Write>(out: &mut W, category: &Category) -> std::io::Result<()> {
    match category.description.as_deref() {
        Some(description) if !description.is_empty() => {
            writeln!(out, "#{:<4} {}  {}", category.id, category.name, description)
        }
        _ => writeln!(out, "#{:<4} {}", category.id, category.name),
    }
}

fn write_task_line<W: Write>(out: &mut W, task: &Task) -> std::io::Result<()> {
    writeln!(
        out,
        "#{:<4} [{}] {} ({} priority{})",
        task.id,
        task.status.as_str(),
        task.title,
        task.priority.as_str(),
        task.due_date
            .as_deref()
            .map(|d| format!(", due {}", d))
            .unwrap_or_default()
    )
}

fn write_task_detail<W: Write>(out: &mut W, task: &Task) -> std::io::Result<()> {
    writeln!(out, "#{} {}", task.id, task.title)?;
    writeln!(out, "  status:   {}", task.status.as_str())?;
    writeln!(out, "  priority: {}", task.priority.as_str())?;
    writeln!(out, "  category: #{}", task.category)?;
    if let Some(ref due) = task.due_date {
        writeln!(out, "  due:      {}", due)?;
    }
    if let Some(ref description) = task.description {
        writeln!(out, "  {}", description)?;
    }
    Ok(())
}
