//! Request and response types for the Task Master backend API.
//!
//! Field names follow the backend's JSON exactly. Most of it is snake_case,
//! the token endpoints and password change use camelCase.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Refresh request body sent to POST /auth/refresh-token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Refresh response from POST /auth/refresh-token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Login request body sent to POST /user/login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Access and refresh token pair issued at login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

/// Login response from POST /user/login.
///
/// `user` stays raw JSON so it can be cached without losing fields.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub tokens: AuthTokens,
    pub user: Value,
}

/// Registration body sent to POST /user/create.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LogoutRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordRequest<'a> {
    pub token: &'a str,
    pub new_password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileRequest<'a> {
    pub full_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<&'a str>,
}

/// `{"message": ...}` bodies returned by the password and logout endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Cached user profile. Only the fields the client displays are typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UserProfile {
    /// Full name when set, otherwise the email address.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<UserProfile>,
}

/// Body for POST /category/create and /category/edit.
#[derive(Debug, Serialize)]
pub struct CategoryInput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

/// `{"id": ...}` body for the delete endpoints.
#[derive(Debug, Serialize)]
pub struct IdRequest {
    pub id: i64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    #[value(name = "inprogress")]
    InProgress,
    Completed,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Completed => "completed",
        }
    }
}

/// A task as returned by list, search and detail endpoints.
///
/// The detail endpoint names the category `category_id`, the others `category`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(alias = "category_id")]
    pub category: i64,
    #[serde(default)]
    pub author: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Editable task fields, shared by create and edit.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    /// `YYYY-MM-DD`, checked by the backend.
    pub due_date: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    pub category: i64,
}

impl TaskDraft {
    /// Start an edit from the task's current values.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date.clone(),
            priority: task.priority,
            status: task.status,
            category: task.category,
        }
    }
}

/// Body for POST /task/edit: the draft plus the task id.
#[derive(Debug, Serialize)]
pub struct TaskEditRequest<'a> {
    pub id: i64,
    #[serde(flatten)]
    pub draft: &'a TaskDraft,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_detail_uses_category_id() {
        let task: Task = serde_json::from_value(json!({
            "id": 3,
            "title": "Write report",
            "description": null,
            "due_date": "2024-05-01",
            "priority": "high",
            "status": "inprogress",
            "category_id": 9,
            "created_at": "2024-04-01T10:00:00Z",
            "updated_at": "2024-04-02T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(task.category, 9);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert!(task.author.is_none());
    }

    #[test]
    fn test_task_list_item_uses_category() {
        let task: Task = serde_json::from_value(json!({
            "id": 4,
            "title": "Buy milk",
            "priority": "low",
            "category": 2,
            "author": 1
        }))
        .unwrap();

        assert_eq!(task.category, 2);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.author, Some(1));
    }

    #[test]
    fn test_task_edit_request_is_flat() {
        let draft = TaskDraft {
            title: "Buy milk".to_string(),
            description: None,
            due_date: Some("2024-05-01".to_string()),
            priority: Priority::Medium,
            status: TaskStatus::Completed,
            category: 2,
        };
        let body = serde_json::to_value(TaskEditRequest { id: 4, draft: &draft }).unwrap();

        assert_eq!(
            body,
            json!({
                "id": 4,
                "title": "Buy milk",
                "description": null,
                "due_date": "2024-05-01",
                "priority": "medium",
                "status": "completed",
                "category": 2
            })
        );
    }

    #[test]
    fn test_camel_case_token_bodies() {
        let body = serde_json::to_value(RefreshRequest { refresh_token: "R1" }).unwrap();
        assert_eq!(body, json!({"refreshToken": "R1"}));

        let body = serde_json::to_value(ChangePasswordRequest {
            current_password: "old",
            new_password: "new",
        })
        .unwrap();
        assert_eq!(body, json!({"currentPassword": "old", "newPassword": "new"}));
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut user = UserProfile {
            email: "ada@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "ada@example.com");

        user.full_name = Some("Ada".to_string());
        assert_eq!(user.display_name(), "Ada");
    }
}
