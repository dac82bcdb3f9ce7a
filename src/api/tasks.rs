//! Task CRUD and search via the Task Master backend.

use super::client::{ApiClient, ApiRequest};
use super::error::ApiError;
use super::types::{IdRequest, Task, TaskDraft, TaskEditRequest};
use crate::store::CredentialStore;

pub async fn get<S: CredentialStore>(client: &ApiClient<S>, id: i64) -> Result<Task, ApiError> {
    client.send_json(&ApiRequest::get(format!("/task/{}", id))).await
}

pub async fn create<S: CredentialStore>(
    client: &ApiClient<S>,
    draft: &TaskDraft,
) -> Result<Task, ApiError> {
    let request = ApiRequest::post("/task/create").json(draft)?;
    client.send_json(&request).await
}

pub async fn edit<S: CredentialStore>(
    client: &ApiClient<S>,
    id: i64,
    draft: &TaskDraft,
) -> Result<Task, ApiError> {
    let request = ApiRequest::post("/task/edit").json(&TaskEditRequest { id, draft })?;
    client.send_json(&request).await
}

pub async fn delete<S: CredentialStore>(client: &ApiClient<S>, id: i64) -> Result<(), ApiError> {
    let request = ApiRequest::post("/task/delete").json(&IdRequest { id })?;
    client.send(&request).await?;
    Ok(())
}

/// Search the current user's tasks by title.
///
/// GET /tasks/search/{term}/ with the term percent-encoded.
pub async fn search<S: CredentialStore>(
    client: &ApiClient<S>,
    term: &str,
) -> Result<Vec<Task>, ApiError> {
    let path = format!("/tasks/search/{}/", urlencoding::encode(term));
    client.send_json(&ApiRequest::get(path)).await
}
