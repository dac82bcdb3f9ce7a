//! Category CRUD via the Task Master backend.

use super::client::{ApiClient, ApiRequest};
use super::error::ApiError;
use super::types::{Category, CategoryInput, IdRequest, Task};
use crate::store::CredentialStore;

/// GET /category/read: every category owned by the current user.
pub async fn list<S: CredentialStore>(client: &ApiClient<S>) -> Result<Vec<Category>, ApiError> {
    client.send_json(&ApiRequest::get("/category/read")).await
}

pub async fn get<S: CredentialStore>(client: &ApiClient<S>, id: i64) -> Result<Category, ApiError> {
    client
        .send_json(&ApiRequest::get(format!("/category/{}/", id)))
        .await
}

/// Tasks filed under one category.
pub async fn tasks<S: CredentialStore>(
    client: &ApiClient<S>,
    id: i64,
) -> Result<Vec<Task>, ApiError> {
    client
        .send_json(&ApiRequest::get(format!("/category/{}/tasks/", id)))
        .await
}

pub async fn create<S: CredentialStore>(
    client: &ApiClient<S>,
    name: &str,
    description: Option<&str>,
) -> Result<Category, ApiError> {
    let request = ApiRequest::post("/category/create").json(&CategoryInput {
        id: None,
        name,
        description,
    })?;
    client.send_json(&request).await
}

pub async fn edit<S: CredentialStore>(
    client: &ApiClient<S>,
    id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<Category, ApiError> {
    let request = ApiRequest::post("/category/edit").json(&CategoryInput {
        id: Some(id),
        name,
        description,
    })?;
    client.send_json(&request).await
}

/// Delete a category (and, server side, its tasks). Responds 204.
pub async fn delete<S: CredentialStore>(client: &ApiClient<S>, id: i64) -> Result<(), ApiError> {
    let request = ApiRequest::post("/category/delete").json(&IdRequest { id })?;
    client.send(&request).await?;
    Ok(())
}
