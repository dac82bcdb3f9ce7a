//! Account operations: registration, login, logout and profile changes.
//!
//! Registration, login and the password reset pair run before a session
//! exists and go through `send_public`. Login and logout also maintain the
//! session slots in the credential store.

use super::client::{ApiClient, ApiRequest};
use super::error::ApiError;
use super::types::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, LogoutRequest,
    MessageResponse, RegisterRequest, ResetPasswordRequest, UpdateProfileRequest, UserProfile,
};
use crate::store::{self, CredentialKey, CredentialStore};

/// Create an account via POST /user/create. Does not log in.
pub async fn register<S: CredentialStore>(
    client: &ApiClient<S>,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<UserProfile, ApiError> {
    let request = ApiRequest::post("/user/create").json(&RegisterRequest {
        full_name,
        email,
        password,
    })?;
    client.send_public_json(&request).await
}

/// Log in via POST /user/login and store the tokens and user profile.
pub async fn login<S: CredentialStore>(
    client: &ApiClient<S>,
    email: &str,
    password: &str,
) -> Result<UserProfile, ApiError> {
    let request = ApiRequest::post("/user/login").json(&LoginRequest { email, password })?;
    let resp: LoginResponse = client.send_public_json(&request).await?;

    store::save_session(client.store(), &resp.tokens, &resp.user)?;

    let user: UserProfile = serde_json::from_value(resp.user)?;
    log::info!("Logged in as {}", user.email);
    Ok(user)
}

/// Invalidate the refresh token on the server, then clear local credentials.
///
/// The server call is best effort: local credentials are cleared even when it fails.
pub async fn logout<S: CredentialStore>(client: &ApiClient<S>) -> Result<(), ApiError> {
    if let Some(refresh_token) = client.store().get(CredentialKey::RefreshToken)? {
        let request = ApiRequest::post("/user/logout").json(&LogoutRequest {
            refresh_token: &refresh_token,
        })?;
        if let Err(e) = client.send(&request).await {
            log::warn!("Logout request failed (will continue local cleanup): {}", e);
        }
    }

    store::clear_session(client.store())?;
    log::info!("Logout complete");
    Ok(())
}

/// Ask the backend to email a password reset link.
pub async fn forgot_password<S: CredentialStore>(
    client: &ApiClient<S>,
    email: &str,
) -> Result<Option<String>, ApiError> {
    let request = ApiRequest::post("/user/forgot-password").json(&ForgotPasswordRequest { email })?;
    let resp: MessageResponse = client.send_public_json(&request).await?;
    Ok(resp.message)
}

/// Set a new password using the token from the reset email.
pub async fn reset_password<S: CredentialStore>(
    client: &ApiClient<S>,
    token: &str,
    new_password: &str,
) -> Result<Option<String>, ApiError> {
    let request = ApiRequest::post("/user/reset-password").json(&ResetPasswordRequest {
        token,
        new_password,
    })?;
    let resp: MessageResponse = client.send_public_json(&request).await?;
    Ok(resp.message)
}

/// Update the profile on the server and mirror the new name in the cached profile.
pub async fn update_profile<S: CredentialStore>(
    client: &ApiClient<S>,
    full_name: &str,
    profile_picture: Option<&str>,
) -> Result<UserProfile, ApiError> {
    let request = ApiRequest::post("/user/profile/update-info").json(&UpdateProfileRequest {
        full_name,
        profile_picture,
    })?;
    let user: UserProfile = client.send_json(&request).await?;

    store::update_cached_user(client.store(), full_name)?;
    Ok(user)
}

pub async fn change_password<S: CredentialStore>(
    client: &ApiClient<S>,
    current_password: &str,
    new_password: &str,
) -> Result<Option<String>, ApiError> {
    let request =
        ApiRequest::post("/user/profile/change-password").json(&ChangePasswordRequest {
            current_password,
            new_password,
        })?;
    let resp: MessageResponse = client.send_json(&request).await?;
    Ok(resp.message)
}
