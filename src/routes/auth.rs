// Handlers for login, registration, logout and profile edits

use axum::{
    extract::State,
    response::Json,
};

use crate::{
    auth_middleware::AuthenticatedUser,
    extract::{AppJson, AppPath},
    error::{AppError, AppResult},
    models::{ApiResponse, AuthSession, LoginRequest, RegisterRequest, User, UserPatch},
    AppState,
};

pub async fn login(
    State(app_state): State<AppState>,
    AppJson(form): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthSession>>> {
    tracing::info!("Login attempt for {}", form.email);
    let session = app_state.auth.login(&form.email, &form.password).await?;
    Ok(Json(ApiResponse::with_message(session, "Login successful")))
}

pub async fn register(
    State(app_state): State<AppState>,
    AppJson(form): AppJson<RegisterRequest>,
) -> AppResult<Json<ApiResponse<AuthSession>>> {
    tracing::info!("Registration attempt for {}", form.email);
    let session = app_state.auth.register(form).await?;
    Ok(Json(ApiResponse::with_message(session, "Registration successful")))
}

pub async fn logout(State(app_state): State<AppState>) -> AppResult<Json<ApiResponse<()>>> {
    app_state.auth.logout().await?;
    Ok(Json(ApiResponse::done("Logged out")))
}

/// The user restored from the session store, if any. The store is one file
/// shared by the whole process, so this answers with whoever signed in
/// last regardless of the caller. No bearer token is checked.
pub async fn current_user(State(app_state): State<AppState>) -> AppResult<Json<ApiResponse<User>>> {
    match app_state.auth.current_user().await {
        Some(user) => Ok(Json(ApiResponse::ok(user))),
        None => Err(AppError::NotFound("No active session".into())),
    }
}

pub async fn update_profile(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<String>,
    AppJson(patch): AppJson<UserPatch>,
) -> AppResult<Json<ApiResponse<User>>> {
    user.require_self(&id)?;
    let updated = app_state.auth.update_profile(&id, patch).await?;
    Ok(Json(ApiResponse::with_message(updated, "Profile updated successfully")))
}
