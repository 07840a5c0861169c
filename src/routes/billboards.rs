// Handlers for catalog search, detail views and owner listing management

use axum::{
    body::Bytes,
    extract::State,
    response::Json,
};

use crate::{
    auth_middleware::AuthenticatedUser,
    extract::{AppJson, AppPath},
    error::{AppError, AppResult},
    models::{ApiResponse, Billboard, BillboardFilter, BillboardPatch, NewBillboard, OwnerStats},
    AppState,
};

// An empty body searches with no constraints.
pub async fn search_billboards(
    State(app_state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<ApiResponse<Vec<Billboard>>>> {
    let filter: Option<BillboardFilter> = if body.is_empty() {
        None
    } else {
        let parsed = serde_json::from_slice(&body)
            .map_err(|e| AppError::Validation(format!("Invalid search filter: {}", e)))?;
        Some(parsed)
    };
    tracing::info!("API call: search_billboards with filter: {:?}", filter);
    let results = app_state.billboards.search(filter.as_ref()).await;
    tracing::info!("Search returned {} billboards", results.len());
    Ok(Json(ApiResponse::ok(results)))
}

// Opening the detail screen counts as a view.
pub async fn view_billboard(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> AppResult<Json<ApiResponse<Billboard>>> {
    tracing::info!("API call: view_billboard {}", id);
    let billboard = app_state.billboards.record_view(&id).await?;
    Ok(Json(ApiResponse::ok(billboard)))
}

pub async fn owner_billboards(
    State(app_state): State<AppState>,
    AppPath(owner_id): AppPath<String>,
) -> AppResult<Json<ApiResponse<Vec<Billboard>>>> {
    tracing::info!("API call: owner_billboards for owner: {}", owner_id);
    let billboards = app_state.billboards.get_by_owner(&owner_id).await;
    Ok(Json(ApiResponse::ok(billboards)))
}

pub async fn owner_stats(
    State(app_state): State<AppState>,
    AppPath(owner_id): AppPath<String>,
) -> AppResult<Json<ApiResponse<OwnerStats>>> {
    let stats = app_state.billboards.owner_stats(&owner_id).await;
    Ok(Json(ApiResponse::ok(stats)))
}

pub async fn create_billboard(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(fields): AppJson<NewBillboard>,
) -> AppResult<Json<ApiResponse<Billboard>>> {
    user.require_owner()?;
    user.require_self(&fields.owner_id)?;
    let billboard = app_state.billboards.create(fields).await?;
    Ok(Json(ApiResponse::with_message(billboard, "Billboard created successfully")))
}

pub async fn update_billboard(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<String>,
    AppJson(patch): AppJson<BillboardPatch>,
) -> AppResult<Json<ApiResponse<Billboard>>> {
    ensure_listing_owner(&app_state, &user, &id).await?;
    let billboard = app_state.billboards.update(&id, patch).await?;
    Ok(Json(ApiResponse::with_message(billboard, "Billboard updated successfully")))
}

pub async fn delete_billboard(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    ensure_listing_owner(&app_state, &user, &id).await?;
    app_state.billboards.delete(&id).await?;
    Ok(Json(ApiResponse::done("Billboard deleted successfully")))
}

async fn ensure_listing_owner(app_state: &AppState, user: &AuthenticatedUser, id: &str) -> AppResult<()> {
    user.require_owner()?;
    let existing = app_state.billboards.get_by_id(id).await?;
    user.require_self(&existing.owner_id)
}
