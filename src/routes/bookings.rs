// Handlers for the booking workflow

use axum::{
    extract::State,
    response::Json,
};

use crate::{
    auth_middleware::AuthenticatedUser,
    extract::{AppJson, AppPath},
    error::AppResult,
    models::{ApiResponse, Booking, CreativeDecision, MediaUpload, NewBooking, StatusUpdate},
    AppState,
};

pub async fn create_booking(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(request): AppJson<NewBooking>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    user.require_advertiser()?;
    user.require_self(&request.advertiser_id)?;
    // The billboard must still be listed.
    app_state.billboards.get_by_id(&request.billboard_id).await?;

    let booking = app_state.bookings.create(request).await?;
    Ok(Json(ApiResponse::with_message(booking, "Booking created successfully")))
}

pub async fn advertiser_bookings(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(advertiser_id): AppPath<String>,
) -> AppResult<Json<ApiResponse<Vec<Booking>>>> {
    tracing::info!("API call: advertiser_bookings for advertiser: {}", advertiser_id);
    let bookings = app_state.bookings.for_advertiser(&advertiser_id).await;
    Ok(Json(ApiResponse::ok(bookings)))
}

pub async fn billboard_bookings(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(billboard_id): AppPath<String>,
) -> AppResult<Json<ApiResponse<Vec<Booking>>>> {
    tracing::info!("API call: billboard_bookings for billboard: {}", billboard_id);
    let bookings = app_state.bookings.for_billboard(&billboard_id).await;
    Ok(Json(ApiResponse::ok(bookings)))
}

pub async fn update_status(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<String>,
    AppJson(update): AppJson<StatusUpdate>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    ensure_billboard_owner(&app_state, &user, &id).await?;
    let booking = app_state.bookings.update_status(&id, update.status).await?;
    let message = format!("Booking {} successfully", booking.status.as_str());
    Ok(Json(ApiResponse::with_message(booking, message)))
}

pub async fn upload_creative(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<String>,
    AppJson(upload): AppJson<MediaUpload>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    user.require_advertiser()?;
    let existing = app_state.bookings.get(&id).await?;
    user.require_self(&existing.advertiser_id)?;

    let booking = app_state.bookings.upload_creative(&id, upload.url).await?;
    Ok(Json(ApiResponse::with_message(booking, "Creative uploaded successfully")))
}

pub async fn approve_creative(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<String>,
    AppJson(decision): AppJson<CreativeDecision>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    ensure_billboard_owner(&app_state, &user, &id).await?;
    let booking = app_state.bookings.approve_creative(&id, decision.approved).await?;
    let message = if decision.approved { "Creative approved" } else { "Creative rejected" };
    Ok(Json(ApiResponse::with_message(booking, message)))
}

pub async fn upload_proof(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppPath(id): AppPath<String>,
    AppJson(upload): AppJson<MediaUpload>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    ensure_billboard_owner(&app_state, &user, &id).await?;
    let booking = app_state.bookings.upload_proof(&id, upload.url).await?;
    Ok(Json(ApiResponse::with_message(booking, "Proof uploaded successfully")))
}

// Owner-side decisions belong to whoever owns the booked billboard.
async fn ensure_billboard_owner(app_state: &AppState, user: &AuthenticatedUser, booking_id: &str) -> AppResult<()> {
    user.require_owner()?;
    let booking = app_state.bookings.get(booking_id).await?;
    let billboard = app_state.billboards.get_by_id(&booking.billboard_id).await?;
    user.require_self(&billboard.owner_id)
}
