//! Restaurant API Handlers

use axum::extract::{Path, State};
use http::StatusCode;
use shared::error::{ApiResponse, AppResult};
use shared::models::RestaurantProfile;

use crate::api::request::RestaurantForm;
use crate::auth::{AdminContext, OwnerContext};
use crate::core::ServerState;

/// POST /api/restaurants - register a restaurant for the calling owner
pub async fn create(
    State(state): State<ServerState>,
    owner: OwnerContext,
    RestaurantForm(request): RestaurantForm,
) -> AppResult<ApiResponse<RestaurantProfile>> {
    let saved = state.mutations.create_restaurant(&owner, request).await?;
    Ok(ApiResponse::success_with_status(
        StatusCode::CREATED,
        "Restaurant created successfully",
        saved,
    ))
}

/// PATCH /api/restaurants/me - owner updates their own restaurant
pub async fn update_own(
    State(state): State<ServerState>,
    owner: OwnerContext,
    RestaurantForm(request): RestaurantForm,
) -> AppResult<ApiResponse<RestaurantProfile>> {
    let saved = state.mutations.update_own_restaurant(&owner, request).await?;
    Ok(ApiResponse::success_with_message(
        "Restaurant updated successfully",
        saved,
    ))
}

/// PATCH /api/admin/restaurants/:id - administrator updates any restaurant
pub async fn update_as_admin(
    State(state): State<ServerState>,
    admin: AdminContext,
    Path(id): Path<String>,
    RestaurantForm(request): RestaurantForm,
) -> AppResult<ApiResponse<RestaurantProfile>> {
    let saved = state
        .mutations
        .update_restaurant_as_admin(&admin, &id, request)
        .await?;
    Ok(ApiResponse::success_with_message(
        "Restaurant updated successfully",
        saved,
    ))
}

/// DELETE /api/admin/restaurants/:id - administrator removes a restaurant
pub async fn delete(
    State(state): State<ServerState>,
    admin: AdminContext,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<RestaurantProfile>> {
    let removed = state.mutations.delete_restaurant(&admin, &id).await?;
    Ok(ApiResponse::success_with_message(
        "Restaurant deleted successfully",
        removed,
    ))
}
