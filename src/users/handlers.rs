use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::jwt::AuthUser,
    error::{ApiError, ApiResult},
    state::AppState,
    users::{model::PublicUser, policy},
};

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user))
        .route("/users/:id/block", patch(block_user))
}

/// Path ids are taken as raw strings so a non-integer becomes our own 400.
fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| ApiError::InvalidId)
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> ApiResult<Json<Vec<PublicUser>>> {
    if !policy::can_list(actor.role) {
        warn!(actor_id = actor.id, "list users denied");
        return Err(ApiError::Forbidden);
    }

    let users = state.store.find_all().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<PublicUser>> {
    let id = parse_id(&raw_id)?;

    if !actor.can_access(id) {
        warn!(actor_id = actor.id, target_id = id, "get user denied");
        return Err(ApiError::Forbidden);
    }

    let user = state.store.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn block_user(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<PublicUser>> {
    let id = parse_id(&raw_id)?;

    if !actor.can_access(id) {
        warn!(actor_id = actor.id, target_id = id, "block user denied");
        return Err(ApiError::Forbidden);
    }

    let user = state.store.deactivate(id).await?.ok_or(ApiError::NotFound)?;

    info!(actor_id = actor.id, user_id = user.id, "user blocked");
    Ok(Json(user.into()))
}
