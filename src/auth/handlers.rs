use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, RegisterRequest},
        jwt::JwtKeys,
        password::{hash_password_blocking, verify_password_blocking},
        validation::{check_email, check_password, parse_date_of_birth, present},
    },
    error::{ApiError, ApiResult},
    state::AppState,
    users::model::{NewUser, PublicUser, Role},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    let Json(payload) = payload?;

    let (Some(full_name), Some(date_of_birth), Some(email), Some(password)) = (
        present(&payload.full_name),
        present(&payload.date_of_birth),
        present(&payload.email),
        present(&payload.password),
    ) else {
        warn!("registration with missing fields");
        return Err(ApiError::MissingField("all fields are required"));
    };

    check_email(email)?;
    check_password(password)?;
    let date_of_birth = parse_date_of_birth(date_of_birth)?;

    let password_hash = hash_password_blocking(password.to_owned()).await?;

    // Duplicate emails surface as StoreError::Conflict from the unique index.
    let user = state
        .store
        .create(NewUser {
            full_name: full_name.to_owned(),
            date_of_birth,
            email: email.to_owned(),
            password_hash,
            role: Role::User,
        })
        .await
        .inspect_err(|e| warn!(error = %e, "create user failed"))?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(payload) = payload?;

    let (Some(email), Some(password)) = (present(&payload.email), present(&payload.password))
    else {
        return Err(ApiError::MissingField("email and password are required"));
    };

    let Some(user) = state.store.find_by_email(email).await? else {
        warn!(email, "login unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password_blocking(password.to_owned(), user.password.clone()).await? {
        warn!(email, user_id = user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    if !user.is_active {
        warn!(user_id = user.id, "login to deactivated account");
        return Err(ApiError::AccountDeactivated);
    }

    let token = JwtKeys::from_ref(&state).sign(&user)?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        user: user.into(),
        token,
    }))
}
