use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::users::repo::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Every failure a handler can return. The `Display` text is the client-facing message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    MissingField(&'static str),
    #[error("invalid email format")]
    InvalidEmailFormat,
    #[error("password must be 8-16 characters long and contain a special character")]
    WeakPassword,
    #[error("invalid date of birth")]
    InvalidDateOfBirth,
    #[error("invalid id")]
    InvalidId,
    #[error("invalid JSON body")]
    MalformedBody,
    #[error("token not provided")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account deactivated")]
    AccountDeactivated,
    #[error("access denied")]
    Forbidden,
    #[error("user not found")]
    NotFound,
    #[error("email already exists")]
    Conflict,
    #[error("server error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_)
            | ApiError::InvalidEmailFormat
            | ApiError::WeakPassword
            | ApiError::InvalidDateOfBirth
            | ApiError::InvalidId
            | ApiError::MalformedBody => StatusCode::BAD_REQUEST,
            ApiError::MissingToken | ApiError::InvalidToken | ApiError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::AccountDeactivated | ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(cause) = &self {
            error!(error = ?cause, "request failed");
        }
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict => ApiError::Conflict,
            StoreError::Other(cause) => ApiError::Internal(cause),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection, "rejected request body");
        ApiError::MalformedBody
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn store_conflict_maps_to_409() {
        let (status, body) = body_of(StoreError::Conflict.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "email already exists");
    }

    #[tokio::test]
    async fn internal_error_hides_cause() {
        let err: ApiError = StoreError::Other(anyhow::anyhow!("connection refused on 5432")).into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "server error" }));
    }

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(ApiError::MissingField("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::WeakPassword.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::AccountDeactivated.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }
}
