use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::{
    auth::claims::{Actor, Claims},
    config::JwtConfig,
    error::ApiError,
    state::AppState,
    users::model::User,
};

/// HS256 keys plus the lifetime of login-issued tokens.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: Duration::from_secs(cfg.ttl_minutes.max(0) as u64 * 60),
        }
    }

    /// Signs `{id, role}` for `user` with `iat`/`exp` set from the configured lifetime.
    pub fn sign(&self, user: &User) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc().unix_timestamp().max(0) as u64;
        let claims = Claims {
            id: user.id,
            role: user.role,
            iat: Some(now),
            exp: Some(now + self.ttl.as_secs()),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(user_id = user.id, role = ?user.role, "jwt signed");
        Ok(token)
    }

    /// Checks signature, and expiry when the token carries one.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = data.claims.id, role = ?data.claims.role, "jwt verified");
        Ok(data.claims)
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}

/// Extracts and validates the bearer token, yielding the caller's identity.
///
/// The role is trusted as issued; the store is not consulted.
pub struct AuthUser(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts.headers.get(AUTHORIZATION))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            ApiError::InvalidToken
        })?;

        Ok(AuthUser(claims.into()))
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
///
/// No header, or a scheme with nothing after it, is a missing token. A header
/// that is not visible ASCII or names another scheme is an invalid one.
fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, ApiError> {
    let header = header.ok_or(ApiError::MissingToken)?;
    let header = header.to_str().map_err(|_| {
        warn!("authorization header is not visible ASCII");
        ApiError::InvalidToken
    })?;

    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .map(|(s, t)| (s, t.trim()))
        .filter(|(_, t)| !t.is_empty())
        .ok_or(ApiError::MissingToken)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        warn!(scheme, "unsupported authorization scheme");
        return Err(ApiError::InvalidToken);
    }
    Ok(token)
}
