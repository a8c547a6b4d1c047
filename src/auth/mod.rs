use crate::state::AppState;
use axum::Router;

pub mod claims;
mod dto;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod validation;

pub use dto::{LoginRequest, LoginResponse, RegisterRequest};

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
