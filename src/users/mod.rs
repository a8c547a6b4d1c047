use crate::state::AppState;
use axum::Router;

pub mod handlers;
pub mod memory;
pub mod model;
pub mod policy;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::users_routes()
}
