pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod seed;
pub mod state;
pub mod users;
