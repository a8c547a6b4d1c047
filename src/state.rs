use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    auth::jwt::JwtKeys,
    config::AppConfig,
    users::{
        memory::MemoryUserStore,
        repo::{PgUserStore, UserStore},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
    pub jwt: JwtKeys,
}

impl AppState {
    /// Connects to Postgres and applies the embedded migrations.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = connect(&config.database_url).await?;
        Ok(Self::from_parts(Arc::new(PgUserStore::new(db)), Arc::new(config)))
    }

    pub fn from_parts(store: Arc<dyn UserStore>, config: Arc<AppConfig>) -> Self {
        let jwt = JwtKeys::from_config(&config.jwt);
        Self { store, config, jwt }
    }

    /// State backed by an empty in-memory store.
    pub fn in_memory(config: AppConfig) -> Self {
        Self::from_parts(Arc::new(MemoryUserStore::new()), Arc::new(config))
    }
}

pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("connect to database")?;

    if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }

    Ok(db)
}
