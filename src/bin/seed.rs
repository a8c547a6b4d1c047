use userhub::{config::AppConfig, logging, seed::seed_admin, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = AppConfig::from_env()?;
    let admin_seed = config.admin.clone();
    let state = AppState::init(config).await?;

    let admin = seed_admin(state.store.as_ref(), &admin_seed).await?;
    tracing::info!(email = %admin.email, "admin ready");
    Ok(())
}
