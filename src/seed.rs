use anyhow::Context;
use tracing::info;

use crate::{
    auth::{password::hash_password_blocking, validation::parse_date_of_birth},
    config::AdminSeed,
    users::{
        model::{NewUser, Role, User},
        repo::UserStore,
    },
};

/// Creates the administrator account if no user owns `seed.email`.
/// An existing account with that email is returned unchanged.
pub async fn seed_admin(store: &dyn UserStore, seed: &AdminSeed) -> anyhow::Result<User> {
    let date_of_birth = parse_date_of_birth(&seed.date_of_birth)
        .map_err(|e| anyhow::anyhow!("ADMIN_DATE_OF_BIRTH: {e}"))?;
    let password_hash = hash_password_blocking(seed.password.clone()).await?;

    let admin = store
        .upsert_by_email(NewUser {
            full_name: seed.full_name.clone(),
            date_of_birth,
            email: seed.email.clone(),
            password_hash,
            role: Role::Admin,
        })
        .await
        .context("upsert admin")?;

    info!(user_id = admin.id, email = %admin.email, role = ?admin.role, "admin seeded");
    Ok(admin)
}
