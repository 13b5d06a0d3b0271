use sqlx::PgPool;
use tracing::{debug, info};

use crate::{
    auth::password::hash_password,
    config::AppConfig,
    users::repo::{Role, User},
};

/// Creates the initial admin account at startup when ADMIN_EMAIL and
/// ADMIN_PASSWORD are configured and no active admin exists yet.
pub async fn ensure_admin(db: &PgPool, config: &AppConfig) -> anyhow::Result<()> {
    let Some(admin) = &config.admin else {
        debug!("no admin credentials configured; skipping bootstrap");
        return Ok(());
    };

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE role = 'admin' AND active)")
            .fetch_one(db)
            .await?;
    if exists {
        return Ok(());
    }

    let email = admin.email.trim().to_lowercase();
    let hash = hash_password(&admin.password)?;
    let user = User::create(db, "System", "Administrator", &email, &hash, Role::Admin).await?;
    info!(user_id = %user.id, "bootstrap admin created");
    Ok(())
}
