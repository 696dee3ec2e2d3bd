//! Startup bootstrap for the master administrator profile.
//!
//! A fresh deployment has an empty administrators table and no way to log
//! in. When the table is empty and `MASTER_USERNAME` / `MASTER_PASSWORD`
//! are set, a master profile is created with every permission flag granted.
//! The check runs on every startup but is a no-op once any administrator
//! exists, so the master credentials can be removed from the environment
//! after first boot.

use timebank_core::permissions::Permissions;
use timebank_db::models::admin::CreateAdmin;
use timebank_db::repositories::AdminRepo;
use timebank_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Badge recorded on the seeded master profile. Not a real collaborator
/// badge; administrators are not registry entries.
const MASTER_BADGE: &str = "000000";

/// Seed the master administrator from `MASTER_USERNAME` / `MASTER_PASSWORD`
/// if the administrators table is empty.
///
/// Returns `true` when a master profile was created on this run.
pub async fn seed_master_admin_from_env(pool: &DbPool) -> AppResult<bool> {
    let (Ok(username), Ok(password)) = (
        std::env::var("MASTER_USERNAME"),
        std::env::var("MASTER_PASSWORD"),
    ) else {
        if AdminRepo::count(pool).await? == 0 {
            tracing::warn!(
                "Administrators table is empty and MASTER_USERNAME/MASTER_PASSWORD are not set; \
                 no one will be able to log in"
            );
        }
        return Ok(false);
    };

    seed_master_admin(pool, &username, &password).await
}

/// Seed the master administrator with the given credentials if the
/// administrators table is empty. No-op (returns `false`) otherwise.
pub async fn seed_master_admin(
    pool: &DbPool,
    username: &str,
    password: &str,
) -> AppResult<bool> {
    let count = AdminRepo::count(pool).await?;
    if count > 0 {
        return Ok(false);
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateAdmin {
        username: username.to_string(),
        password_hash,
        name: "Master Profile".to_string(),
        badge: MASTER_BADGE.to_string(),
        permissions: Permissions::all(),
    };
    let admin = AdminRepo::create(pool, &input).await?;

    tracing::info!(username = %admin.username, "Master administrator seeded");

    Ok(true)
}
