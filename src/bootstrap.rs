use sqlx::PgPool;

use crate::auth::password;
use crate::config::AdminSeed;
use crate::db;
use crate::validation::normalize_email;

pub const ADMIN_ROLE: &str = "admin";

/// Makes sure the configured administrator exists, is verified and active,
/// and holds the admin role. An existing account keeps its password.
pub async fn ensure_admin(pool: &PgPool, seed: &AdminSeed) -> Result<(), String> {
    let email = normalize_email(&seed.email);

    let user = match db::users::find_by_email(pool, &email)
        .await
        .map_err(|e| format!("Failed to look up admin: {e}"))?
    {
        Some(user) => user,
        None => {
            let pw_hash = password::hash(&seed.password)?;
            let user = db::users::create(pool, &email, &pw_hash, None)
                .await
                .map_err(|e| format!("Failed to create admin: {e}"))?;
            tracing::info!(user_id = %user.id, "admin account created");
            user
        }
    };

    db::users::mark_verified(pool, user.id)
        .await
        .map_err(|e| format!("Failed to verify admin: {e}"))?;
    db::users::set_active(pool, user.id, true)
        .await
        .map_err(|e| format!("Failed to activate admin: {e}"))?;

    let role = db::roles::ensure(pool, ADMIN_ROLE)
        .await
        .map_err(|e| format!("Failed to ensure admin role: {e}"))?;
    db::roles::assign_to_user(pool, user.id, role.id)
        .await
        .map_err(|e| format!("Failed to assign admin role: {e}"))?;

    Ok(())
}
