use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Permission, Role, RoleWithPermissions};

/// Returns the role named `name`, creating it when missing.
pub async fn ensure<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    name: &str,
) -> Result<Role, sqlx::Error> {
    sqlx::query_as::<_, Role>(
        "INSERT INTO roles (id, name) VALUES ($1, $2)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(name)
    .fetch_one(executor)
    .await
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    name: &str,
) -> Result<Role, sqlx::Error> {
    sqlx::query_as::<_, Role>("INSERT INTO roles (id, name) VALUES ($1, $2) RETURNING *")
        .bind(Uuid::now_v7())
        .bind(name)
        .fetch_one(executor)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Role>, sqlx::Error> {
    sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
    sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_names(pool: &PgPool, names: &[String]) -> Result<Vec<Role>, sqlx::Error> {
    sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = ANY($1) ORDER BY name")
        .bind(names)
        .fetch_all(pool)
        .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM roles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_with_permissions(pool: &PgPool) -> Result<Vec<RoleWithPermissions>, sqlx::Error> {
    let roles = sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY name")
        .fetch_all(pool)
        .await?;

    let mut out = Vec::with_capacity(roles.len());
    for role in roles {
        let permissions = permission_names_for_role(pool, role.id).await?;
        out.push(RoleWithPermissions {
            id: role.id,
            name: role.name,
            permissions,
            created_at: role.created_at,
        });
    }
    Ok(out)
}

pub async fn permission_names_for_role(
    pool: &PgPool,
    role_id: Uuid,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT p.name FROM permissions p
         JOIN role_permissions rp ON rp.permission_id = p.id
         WHERE rp.role_id = $1 ORDER BY p.name",
    )
    .bind(role_id)
    .fetch_all(pool)
    .await
}

pub async fn list_permissions(pool: &PgPool) -> Result<Vec<Permission>, sqlx::Error> {
    sqlx::query_as::<_, Permission>("SELECT * FROM permissions ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn find_permissions_by_names(
    pool: &PgPool,
    names: &[String],
) -> Result<Vec<Permission>, sqlx::Error> {
    sqlx::query_as::<_, Permission>("SELECT * FROM permissions WHERE name = ANY($1)")
        .bind(names)
        .fetch_all(pool)
        .await
}

/// Replaces the permission set of a role.
pub async fn sync_permissions(
    conn: &mut sqlx::PgConnection,
    role_id: Uuid,
    permission_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
        .bind(role_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query(
        "INSERT INTO role_permissions (role_id, permission_id)
         SELECT $1, UNNEST($2::uuid[])",
    )
    .bind(role_id)
    .bind(permission_ids)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn assign_to_user<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    role_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)
         ON CONFLICT DO NOTHING",
    )
    .bind(user_id)
    .bind(role_id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Replaces the role set of a user.
pub async fn sync_user_roles(
    conn: &mut sqlx::PgConnection,
    user_id: Uuid,
    role_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query(
        "INSERT INTO user_roles (user_id, role_id)
         SELECT $1, UNNEST($2::uuid[])",
    )
    .bind(user_id)
    .bind(role_ids)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn role_names_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT r.name FROM roles r
         JOIN user_roles ur ON ur.role_id = r.id
         WHERE ur.user_id = $1 ORDER BY r.name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Effective permissions: the union over all roles of the user.
pub async fn permission_names_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT p.name FROM permissions p
         JOIN role_permissions rp ON rp.permission_id = p.id
         JOIN user_roles ur ON ur.role_id = rp.role_id
         WHERE ur.user_id = $1 ORDER BY p.name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
