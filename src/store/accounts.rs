use sqlx::PgPool;

use crate::auth::{hash_password, verify_password};
use crate::error::AppError;
use crate::models::Account;

/// Creates a new account with a freshly hashed password.
///
/// Uniqueness is enforced by the database constraint in a single insert, so
/// two concurrent registrations of the same username cannot both succeed: the
/// loser's insert fails with a unique violation and surfaces as `Conflict`.
pub async fn register(pool: &PgPool, username: &str, password: &str) -> Result<Account, AppError> {
    let password_hash = hash_password(password)?;

    sqlx::query_as::<_, Account>(
        "INSERT INTO accounts (username, password_hash) VALUES ($1, $2)
         RETURNING id, username, password_hash",
    )
    .bind(username)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Username already registered".into())
        }
        _ => e.into(),
    })
}

/// Verifies a username/password pair against stored credentials.
///
/// "No such user" and "wrong password" are indistinguishable to the caller;
/// both come back as the same `Unauthorized`.
pub async fn authenticate_by_password(
    pool: &PgPool,
    username: &str,
    password: &str,
) -> Result<Account, AppError> {
    let account = find_by_username(pool, username).await?;

    match account {
        Some(account) if verify_password(password, &account.password_hash)? => Ok(account),
        _ => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}

/// Looks up an account by its exact (case-sensitive) username.
pub async fn find_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<Account>, AppError> {
    let account = sqlx::query_as::<_, Account>(
        "SELECT id, username, password_hash FROM accounts WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}
