use actix_web::{http::header, HttpRequest};
use chrono::Utc;
use sqlx::PgPool;

use crate::auth::token::TokenIssuer;
use crate::error::AppError;
use crate::models::Account;
use crate::store;

/// Resolves the bearer token on a request to the account it was issued for.
///
/// Handlers for protected routes call this explicitly and pass the returned
/// account down to the task repository; the authenticated identity is never
/// pulled out of ambient request state.
///
/// Every failure mode (missing header, bad signature, expired or malformed
/// token, subject no longer present in the accounts table) is reported as the
/// same `Unauthorized` error so a caller cannot probe which step rejected it.
/// The subject lookup also covers an account deleted after token issuance.
pub async fn authenticate(
    pool: &PgPool,
    issuer: &TokenIssuer,
    req: &HttpRequest,
) -> Result<Account, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or_else(unauthorized)?;

    let claims = issuer
        .verify(token, Utc::now())
        .map_err(|_| unauthorized())?;

    store::accounts::find_by_username(pool, &claims.sub)
        .await?
        .ok_or_else(unauthorized)
}

fn unauthorized() -> AppError {
    AppError::Unauthorized("Invalid or missing credentials".into())
}
