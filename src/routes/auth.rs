use crate::{
    auth::{LoginRequest, RegisterRequest, TokenIssuer, TokenResponse},
    error::AppError,
    store,
};
use actix_web::{post, web, HttpResponse, Responder};
use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

/// Register a new account
///
/// Creates the account and immediately returns a bearer token for it, so a
/// fresh registration does not need a separate login round-trip.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    issuer: web::Data<TokenIssuer>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    // The insert itself enforces username uniqueness; duplicates surface as 409.
    let account = store::accounts::register(&pool, &register_data.username, &register_data.password)
        .await?;

    let access_token = issuer.issue(&account.username, Utc::now())?;

    Ok(HttpResponse::Created().json(TokenResponse::bearer(access_token)))
}

/// Password login
///
/// Exchanges a username/password pair for a bearer token.
#[post("/token")]
pub async fn token(
    pool: web::Data<PgPool>,
    issuer: web::Data<TokenIssuer>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let account =
        store::accounts::authenticate_by_password(&pool, &login_data.username, &login_data.password)
            .await?;

    let access_token = issuer.issue(&account.username, Utc::now())?;

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(access_token)))
}
