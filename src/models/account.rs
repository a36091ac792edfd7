use sqlx::FromRow;

/// A registered account as stored in the database.
///
/// Immutable after registration: there is no update or delete path for
/// accounts. The password hash never leaves the server; `Account` is not
/// serialized into any response body.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}
