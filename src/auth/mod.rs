pub mod gate;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use gate::authenticate;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenError, TokenIssuer};

lazy_static! {
    // Usernames are strictly alphanumeric; no separators.
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9]+$").unwrap();
}

/// Represents the payload for a new account registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username for the new account.
    /// Must be between 3 and 50 characters and alphanumeric.
    #[validate(
        length(min = 3, max = 50),
        regex(path = "USERNAME_REGEX", message = "Username must be alphanumeric")
    )]
    pub username: String,
    /// Password for the new account.
    /// Must be between 6 and 100 characters long.
    #[validate(length(min = 6, max = 100))]
    pub password: String,
}

/// Represents the payload for a password login request.
///
/// Deliberately unvalidated beyond its shape: any credential mismatch,
/// including structurally hopeless ones, gets the same 401 from the login
/// handler rather than a distinguishable validation error.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response structure after successful registration or login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed bearer token to present on subsequent requests.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            username: "alice123".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let invalid_username_register = RegisterRequest {
            username: "alice smith!".to_string(), // Contains space and exclamation
            password: "password123".to_string(),
        };
        assert!(invalid_username_register.validate().is_err());

        let short_username_register = RegisterRequest {
            username: "al".to_string(),
            password: "password123".to_string(),
        };
        assert!(short_username_register.validate().is_err());

        let short_password_register = RegisterRequest {
            username: "alice123".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password_register.validate().is_err());
    }

    #[test]
    fn test_token_response_shape() {
        let resp = TokenResponse::bearer("abc.def.ghi".to_string());
        assert_eq!(resp.token_type, "bearer");
        assert_eq!(resp.access_token, "abc.def.ghi");
    }
}
