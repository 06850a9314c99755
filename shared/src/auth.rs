use serde::{Deserialize, Serialize};

pub const DUPLICATE_ACCOUNT_ERROR: &str = "This email is already registered.";
pub const INVALID_CREDENTIALS_ERROR: &str = "Invalid email or password.";
pub const GENERIC_AUTH_ERROR: &str = "An error occurred. Please try again.";
pub const WEAK_PASSWORD_ERROR: &str =
    "Password must be 8+ chars and include uppercase, lowercase, number, & special character.";

/// Credentials exchange with the auth gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// 8+ characters drawn from letters, digits and `@$!%*?&`, with at least
/// one upper, one lower, one digit and one special. Enforced only when
/// registering; sign-in defers entirely to the gateway.
pub fn is_strong_password(password: &str) -> bool {
    const SPECIALS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];
    password.len() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| SPECIALS.contains(&c))
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SPECIALS.contains(&c))
}

/// Maps gateway failures onto the few messages the login view shows.
pub fn failure_message(status: u16) -> &'static str {
    match status {
        409 => DUPLICATE_ACCOUNT_ERROR,
        400 | 401 => INVALID_CREDENTIALS_ERROR,
        _ => GENERIC_AUTH_ERROR,
    }
}
