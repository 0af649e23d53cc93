//! Authentication utilities
//!
//! Password hashing for flow outcomes and the sign-in form. Sign-in is
//! simulated: a well-formed request always resolves to a session after a
//! short delay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::wizard::Role;

/// Simulated authentication latency
pub const LOGIN_DELAY: Duration = Duration::from_millis(400);

const MIN_IDENTIFIER_LEN: usize = 5;
const MIN_PASSWORD_LEN: usize = 6;

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> std::result::Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> std::result::Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, hash)
}

/// Sign-in form input
#[derive(Debug, Clone, Default)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
    pub role: Role,
    pub remember: bool,
}

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub identifier: String,
    pub role: Role,
    pub remember: bool,
    pub signed_in_at: DateTime<Utc>,
}

/// Check the sign-in form
pub fn validate_login(request: &LoginRequest) -> Result<()> {
    let id_ok = request.identifier.trim().chars().count() >= MIN_IDENTIFIER_LEN;
    let pwd_ok = request.password.trim().chars().count() >= MIN_PASSWORD_LEN;
    if !id_ok || !pwd_ok {
        return Err(Error::validation(
            "Fill in your identification and password correctly.",
        ));
    }
    Ok(())
}

/// Validate the form and resolve to a session after `delay`
pub async fn login_with_delay(request: &LoginRequest, delay: Duration) -> Result<Session> {
    validate_login(request)?;

    log::debug!("[auth:login] Authenticating {}", request.identifier.trim());
    tokio::time::sleep(delay).await;

    let session = Session {
        identifier: request.identifier.trim().to_string(),
        role: request.role,
        remember: request.remember,
        signed_in_at: Utc::now(),
    };
    log::info!("[auth:login] Signed in as {} ({})", session.identifier, session.role);
    Ok(session)
}

/// Validate the form and resolve to a session after [`LOGIN_DELAY`]
pub async fn login(request: &LoginRequest) -> Result<Session> {
    login_with_delay(request, LOGIN_DELAY).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let hash = hash_password("Abc12345!").unwrap();
        assert!(hash.starts_with("$2"));
        assert_ne!(hash, "Abc12345!");
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("Abc12345!").unwrap();
        assert!(verify_password("Abc12345!", &hash).unwrap());
        assert!(!verify_password("abc12345!", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("x", "not-a-bcrypt-hash").is_err());
    }

    #[test]
    fn test_validate_login_lengths() {
        let mut request = LoginRequest {
            identifier: " abcd ".to_string(),
            password: "secret".to_string(),
            ..Default::default()
        };
        let err = validate_login(&request).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Fill in your identification and password correctly."
        );

        request.identifier = "abcde".to_string();
        assert!(validate_login(&request).is_ok());

        request.password = "  12345 ".to_string();
        assert!(validate_login(&request).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_resolves_after_delay() {
        let request = LoginRequest {
            identifier: "  ana@school.edu ".to_string(),
            password: "secret1".to_string(),
            role: Role::Student,
            remember: true,
        };

        let started = tokio::time::Instant::now();
        let session = login(&request).await.unwrap();
        assert!(started.elapsed() >= LOGIN_DELAY);
        assert_eq!(session.identifier, "ana@school.edu");
        assert_eq!(session.role, Role::Student);
        assert!(session.remember);
    }

    #[tokio::test]
    async fn test_login_rejects_before_waiting() {
        let request = LoginRequest {
            identifier: "ab".to_string(),
            password: "x".to_string(),
            ..Default::default()
        };
        let err = login_with_delay(&request, Duration::from_secs(3600)).await.unwrap_err();
        assert!(err.is_validation());
    }
}
