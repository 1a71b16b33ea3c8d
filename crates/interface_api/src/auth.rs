//! Authentication and authorization
//!
//! Admin tokens are HS256 JWTs carrying a single `role` claim. The token
//! itself is checked here; rejecting the request is `require_admin`'s job.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role carried by administrator tokens
pub const ADMIN_ROLE: &str = "admin";

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (admin username)
    pub sub: String,
    pub role: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Auth errors
///
/// The display strings are returned to clients as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingHeader,
    #[error("Invalid token format. Use 'Bearer <token>'")]
    InvalidFormat,
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Admin access required")]
    Forbidden,
    #[error("Token could not be issued")]
    Issue,
}

/// Creates a signed token for `subject` with the given role
pub fn create_token(
    subject: &str,
    role: &str,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let lifetime = i64::try_from(expiration_secs).map_err(|_| AuthError::Issue)?;
    let claims = Claims {
        sub: subject.to_string(),
        role: role.to_string(),
        exp: (now + Duration::seconds(lifetime)).timestamp(),
        iat: now.timestamp(),
    };
    sign(&claims, secret)
}

/// Signs arbitrary claims
pub fn sign(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::Issue)
}

/// Validates a token's signature and expiry
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Extracts the token from an `Authorization` header value
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingHeader)?;
    match header.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::InvalidFormat),
    }
}

/// Full check applied to admin routes
pub fn authorize_admin(header: Option<&str>, secret: &str) -> Result<Claims, AuthError> {
    let token = bearer_token(header)?;
    let claims = validate_token(token, secret)?;
    if !claims.is_admin() {
        return Err(AuthError::Forbidden);
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_round_trip() {
        let token = create_token("ops", ADMIN_ROLE, SECRET, 3600).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "ops");
        assert!(claims.is_admin());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = create_token("ops", ADMIN_ROLE, SECRET, 3600).unwrap();
        assert_eq!(validate_token(&token, "other"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "ops".into(),
            role: ADMIN_ROLE.into(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = sign(&claims, SECRET).unwrap();
        assert_eq!(validate_token(&token, SECRET), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_bearer_parsing() {
        assert_eq!(bearer_token(None), Err(AuthError::MissingHeader));
        assert_eq!(bearer_token(Some("Token abc")), Err(AuthError::InvalidFormat));
        assert_eq!(bearer_token(Some("Bearer")), Err(AuthError::InvalidFormat));
        assert_eq!(bearer_token(Some("Bearer abc")), Ok("abc"));
    }

    #[test]
    fn test_non_admin_role_is_forbidden() {
        let token = create_token("viewer", "viewer", SECRET, 60).unwrap();
        let header = format!("Bearer {}", token);
        assert_eq!(authorize_admin(Some(&header), SECRET), Err(AuthError::Forbidden));
    }
}
