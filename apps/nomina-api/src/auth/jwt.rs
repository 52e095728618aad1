//! JWT authentication module.
//!
//! Handles token generation and validation.
//!
//! ## Token Lifetime
//! ```text
//!   iat = T                                   exp = T + JWT_EXPIRY_SECS (2 h)
//!   │◄──────────────── accepted ──────────────►│◄──── rejected (401) ────
//! ```
//!
//! Validation uses no leeway: a token is valid while `now <= exp`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use nomina_core::{Rol, UsuarioPublico};

/// JWT claims structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (usuario id)
    pub sub: String,

    /// Account email
    pub correo: String,

    /// Account role
    pub rol: Rol,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// JWT errors.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Failed to generate token: {0}")]
    Generation(String),
}

/// JWT token manager.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_secs: i64,
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("expiry_secs", &self.expiry_secs)
            .finish_non_exhaustive()
    }
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        JwtManager {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_secs,
        }
    }

    /// Generate a token for an account, issued now.
    pub fn generate_token(&self, usuario: &UsuarioPublico) -> Result<String, JwtError> {
        self.generate_token_at(usuario, Utc::now())
    }

    /// Generate a token as if issued at `issued_at`.
    pub fn generate_token_at(
        &self,
        usuario: &UsuarioPublico,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let exp = issued_at + Duration::seconds(self.expiry_secs);

        let claims = Claims {
            sub: usuario.id.clone(),
            correo: usuario.correo.clone(),
            rol: usuario.rol,
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Generation(e.to_string()))
    }

    /// Validate and decode a token against the current time.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_token_at(token, Utc::now())
    }

    /// Validate and decode a token as of `now`.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Expiry is checked below against `now`.
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            })?
            .claims;

        if now.timestamp() > claims.exp {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usuario(rol: Rol) -> UsuarioPublico {
        UsuarioPublico {
            id: "user-001".to_string(),
            nombre: "Ana".to_string(),
            correo: "ana@empresa.co".to_string(),
            rol,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test-secret-test-secret-test-secret", 7200);

        let token = manager.generate_token(&usuario(Rol::Admin)).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "user-001");
        assert_eq!(claims.correo, "ana@empresa.co");
        assert_eq!(claims.rol, Rol::Admin);
        assert_eq!(claims.exp - claims.iat, 7200);
    }

    #[test]
    fn test_expiry_window() {
        let manager = JwtManager::new("test-secret-test-secret-test-secret", 7200);
        let issued = Utc::now();
        let token = manager.generate_token_at(&usuario(Rol::User), issued).unwrap();

        assert!(manager.validate_token_at(&token, issued).is_ok());
        assert!(manager
            .validate_token_at(&token, issued + Duration::seconds(7200))
            .is_ok());
        assert!(matches!(
            manager.validate_token_at(&token, issued + Duration::seconds(7201)),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_expired_against_wall_clock() {
        let manager = JwtManager::new("test-secret-test-secret-test-secret", 7200);
        let issued = Utc::now() - Duration::hours(3);
        let token = manager.generate_token_at(&usuario(Rol::User), issued).unwrap();

        assert!(matches!(manager.validate_token(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn test_wrong_secret() {
        let a = JwtManager::new("secret-a-secret-a-secret-a-secret-a", 7200);
        let b = JwtManager::new("secret-b-secret-b-secret-b-secret-b", 7200);

        let token = a.generate_token(&usuario(Rol::User)).unwrap();
        assert!(matches!(b.validate_token(&token), Err(JwtError::Invalid(_))));
        assert!(matches!(a.validate_token("garbage"), Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("abc.def"), None);
    }
}
