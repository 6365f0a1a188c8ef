//! Bearer-token identity
//!
//! HS256 token minting and verification against the shared secret.

pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by a bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: Uuid,
    /// Account email
    pub email: String,
    /// Expiration timestamp (seconds)
    pub exp: i64,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: String, expiry_hours: i64) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            email,
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Sign claims into a compact token
pub fn generate_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify signature and expiry, returning the decoded claims
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-signing-secret";

    #[test]
    fn test_token_round_trip() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "ana@example.com".to_string(), 24);

        let token = generate_token(&claims, SECRET).unwrap();
        let decoded = decode_token(&token, SECRET).unwrap();

        assert_eq!(decoded.sub, user_id);
        assert_eq!(decoded.email, "ana@example.com");
        assert_eq!(decoded.exp, claims.exp);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = Claims::new(Uuid::new_v4(), "ana@example.com".to_string(), 24);
        let token = generate_token(&claims, SECRET).unwrap();

        assert!(decode_token(&token, "another-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Issued 2 hours in the past with a 1 hour lifetime
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            exp: (now - Duration::hours(1)).timestamp(),
            iat: (now - Duration::hours(2)).timestamp(),
        };
        let token = generate_token(&claims, SECRET).unwrap();

        assert!(decode_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(decode_token("not-a-token", SECRET).is_err());
    }
}
