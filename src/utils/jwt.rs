use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Lifetime of a "keep me logged in" session.
pub const REMEMBER_ME_SECONDS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub staff: bool,
    pub exp: i64,
    pub iat: i64,
    pub token_type: String,
}

impl Claims {
    pub fn user_id(&self) -> AppResult<i32> {
        self.sub
            .parse()
            .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expires_in: access_expires_in,
        }
    }

    /// Access token with the configured lifetime, or 24 hours when `remember_me`.
    pub fn generate_access_token(
        &self,
        user_id: i32,
        username: &str,
        staff: bool,
        remember_me: bool,
    ) -> AppResult<(String, i64)> {
        let lifetime = if remember_me {
            REMEMBER_ME_SECONDS
        } else {
            self.access_token_expires_in
        };
        let now = Utc::now();
        let exp = now + Duration::seconds(lifetime);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            staff,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type: "access".to_string(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok((token, lifetime))
    }

    pub fn verify_access_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let claims = decode::<Claims>(token, &self.decoding_key, &validation)?.claims;

        if claims.token_type != "access" {
            return Err(AppError::AuthError("Invalid access token type".to_string()));
        }

        Ok(claims)
    }

    pub fn get_access_token_expires_in(&self) -> i64 {
        self.access_token_expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_keeps_staff_flag() {
        let jwt = JwtService::new("secret", 3600);
        let (token, lifetime) = jwt.generate_access_token(7, "admin", true, false).unwrap();
        assert_eq!(lifetime, 3600);
        let claims = jwt.verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 7);
        assert!(claims.staff);
    }

    #[test]
    fn test_remember_me_lasts_a_day() {
        let jwt = JwtService::new("secret", 3600);
        let (_, lifetime) = jwt.generate_access_token(1, "ion", false, true).unwrap();
        assert_eq!(lifetime, REMEMBER_ME_SECONDS);
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let other = JwtService::new("other", 3600);
        let (token, _) = other.generate_access_token(1, "ion", false, false).unwrap();
        assert!(JwtService::new("secret", 3600).verify_access_token(&token).is_err());
    }
}
