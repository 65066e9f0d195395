use crate::entities::AdminRole;
use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // admin id
    pub username: String,
    pub role: AdminRole,
    pub exp: i64,
    pub iat: i64,
    pub token_type: String, // "access"
}

impl Claims {
    pub fn admin_id(&self) -> AppResult<i64> {
        self.sub
            .parse()
            .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        }
    }

    pub fn generate_access_token(
        &self,
        admin_id: i64,
        username: &str,
        role: AdminRole,
    ) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in);

        let claims = Claims {
            sub: admin_id.to_string(),
            username: username.to_string(),
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type: "access".to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }

    pub fn verify_access_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.verify_token(token)?;

        if claims.token_type != "access" {
            return Err(AppError::AuthError("Invalid access token type".to_string()));
        }

        Ok(claims)
    }

    pub fn get_expires_in(&self) -> i64 {
        self.expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_verify_access_token() {
        let jwt = JwtService::new("test-secret", 3600);
        let token = jwt
            .generate_access_token(42, "alice", AdminRole::SuperAdmin)
            .unwrap();
        let claims = jwt.verify_access_token(&token).unwrap();
        assert_eq!(claims.admin_id().unwrap(), 42);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, AdminRole::SuperAdmin);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = JwtService::new("secret-a", 3600);
        let verifier = JwtService::new("secret-b", 3600);
        let token = issuer
            .generate_access_token(1, "bob", AdminRole::Admin)
            .unwrap();
        assert!(verifier.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // 超出 jsonwebtoken 默认 60 秒 leeway
        let jwt = JwtService::new("test-secret", -120);
        let token = jwt.generate_access_token(1, "bob", AdminRole::Admin).unwrap();
        assert!(jwt.verify_access_token(&token).is_err());
    }
}
