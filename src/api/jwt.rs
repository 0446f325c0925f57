use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::storage::OwnerId;

const ACCESS_TOKEN_TYPE: &str = "access";

/// Access Token Claims
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Owner id, as a decimal string
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub token_type: String,
}

impl AccessClaims {
    pub fn owner_id(&self) -> Option<OwnerId> {
        self.sub.parse().ok()
    }
}

/// JWT Service for generating and validating tokens
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_minutes: u64,
}

impl JwtService {
    pub fn new(secret: &str, access_token_minutes: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_minutes,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.access_token_minutes)
    }

    /// Generate an access token identifying `owner`.
    pub fn generate_access_token(
        &self,
        owner: OwnerId,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: owner.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.access_token_minutes as i64)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Validate Access Token
    pub fn validate_access_token(
        &self,
        token: &str,
    ) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &Validation::default())?;

        if token_data.claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_32_bytes_long!!";

    fn create_test_service() -> JwtService {
        JwtService::new(SECRET, 15)
    }

    fn sign(claims: &AccessClaims) -> String {
        let key = EncodingKey::from_secret(SECRET.as_bytes());
        encode(&Header::default(), claims, &key).unwrap()
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let service = create_test_service();
        let token = service.generate_access_token(42).unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.owner_id(), Some(42));
        assert_eq!(claims.token_type, "access");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_other_token_type_rejected() {
        let service = create_test_service();
        let now = Utc::now();
        let token = sign(&AccessClaims {
            sub: "1".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(7)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: "refresh".to_string(),
        });

        assert!(service.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();
        assert!(service.validate_access_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service1 = create_test_service();
        let service2 = JwtService::new("different_secret_key_32_bytes!!", 15);

        let token = service1.generate_access_token(1).unwrap();
        assert!(service2.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();
        let now = Utc::now();
        // 过期时间需超过默认 leeway
        let token = sign(&AccessClaims {
            sub: "1".to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: "access".to_string(),
        });

        let err = service.validate_access_token(&token).unwrap_err();
        assert!(matches!(
            err.kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ));
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = AccessClaims {
            sub: "admin".to_string(),
            iat: 0,
            exp: 0,
            jti: String::new(),
            token_type: "access".to_string(),
        };
        assert_eq!(claims.owner_id(), None);
    }
}
