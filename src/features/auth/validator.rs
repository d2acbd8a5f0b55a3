use super::model::AuthenticatedUser;
use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Verifies HS256 access tokens issued by the shop's auth service
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub sub: String,
    pub exp: u64,
    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway.as_secs();
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Rejected bearer token: {}", e);
                AppError::Unauthorized(format!("Invalid token: {}", e))
            })?;

        let claims = token_data.claims;
        if claims.sub.is_empty() {
            return Err(AppError::Unauthorized("Token has empty subject".to_string()));
        }

        Ok(AuthenticatedUser {
            sub: claims.sub,
            roles: claims.roles,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub(crate) const TEST_SECRET: &str = "test-secret";

    pub(crate) fn test_validator() -> JwtValidator {
        JwtValidator::new(&AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            issuer: None,
            jwt_leeway: Duration::from_secs(0),
        })
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn sign_claims(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    /// Sign a token with the test secret; negative `ttl_secs` yields an expired token
    pub(crate) fn sign(sub: &str, roles: &[&str], ttl_secs: i64) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: (now() as i64 + ttl_secs) as u64,
            iat: Some(now()),
            iss: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        };
        sign_claims(&claims, TEST_SECRET)
    }

    #[test]
    fn test_valid_token() {
        let user = test_validator()
            .validate_token(&sign("user-1", &["admin"], 600))
            .unwrap();
        assert_eq!(user.sub, "user-1");
        assert_eq!(user.roles, vec!["admin".to_string()]);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let result = test_validator().validate_token(&sign("user-1", &["admin"], -600));
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let claims = Claims {
            sub: "user-1".to_string(),
            exp: now() + 600,
            iat: None,
            iss: None,
            roles: vec![],
        };
        let token = sign_claims(&claims, "another-secret");
        assert!(test_validator().validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(test_validator().validate_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_issuer_is_checked_when_configured() {
        let validator = JwtValidator::new(&AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            issuer: Some("https://auth.shop.test".to_string()),
            jwt_leeway: Duration::from_secs(0),
        });

        let mut claims = Claims {
            sub: "user-1".to_string(),
            exp: now() + 600,
            iat: None,
            iss: Some("https://evil.test".to_string()),
            roles: vec![],
        };
        assert!(validator
            .validate_token(&sign_claims(&claims, TEST_SECRET))
            .is_err());

        claims.iss = Some("https://auth.shop.test".to_string());
        assert!(validator
            .validate_token(&sign_claims(&claims, TEST_SECRET))
            .is_ok());
    }

    #[test]
    fn test_missing_roles_claim_defaults_to_empty() {
        let user = test_validator()
            .validate_token(&sign("user-1", &[], 600))
            .unwrap();
        assert!(user.roles.is_empty());
    }
}
