use crate::config::JwtConfig;
use crate::errors::{ClassroomError, Result};
use crate::models::accounts::entities::Role;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const ACCESS_TOKEN: &str = "access";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (account ID)
    pub role: String,       // 账号角色
    pub token_type: String, // token类型
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

impl Claims {
    pub fn account_id(&self) -> Result<i64> {
        self.sub
            .parse::<i64>()
            .map_err(|_| ClassroomError::unauthorized("Invalid account ID in JWT"))
    }
}

#[derive(Clone)]
pub struct JwtUtils {
    secret: String,
    access_token_expiry: chrono::Duration,
}

impl JwtUtils {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            access_token_expiry: chrono::Duration::minutes(config.access_token_expiry.max(1)),
        }
    }

    /// access token 有效期（秒）
    pub fn access_token_ttl(&self) -> i64 {
        self.access_token_expiry.num_seconds()
    }

    // 生成 Access Token
    pub fn generate_access_token(&self, account_id: i64, role: Role) -> Result<String> {
        let now = chrono::Utc::now();
        let expiration = now + self.access_token_expiry;

        let claims = Claims {
            sub: account_id.to_string(),
            role: role.to_string(),
            token_type: ACCESS_TOKEN.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| ClassroomError::serialization(format!("JWT 生成失败: {e}")))
    }

    // 验证 Access Token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());
        let claims = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| ClassroomError::unauthorized(format!("Invalid JWT token: {e}")))?;

        if claims.token_type != ACCESS_TOKEN {
            return Err(ClassroomError::unauthorized("Unexpected JWT token type"));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utils(secret: &str) -> JwtUtils {
        JwtUtils::new(&JwtConfig {
            secret: secret.to_string(),
            access_token_expiry: 30,
        })
    }

    #[test]
    fn test_issue_and_verify() {
        let jwt = utils("test-secret");
        let token = jwt.generate_access_token(42, Role::Instructor).unwrap();
        let claims = jwt.verify_access_token(&token).unwrap();
        assert_eq!(claims.account_id().unwrap(), 42);
        assert_eq!(claims.role, "instructor");
        assert_eq!(jwt.access_token_ttl(), 30 * 60);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let token = utils("one").generate_access_token(1, Role::Admin).unwrap();
        let err = utils("two").verify_access_token(&token).unwrap_err();
        assert!(matches!(err, ClassroomError::Unauthorized(_)));
    }
}
