use crate::config::AppConfig;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,      // Subject (user ID)
    pub username: String, // 登录名
    pub role: String,     // 用户角色
    pub name: String,     // 展示姓名
    pub iss: String,      // 签发方
    pub exp: usize,       // Expiration time (时间戳)
    pub iat: usize,       // Issued at (签发时间)
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    // 生成登录 Token
    pub fn generate_token(
        user_id: i64,
        username: &str,
        role: &str,
        name: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::generate_token_with_expiry(
            user_id,
            username,
            role,
            name,
            chrono::Duration::hours(config.jwt.expiry_hours),
        )
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        user_id: i64,
        username: &str,
        role: &str,
        name: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            name: name.to_string(),
            iss: config.jwt.issuer.clone(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let secret = Self::get_secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证 JWT token，同时校验签发方
    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        let secret = Self::get_secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let mut validation = Validation::default();
        validation.set_issuer(&[&config.jwt.issuer]);

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token = JwtUtils::generate_token(42, "zhangsan", "teacher", "张三").unwrap();
        let claims = JwtUtils::verify_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "zhangsan");
        assert_eq!(claims.role, "teacher");
        assert_eq!(claims.name, "张三");
        assert_eq!(claims.iss, AppConfig::get().jwt.issuer);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = JwtUtils::generate_token(1, "admin", "admin", "Administrator").unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });
        assert!(JwtUtils::verify_token(&tampered).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = JwtUtils::generate_token_with_expiry(
            1,
            "admin",
            "admin",
            "Administrator",
            chrono::Duration::seconds(-3600),
        )
        .unwrap();
        assert!(JwtUtils::verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(JwtUtils::verify_token("not.a.token").is_err());
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        // 用同一密钥但不同签发方手工构造令牌
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: "1".to_string(),
            username: "admin".to_string(),
            role: "admin".to_string(),
            name: "Administrator".to_string(),
            iss: "someone-else".to_string(),
            exp: (now + chrono::Duration::hours(1)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        let key = EncodingKey::from_secret(JwtUtils::get_secret().as_ref());
        let token = encode(&Header::default(), &claims, &key).unwrap();
        assert!(JwtUtils::verify_token(&token).is_err());
    }
}
