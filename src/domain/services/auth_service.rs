use crate::domain::models::{auth::Claims, user::User};
use crate::error::AppError;
use crate::config::Config;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use chrono::{Duration, Utc};
use rand::rngs::OsRng;

const ACCESS_TOKEN_HOURS: i64 = 12;

pub struct AuthService {
    config: Config,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(config: Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        Self { config, encoding_key, decoding_key }
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            iss: self.config.auth_issuer.clone(),
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            exp: (now + Duration::hours(ACCESS_TOKEN_HOURS)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("JWT encoding failed: {}", e);
            AppError::Internal
        })
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| AppError::Internal)
    }

    pub fn verify_password(&self, hash: &str, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
    }
}
