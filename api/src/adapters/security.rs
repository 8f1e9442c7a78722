//! Security adapters
//!
//! HMAC-SHA256 based implementations of the password hashing and token ports.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::domain::entities::User;
use crate::domain::ports::{PasswordHasher, TokenClaims, TokenService};
use crate::error::DomainError;

type HmacSha256 = Hmac<Sha256>;

const SALT_LEN: usize = 16;

/// Salted HMAC-SHA256 password hashes stored as `<salt hex>$<mac hex>`
#[derive(Debug, Default, Clone)]
pub struct HmacPasswordHasher;

impl HmacPasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

fn keyed_mac(key: &[u8]) -> Result<HmacSha256, DomainError> {
    HmacSha256::new_from_slice(key).map_err(|e| DomainError::Internal(e.to_string()))
}

impl PasswordHasher for HmacPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let mut rng = rand::thread_rng();
        let salt: Vec<u8> = (0..SALT_LEN).map(|_| rng.gen()).collect();

        let mut mac = keyed_mac(&salt)?;
        mac.update(password.as_bytes());

        Ok(format!(
            "{}${}",
            hex::encode(&salt),
            hex::encode(mac.finalize().into_bytes())
        ))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Some((salt_hex, mac_hex)) = hash.split_once('$') else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(mac_hex)) else {
            return false;
        };
        let Ok(mut mac) = keyed_mac(&salt) else {
            return false;
        };

        mac.update(password.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}

/// Signed, expiring access tokens: `<base64url claims>.<hex hmac>`
#[derive(Clone)]
pub struct HmacTokenService {
    secret: String,
    ttl: Duration,
}

impl HmacTokenService {
    pub fn new(secret: impl Into<String>, ttl_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    fn sign(&self, payload: &str) -> Result<HmacSha256, DomainError> {
        let mut mac = keyed_mac(self.secret.as_bytes())?;
        mac.update(payload.as_bytes());
        Ok(mac)
    }

    fn encode(&self, claims: &TokenClaims) -> Result<String, DomainError> {
        let json = serde_json::to_vec(claims).map_err(|e| DomainError::Internal(e.to_string()))?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = hex::encode(self.sign(&payload)?.finalize().into_bytes());
        Ok(format!("{}.{}", payload, signature))
    }
}

impl TokenService for HmacTokenService {
    fn issue(&self, user: &User) -> Result<String, DomainError> {
        let claims = TokenClaims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            exp: Utc::now() + self.ttl,
        };
        self.encode(&claims)
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, DomainError> {
        let invalid = || DomainError::Unauthorized("Invalid token".to_string());

        let (payload, signature) = token.split_once('.').ok_or_else(invalid)?;
        let signature = hex::decode(signature).map_err(|_| invalid())?;
        self.sign(payload)?
            .verify_slice(&signature)
            .map_err(|_| invalid())?;

        let json = URL_SAFE_NO_PAD.decode(payload).map_err(|_| invalid())?;
        let claims: TokenClaims = serde_json::from_slice(&json).map_err(|_| invalid())?;

        if claims.exp <= Utc::now() {
            return Err(DomainError::Unauthorized("Token expired".to_string()));
        }
        Ok(claims)
    }
}
