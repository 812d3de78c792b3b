use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT service for access-token minting and verification.
///
/// Tokens are stateless: validity is entirely signature + expiry, so there
/// is no session table and no revocation path. The signing secret and the
/// default lifetime are injected at construction, never read ambiently, so
/// tests can substitute fixed values.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expire_minutes: i64,
}

/// Claims carried by an access token: the subject (account email) and the
/// expiry timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (account email)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl JwtService {
    /// Create a JWT service over an HS256 shared secret.
    pub fn new(secret: &str, expire_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expire_minutes,
        }
    }

    /// Mint a signed access token for `subject`.
    ///
    /// `ttl` overrides the configured default lifetime when given.
    pub fn mint_token(
        &self,
        subject: &str,
        ttl: Option<Duration>,
    ) -> Result<String, anyhow::Error> {
        let now = Utc::now();
        let exp = now + ttl.unwrap_or_else(|| Duration::minutes(self.expire_minutes));

        let claims = AccessTokenClaims {
            sub: subject.to_string(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to encode access token: {}", e))
    }

    /// Verify and decode an access token.
    ///
    /// Malformed encoding, signature mismatch, a missing subject and a past
    /// expiry all come back as the same `Err`; callers must not try to tell
    /// them apart.
    pub fn decode_token(
        &self,
        token: &str,
    ) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Default token lifetime in seconds (for client info).
    pub fn expire_seconds(&self) -> i64 {
        self.expire_minutes * 60
    }
}
