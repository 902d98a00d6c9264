//! Session sealing: sessions travel to the browser as HS256-signed JWTs.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use tourist_core::config::AuthConfig;
use tourist_core::error::AppError;

use crate::session::Session;

/// Payload of a sealed session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SealedSession {
    /// The session itself.
    session: Session,
    /// Issued-at timestamp (seconds since epoch).
    iat: i64,
    /// Expiration timestamp (seconds since epoch).
    exp: i64,
}

/// Signs sessions into opaque cookie values and verifies them on the way back.
#[derive(Clone)]
pub struct SessionSealer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Seal lifetime in seconds.
    max_age_seconds: i64,
}

impl std::fmt::Debug for SessionSealer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSealer")
            .field("max_age_seconds", &self.max_age_seconds)
            .finish()
    }
}

impl SessionSealer {
    /// Creates a sealer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            encoding_key: EncodingKey::from_secret(config.session_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.session_secret.as_bytes()),
            validation,
            max_age_seconds: (config.session_max_age_hours * 3600) as i64,
        }
    }

    /// Seal lifetime in seconds.
    pub fn max_age_seconds(&self) -> i64 {
        self.max_age_seconds
    }

    /// Signs a session into a cookie value.
    pub fn seal(&self, session: &Session) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let sealed = SealedSession {
            session: session.clone(),
            iat: now,
            exp: now + self.max_age_seconds,
        };

        encode(&Header::new(Algorithm::HS256), &sealed, &self.encoding_key)
            .map_err(|e| AppError::session(format!("Failed to seal session: {e}")))
    }

    /// Verifies a cookie value and returns the session inside.
    pub fn unseal(&self, value: &str) -> Result<Session, AppError> {
        let data = decode::<SealedSession>(value, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Session has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid session signature")
                }
                _ => AppError::authentication(format!("Invalid session: {e}")),
            },
        )?;

        Ok(data.claims.session)
    }
}
