//! Bearer token verification.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use thiserror::Error;

use crate::{auth::Claims, config::auth::AuthConfig};

#[derive(Debug, Error)]
pub(crate) enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token was not issued for this API")]
    WrongIssuerOrAudience,

    #[error("token is malformed: {0}")]
    Malformed(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        match error.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => Self::WrongIssuerOrAudience,
            _ => Self::Malformed(error),
        }
    }
}

/// Checks HS256 tokens against the configured secret, issuer and audience.
#[derive(Clone)]
pub(crate) struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub(crate) fn new(secret: &[u8], issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);

        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["sub", "exp", "iss", "aud"]);

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub(crate) fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.jwt_secret.as_bytes(),
            &config.jwt_issuer,
            &config.jwt_audience,
        )
    }

    /// Verify `token` and return its claims.
    pub(crate) fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        Ok(decode::<Claims>(token, &self.key, &self.validation)?.claims)
    }
}

impl Debug for TokenVerifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}
