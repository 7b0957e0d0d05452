//! Session token issue and validation.
//!
//! Tokens are HS256-signed JWTs binding a subject (username) to an absolute
//! expiry 24 hours after issuance. The signing key is process-wide
//! configuration, loaded once at startup; rotating it invalidates every
//! outstanding token. There is no server-side revocation list.

use crate::error::Error;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use service::config::Config;
use utoipa::ToSchema;

/// Fixed validity window for issued tokens.
pub const TOKEN_VALIDITY_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub(crate) sub: String,
    pub(crate) exp: usize,
}

/// The bearer credential returned to a successfully logged-in client.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(as = domain::token::AccessToken)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

/// Mints a signed access token for `subject`, expiring
/// [`TOKEN_VALIDITY_HOURS`] from now.
pub fn issue(config: &Config, subject: &str) -> Result<AccessToken, Error> {
    let expires_at = Utc::now() + Duration::hours(TOKEN_VALIDITY_HOURS);
    let claims = Claims {
        sub: subject.to_string(),
        exp: expires_at.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.token_signing_key().as_bytes()),
    )?;

    Ok(AccessToken {
        access_token: token,
        token_type: "bearer".to_string(),
    })
}

/// Validates a token and returns its subject. The signature is verified before
/// any claim is trusted; expiry is checked against the `exp` claim. Failures
/// are distinguished in the returned error's `TokenErrorKind`.
pub fn validate(config: &Config, token: &str) -> Result<String, Error> {
    // No expiry leeway: a token is valid strictly while now < exp.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.token_signing_key().as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, InternalErrorKind, TokenErrorKind};

    fn token_error_kind(err: Error) -> TokenErrorKind {
        match err.error_kind {
            DomainErrorKind::Internal(InternalErrorKind::Token(kind)) => kind,
            other => panic!("expected a token error, got {other:?}"),
        }
    }

    #[test]
    fn issued_token_validates_to_its_subject() {
        let config = Config::default();
        let access_token = issue(&config, "alice@example.com").unwrap();

        assert_eq!(access_token.token_type, "bearer");
        let subject = validate(&config, &access_token.access_token).unwrap();
        assert_eq!(subject, "alice@example.com");
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let config = Config::default();
        // Even a token only seconds past its expiry is rejected
        let claims = Claims {
            sub: "alice@example.com".to_string(),
            exp: (Utc::now() - Duration::seconds(30)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.token_signing_key().as_bytes()),
        )
        .unwrap();

        let err = validate(&config, &token).unwrap_err();
        assert_eq!(token_error_kind(err), TokenErrorKind::Expired);
    }

    #[test]
    fn tampered_signature_is_rejected_regardless_of_payload() {
        let config = Config::default();
        let token = issue(&config, "alice@example.com").unwrap().access_token;

        // Flip one character inside the signature segment
        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut sig_chars: Vec<char> = signature.chars().collect();
        sig_chars[0] = if sig_chars[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{head}.{}", sig_chars.iter().collect::<String>());

        let err = validate(&config, &tampered).unwrap_err();
        assert_eq!(token_error_kind(err), TokenErrorKind::InvalidSignature);
    }

    #[test]
    fn token_signed_with_a_different_key_is_rejected() {
        let config = Config::default();
        let claims = Claims {
            sub: "alice@example.com".to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"some-other-key"),
        )
        .unwrap();

        let err = validate(&config, &token).unwrap_err();
        assert_eq!(token_error_kind(err), TokenErrorKind::InvalidSignature);
    }

    #[test]
    fn garbage_token_is_malformed() {
        let config = Config::default();
        let err = validate(&config, "definitely.not-a.jwt").unwrap_err();
        assert_eq!(token_error_kind(err), TokenErrorKind::Malformed);
    }
}
