//! Signed Access Tokens
//!
//! Stateless, time-bound tokens binding a session to a user id.
//! Wire format: `"{user_id}.{expires_at_ms}.{signature}"` where the
//! signature is HMAC-SHA256 over the first two segments, base64url
//! encoded without padding. Verification needs only the signing secret,
//! so the authorization layer performs no persistence I/O.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

/// Default token lifetime (7 days)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Token verification errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token does not have the expected shape
    #[error("malformed token")]
    Malformed,

    /// Signature does not match the payload
    #[error("invalid token signature")]
    BadSignature,

    /// Token is past its expiry time
    #[error("token expired")]
    Expired,
}

/// Claims carried by a verified token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenClaims {
    /// The authenticated user's unique id
    pub user_id: Uuid,
    /// Expiry, milliseconds since the Unix epoch
    pub expires_at_ms: i64,
}

/// Issue a signed token for `user_id`, valid for `ttl` from now
pub fn issue(user_id: &Uuid, ttl: Duration, secret: &[u8; 32]) -> String {
    let expires_at_ms = Utc::now().timestamp_millis() + ttl.as_millis() as i64;
    let payload = format!("{}.{}", user_id, expires_at_ms);

    format!("{}.{}", payload, sign(payload.as_bytes(), secret))
}

/// Verify a token and return its claims
///
/// The signature is checked before anything in the payload is trusted;
/// expiry is checked last.
pub fn verify(token: &str, secret: &[u8; 32]) -> Result<TokenClaims, TokenError> {
    let (payload, signature_b64) = token.rsplit_once('.').ok_or(TokenError::Malformed)?;

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| TokenError::Malformed)?;

    mac.verify_slice(&signature)
        .map_err(|_| TokenError::BadSignature)?;

    let (user_id_str, expires_str) = payload.split_once('.').ok_or(TokenError::Malformed)?;

    let user_id = user_id_str.parse().map_err(|_| TokenError::Malformed)?;
    let expires_at_ms: i64 = expires_str.parse().map_err(|_| TokenError::Malformed)?;

    if Utc::now().timestamp_millis() >= expires_at_ms {
        return Err(TokenError::Expired);
    }

    Ok(TokenClaims {
        user_id,
        expires_at_ms,
    })
}

fn sign(payload: &[u8], secret: &[u8; 32]) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);

    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_issue_verify_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = issue(&user_id, Duration::from_secs(60), &SECRET);

        let claims = verify(&token, &SECRET).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert!(claims.expires_at_ms > Utc::now().timestamp_millis());
    }

    #[test]
    fn test_expired_token_rejected() {
        let user_id = Uuid::new_v4();
        let token = issue(&user_id, Duration::ZERO, &SECRET);

        assert_eq!(verify(&token, &SECRET), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let user_id = Uuid::new_v4();
        let token = issue(&user_id, Duration::from_secs(60), &SECRET);

        let other = [8u8; 32];
        assert_eq!(verify(&token, &other), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let user_id = Uuid::new_v4();
        let token = issue(&user_id, Duration::from_secs(60), &SECRET);

        // Swap the embedded user id for another one, keep the signature
        let mut parts: Vec<&str> = token.split('.').collect();
        let other_id = Uuid::new_v4().to_string();
        parts[0] = &other_id;
        let forged = parts.join(".");

        assert_eq!(verify(&forged, &SECRET), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(verify("", &SECRET), Err(TokenError::Malformed));
        assert_eq!(verify("abc", &SECRET), Err(TokenError::Malformed));
        assert_eq!(
            verify("one.two.not-base64!!!", &SECRET),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_expiry_honors_ttl() {
        let user_id = Uuid::new_v4();
        let token = issue(&user_id, Duration::from_secs(7 * 24 * 3600), &SECRET);

        let claims = verify(&token, &SECRET).unwrap();
        let week_ms = 7 * 24 * 3600 * 1000;
        let now = Utc::now().timestamp_millis();
        assert!(claims.expires_at_ms <= now + week_ms);
        assert!(claims.expires_at_ms > now + week_ms - 5_000);
    }
}
