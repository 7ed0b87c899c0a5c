//! JWT Token Service
//!
//! RS256-signed tokens. Claims:
//! - `dat`: opaque payload, `{"id": <user id>}`
//! - `iat`, `nbf`, `exp`: unix seconds
//!
//! A token is valid iff the signature verifies with the configured public
//! key, its declared algorithm is in the RSA PKCS#1 family and
//! `nbf <= now < exp`.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode};
use serde::{Deserialize, Serialize};

use crate::domain::entity::token::TokenPayload;
use crate::domain::repository::TokenService;
use crate::error::{AuthError, AuthResult};

/// Algorithm used when signing
const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;

/// Algorithms accepted on verification
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    dat: serde_json::Value,
    iat: i64,
    nbf: i64,
    exp: i64,
}

/// RSA-signed JWT token service
///
/// Keys are parsed once on construction.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenService {
    /// Build from a PEM private key (PKCS#1 or PKCS#8) and a PEM public key
    pub fn from_rsa_pem(private_pem: &[u8], public_pem: &[u8]) -> AuthResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| AuthError::Internal(format!("Invalid RSA private key: {}", e)))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| AuthError::Internal(format!("Invalid RSA public key: {}", e)))?;

        Ok(Self {
            encoding_key,
            decoding_key,
        })
    }

    /// Issue a token as if the clock read `now` (unix seconds)
    pub fn issue_at(&self, payload: &TokenPayload, ttl: Duration, now: i64) -> AuthResult<String> {
        let ttl = i64::try_from(ttl.as_secs())
            .map_err(|_| AuthError::Internal("Token TTL out of range".into()))?;
        let dat = serde_json::to_value(payload)
            .map_err(|e| AuthError::Internal(format!("Token payload encoding failed: {}", e)))?;

        let claims = Claims {
            dat,
            iat: now,
            nbf: now,
            exp: now.saturating_add(ttl),
        };

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {}", e)))
    }

    /// Verify a token as if the clock read `now` (unix seconds)
    pub fn verify_at(&self, token: &str, now: i64) -> AuthResult<TokenPayload> {
        let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;
        if !ACCEPTED_ALGORITHMS.contains(&header.alg) {
            return Err(AuthError::InvalidTokenMethod);
        }

        // time window is checked below against the injected clock
        let mut validation = Validation::new(header.alg);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })?
            .claims;

        if now < claims.nbf || now >= claims.exp {
            return Err(AuthError::InvalidToken);
        }

        let user_id = claims
            .dat
            .get("id")
            .and_then(serde_json::Value::as_i64)
            .ok_or(AuthError::InvalidToken)?;

        Ok(TokenPayload::new(user_id.into()))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, payload: &TokenPayload, ttl: Duration) -> AuthResult<String> {
        self.issue_at(payload, ttl, Utc::now().timestamp())
    }

    fn verify(&self, token: &str) -> AuthResult<TokenPayload> {
        self.verify_at(token, Utc::now().timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::UserId;

    const PRIVATE_PEM: &str = include_str!("../../testdata/jwt_private.pem");
    const PUBLIC_PEM: &str = include_str!("../../testdata/jwt_public.pem");
    const OTHER_PRIVATE_PEM: &str = include_str!("../../testdata/other_private.pem");
    const OTHER_PUBLIC_PEM: &str = include_str!("../../testdata/other_public.pem");

    const NOW: i64 = 1_700_000_000;

    fn service() -> JwtTokenService {
        JwtTokenService::from_rsa_pem(PRIVATE_PEM.as_bytes(), PUBLIC_PEM.as_bytes()).unwrap()
    }

    fn payload() -> TokenPayload {
        TokenPayload::new(UserId::new(42))
    }

    #[test]
    fn test_issue_and_verify() {
        let svc = service();
        let token = svc.issue_at(&payload(), Duration::from_secs(60), NOW).unwrap();

        assert_eq!(svc.verify_at(&token, NOW).unwrap(), payload());
        assert_eq!(decode_header(&token).unwrap().alg, Algorithm::RS256);
    }

    #[test]
    fn test_time_window() {
        let svc = service();
        let token = svc.issue_at(&payload(), Duration::from_secs(60), NOW).unwrap();

        assert!(svc.verify_at(&token, NOW + 59).is_ok());
        assert!(matches!(
            svc.verify_at(&token, NOW + 60),
            Err(AuthError::InvalidToken)
        ));
        // not yet valid
        assert!(matches!(
            svc.verify_at(&token, NOW - 1),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_claims_layout() {
        let svc = service();
        let token = svc.issue_at(&payload(), Duration::from_secs(600), NOW).unwrap();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        let claims = decode::<serde_json::Value>(&token, &svc.decoding_key, &validation)
            .unwrap()
            .claims;
        assert_eq!(claims["dat"], serde_json::json!({"id": 42}));
        assert_eq!(claims["iat"], NOW);
        assert_eq!(claims["nbf"], NOW);
        assert_eq!(claims["exp"], NOW + 600);
    }

    #[test]
    fn test_token_from_other_key_pair_is_rejected() {
        let other = JwtTokenService::from_rsa_pem(
            OTHER_PRIVATE_PEM.as_bytes(),
            OTHER_PUBLIC_PEM.as_bytes(),
        )
        .unwrap();
        let token = other.issue_at(&payload(), Duration::from_secs(60), NOW).unwrap();

        assert!(matches!(
            service().verify_at(&token, NOW),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_symmetric_algorithm_is_invalid_method() {
        // classic confusion: HMAC keyed with the public key bytes
        let claims = Claims {
            dat: serde_json::json!({"id": 42}),
            iat: NOW,
            nbf: NOW,
            exp: NOW + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(PUBLIC_PEM.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service().verify_at(&token, NOW),
            Err(AuthError::InvalidTokenMethod)
        ));
    }

    #[test]
    fn test_payload_without_numeric_id_is_rejected() {
        let svc = service();
        let claims = Claims {
            dat: serde_json::json!({"id": "42"}),
            iat: NOW,
            nbf: NOW,
            exp: NOW + 60,
        };
        let token = encode(&Header::new(Algorithm::RS256), &claims, &svc.encoding_key).unwrap();

        assert!(matches!(
            svc.verify_at(&token, NOW),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_malformed_token() {
        assert!(matches!(
            service().verify_at("not.a.jwt", NOW),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            service().verify_at("", NOW),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_unparsable_key_is_internal() {
        let result = JwtTokenService::from_rsa_pem(b"garbage", PUBLIC_PEM.as_bytes());
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }

    #[test]
    fn test_real_clock() {
        let svc = service();
        let token = svc.issue(&payload(), Duration::from_secs(60)).unwrap();
        assert_eq!(svc.verify(&token).unwrap().user_id, UserId::new(42));
    }
}
