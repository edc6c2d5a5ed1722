//! HS256 JWT implementation of [`TokenIssuer`].
//!
//! Tokens carry `{ "userId": "<uuid>", "iat": <seconds> }` and no expiry. A
//! token that does carry an `exp` claim (minted elsewhere with the same
//! secret) is still rejected once that instant has passed.

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::UserId;
use crate::domain::ports::{TokenError, TokenIssuer};

/// Shared signing secret. Wiped from memory on drop.
#[derive(Clone)]
pub struct JwtSecret(Zeroizing<Vec<u8>>);

impl JwtSecret {
    /// Take ownership of the raw secret bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Secret length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the secret has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JwtSecret(<{} bytes redacted>)", self.len())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Signs and verifies bearer tokens with a symmetric secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenIssuer {
    /// HS256 issuer keyed by `secret`; tokens without `exp` are accepted.
    pub fn new(secret: &JwtSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Only the signature is mandatory; `exp` is honoured when present.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl fmt::Debug for JwtTokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenIssuer").finish_non_exhaustive()
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: &UserId) -> Result<String, TokenError> {
        let claims = Claims {
            user_id: user_id.to_string(),
            iat: Some(Utc::now().timestamp()),
            exp: None,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::sign(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        UserId::new(&data.claims.user_id).map_err(|err| TokenError::invalid(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[fixture]
    fn issuer() -> JwtTokenIssuer {
        JwtTokenIssuer::new(&JwtSecret::new(SECRET))
    }

    fn sign(claims: serde_json::Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("encode test claims")
    }

    #[rstest]
    fn issued_token_verifies_to_same_user(issuer: JwtTokenIssuer) {
        let id = UserId::random();
        let token = issuer.issue(&id).expect("issue");
        assert_eq!(issuer.verify(&token).expect("verify"), id);
    }

    #[rstest]
    fn issued_token_has_no_expiry(issuer: JwtTokenIssuer) {
        let id = UserId::random();
        let token = issuer.issue(&id).expect("issue");
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        let data = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(SECRET),
            &validation,
        )
        .expect("decode");
        assert_eq!(data.claims["userId"], json!(id.to_string()));
        assert!(data.claims.get("exp").is_none());
        assert!(data.claims.get("iat").is_some());
    }

    #[rstest]
    fn tampered_token_is_rejected(issuer: JwtTokenIssuer) {
        let token = issuer.issue(&UserId::random()).expect("issue");
        let (head, signature) = token.rsplit_once('.').expect("three segments");
        let flipped = if signature.starts_with('A') { "B" } else { "A" };
        let tampered = format!("{head}.{flipped}{}", &signature[1..]);
        assert!(matches!(
            issuer.verify(&tampered),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn foreign_secret_is_rejected(issuer: JwtTokenIssuer) {
        let other = JwtTokenIssuer::new(&JwtSecret::new(b"another-secret-another-secret-xx".to_vec()));
        let token = other.issue(&UserId::random()).expect("issue");
        assert!(issuer.verify(&token).is_err());
    }

    #[rstest]
    #[case(json!({ "userId": "not-a-uuid" }))]
    #[case(json!({ "sub": "3fa85f64-5717-4562-b3fc-2c963f66afa6" }))]
    #[case(json!({ "userId": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "exp": 1 }))]
    fn malformed_or_expired_claims_are_rejected(
        issuer: JwtTokenIssuer,
        #[case] claims: serde_json::Value,
    ) {
        assert!(issuer.verify(&sign(claims)).is_err());
    }

    #[rstest]
    fn future_expiry_is_accepted(issuer: JwtTokenIssuer) {
        let exp = Utc::now().timestamp() + 3600;
        let token = sign(json!({ "userId": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "exp": exp }));
        assert!(issuer.verify(&token).is_ok());
    }

    #[rstest]
    fn garbage_is_rejected(issuer: JwtTokenIssuer) {
        assert!(issuer.verify("not.a.jwt").is_err());
        assert!(issuer.verify("").is_err());
    }

    #[rstest]
    fn secret_debug_is_redacted() {
        assert_eq!(
            format!("{:?}", JwtSecret::new(SECRET)),
            "JwtSecret(<32 bytes redacted>)"
        );
    }
}
