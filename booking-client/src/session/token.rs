//! Access token payload decoding
//!
//! Only the payload is read; the signature is the backend's business.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use shared::client::TokenClaims;

use crate::{ClientError, ClientResult};

/// Decode the claims segment of a JWT (`header.payload.signature`)
pub fn decode_claims(token: &str) -> ClientResult<TokenClaims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ClientError::InvalidToken(format!(
            "expected 3 segments, got {}",
            parts.len()
        )));
    }

    // Some issuers keep the padding
    let payload = parts[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| ClientError::InvalidToken(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidToken(e.to_string()))
}

/// User id carried in the `sub` claim
pub fn decode_subject(token: &str) -> ClientResult<i64> {
    let claims = decode_claims(token)?;
    claims
        .sub
        .parse()
        .map_err(|_| ClientError::InvalidToken(format!("subject is not a user id: {}", claims.sub)))
}

/// Build an unsigned token around `claims`; test helper for fake backends
#[cfg(any(test, feature = "test-support"))]
pub fn encode_unsigned(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_subject() {
        let token = encode_unsigned(&serde_json::json!({"sub": "42", "exp": 1_700_000_000u64}));
        assert_eq!(decode_subject(&token).unwrap(), 42);
        assert_eq!(decode_claims(&token).unwrap().exp, Some(1_700_000_000));
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        assert!(matches!(decode_subject("not-a-jwt"), Err(ClientError::InvalidToken(_))));
        assert!(matches!(decode_subject("a.!!!.c"), Err(ClientError::InvalidToken(_))));

        let token = encode_unsigned(&serde_json::json!({"sub": "alice"}));
        assert!(matches!(decode_subject(&token), Err(ClientError::InvalidToken(_))));
    }
}
