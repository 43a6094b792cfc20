//! Read claims from an access token without verifying it.
//!
//! The signing key lives on the backend; the client only needs `exp` to
//! decide whether to refresh before the next request.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;

use common::AppResult;

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    #[serde(default)]
    exp: Option<i64>,
}

/// Expiry of a JWT access token, `None` when the token carries no `exp`.
pub fn expires_at(token: &str) -> AppResult<Option<DateTime<Utc>>> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data
        .claims
        .exp
        .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0)))
}
