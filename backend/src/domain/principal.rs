//! Identity-provider principal and claims window validation.
//!
//! A [`Principal`] is what the provider attests after verifying a bearer
//! credential. The embedded `user_type` claim is a denormalised cache of
//! the relational role; it is carried for reconciliation but never trusted
//! for authorization decisions (see `SessionResolver`).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::user::{PrincipalId, UserType};

/// Authorization claim set embedded in provider-issued credentials.
///
/// Unknown claims are preserved verbatim so decoding and re-encoding a
/// claim set never drops provider-side data this core does not model.
/// Claims writes are merges ([`IdentityProvider::set_claims`]), so a
/// partial claim set is a safe payload.
///
/// [`IdentityProvider::set_claims`]: crate::domain::ports::IdentityProvider::set_claims
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthClaims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AuthClaims {
    /// Claim set carrying only a `user_type`.
    pub fn with_user_type(user_type: UserType) -> Self {
        Self {
            user_type: Some(user_type),
            extra: BTreeMap::new(),
        }
    }
}

/// Canonical identity returned by credential verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    pub claims: AuthClaims,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Failures raised by [`validate_window`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimsWindowError {
    #[error("credential has expired")]
    Expired,
    #[error("credential not yet valid (issued_at is in the future)")]
    NotYetValid,
    #[error("invalid credential time window (expires_at <= issued_at)")]
    InvalidWindow,
}

/// Deterministically validate a principal's validity window.
///
/// Signature verification happens at the provider; this check only guards
/// against stale or malformed timestamps slipping past a lenient provider
/// response.
pub fn validate_window(principal: &Principal, now: DateTime<Utc>) -> Result<(), ClaimsWindowError> {
    if principal.expires_at <= principal.issued_at {
        return Err(ClaimsWindowError::InvalidWindow);
    }
    if now < principal.issued_at {
        return Err(ClaimsWindowError::NotYetValid);
    }
    if now >= principal.expires_at {
        return Err(ClaimsWindowError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    fn principal(issued_offset: i64, expires_offset: i64, now: DateTime<Utc>) -> Principal {
        Principal {
            id: PrincipalId::new("usr_1").expect("fixture id"),
            claims: AuthClaims::with_user_type(UserType::Freelancer),
            issued_at: now + Duration::seconds(issued_offset),
            expires_at: now + Duration::seconds(expires_offset),
        }
    }

    #[rstest]
    #[case(-60, 60, Ok(()))]
    #[case(-120, -60, Err(ClaimsWindowError::Expired))]
    #[case(30, 60, Err(ClaimsWindowError::NotYetValid))]
    #[case(-60, -60, Err(ClaimsWindowError::InvalidWindow))]
    fn window_validation(
        #[case] issued_offset: i64,
        #[case] expires_offset: i64,
        #[case] expected: Result<(), ClaimsWindowError>,
    ) {
        let now = Utc::now();
        let subject = principal(issued_offset, expires_offset, now);
        assert_eq!(validate_window(&subject, now), expected);
    }

    #[rstest]
    fn expiry_boundary_is_exclusive() {
        let now = Utc::now();
        let subject = principal(-60, 0, now);
        assert_eq!(validate_window(&subject, now), Err(ClaimsWindowError::Expired));
    }

    #[rstest]
    fn unknown_claims_survive_serde() {
        let json = r#"{"userType":"company","plan":"pro"}"#;
        let claims: AuthClaims = serde_json::from_str(json).expect("deserialise");
        assert_eq!(claims.user_type, Some(UserType::Company));
        assert_eq!(
            claims.extra.get("plan"),
            Some(&serde_json::json!("pro"))
        );
        let back = serde_json::to_value(&claims).expect("serialise");
        assert_eq!(back.get("plan"), Some(&serde_json::json!("pro")));
    }
}
