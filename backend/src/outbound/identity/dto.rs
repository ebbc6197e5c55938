//! DTOs for the identity provider's HTTP API.
//!
//! The adapter decodes into these transport DTOs first, then maps into the
//! domain [`Principal`] in one pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::principal::{AuthClaims, Principal};
use crate::domain::user::PrincipalId;

/// Body sent to the provider's verification endpoint.
#[derive(Debug, Serialize)]
pub(super) struct VerifyRequestDto<'a> {
    pub(super) credential: &'a str,
}

/// Successful verification response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PrincipalDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) claims: AuthClaims,
    pub(super) issued_at: DateTime<Utc>,
    pub(super) expires_at: DateTime<Utc>,
}

impl PrincipalDto {
    pub(super) fn into_domain_principal(self) -> Result<Principal, String> {
        let id = PrincipalId::new(&self.id)
            .map_err(|err| format!("provider returned invalid principal id: {err}"))?;
        Ok(Principal {
            id,
            claims: self.claims,
            issued_at: self.issued_at,
            expires_at: self.expires_at,
        })
    }
}

/// Error body attached to verification rejections.
#[derive(Debug, Default, Deserialize)]
pub(super) struct VerifyErrorDto {
    #[serde(default)]
    pub(super) error: Option<String>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::user::UserType;
    use rstest::rstest;

    #[rstest]
    fn principal_dto_maps_into_domain() {
        let json = r#"{
            "id": "usr_1",
            "claims": {"userType": "company", "plan": "pro"},
            "issuedAt": "2026-01-01T00:00:00Z",
            "expiresAt": "2026-01-01T01:00:00Z"
        }"#;
        let dto: PrincipalDto = serde_json::from_str(json).expect("decode");
        let principal = dto.into_domain_principal().expect("valid principal");
        assert_eq!(principal.id.as_ref(), "usr_1");
        assert_eq!(principal.claims.user_type, Some(UserType::Company));
        assert!(principal.claims.extra.contains_key("plan"));
    }

    #[rstest]
    fn blank_provider_id_is_rejected() {
        let dto = PrincipalDto {
            id: String::new(),
            claims: AuthClaims::default(),
            issued_at: Utc::now(),
            expires_at: Utc::now(),
        };
        assert!(dto.into_domain_principal().is_err());
    }
}
