//! Driven port for the external identity provider.
//!
//! The provider owns credential verification (signature and expiry) and
//! stores the denormalised authorization claims embedded in the tokens it
//! issues. This core consumes it as a capability interface; it is never
//! reimplemented here.

use async_trait::async_trait;

use crate::domain::principal::{AuthClaims, Principal};
use crate::domain::user::PrincipalId;

use super::define_port_error;

define_port_error! {
    /// Failures surfaced by identity provider adapters.
    pub enum IdentityProviderError {
        /// The credential failed signature or format checks.
        InvalidCredential => "credential rejected by identity provider",
        /// The credential was valid once but has expired.
        Expired => "credential has expired",
        /// The provider could not be reached or timed out.
        Unavailable { message: String } => "identity provider unavailable: {message}",
        /// The provider refused a claims write.
        Rejected { message: String } => "identity provider rejected the request: {message}",
    }
}

/// Capability interface over the identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify a bearer credential and return the attested principal.
    async fn verify_credential(&self, credential: &str)
    -> Result<Principal, IdentityProviderError>;

    /// Merge `claims` into the authorization claims stored for `id`.
    ///
    /// Claims absent from the argument are left untouched at the
    /// provider, so a partial write such as a role change never drops
    /// claims this core does not model.
    async fn set_claims(
        &self,
        id: &PrincipalId,
        claims: &AuthClaims,
    ) -> Result<(), IdentityProviderError>;
}

/// Fixture provider for tests that do not exercise verification details.
///
/// Accepts the literal credential `fixture-credential` as the company
/// principal `usr_fixture`; everything else is rejected as invalid.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

/// Credential accepted by [`FixtureIdentityProvider`].
pub const FIXTURE_CREDENTIAL: &str = "fixture-credential";

/// Principal id issued by [`FixtureIdentityProvider`].
pub const FIXTURE_PRINCIPAL_ID: &str = "usr_fixture";

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn verify_credential(
        &self,
        credential: &str,
    ) -> Result<Principal, IdentityProviderError> {
        use chrono::{Duration, Utc};

        use crate::domain::user::UserType;

        if credential != FIXTURE_CREDENTIAL {
            return Err(IdentityProviderError::invalid_credential());
        }
        let id = PrincipalId::new(FIXTURE_PRINCIPAL_ID)
            .map_err(|err| IdentityProviderError::rejected(format!("fixture id invalid: {err}")))?;
        let now = Utc::now();
        Ok(Principal {
            id,
            claims: AuthClaims::with_user_type(UserType::Company),
            issued_at: now - Duration::minutes(1),
            expires_at: now + Duration::hours(1),
        })
    }

    async fn set_claims(
        &self,
        _id: &PrincipalId,
        _claims: &AuthClaims,
    ) -> Result<(), IdentityProviderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_accepts_only_its_credential() {
        let provider = FixtureIdentityProvider;
        let principal = provider
            .verify_credential(FIXTURE_CREDENTIAL)
            .await
            .expect("fixture credential verifies");
        assert_eq!(principal.id.as_ref(), FIXTURE_PRINCIPAL_ID);

        let err = provider
            .verify_credential("something-else")
            .await
            .expect_err("unknown credential fails");
        assert_eq!(err, IdentityProviderError::invalid_credential());
    }
}
