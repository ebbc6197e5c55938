//! Credential verification against the identity provider.
//!
//! Thin service over the [`IdentityProvider`] port: it rejects blank
//! credentials before any network call, re-checks the validity window on
//! whatever the provider returns, and folds every provider failure into
//! `unauthorized` so the HTTP edge cannot leak provider internals. A
//! provider outage is still distinguishable through structured details so
//! an upper layer may treat it as retriable.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::warn;

use super::error::Error;
use super::ports::{IdentityProvider, IdentityProviderError};
use super::principal::{Principal, validate_window};

/// Verifies bearer credentials and returns canonical principals.
#[derive(Clone)]
pub struct IdentityVerifier<P> {
    provider: Arc<P>,
}

impl<P> IdentityVerifier<P> {
    /// Create a verifier over the given provider port.
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

impl<P: IdentityProvider> IdentityVerifier<P> {
    /// Verify `credential` and return the attested principal.
    ///
    /// No side effects and no retries; unavailability surfaces as an
    /// `unauthorized` error tagged `reason = "provider_unavailable"`.
    pub async fn verify(&self, credential: &str) -> Result<Principal, Error> {
        if credential.trim().is_empty() {
            return Err(Error::unauthorized("missing credential"));
        }

        let principal = self
            .provider
            .verify_credential(credential)
            .await
            .map_err(map_provider_error)?;

        validate_window(&principal, Utc::now())
            .map_err(|err| Error::unauthorized(err.to_string()))?;
        Ok(principal)
    }
}

fn map_provider_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::InvalidCredential | IdentityProviderError::Expired => {
            Error::unauthorized(error.to_string())
        }
        IdentityProviderError::Unavailable { message } => {
            warn!(%message, "identity provider unavailable during verification");
            Error::unauthorized("credential could not be verified")
                .with_details(json!({ "reason": "provider_unavailable" }))
        }
        IdentityProviderError::Rejected { message } => {
            warn!(%message, "identity provider rejected verification");
            Error::unauthorized("credential could not be verified")
        }
    }
}
