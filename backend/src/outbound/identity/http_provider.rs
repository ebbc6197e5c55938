//! Reqwest-backed identity provider adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding into the domain principal.
//! Credentials travel in request bodies, never in URLs, so they cannot leak
//! into provider access logs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{PrincipalDto, VerifyErrorDto, VerifyRequestDto};
use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::principal::{AuthClaims, Principal};
use crate::domain::user::PrincipalId;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Identity provider adapter performing HTTPS requests against one endpoint.
pub struct HttpIdentityProvider {
    client: Client,
    base_url: Url,
}

impl HttpIdentityProvider {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, IdentityProviderError> {
        let mut url = self.base_url.clone();
        {
            let mut parts = url.path_segments_mut().map_err(|()| {
                IdentityProviderError::rejected("identity provider URL cannot be a base")
            })?;
            parts.pop_if_empty();
            for segment in segments {
                parts.push(segment);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn verify_credential(
        &self,
        credential: &str,
    ) -> Result<Principal, IdentityProviderError> {
        let url = self.endpoint(&["v1", "credentials", "verify"])?;
        let response = self
            .client
            .post(url)
            .json(&VerifyRequestDto { credential })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_verify_status_error(status, body.as_ref()));
        }

        let dto: PrincipalDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            IdentityProviderError::rejected(format!("invalid provider JSON payload: {error}"))
        })?;
        dto.into_domain_principal()
            .map_err(IdentityProviderError::rejected)
    }

    async fn set_claims(
        &self,
        id: &PrincipalId,
        claims: &AuthClaims,
    ) -> Result<(), IdentityProviderError> {
        // PATCH merge semantics: claims omitted from the body survive at
        // the provider.
        let url = self.endpoint(&["v1", "principals", id.as_ref(), "claims"])?;
        let response = self
            .client
            .patch(url)
            .json(claims)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_claims_status_error(status, body.as_ref()))
    }
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    IdentityProviderError::unavailable(error.to_string())
}

fn map_verify_status_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            let detail: VerifyErrorDto = serde_json::from_slice(body).unwrap_or_default();
            if detail.error.as_deref() == Some("expired_credential") {
                IdentityProviderError::expired()
            } else {
                IdentityProviderError::invalid_credential()
            }
        }
        _ if status.is_client_error() => {
            IdentityProviderError::rejected(status_message(status, body))
        }
        _ => IdentityProviderError::unavailable(status_message(status, body)),
    }
}

fn map_claims_status_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    if status.is_client_error() {
        IdentityProviderError::rejected(status_message(status, body))
    } else {
        IdentityProviderError::unavailable(status_message(status, body))
    }
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
