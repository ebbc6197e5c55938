//! Builders wiring driven adapters into the HTTP use-case ports.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use crate::domain::{ClaimsSynchronizer, IdentityVerifier, JobGraphReader, SessionResolver};
use crate::inbound::http::state::HttpState;
use crate::outbound::identity::HttpIdentityProvider;
use crate::outbound::persistence::{DieselProjectStore, DieselUserStore};

use super::config::ServerConfig;

/// Build the HTTP state from configuration.
///
/// Real adapters require both a database pool and identity provider
/// settings; anything less falls back to fixture ports so the server
/// still starts for local development.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the identity provider client cannot be
/// constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let (Some(pool), Some(identity)) = (&config.db_pool, &config.identity_provider) else {
        warn!("database pool or identity provider not configured; serving fixture ports");
        return Ok(web::Data::new(HttpState::fixtures()));
    };

    let provider = Arc::new(
        HttpIdentityProvider::with_timeout(identity.base_url.clone(), identity.request_timeout)
            .map_err(|err| {
                std::io::Error::other(format!("identity provider client failed to build: {err}"))
            })?,
    );
    let users = Arc::new(DieselUserStore::new(pool.clone()));
    let projects = Arc::new(DieselProjectStore::new(pool.clone()));

    let sessions = SessionResolver::new(IdentityVerifier::new(provider.clone()), users.clone());
    let jobs = JobGraphReader::new(projects);
    let user_type = ClaimsSynchronizer::new(provider, users);

    Ok(web::Data::new(HttpState::new(
        Arc::new(sessions),
        Arc::new(jobs),
        Arc::new(user_type),
    )))
}
