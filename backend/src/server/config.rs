//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

use crate::outbound::persistence::DbPool;

/// Connection settings for the external identity provider.
#[derive(Debug, Clone)]
pub struct IdentityProviderSettings {
    pub base_url: Url,
    pub request_timeout: Duration,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) identity_provider: Option<IdentityProviderSettings>,
}

impl ServerConfig {
    /// Construct a configuration binding to the given address.
    ///
    /// Without a pool and provider settings the server runs against
    /// fixture ports, which is what handler tests and local bring-up use.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            identity_provider: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach identity provider connection settings.
    #[must_use]
    pub fn with_identity_provider(mut self, settings: IdentityProviderSettings) -> Self {
        self.identity_provider = Some(settings);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
