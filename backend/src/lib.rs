//! Marketplace authorization core.
//!
//! Hexagonal layout: `domain` holds the pure model and services, `inbound`
//! adapts HTTP onto the use-case ports, `outbound` implements the driven
//! ports against PostgreSQL and the identity provider, and `server` wires
//! the layers together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
