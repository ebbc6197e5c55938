//! HTTP adapter for the external identity provider.

mod dto;
pub mod http_provider;

pub use http_provider::HttpIdentityProvider;
