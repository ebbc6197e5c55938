//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification for the REST API. It
//! registers every HTTP endpoint from the inbound layer together with the
//! domain schemas they serialise, and the bearer credential security
//! scheme. Swagger UI serves the document in debug builds only.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    CompanyCard, Error, ErrorCode, JobGraph, JobSummary, PrincipalId, Project, ProjectId,
    ProjectStatus, ProposalId, ProposalStatus, ProposalView, SubmitterView, UserProfile,
    UserRecord, UserType,
};
use crate::inbound::http::users::SetUserTypeRequest;

/// Enrich the generated document with the bearer credential security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerCredential",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Provider-issued bearer credential."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Marketplace core API",
        description = "Job marketplace authorization core: sessions, job reads and role changes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerCredential" = [])),
    paths(
        crate::inbound::http::jobs::get_job,
        crate::inbound::http::jobs::list_my_jobs,
        crate::inbound::http::users::set_user_type,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        PrincipalId,
        UserType,
        UserRecord,
        UserProfile,
        ProjectId,
        ProposalId,
        ProjectStatus,
        ProposalStatus,
        Project,
        CompanyCard,
        SubmitterView,
        ProposalView,
        JobGraph,
        JobSummary,
        SetUserTypeRequest,
    )),
    tags(
        (name = "jobs", description = "Job reads with per-viewer visibility"),
        (name = "users", description = "User role management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document structure.
    use super::*;

    #[test]
    fn document_registers_all_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for expected in [
            "/api/v1/jobs",
            "/api/v1/jobs/{id}",
            "/api/v1/users/{id}/type",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(expected), "missing path {expected}");
        }
    }

    #[test]
    fn document_registers_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("BearerCredential"));
    }
}
