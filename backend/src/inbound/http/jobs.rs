//! Job read endpoints.
//!
//! ```text
//! GET /api/v1/jobs         list the caller's own jobs (company only)
//! GET /api/v1/jobs/{id}    one job with company card and trimmed proposals
//! ```

use actix_web::{get, web};

use crate::domain::{Error, JobGraph, JobSummary, ProjectId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerCredential;
use crate::inbound::http::state::HttpState;

/// Read a single job page.
///
/// Public to any authenticated session; the proposal list is trimmed per
/// viewer. A malformed id is reported exactly like an absent one so the
/// response shape never reveals id validity.
#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job identifier")),
    responses(
        (status = 200, description = "Job graph", body = JobGraph),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["jobs"],
    operation_id = "getJob"
)]
#[get("/jobs/{id}")]
pub async fn get_job(
    state: web::Data<HttpState>,
    credential: BearerCredential,
    path: web::Path<String>,
) -> ApiResult<web::Json<JobGraph>> {
    let session = state.sessions.resolve(credential.token()).await?;
    let id: ProjectId = path
        .into_inner()
        .parse()
        .map_err(|_| Error::not_found("job not found"))?;
    let graph = state.jobs.get_job(id, &session).await?;
    Ok(web::Json(graph))
}

/// List the caller's own jobs with proposal counts, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    responses(
        (status = 200, description = "Job summaries", body = [JobSummary]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["jobs"],
    operation_id = "listMyJobs"
)]
#[get("/jobs")]
pub async fn list_my_jobs(
    state: web::Data<HttpState>,
    credential: BearerCredential,
) -> ApiResult<web::Json<Vec<JobSummary>>> {
    let session = state.sessions.resolve(credential.token()).await?;
    let summaries = state.jobs.list_my_jobs(&session).await?;
    Ok(web::Json(summaries))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::FIXTURE_CREDENTIAL;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::fixtures()))
            .service(web::scope("/api/v1").service(get_job).service(list_my_jobs))
    }

    #[rstest]
    #[case("/api/v1/jobs")]
    #[case("/api/v1/jobs/6b4b1c32-4f4e-4a6c-a480-98a4d8c5a0f7")]
    #[actix_web::test]
    async fn endpoints_require_a_credential(#[case] uri: &str) {
        let app = test::init_service(test_app()).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case("6b4b1c32-4f4e-4a6c-a480-98a4d8c5a0f7")]
    #[case("not-a-uuid")]
    #[actix_web::test]
    async fn absent_and_malformed_ids_look_identical(#[case] id: &str) {
        let app = test::init_service(test_app()).await;
        let request = test::TestRequest::get()
            .uri(&format!("/api/v1/jobs/{id}"))
            .insert_header((header::AUTHORIZATION, format!("Bearer {FIXTURE_CREDENTIAL}")))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body.get("code"), Some(&serde_json::json!("not_found")));
    }

    #[actix_web::test]
    async fn listing_returns_json_array_for_company_sessions() {
        let app = test::init_service(test_app()).await;
        let request = test::TestRequest::get()
            .uri("/api/v1/jobs")
            .insert_header((header::AUTHORIZATION, format!("Bearer {FIXTURE_CREDENTIAL}")))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, serde_json::json!([]));
    }
}
