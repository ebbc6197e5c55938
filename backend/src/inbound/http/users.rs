//! User role endpoints.
//!
//! ```text
//! PUT /api/v1/users/{id}/type {"userType":"company"}
//! ```

use actix_web::{put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, PrincipalId, UserRecord, UserType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerCredential;
use crate::inbound::http::state::HttpState;

/// Request body for `PUT /api/v1/users/{id}/type`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetUserTypeRequest {
    pub user_type: UserType,
}

/// Change the caller's marketplace role in both identity stores.
///
/// The relational row is written first, then the provider claim. A
/// claims-stage failure returns 503 with `details.stage = "claims"` and
/// `details.relationalCommitted = true`; retrying the same request
/// completes the claims stage without a second relational write.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/type",
    params(("id" = String, Path, description = "User identifier (must be the caller)")),
    request_body = SetUserTypeRequest,
    responses(
        (status = 200, description = "Updated user", body = UserRecord),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 503, description = "Partial or full synchronisation failure", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "setUserType"
)]
#[put("/users/{id}/type")]
pub async fn set_user_type(
    state: web::Data<HttpState>,
    credential: BearerCredential,
    path: web::Path<String>,
    payload: web::Json<SetUserTypeRequest>,
) -> ApiResult<web::Json<UserRecord>> {
    let session = state.sessions.resolve(credential.token()).await?;
    let target = PrincipalId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let updated = state
        .user_type
        .set_user_type(&session, &target, payload.user_type)
        .await?;
    Ok(web::Json(updated))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{FIXTURE_CREDENTIAL, FIXTURE_PRINCIPAL_ID};
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
            .service(web::scope("/api/v1").service(set_user_type))
    }

    fn put_request(target: &str, authorised: bool) -> actix_web::test::TestRequest {
        let mut request = test::TestRequest::put()
            .uri(&format!("/api/v1/users/{target}/type"))
            .set_json(SetUserTypeRequest {
                user_type: UserType::Freelancer,
            });
        if authorised {
            request = request
                .insert_header((header::AUTHORIZATION, format!("Bearer {FIXTURE_CREDENTIAL}")));
        }
        request
    }

    #[actix_web::test]
    async fn role_changes_require_a_credential() {
        let app = test::init_service(test_app()).await;
        let response =
            test::call_service(&app, put_request(FIXTURE_PRINCIPAL_ID, false).to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn callers_may_change_their_own_role() {
        let app = test::init_service(test_app()).await;
        let response =
            test::call_service(&app, put_request(FIXTURE_PRINCIPAL_ID, true).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body.get("userType"), Some(&serde_json::json!("freelancer")));
    }

    #[rstest]
    #[actix_web::test]
    async fn foreign_targets_are_forbidden() {
        let app = test::init_service(test_app()).await;
        let response =
            test::call_service(&app, put_request("usr_someone_else", true).to_request()).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body.get("code"), Some(&serde_json::json!("forbidden")));
    }
}
