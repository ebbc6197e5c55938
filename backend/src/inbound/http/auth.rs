//! Bearer credential extraction for HTTP handlers.
//!
//! Handlers stay free of header parsing: they take a [`BearerCredential`]
//! and hand its token to the session service. A missing or malformed
//! `Authorization` header is rejected here, before any provider call.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};
use zeroize::Zeroizing;

use crate::domain::Error;

const BEARER_PREFIX: &str = "Bearer ";

/// Opaque bearer token taken from the `Authorization` header.
///
/// The token is held in [`Zeroizing`] storage so it is wiped when the
/// request scope ends.
pub struct BearerCredential(Zeroizing<String>);

impl BearerCredential {
    /// The raw token, without the `Bearer ` prefix.
    pub fn token(&self) -> &str {
        self.0.as_str()
    }
}

fn extract(req: &HttpRequest) -> Result<BearerCredential, Error> {
    let raw = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing credential"))?
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;

    let token = raw
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| Error::unauthorized("expected a bearer credential"))?;
    if token.trim().is_empty() {
        return Err(Error::unauthorized("missing credential"));
    }
    Ok(BearerCredential(Zeroizing::new(token.to_owned())))
}

impl FromRequest for BearerCredential {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    fn echo_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().route(
            "/",
            web::get().to(|credential: BearerCredential| async move {
                HttpResponse::Ok().body(credential.token().to_owned())
            }),
        )
    }

    #[rstest]
    #[case(None, StatusCode::UNAUTHORIZED)]
    #[case(Some("Basic dXNlcjpwdw=="), StatusCode::UNAUTHORIZED)]
    #[case(Some("Bearer "), StatusCode::UNAUTHORIZED)]
    #[case(Some("Bearer tok-123"), StatusCode::OK)]
    #[actix_web::test]
    async fn header_shapes_gate_extraction(
        #[case] header_value: Option<&str>,
        #[case] expected: StatusCode,
    ) {
        let app = test::init_service(echo_app()).await;
        let mut request = test::TestRequest::get().uri("/");
        if let Some(value) = header_value {
            request = request.insert_header((header::AUTHORIZATION, value));
        }
        let response = test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), expected);
    }

    #[actix_web::test]
    async fn token_is_exposed_without_the_prefix() {
        let app = test::init_service(echo_app()).await;
        let request = test::TestRequest::get()
            .uri("/")
            .insert_header((header::AUTHORIZATION, "Bearer tok-123"))
            .to_request();
        let body = test::call_and_read_body(&app, request).await;
        assert_eq!(body.as_ref(), b"tok-123");
    }
}
