//! HTTP error mapping tests.

use super::*;
use actix_web::body::to_bytes;
use actix_web::test as actix_test;
use actix_web::{App, post};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::Value;

const TRACE_ID: &str = "6f1c2a5e-4b7d-4c1e-9f3a-2d8b7e6c5a41";

#[fixture]
fn traced_internal() -> Error {
    Error::internal("pool exhausted: 10 of 10 connections busy")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "table": "faces" }))
}

async fn body_of(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("response body is readable");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no token"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("admins only"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("order changed"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_follows_code(#[case] err: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace(traced_internal: Error) {
    let response = ResponseError::error_response(&traced_internal);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some(TRACE_ID)
    );

    let body = body_of(response).await;
    assert_eq!(body["error"], INTERNAL_MESSAGE);
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["traceId"], TRACE_ID);
    assert!(body.get("details").is_none());
}

#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let err = Error::invalid_request("name is required").with_details(json!({ "field": "name" }));
    let response = ResponseError::error_response(&err);
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());

    let body = body_of(response).await;
    assert_eq!(body["error"], "name is required");
    assert_eq!(body["details"]["field"], "name");
}

#[test]
fn actix_errors_become_internal() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), INTERNAL_MESSAGE);
}

#[derive(Deserialize)]
struct Ping {
    #[expect(dead_code, reason = "only deserialised")]
    value: i32,
}

#[post("/ping")]
async fn ping(_body: web::Json<Ping>) -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[actix_web::test]
async fn malformed_json_uses_error_shape() {
    let app = actix_test::init_service(App::new().app_data(json_config()).service(ping)).await;
    let req = actix_test::TestRequest::post()
        .uri("/ping")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"value\": ")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["error"], "invalid request body");
}
