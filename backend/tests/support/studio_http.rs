//! HTTP helpers shared by the integration suites.
//!
//! Every call builds a fresh app over the same [`InMemoryStudio`], so state
//! persists between requests through the shared adapters.

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::Value;
use studio_backend::inbound::http::configure_api;
use studio_backend::test_support::studio::InMemoryStudio;

const BOUNDARY: &str = "studio-test-boundary";

/// One multipart form part.
pub(crate) enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        field: &'a str,
        file_name: &'a str,
        bytes: &'a [u8],
    },
}

/// `(content-type, body)` for a multipart form.
pub(crate) fn multipart(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                field,
                file_name,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// Attach `Authorization: Bearer <token>`.
pub(crate) fn with_bearer(request: test::TestRequest, token: &str) -> test::TestRequest {
    request.insert_header(("Authorization", format!("Bearer {token}")))
}

/// Status and JSON body (`Value::Null` when the body is empty).
pub(crate) async fn send(studio: &InMemoryStudio, request: test::TestRequest) -> (StatusCode, Value) {
    send_with_limit(studio, request, None).await
}

pub(crate) async fn send_with_limit(
    studio: &InMemoryStudio,
    request: test::TestRequest,
    max_upload_bytes: Option<usize>,
) -> (StatusCode, Value) {
    let state = match max_upload_bytes {
        Some(limit) => studio.state_with_limit(limit),
        None => studio.state(),
    };
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_api),
    )
    .await;
    let res = test::call_service(&app, request.to_request()).await;
    let status = res.status();
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

/// Upload `name` into `kind` as `token`, with extra text fields.
pub(crate) async fn upload(
    studio: &InMemoryStudio,
    token: &str,
    kind: &str,
    name: &str,
    extra: &[(&str, &str)],
) -> (StatusCode, Value) {
    let mut parts = vec![
        Part::File {
            field: "asset",
            file_name: "portrait.png",
            bytes: b"\x89PNG fixture",
        },
        Part::Text("name", name),
    ];
    parts.extend(extra.iter().map(|&(field, value)| Part::Text(field, value)));
    let (content_type, body) = multipart(&parts);
    send(
        studio,
        with_bearer(
            test::TestRequest::post()
                .uri(&format!("/api/{kind}/upload"))
                .insert_header(("content-type", content_type))
                .set_payload(body),
            token,
        ),
    )
    .await
}

/// Names of the visible items of `kind`, in listing order.
pub(crate) async fn listed_names(studio: &InMemoryStudio, kind: &str) -> Vec<String> {
    let (status, body) = send(studio, test::TestRequest::get().uri(&format!("/api/{kind}"))).await;
    assert_eq!(status, StatusCode::OK, "listing {kind}: {body}");
    body.as_array()
        .expect("array body")
        .iter()
        .filter_map(|item| item.get("name").and_then(Value::as_str).map(str::to_owned))
        .collect()
}

/// `id` field of a JSON object.
pub(crate) fn id_of(body: &Value) -> i64 {
    body.get("id").and_then(Value::as_i64).expect("id field")
}
