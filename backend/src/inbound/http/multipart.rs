//! Multipart form decoding for upload endpoints.
//!
//! Handlers read the whole form up front into an [`UploadForm`] and hand the
//! raw values to the domain, which owns every validation rule. File parts are
//! capped at the configured byte limit while streaming so an oversized upload
//! never lands in memory in full.

use std::collections::HashMap;

use actix_multipart::{Field, Multipart};
use futures_util::TryStreamExt;
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, UploadedFile};

/// Text parts are small form values; anything larger is rejected.
const MAX_TEXT_BYTES: usize = 64 * 1024;

/// Decoded multipart form.
#[derive(Debug, Default)]
pub struct UploadForm {
    texts: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

fn malformed(error: impl std::fmt::Display) -> Error {
    debug!(%error, "multipart body rejected");
    Error::invalid_request("malformed multipart body")
}

fn too_large(field: &str, limit: usize) -> Error {
    Error::invalid_request(format!("{field} exceeds the {limit} byte limit")).with_details(json!({
        "field": field,
        "code": "too_large",
        "limit": limit,
    }))
}

async fn read_capped(field: &mut Field, name: &str, limit: usize) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        if buffer.len() + chunk.len() > limit {
            return Err(too_large(name, limit));
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer)
}

impl UploadForm {
    /// Drain `payload`, treating parts named in `file_fields` as files.
    pub async fn read(
        mut payload: Multipart,
        file_fields: &[&str],
        max_file_bytes: usize,
    ) -> Result<Self, Error> {
        let mut form = Self::default();
        while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
            let Some(name) = field.name().map(str::to_owned) else {
                // Unnamed parts carry nothing addressable; drain and move on.
                while field.try_next().await.map_err(malformed)?.is_some() {}
                continue;
            };

            if file_fields.contains(&name.as_str()) {
                let file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .map(str::to_owned)
                    .filter(|n| !n.is_empty());
                let bytes = read_capped(&mut field, &name, max_file_bytes).await?;
                // Browsers submit an empty, unnamed part when no file was chosen.
                if file_name.is_none() && bytes.is_empty() {
                    continue;
                }
                form.files.insert(name, UploadedFile::new(file_name, bytes));
            } else {
                let bytes = read_capped(&mut field, &name, MAX_TEXT_BYTES).await?;
                let text = String::from_utf8(bytes).map_err(|_| {
                    Error::invalid_request(format!("{name} must be UTF-8 text")).with_details(
                        json!({ "field": name, "code": "invalid_text" }),
                    )
                })?;
                form.texts.insert(name, text);
            }
        }
        Ok(form)
    }

    /// Remove and return a text value.
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.texts.remove(name)
    }

    /// Remove and return a file part.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::{App, HttpResponse, test, web};

    const BOUNDARY: &str = "studio-boundary";

    fn body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, file_name, content) in parts {
            out.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match file_name {
                Some(file) => out.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => out.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            out.extend_from_slice(content);
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        out
    }

    async fn echo(payload: Multipart) -> Result<HttpResponse, Error> {
        let mut form = UploadForm::read(payload, &["asset"], 8).await?;
        let file = form.take_file("asset");
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "name": form.take_text("name"),
            "fileName": file.as_ref().and_then(|f| f.file_name.clone()),
            "size": file.map(|f| f.bytes.len()),
        })))
    }

    async fn post(parts: &[(&str, Option<&str>, &[u8])]) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(App::new().route("/", web::post().to(echo))).await;
        let req = test::TestRequest::post()
            .uri("/")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body(parts))
            .to_request();
        test::call_service(&app, req).await
    }

    #[actix_web::test]
    async fn collects_text_and_file_parts() {
        let res = post(&[("name", None, b"smile"), ("asset", Some("a.png"), b"1234")]).await;
        assert!(res.status().is_success());
        let json: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(json["name"], "smile");
        assert_eq!(json["fileName"], "a.png");
        assert_eq!(json["size"], 4);
    }

    #[actix_web::test]
    async fn empty_unnamed_file_part_counts_as_absent() {
        let res = post(&[("name", None, b"smile"), ("asset", Some(""), b"")]).await;
        let json: serde_json::Value = test::read_body_json(res).await;
        assert!(json["size"].is_null());
    }

    #[actix_web::test]
    async fn oversized_file_is_rejected() {
        let res = post(&[("asset", Some("big.png"), b"0123456789")]).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let err: Error = test::read_body_json(res).await;
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|d| d.get("code")).and_then(|c| c.as_str()),
            Some("too_large")
        );
    }
}
