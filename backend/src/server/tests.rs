//! Application assembly: routing, static uploads and readiness.

use super::*;
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::{fixture, rstest};
use studio_backend::domain::ports::AssetStorage;
use studio_backend::test_support::studio::{InMemoryStudio, PLAYER_TOKEN};
use studio_backend::test_support::uploads::TempUploads;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

fn deps(health_state: web::Data<HealthState>, uploads: &TempUploads) -> AppDependencies {
    AppDependencies {
        health_state,
        http_state: web::Data::new(InMemoryStudio::new().state()),
        uploads_dir: uploads.storage().root_path().to_path_buf(),
    }
}

#[rstest]
#[actix_web::test]
async fn uploaded_files_are_served_under_uploads(health_state: web::Data<HealthState>) {
    let uploads = TempUploads::new().expect("temp uploads");
    let public = uploads
        .storage()
        .store("background", "1767225600000.png", b"png-bytes")
        .await
        .expect("store");
    let app = test::init_service(build_app(deps(health_state, &uploads))).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(&public).to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(test::read_body(res).await.as_ref(), b"png-bytes");
}

#[rstest]
#[actix_web::test]
async fn api_routes_carry_trace_header(health_state: web::Data<HealthState>) {
    let uploads = TempUploads::new().expect("temp uploads");
    let app = test::init_service(build_app(deps(health_state, &uploads))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/face")
            .insert_header(("Authorization", format!("Bearer {PLAYER_TOKEN}")))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("trace-id"));
}

#[rstest]
#[actix_web::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>) {
    let uploads = TempUploads::new().expect("temp uploads");
    let config = ServerConfig {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        http_state: web::Data::new(InMemoryStudio::new().state()),
        uploads_dir: uploads.storage().root_path().to_path_buf(),
    };
    assert!(!health_state.is_ready());

    let server = create_server(health_state.clone(), config).expect("server binds");

    assert!(health_state.is_ready());
    server.handle().stop(false).await;
}
