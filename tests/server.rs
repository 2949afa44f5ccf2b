mod test_utils;

use std::sync::Arc;

use log::LevelFilter;
use pretty_assertions::assert_eq;

use micro_h1::logger::Logger;
use micro_h1::server::{self, ServerOptions};
use micro_h1::{handlers, Method, Request, Response, Router};

use test_utils::{run, run_with, status_of, NeverReady};

fn full_router() -> Router {
    let mut router = Router::new(Arc::new(Logger::new(LevelFilter::Off)));
    handlers::routes(&mut router);
    router
}

#[async_std::test]
async fn health_round_trip() {
    let wire = run(&full_router(), "GET /health HTTP/1.1\nHost: localhost\n\n").await;

    assert_eq!(status_of(&wire), 200);
    assert!(wire.contains("Content-Type: application/json\r\n"));
    assert!(wire.contains("Connection: close\r\n"));
    assert!(wire.contains("\"status\":\"healthy\""));
}

#[async_std::test]
async fn home_is_plain_text() {
    let wire = run(&full_router(), "GET / HTTP/1.1\n\n").await;

    assert_eq!(status_of(&wire), 200);
    assert!(wire.contains("Content-Type: text/plain\r\n"));
    assert!(wire.contains("Available endpoints"));
}

#[async_std::test]
async fn malformed_request_answers_400() {
    let wire = run(&full_router(), "GET /\n\n").await;

    assert_eq!(status_of(&wire), 400);
    assert!(wire.contains("\"error\":\"Bad Request\""));
    assert!(wire.contains("\"message\":\"The request was invalid\""));
}

#[async_std::test]
async fn unknown_method_answers_400() {
    let wire = run(&full_router(), "FOO / HTTP/1.1\n\n").await;
    assert_eq!(status_of(&wire), 400);
}

#[async_std::test]
async fn unmatched_route_answers_404() {
    let wire = run(&full_router(), "PATCH /users HTTP/1.1\n\n").await;

    assert_eq!(status_of(&wire), 404);
    assert!(wire.contains("\"error\":\"Not Found\""));
}

#[async_std::test]
async fn create_user_round_trip() {
    let body = r#"{"name":"Ann"}"#;
    let raw = format!(
        "POST /users HTTP/1.1\nContent-Length: {}\n\n{}",
        body.len(),
        body
    );
    let wire = run(&full_router(), &raw).await;

    assert_eq!(status_of(&wire), 201);
    assert!(wire.contains("\"name\":\"Ann\""));
    assert!(wire.contains("User created successfully"));
}

#[async_std::test]
async fn user_by_id_matches_placeholder_route() {
    let wire = run(&full_router(), "GET /users/42 HTTP/1.1\n\n").await;

    assert_eq!(status_of(&wire), 200);
    assert!(wire.contains("\"id\":\"42\""));
}

#[async_std::test]
async fn error_route_answers_500() {
    let wire = run(&full_router(), "GET /error HTTP/1.1\n\n").await;

    assert_eq!(status_of(&wire), 500);
    assert!(wire.contains("\"message\":\"Internal server error\""));
}

#[async_std::test]
async fn panicking_handler_answers_500() {
    fn boom(_req: &Request) -> Response {
        panic!("handler exploded");
    }

    let mut router = Router::new(Arc::new(Logger::new(LevelFilter::Off)));
    router.handle(Method::Get, "/boom", boom);

    let wire = run(&router, "GET /boom HTTP/1.1\n\n").await;

    assert_eq!(status_of(&wire), 500);
    assert!(wire.contains("\"error\":\"Internal Server Error\""));
}

#[async_std::test]
async fn read_timeout_answers_408() {
    let opts = ServerOptions {
        read_timeout: std::time::Duration::from_millis(20),
        ..ServerOptions::default()
    };
    let wire = run_with(&full_router(), NeverReady, &opts).await;

    assert_eq!(status_of(&wire), 408);
    assert!(wire.contains("\"message\":\"The request took too long to complete\""));
}

#[async_std::test]
async fn eof_before_any_data_writes_nothing() {
    let router = full_router();
    let logger = Logger::new(LevelFilter::Off);
    let opts = ServerOptions::default();

    let reader = futures_lite::io::Cursor::new(Vec::new());
    let mut out = futures_lite::io::Cursor::new(Vec::new());
    server::accept(reader, &mut out, "peer", &router, &logger, &opts).await;

    assert!(out.into_inner().is_empty());
}
