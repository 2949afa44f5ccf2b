//! The route handlers served by the binary.
//!
//! These are plain functions from request to response; everything they
//! serve is fabricated in place. The codec and router do not depend on
//! anything here.

use std::time::SystemTime;

use serde::Serialize;
use serde_json::{json, Value};

use crate::date;
use crate::response::SERVER_NAME;
use crate::{Method, Request, Response, Router};

#[derive(Debug, Serialize)]
struct User {
    id: String,
    name: String,
    email: String,
}

impl User {
    fn fabricated(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: format!("User {}", id),
            email: format!("user{}@example.com", id),
        }
    }
}

/// Register the full route table, in match order.
pub fn routes(router: &mut Router) {
    router.handle(Method::Get, "/", home);
    router.handle(Method::Get, "/users", get_users);
    router.handle(Method::Post, "/users", create_user);
    router.handle(Method::Get, "/users/{id}", get_user);
    router.handle(Method::Put, "/users/{id}", update_user);
    router.handle(Method::Delete, "/users/{id}", delete_user);
    router.handle(Method::Get, "/health", health);
    router.handle(Method::Get, "/error", error);
}

fn home(_request: &Request) -> Response {
    let body = "Welcome to our HTTP server!\n\nAvailable endpoints:\n\
                - GET /\n- GET /users\n- POST /users\n- GET /users/{id}\n\
                - PUT /users/{id}\n- DELETE /users/{id}\n- GET /health\n- GET /error";
    Response::new(200, "OK", "text/plain", body)
}

fn get_users(_request: &Request) -> Response {
    let users = vec![
        User {
            id: "1".to_owned(),
            name: "John".to_owned(),
            email: "john@example.com".to_owned(),
        },
        User {
            id: "2".to_owned(),
            name: "Jane".to_owned(),
            email: "jane@example.com".to_owned(),
        },
    ];
    Response::json(200, "OK", &users)
}

fn create_user(request: &Request) -> Response {
    let data = match parse_json_body(request) {
        Ok(data) => data,
        Err(response) => return response,
    };

    let body = json!({
        "message": "User created successfully",
        "data": data,
    });
    Response::json(201, "Created", &body)
}

fn get_user(request: &Request) -> Response {
    let id = match user_id(request) {
        Ok(id) => id,
        Err(response) => return response,
    };
    Response::json(200, "OK", &User::fabricated(id))
}

fn update_user(request: &Request) -> Response {
    let id = match user_id(request) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let data = match parse_json_body(request) {
        Ok(data) => data,
        Err(response) => return response,
    };

    let body = json!({
        "message": format!("User {} updated successfully", id),
        "data": data,
    });
    Response::json(200, "OK", &body)
}

fn delete_user(request: &Request) -> Response {
    let id = match user_id(request) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let body = json!({
        "message": format!("User {} deleted successfully", id),
    });
    Response::json(200, "OK", &body)
}

fn health(_request: &Request) -> Response {
    let body = json!({
        "status": "healthy",
        "timestamp": date::fmt_rfc3339(SystemTime::now()),
        "server": SERVER_NAME,
        "uptime": "unknown",
    });
    Response::json(200, "OK", &body)
}

/// A deliberate failure route: exercises the panic containment when the
/// path asks for it, otherwise answers with the standard 500 body.
fn error(request: &Request) -> Response {
    if request.path.contains("panic") {
        panic!("deliberate test panic");
    }
    Response::error(500, "Internal Server Error")
}

fn user_id(request: &Request) -> Result<&str, Response> {
    match request.path.strip_prefix("/users/") {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(Response::error(400, "Bad Request - Invalid user ID")),
    }
}

fn parse_json_body(request: &Request) -> Result<Value, Response> {
    if request.body.is_empty() {
        return Err(Response::error(400, "Bad Request - Body required"));
    }
    serde_json::from_str(&request.body)
        .map_err(|_| Response::error(400, "Bad Request - Invalid JSON"))
}
