//! Route registration and request dispatch.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::logger::Logger;
use crate::{Error, Method, Request, Response, Result};

/// A route handler: a pure function from request to response.
///
/// Handlers may panic; the router contains the panic and reports it as
/// [`Error::HandlerFailure`] so the connection lifecycle can answer with
/// a 500.
pub type Handler = fn(&Request) -> Response;

/// A registered (method, path pattern, handler) triple.
#[derive(Debug, Clone)]
pub struct Route {
    method: Method,
    pattern: String,
    handler: Handler,
}

/// An ordered route table.
///
/// Routes are registered once at startup and matched in registration
/// order; the first match wins. The table is read-only afterwards, so it
/// can be shared across connections without synchronization.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
    logger: Arc<Logger>,
}

impl Router {
    /// Create an empty route table.
    pub fn new(logger: Arc<Logger>) -> Self {
        Self {
            routes: Vec::new(),
            logger,
        }
    }

    /// Register a handler for a method and path pattern.
    ///
    /// A pattern is either a literal path or a literal prefix followed by a
    /// single `{placeholder}` segment, e.g. `/users/{id}`.
    pub fn handle(&mut self, method: Method, pattern: &str, handler: Handler) {
        self.routes.push(Route {
            method,
            pattern: pattern.to_owned(),
            handler,
        });
        self.logger
            .debug(format_args!("Registered route: {} {}", method, pattern));
    }

    /// Find the matching handler for a request and invoke it.
    ///
    /// Returns `Ok` with a 404 error response when nothing matches. A
    /// panicking handler yields `Err(HandlerFailure)`; the caller supplies
    /// the eventual 500.
    pub fn route(&self, request: &Request) -> Result<Response> {
        for route in &self.routes {
            if route_matches(route, request) {
                return match panic::catch_unwind(AssertUnwindSafe(|| (route.handler)(request))) {
                    Ok(response) => Ok(response),
                    Err(cause) => {
                        let reason = panic_message(cause.as_ref());
                        self.logger.error(format_args!(
                            "Panic in route handler for {} {}: {}",
                            request.method, request.path, reason
                        ));
                        Err(Error::HandlerFailure(reason))
                    }
                };
            }
        }

        self.logger.info(format_args!(
            "Route not found: {} {}",
            request.method, request.path
        ));
        Ok(Response::error(404, "Not Found"))
    }
}

/// The matching strategy, kept in one place so it can be swapped out.
///
/// Methods must match exactly. A literal pattern matches on path equality.
/// A `{placeholder}` pattern matches any path that starts with the
/// pattern's literal prefix and has at least one character after it; the
/// match is deliberately not segment-aware, so `/users/{id}` also matches
/// `/users/123/extra`.
fn route_matches(route: &Route, request: &Request) -> bool {
    if route.method != request.method {
        return false;
    }

    if route.pattern == request.path {
        return true;
    }

    if let Some(idx) = route.pattern.find('{') {
        let prefix = &route.pattern[..idx];
        return request.path.starts_with(prefix) && request.path.len() > prefix.len();
    }

    false
}

fn panic_message(cause: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = cause.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;
    use pretty_assertions::assert_eq;

    fn request(method: Method, path: &str) -> Request {
        crate::server::decode(format!("{} {} HTTP/1.1\r\n\r\n", method, path).as_bytes())
            .unwrap()
    }

    fn ok_handler(_req: &Request) -> Response {
        Response::new(200, "OK", "text/plain", "ok")
    }

    fn teapot_handler(_req: &Request) -> Response {
        Response::new(418, "I'm a teapot", "text/plain", "")
    }

    fn panicking_handler(_req: &Request) -> Response {
        panic!("deliberate test panic");
    }

    fn router() -> Router {
        Router::new(Arc::new(Logger::new(LevelFilter::Off)))
    }

    #[test]
    fn exact_match() {
        let mut router = router();
        router.handle(Method::Get, "/health", ok_handler);

        let res = router.route(&request(Method::Get, "/health")).unwrap();
        assert_eq!(res.status, 200);
    }

    #[test]
    fn method_must_match_exactly() {
        let mut router = router();
        router.handle(Method::Get, "/users", ok_handler);

        let res = router.route(&request(Method::Patch, "/users")).unwrap();
        assert_eq!(res.status, 404);
    }

    #[test]
    fn placeholder_matches_non_empty_id() {
        let mut router = router();
        router.handle(Method::Get, "/users/{id}", ok_handler);

        assert_eq!(router.route(&request(Method::Get, "/users/42")).unwrap().status, 200);
        // Empty parameter value: no match.
        assert_eq!(router.route(&request(Method::Get, "/users/")).unwrap().status, 404);
    }

    #[test]
    fn placeholder_match_is_prefix_style() {
        let mut router = router();
        router.handle(Method::Get, "/users/{id}", ok_handler);

        // Not segment-aware: extra segments still match.
        let res = router.route(&request(Method::Get, "/users/42/extra")).unwrap();
        assert_eq!(res.status, 200);
    }

    #[test]
    fn first_registration_wins() {
        let mut router = router();
        router.handle(Method::Get, "/users/{id}", teapot_handler);
        router.handle(Method::Get, "/users/42", ok_handler);

        let res = router.route(&request(Method::Get, "/users/42")).unwrap();
        assert_eq!(res.status, 418);
    }

    #[test]
    fn no_match_is_a_structured_404() {
        let router = router();
        let res = router.route(&request(Method::Get, "/missing")).unwrap();

        assert_eq!(res.status, 404);
        assert!(res.body.contains("\"error\":\"Not Found\""));
    }

    #[test]
    fn panicking_handler_is_contained() {
        let mut router = router();
        router.handle(Method::Get, "/error", panicking_handler);

        match router.route(&request(Method::Get, "/error")) {
            Err(Error::HandlerFailure(reason)) => {
                assert_eq!(reason, "deliberate test panic")
            }
            other => panic!("expected HandlerFailure, got {:?}", other.map(|r| r.status)),
        }
    }
}
