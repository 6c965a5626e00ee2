//! Cross-cutting request/response wrapping.
//!
//! A middleware takes the fully routed [`Router`] and returns it wrapped in
//! one more layer. [`wrap_middleware`] applies a list so that the first
//! entry is the outermost: its pre-logic runs first and its post-logic last.

use std::any::Any;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use super::ApiError;

/// A cross-cutting transform composed around the whole handler set.
pub trait Middleware {
    fn apply(&self, router: Router) -> Router;
}

impl<F> Middleware for F
where
    F: Fn(Router) -> Router,
{
    fn apply(&self, router: Router) -> Router {
        self(router)
    }
}

/// Wrap `router` in `middlewares`, first entry outermost.
pub fn wrap_middleware(router: Router, middlewares: &[&dyn Middleware]) -> Router {
    // Each layer added by Router::layer wraps everything added before it,
    // so apply in reverse.
    middlewares
        .iter()
        .rev()
        .fold(router, |router, middleware| middleware.apply(router))
}

/// Request spans and latency logging.
pub fn trace(router: Router) -> Router {
    router.layer(TraceLayer::new_for_http())
}

/// Permissive cross-origin headers and preflight handling.
pub fn cors(router: Router) -> Router {
    router.layer(
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(tower_http::cors::Any),
    )
}

/// Turn a handler panic into a 500 instead of dropping the connection.
pub fn catch_panic(router: Router) -> Router {
    router.layer(CatchPanicLayer::custom(panic_response))
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!(panic = detail, "handler panicked");

    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}

/// Abort requests that take longer than `duration` with 408.
pub fn timeout(duration: Duration) -> impl Middleware {
    move |router: Router| {
        router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            duration,
        ))
    }
}
