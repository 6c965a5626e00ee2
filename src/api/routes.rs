//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{self, HelloResponse};
use super::middleware::{self, wrap_middleware};
use super::state::AppState;
use super::v1;
use super::{Config, ErrorResponse};
use crate::db::{Database, HealthState, HealthStatus, Status, Todo, TodoPayload};

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nestly API",
        version = "0.1.0",
        description = "CRUD service for todo items",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::hello,
        handlers::readiness,
        v1::list_todos,
        v1::get_todo,
        v1::create_todo,
        v1::update_todo,
        v1::delete_todo,
    ),
    components(
        schemas(
            HelloResponse,
            HealthStatus,
            HealthState,
            Todo,
            TodoPayload,
            Status,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "Greeting and readiness endpoints"),
        (name = "todos", description = "Todo management endpoints")
    )
)]
pub struct ApiDoc;

/// Bind every handler to its method and path, without middleware.
pub fn create_routes<D: Database + 'static>(state: AppState<D>, enable_docs: bool) -> Router {
    // System routes
    let system_routes = routes!(D => {
        get "/readiness" => handlers::readiness,
    })
    .route("/hello", get(handlers::hello));

    // Todo routes (generic over Database)
    let todo_routes = routes!(D => {
        get "/" => v1::list_todos,
        post "/todo" => v1::create_todo,
        get "/todo/{id}" => v1::get_todo,
        put "/todo/{id}" => v1::update_todo,
        delete "/todo/{id}" => v1::delete_todo,
    });

    let router = system_routes.merge(todo_routes);

    let router = if enable_docs {
        router.merge(Scalar::with_url("/docs", ApiDoc::openapi()))
    } else {
        router
    };

    router.with_state(state)
}

/// Create the full application: routes wrapped in the middleware chain.
pub fn create_router<D: Database + 'static>(state: AppState<D>, config: &Config) -> Router {
    with_middleware(create_routes(state, config.enable_docs), config)
}

/// Wrap `router` in the default chain.
///
/// Order, outermost first: tracing, CORS, panic trap, timeout. CORS sits
/// outside the panic trap and timeout so their 500 and 408 responses still
/// carry cross-origin headers.
pub fn with_middleware(router: Router, config: &Config) -> Router {
    let timeout = middleware::timeout(config.request_timeout);

    wrap_middleware(
        router,
        &[
            &middleware::trace,
            &middleware::cors,
            &middleware::catch_panic,
            &timeout,
        ],
    )
}
