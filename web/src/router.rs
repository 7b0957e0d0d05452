use crate::controller::{
    health_check_controller, inquiry_controller, user_controller, user_session_controller,
};
use crate::params;
use crate::ws::handler as notification_handler;
use crate::AppState;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use log::*;
use tower_http::cors::{Any, CorsLayer};

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Delivery Network API"
        ),
        paths(
            health_check_controller::root,
            health_check_controller::health_check,
            inquiry_controller::create,
            inquiry_controller::index,
            user_controller::register,
            user_controller::index,
            user_session_controller::login,
        ),
        components(
            schemas(
                domain::inquiries::Model,
                domain::users::Role,
                domain::user::Credentials,
                domain::token::AccessToken,
                domain::UserView,
                params::user::RegisterParams,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "delivery_network", description = "IT FARM GLOBAL Delivery Network API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines our bearer token authentication requirement for gaining access to our
// protected API endpoints for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Access token returned from a successful POST /token login",
                        ))
                        .build(),
                ),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state);

    Router::new()
        .merge(health_routes())
        .merge(inquiry_routes(app_state.clone()))
        .merge(user_routes(app_state.clone()))
        .merge(user_session_routes(app_state.clone()))
        .merge(notification_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .layer(cors)
}

fn health_routes() -> Router {
    Router::new()
        .route("/", get(health_check_controller::root))
        .route("/health", get(health_check_controller::health_check))
}

fn inquiry_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/inquiry", post(inquiry_controller::create))
        .route("/inquiry", get(inquiry_controller::index))
        .with_state(app_state)
}

fn user_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/register", post(user_controller::register))
        // Token enforcement happens inside the handler via the
        // AuthenticatedUser extractor, not a route layer.
        .route("/users", get(user_controller::index))
        .with_state(app_state)
}

fn user_session_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/token", post(user_session_controller::login))
        .with_state(app_state)
}

fn notification_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/notifications/admin",
            get(notification_handler::admin_notifications),
        )
        .with_state(app_state)
}

// Browser dashboards run on separate origins, so CORS is part of the public
// contract. Configured origins that are not valid header values are dropped
// with a warning rather than taking the server down. No credentialed
// requests: auth rides in the Authorization header, which wildcard headers
// already admit.
fn cors_layer(app_state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring unparseable allowed origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
