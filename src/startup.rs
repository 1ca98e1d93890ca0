use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    response::Html,
    routing::{delete, get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{handlers, middleware, openapi::ApiDoc};

pub fn build_router(state: Arc<crate::AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .cors_origin
                .parse::<HeaderValue>()
                .expect("CORS_ORIGIN is not a valid header value"),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    // Schedule routes
    let schedule_routes = Router::new()
        .route("/", get(handlers::schedules_handler::get_schedules))
        .route("/", post(handlers::schedules_handler::create_schedule))
        .route("/{id}", put(handlers::schedules_handler::update_schedule))
        .route("/{id}", delete(handlers::schedules_handler::delete_schedule));

    // Employee routes
    let employee_routes = Router::new()
        .route("/", get(handlers::employees_handler::get_employees))
        .route("/", post(handlers::employees_handler::create_employee))
        .route("/{id}", put(handlers::employees_handler::update_employee))
        .route("/{id}", delete(handlers::employees_handler::delete_employee));

    // Assignment routes
    let assignment_routes = Router::new()
        .route("/", get(handlers::assignments_handler::get_assignments_for_month))
        .route("/", post(handlers::assignments_handler::create_assignment))
        .route("/by-date", get(handlers::assignments_handler::get_assignments_for_date))
        .route("/range", get(handlers::assignments_handler::get_assignments_for_range))
        .route("/{uuid}", put(handlers::assignments_handler::update_assignment))
        .route("/{uuid}", delete(handlers::assignments_handler::delete_assignment));

    // Staffing requirement routes
    let requirement_routes = Router::new()
        .route("/", get(handlers::requirements_handler::get_requirements))
        .route("/", post(handlers::requirements_handler::create_requirement))
        .route("/{id}", put(handlers::requirements_handler::update_requirement))
        .route("/{id}", delete(handlers::requirements_handler::deactivate_requirement));

    // Coverage routes
    let coverage_routes = Router::new()
        .route("/", get(handlers::coverage_handler::get_coverage_for_date))
        .route("/range", get(handlers::coverage_handler::get_coverage_for_range));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .nest("/api/schedules", schedule_routes)
        .nest("/api/employees", employee_routes)
        .nest("/api/assignments", assignment_routes)
        .nest("/api/requirements", requirement_routes)
        .nest("/api/coverage", coverage_routes)
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/swagger-ui", get(swagger_ui))
        .layer(from_fn(middleware::metrics_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn swagger_ui() -> Html<&'static str> {
    Html(r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Covrota API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: '/api-docs/openapi.json',
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>
    "#)
}
