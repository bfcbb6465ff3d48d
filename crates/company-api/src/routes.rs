use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{companies, health, messages};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let company_routes = Router::new()
        .route(
            "/companies",
            get(companies::list_companies).post(companies::create_company),
        )
        .route("/companies/active", get(companies::list_active_companies))
        .route("/companies/code/{code}", get(companies::get_company_by_code))
        .route(
            "/companies/{id}",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        .route(
            "/companies/{id}/soft-delete",
            patch(companies::soft_delete_company),
        )
        .route("/companies/{id}/restore", patch(companies::restore_company));

    let mut app = Router::new()
        .route("/health", get(health::health_check))
        .merge(company_routes);

    if state.config.app.demo_endpoints {
        app = app.merge(message_routes());
    }

    app.with_state(state)
        // CORS
        .layer(CorsLayer::permissive())
        // Tracing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages/locale", get(messages::current_locale))
        .route("/messages/validation", get(messages::validation_messages))
        .route("/messages/business", get(messages::business_messages))
        .route("/messages/errors", get(messages::error_messages))
        .route("/messages/test/{message_code}", get(messages::lookup_message))
        .route("/messages/compare/{message_code}", get(messages::compare_message))
}
