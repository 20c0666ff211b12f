use axum::{
    routing::{any, get},
    Extension, Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{category_handler, health_handler, Category};
use crate::routes;
use crate::state::AppState;

/// Build the service router.
///
/// Every entry of [`routes::CATEGORY_ROUTES`] gets its own route bound to its
/// category; anything else falls through to the default 404.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new().route(routes::HEALTH, get(health_handler));

    for &(path, category) in routes::CATEGORY_ROUTES {
        router = router.route(
            path,
            any(category_handler).layer(Extension(Category(category))),
        );
    }

    router
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
