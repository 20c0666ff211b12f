use utoipa::{Modify, OpenApi};

use crate::error::{HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::Pokemon;
use crate::routes;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "pokedex-redis API",
        version = "1.0.0",
        description = "Read-only Pokémon listings by category, backed by Redis"
    ),
    paths(
        handlers::health::health_handler,
        handlers::category::category_handler
    ),
    components(
        schemas(
            Pokemon,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    modifiers(&CategoryPaths),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "pokemon", description = "Pokémon listings by category")
    )
)]
pub struct ApiDoc;

/// Expands the category handler's template entry into the literal routes
struct CategoryPaths;

impl Modify for CategoryPaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let Some(template) = openapi.paths.paths.remove(routes::CATEGORY_TEMPLATE) else {
            return;
        };

        for &(path, category) in routes::CATEGORY_ROUTES {
            let mut item = template.clone();
            if let Some(operation) = item.get.as_mut() {
                operation.operation_id = Some(format!("list_{}", category));
                operation.summary = Some(format!("List {} Pokémon", category));
            }
            openapi.paths.paths.insert(path.to_string(), item);
        }
    }
}
