// Route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/health";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI: &str = "/swagger-ui";

/// Documentation-only path for the category handler; the OpenAPI document
/// replaces it with one entry per `CATEGORY_ROUTES` path
pub const CATEGORY_TEMPLATE: &str = "/{category}";

/// Category endpoints: each path serves the records of exactly one category
pub const CATEGORY_ROUTES: &[(&str, &str)] = &[
    ("/water", "water"),
    ("/electric", "electric"),
    ("/grass", "grass"),
    ("/legendary", "legendary"),
    ("/fire", "fire"),
];
