use crate::error::ApiError;
use crate::models::Pokemon;
use crate::query::query_by_category;
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::{Extension, State},
    http::header,
    response::{IntoResponse, Response},
};

/// Category bound to a route when the router is built
#[derive(Debug, Clone, Copy)]
pub struct Category(pub &'static str);

/// ANY /water, /electric, /grass, /legendary, /fire - List the route's records
///
/// Registered once per entry of the category route table; the method is not
/// checked. The body is a JSON array, empty when the category has no records.
#[utoipa::path(
    get,
    path = routes::CATEGORY_TEMPLATE,
    description = "Accepts any HTTP method. Served only on the fixed category paths.",
    responses(
        (status = 200, description = "Records of the category, in no particular order", body = [Pokemon]),
        (status = 500, description = "Store unreachable or a stored record is malformed", body = String, content_type = "text/plain")
    ),
    tag = "pokemon"
)]
pub async fn category_handler(
    State(state): State<AppState>,
    Extension(Category(category)): Extension<Category>,
) -> Result<Response, ApiError> {
    let records = query_by_category(state.store.as_ref(), category).await?;

    let body = serde_json::to_vec(&records).map_err(ApiError::Encode)?;

    tracing::info!("Returned {} '{}' records", records.len(), category);
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
