use crate::error::QueryError;
use crate::models::Pokemon;
use crate::store::{RecordStore, StoreError};

/// Key namespace shared by every record the writer process stores
pub const KEY_NAMESPACE: &str = "pokemon";

/// Build the `KEYS` pattern matching every record of a category.
///
/// Glob metacharacters in the category are escaped so it always matches
/// literally: `fire` gives `pokemon:fire:*`, `fi*` gives `pokemon:fi\*:*`.
pub fn category_pattern(category: &str) -> String {
    let mut escaped = String::with_capacity(category.len());
    for c in category.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("{}:{}:*", KEY_NAMESPACE, escaped)
}

/// Load every record stored under a category.
///
/// Issues one key enumeration followed by one fetch per key, in the order the
/// store returned the keys. The first failure aborts the query and discards
/// whatever was already decoded. A category with no keys yields an empty list.
pub async fn query_by_category(
    store: &dyn RecordStore,
    category: &str,
) -> Result<Vec<Pokemon>, QueryError> {
    let pattern = category_pattern(category);
    let keys = store.keys(&pattern).await?;

    let mut records = Vec::with_capacity(keys.len());
    for key in keys {
        // A key deleted between KEYS and GET counts as a failed fetch
        let data = store
            .get(&key)
            .await?
            .ok_or_else(|| StoreError::Unavailable(format!("key '{}' disappeared", key)))?;

        let record: Pokemon = match serde_json::from_slice(&data) {
            Ok(record) => record,
            Err(source) => return Err(QueryError::Decode { key, source }),
        };
        records.push(record);
    }

    tracing::debug!("Loaded {} records for category '{}'", records.len(), category);
    Ok(records)
}
