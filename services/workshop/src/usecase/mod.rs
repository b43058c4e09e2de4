pub mod client;
pub mod employee;
pub mod repair_order;
pub mod service;
pub mod service_history;
pub mod vehicle;
pub mod warehouse;

use autofix_domain::access::EntityKind;

use crate::domain::repository::SearchPort;
use crate::error::WorkshopError;

/// Resolve an optional free-text query to matching row ids. `None` means
/// the query was absent or blank and no search predicate applies.
pub(crate) async fn matching_ids<S: SearchPort>(
    search: &S,
    kind: EntityKind,
    query: Option<&str>,
) -> Result<Option<Vec<i32>>, WorkshopError> {
    match query.map(str::trim) {
        Some(query) if !query.is_empty() => Ok(Some(search.search(kind, query).await?)),
        _ => Ok(None),
    }
}
