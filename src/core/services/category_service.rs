use uuid::Uuid;

use crate::domain::category::{Category, CategoryFields};
use crate::errors::ServiceResult;

/// Data-access boundary for categories.
///
/// Implementations own the records; views only ever hold snapshots returned from
/// these calls. None of the methods retry, queue or cache.
pub trait CategoryService: Send + Sync {
    /// Returns every category in service order. `None` is treated as empty.
    fn get_all(&self) -> ServiceResult<Option<Vec<Category>>>;

    /// Creates a category and returns it with its assigned identifier.
    fn create(&self, fields: &CategoryFields) -> ServiceResult<Category>;

    fn update(&self, id: Uuid, fields: &CategoryFields) -> ServiceResult<Category>;

    fn delete(&self, id: Uuid) -> ServiceResult<()>;
}
