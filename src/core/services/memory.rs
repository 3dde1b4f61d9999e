use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::domain::category::{Category, CategoryFields};
use crate::errors::{ServiceError, ServiceResult};

use super::CategoryService;

/// Process-local category store preserving insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCategoryService {
    categories: Mutex<Vec<Category>>,
}

impl InMemoryCategoryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            categories: Mutex::new(categories),
        }
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> ServiceResult<MutexGuard<'_, Vec<Category>>> {
        self.categories
            .lock()
            .map_err(|_| ServiceError::Storage("category store lock poisoned".into()))
    }
}

impl CategoryService for InMemoryCategoryService {
    fn get_all(&self) -> ServiceResult<Option<Vec<Category>>> {
        Ok(Some(self.lock()?.clone()))
    }

    fn create(&self, fields: &CategoryFields) -> ServiceResult<Category> {
        let category = Category::from_fields(Uuid::new_v4(), fields);
        self.lock()?.push(category.clone());
        Ok(category)
    }

    fn update(&self, id: Uuid, fields: &CategoryFields) -> ServiceResult<Category> {
        let mut categories = self.lock()?;
        let category = categories
            .iter_mut()
            .find(|category| category.id == id)
            .ok_or(ServiceError::NotFound(id))?;
        category.apply(fields);
        Ok(category.clone())
    }

    fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let mut categories = self.lock()?;
        let before = categories.len();
        categories.retain(|category| category.id != id);
        if categories.len() == before {
            return Err(ServiceError::NotFound(id));
        }
        Ok(())
    }
}
