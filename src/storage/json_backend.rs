use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use uuid::Uuid;

use crate::{
    core::{services::CategoryService, utils::write_atomic},
    domain::category::{Category, CategoryFields},
    errors::{ServiceError, ServiceResult},
};

pub const STORE_SCHEMA_VERSION: u32 = 1;

/// On-disk envelope holding the category collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFile {
    pub schema_version: u32,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            schema_version: STORE_SCHEMA_VERSION,
            updated_at: Utc::now(),
            categories: Vec::new(),
        }
    }
}

/// Category service persisting every mutation to a single JSON file.
///
/// The file is re-read on every call so edits from another process are picked up on
/// the next reload.
pub struct JsonCategoryService {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonCategoryService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> ServiceResult<StoreFile> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let store: StoreFile = serde_json::from_str(&data)?;
        if store.schema_version > STORE_SCHEMA_VERSION {
            return Err(ServiceError::Storage(format!(
                "category store `{}` is from a newer schema version",
                self.path.display()
            )));
        }
        Ok(store)
    }

    fn write(&self, mut store: StoreFile) -> ServiceResult<()> {
        store.schema_version = STORE_SCHEMA_VERSION;
        store.updated_at = Utc::now();
        let json = serde_json::to_string_pretty(&store)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), count = store.categories.len(), "category store written");
        Ok(())
    }

    fn mutate<T>(&self, apply: impl FnOnce(&mut Vec<Category>) -> ServiceResult<T>) -> ServiceResult<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ServiceError::Storage("category store lock poisoned".into()))?;
        let mut store = self.read()?;
        let result = apply(&mut store.categories)?;
        self.write(store)?;
        Ok(result)
    }
}

impl CategoryService for JsonCategoryService {
    fn get_all(&self) -> ServiceResult<Option<Vec<Category>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(self.read()?.categories))
    }

    fn create(&self, fields: &CategoryFields) -> ServiceResult<Category> {
        self.mutate(|categories| {
            let category = Category::from_fields(Uuid::new_v4(), fields);
            categories.push(category.clone());
            Ok(category)
        })
    }

    fn update(&self, id: Uuid, fields: &CategoryFields) -> ServiceResult<Category> {
        self.mutate(|categories| {
            let category = categories
                .iter_mut()
                .find(|category| category.id == id)
                .ok_or(ServiceError::NotFound(id))?;
            category.apply(fields);
            Ok(category.clone())
        })
    }

    fn delete(&self, id: Uuid) -> ServiceResult<()> {
        self.mutate(|categories| {
            let before = categories.len();
            categories.retain(|category| category.id != id);
            if categories.len() == before {
                return Err(ServiceError::NotFound(id));
            }
            Ok(())
        })
    }
}
