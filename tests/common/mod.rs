#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use category_manager::{
    config::ConfigManager,
    core::services::{CategoryService, ServiceError, ServiceResult},
    domain::{Category, CategoryFields, CategoryKind},
    notify::NotificationLog,
    storage::JsonCategoryService,
    views::CategoryListView,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// JSON store and config manager rooted in a fresh directory.
pub fn setup_test_env() -> (JsonCategoryService, ConfigManager) {
    let base = temp_base();
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    let store = JsonCategoryService::new(base.join("categories.json"));
    (store, config_manager)
}

pub fn category(name: &str, kind: Option<CategoryKind>, is_default: bool) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.into(),
        kind,
        color: Some("#10b981".into()),
        is_default: Some(is_default),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetAll,
    Create(CategoryFields),
    Update(Uuid, CategoryFields),
    Delete(Uuid),
}

#[derive(Default)]
struct Script {
    categories: Vec<Category>,
    calls: Vec<Call>,
    fail_get_all: bool,
    absent: bool,
    fail_create: bool,
    fail_update: bool,
    fail_delete: bool,
}

/// Service double that records every call and fails on request.
#[derive(Default)]
pub struct ScriptedService {
    script: Mutex<Script>,
}

impl ScriptedService {
    pub fn with_categories(categories: Vec<Category>) -> Self {
        let service = Self::default();
        service.script().categories = categories;
        service
    }

    /// `get_all` answers with no collection at all.
    pub fn absent() -> Self {
        let service = Self::default();
        service.script().absent = true;
        service
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().expect("lock scripted service")
    }

    pub fn fail_get_all(&self, fail: bool) {
        self.script().fail_get_all = fail;
    }

    pub fn fail_create(&self, fail: bool) {
        self.script().fail_create = fail;
    }

    pub fn fail_update(&self, fail: bool) {
        self.script().fail_update = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        self.script().fail_delete = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script().calls.clone()
    }

    pub fn mutation_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| !matches!(call, Call::GetAll))
            .count()
    }

    pub fn get_all_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::GetAll))
            .count()
    }

    pub fn stored(&self) -> Vec<Category> {
        self.script().categories.clone()
    }
}

impl CategoryService for ScriptedService {
    fn get_all(&self) -> ServiceResult<Option<Vec<Category>>> {
        let mut script = self.script();
        script.calls.push(Call::GetAll);
        if script.fail_get_all {
            return Err(ServiceError::Rejected("Network unreachable".into()));
        }
        if script.absent {
            return Ok(None);
        }
        Ok(Some(script.categories.clone()))
    }

    fn create(&self, fields: &CategoryFields) -> ServiceResult<Category> {
        let mut script = self.script();
        script.calls.push(Call::Create(fields.clone()));
        if script.fail_create {
            return Err(ServiceError::Rejected("create rejected".into()));
        }
        let category = Category::from_fields(Uuid::new_v4(), fields);
        script.categories.push(category.clone());
        script.absent = false;
        Ok(category)
    }

    fn update(&self, id: Uuid, fields: &CategoryFields) -> ServiceResult<Category> {
        let mut script = self.script();
        script.calls.push(Call::Update(id, fields.clone()));
        if script.fail_update {
            return Err(ServiceError::Rejected("update rejected".into()));
        }
        let category = script
            .categories
            .iter_mut()
            .find(|category| category.id == id)
            .ok_or(ServiceError::NotFound(id))?;
        category.apply(fields);
        Ok(category.clone())
    }

    fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let mut script = self.script();
        script.calls.push(Call::Delete(id));
        if script.fail_delete {
            return Err(ServiceError::Rejected("delete rejected".into()));
        }
        script.categories.retain(|category| category.id != id);
        Ok(())
    }
}

/// A list view wired to `service`, with notifications captured in the returned log.
pub fn list_view(service: Arc<ScriptedService>) -> (CategoryListView, Arc<NotificationLog>) {
    let log = Arc::new(NotificationLog::new());
    let view = CategoryListView::new(service, log.clone());
    (view, log)
}
