pub mod category_service;
pub mod memory;

pub use category_service::CategoryService;
pub use memory::InMemoryCategoryService;

pub use crate::errors::{ServiceError, ServiceResult};
