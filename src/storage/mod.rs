pub mod json_backend;

pub use json_backend::{JsonCategoryService, StoreFile, STORE_SCHEMA_VERSION};
