pub mod category;
pub mod common;

pub use category::{
    is_hex_color, Category, CategoryFields, CategoryKind, UnknownCategoryKind,
    DEFAULT_CATEGORY_COLOR,
};
pub use common::Displayable;
