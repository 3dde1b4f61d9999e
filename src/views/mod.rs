pub mod category_form;
pub mod category_list;

pub use category_form::{
    CategoryFormModal, FieldUpdate, FormPhase, ModalClose, SelectOption, SubmitOutcome,
    SubmitRequest,
};
pub use category_list::{
    Badge, BadgeVariant, CategoryCard, CategoryListView, DeleteOutcome, ListRender, ListState,
};
