//! Category list page: loads the collection, renders one card per category and
//! orchestrates add, edit and delete.
//!
//! Every successful mutation is followed by a full reload; the list never patches its
//! snapshot locally.

use std::sync::Arc;

use uuid::Uuid;

use crate::core::services::CategoryService;
use crate::domain::category::Category;
use crate::errors::FormError;
use crate::notify::{Confirmer, Notifier};

use super::category_form::{CategoryFormModal, FieldUpdate, SubmitOutcome};

const MSG_LOAD_FAILED: &str = "Failed to load categories";
const MSG_DELETED: &str = "Category deleted successfully";
const MSG_DELETE_FAILED: &str = "Failed to delete category";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this category?";

/// Lifecycle of the category collection.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Idle,
    Loading,
    Loaded(Vec<Category>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub variant: BadgeVariant,
}

/// Presentation model for a single category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCard {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub badge: Badge,
    pub default_badge: Option<Badge>,
    pub delete_enabled: bool,
}

impl CategoryCard {
    fn from_category(category: &Category) -> Self {
        let badge = if category.is_income() {
            Badge {
                label: "Income",
                variant: BadgeVariant::Success,
            }
        } else {
            Badge {
                label: "Expense",
                variant: BadgeVariant::Error,
            }
        };
        let default_badge = category.is_default().then_some(Badge {
            label: "Default",
            variant: BadgeVariant::Info,
        });
        Self {
            id: category.id,
            name: category.name.clone(),
            color: category.display_color().to_string(),
            badge,
            default_badge,
            delete_enabled: !category.is_default(),
        }
    }
}

/// What the page shows for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRender {
    Loading,
    /// Replaces the list; the page offers a retry that re-runs the load.
    Error { message: String },
    Empty {
        message: &'static str,
        description: &'static str,
        action_label: &'static str,
    },
    Cards(Vec<CategoryCard>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Default categories cannot be deleted from the list.
    Blocked,
    Cancelled,
    Deleted,
    Failed,
    NotFound,
}

pub struct CategoryListView {
    service: Arc<dyn CategoryService>,
    notifier: Arc<dyn Notifier>,
    state: ListState,
    modal: Option<CategoryFormModal>,
}

impl CategoryListView {
    pub fn new(service: Arc<dyn CategoryService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            state: ListState::Idle,
            modal: None,
        }
    }

    /// Initial load when the page is first shown.
    pub fn mount(&mut self) {
        self.load();
    }

    /// Replaces the snapshot with the service's current collection.
    pub fn load(&mut self) {
        self.state = ListState::Loading;
        tracing::debug!("loading categories");
        self.state = match self.service.get_all() {
            Ok(categories) => {
                let categories = categories.unwrap_or_default();
                tracing::debug!(count = categories.len(), "categories loaded");
                ListState::Loaded(categories)
            }
            Err(err) => {
                tracing::error!(error = %err, "error loading categories");
                let message = err.to_string();
                self.notifier.error(MSG_LOAD_FAILED);
                ListState::Failed(if message.trim().is_empty() {
                    MSG_LOAD_FAILED.to_string()
                } else {
                    message
                })
            }
        };
    }

    /// Error view affordance.
    pub fn retry(&mut self) {
        self.load();
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ListState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ListState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Loaded categories in service order; empty unless loaded.
    pub fn categories(&self) -> &[Category] {
        match &self.state {
            ListState::Loaded(categories) => categories.as_slice(),
            _ => &[],
        }
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories().iter().find(|category| category.id == id)
    }

    pub fn open_create(&mut self) {
        self.modal = Some(CategoryFormModal::new(None));
    }

    pub fn open_edit(&mut self, category: &Category) {
        self.modal = Some(CategoryFormModal::new(Some(category.clone())));
    }

    /// Opens the editor for a loaded category. Returns false when the id is unknown.
    pub fn open_edit_by_id(&mut self, id: Uuid) -> bool {
        match self.category(id).cloned() {
            Some(category) => {
                self.open_edit(&category);
                true
            }
            None => false,
        }
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    pub fn modal(&self) -> Option<&CategoryFormModal> {
        self.modal.as_ref()
    }

    /// Category being edited, `None` both when creating and when the modal is closed.
    pub fn editing_category(&self) -> Option<&Category> {
        self.modal.as_ref().and_then(CategoryFormModal::editing)
    }

    pub fn set_modal_field(&mut self, update: FieldUpdate) -> Result<(), FormError> {
        self.modal
            .as_mut()
            .ok_or(FormError::NoModal)?
            .set_field(update)
    }

    /// Submits the open form; closes it and reloads on success.
    pub fn submit_modal(&mut self) -> Option<SubmitOutcome> {
        let modal = self.modal.as_mut()?;
        let outcome = modal.submit(self.service.as_ref(), self.notifier.as_ref());
        if let SubmitOutcome::Saved { close, .. } = &outcome {
            self.close_modal(close.refresh);
        }
        Some(outcome)
    }

    /// Closes the form without saving. Returns false while a save is in flight.
    pub fn cancel_modal(&mut self) -> bool {
        match self.modal.as_ref().map(CategoryFormModal::cancel) {
            Some(Some(close)) => {
                self.close_modal(close.refresh);
                true
            }
            _ => false,
        }
    }

    pub fn close_modal(&mut self, refresh: bool) {
        self.modal = None;
        if refresh {
            self.load();
        }
    }

    /// Deletes a category after confirmation, then reloads.
    ///
    /// Failures leave the current snapshot untouched.
    pub fn delete(&mut self, id: Uuid, confirmer: &dyn Confirmer) -> DeleteOutcome {
        match self.category(id) {
            Some(category) if category.is_default() => {
                tracing::debug!(%id, "delete blocked for default category");
                return DeleteOutcome::Blocked;
            }
            Some(_) => {}
            None => return DeleteOutcome::NotFound,
        }
        if !confirmer.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        match self.service.delete(id) {
            Ok(()) => {
                tracing::info!(%id, "category deleted");
                self.notifier.success(MSG_DELETED);
                self.load();
                DeleteOutcome::Deleted
            }
            Err(err) => {
                tracing::error!(error = %err, %id, "error deleting category");
                self.notifier.error(MSG_DELETE_FAILED);
                DeleteOutcome::Failed
            }
        }
    }

    pub fn render(&self) -> ListRender {
        match &self.state {
            ListState::Idle | ListState::Loading => ListRender::Loading,
            ListState::Failed(message) => ListRender::Error {
                message: message.clone(),
            },
            ListState::Loaded(categories) if categories.is_empty() => ListRender::Empty {
                message: "No categories yet",
                description: "Create your first category to organize your transactions",
                action_label: "Add Category",
            },
            ListState::Loaded(categories) => {
                ListRender::Cards(categories.iter().map(CategoryCard::from_category).collect())
            }
        }
    }
}
