//! Create/edit form for a single category.
//!
//! The modal holds no state beyond the open form: it validates locally, performs at most
//! one `create` or `update` per submit and reports back through [`SubmitOutcome`]. The
//! owning list decides what closing means.

use uuid::Uuid;

use crate::core::services::CategoryService;
use crate::domain::category::{Category, CategoryFields, CategoryKind};
use crate::errors::{FormError, ServiceResult, ValidationError};
use crate::notify::Notifier;

const MSG_UPDATED: &str = "Category updated successfully";
const MSG_CREATED: &str = "Category created successfully";
const MSG_UPDATE_FAILED: &str = "Failed to update category";
const MSG_CREATE_FAILED: &str = "Failed to create category";

/// A single field edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Kind(Option<CategoryKind>),
    Color(String),
    IsDefault(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
}

/// Signal sent to the owner when the modal wants to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalClose {
    pub refresh: bool,
}

/// The one service call a validated submit performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Create(CategoryFields),
    Update(Uuid, CategoryFields),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation blocked the submit; nothing was sent.
    Invalid(ValidationError),
    /// A previous submit is still in flight.
    Busy,
    Saved { category: Category, close: ModalClose },
    /// The service rejected the call; the form stays open with its data intact.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone)]
pub struct CategoryFormModal {
    editing: Option<Category>,
    form: CategoryFields,
    phase: FormPhase,
}

impl CategoryFormModal {
    /// Opens the form, seeded from `editing` when present.
    pub fn new(editing: Option<Category>) -> Self {
        let form = CategoryFields::from_category(editing.as_ref());
        Self {
            editing,
            form,
            phase: FormPhase::Idle,
        }
    }

    pub fn form(&self) -> &CategoryFields {
        &self.form
    }

    pub fn editing(&self) -> Option<&Category> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Category"
        } else {
            "Add Category"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.is_busy(), self.is_editing()) {
            (true, _) => "Saving...",
            (false, true) => "Update",
            (false, false) => "Create",
        }
    }

    pub fn kind_options() -> Vec<SelectOption> {
        CategoryKind::ALL
            .iter()
            .map(|kind| SelectOption {
                value: kind.value(),
                label: match kind {
                    CategoryKind::Expense => "Expense",
                    CategoryKind::Income => "Income",
                },
            })
            .collect()
    }

    /// Merges one field into the form. Inputs are locked while a submit is in flight.
    pub fn set_field(&mut self, update: FieldUpdate) -> Result<(), FormError> {
        if self.is_busy() {
            return Err(FormError::Busy);
        }
        match update {
            FieldUpdate::Name(name) => self.form.name = name,
            FieldUpdate::Kind(kind) => self.form.kind = kind,
            FieldUpdate::Color(color) => self.form.color = color,
            FieldUpdate::IsDefault(flag) => self.form.is_default = flag,
        }
        Ok(())
    }

    /// Validates the form and enters the submitting phase.
    ///
    /// On error the returned outcome says why nothing should be sent; validation
    /// failures have already been reported to `notifier`.
    pub fn begin_submit(&mut self, notifier: &dyn Notifier) -> Result<SubmitRequest, SubmitOutcome> {
        if self.is_busy() {
            return Err(SubmitOutcome::Busy);
        }
        if let Err(invalid) = self.validate() {
            notifier.error(&invalid.to_string());
            return Err(SubmitOutcome::Invalid(invalid));
        }

        self.phase = FormPhase::Submitting;
        let fields = self.form.clone();
        Ok(match &self.editing {
            Some(category) => SubmitRequest::Update(category.id, fields),
            None => SubmitRequest::Create(fields),
        })
    }

    /// Applies the result of the service call started by [`Self::begin_submit`].
    pub fn complete_submit(
        &mut self,
        result: ServiceResult<Category>,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        self.phase = FormPhase::Idle;
        match result {
            Ok(category) => {
                let message = if self.is_editing() {
                    MSG_UPDATED
                } else {
                    MSG_CREATED
                };
                tracing::info!(id = %category.id, name = %category.name, "{message}");
                notifier.success(message);
                SubmitOutcome::Saved {
                    category,
                    close: ModalClose { refresh: true },
                }
            }
            Err(err) => {
                tracing::error!(error = %err, editing = self.is_editing(), "error saving category");
                notifier.error(if self.is_editing() {
                    MSG_UPDATE_FAILED
                } else {
                    MSG_CREATE_FAILED
                });
                SubmitOutcome::Failed
            }
        }
    }

    /// Validates, performs exactly one create-or-update call and reports the result.
    pub fn submit(&mut self, service: &dyn CategoryService, notifier: &dyn Notifier) -> SubmitOutcome {
        let request = match self.begin_submit(notifier) {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };
        tracing::debug!(?request, "submitting category form");
        let result = match &request {
            SubmitRequest::Create(fields) => service.create(fields),
            SubmitRequest::Update(id, fields) => service.update(*id, fields),
        };
        self.complete_submit(result, notifier)
    }

    /// Requests a close without refresh. Ignored while a submit is in flight.
    pub fn cancel(&self) -> Option<ModalClose> {
        if self.is_busy() {
            None
        } else {
            Some(ModalClose { refresh: false })
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.form.trimmed_name().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.form.kind.is_none() {
            return Err(ValidationError::MissingKind);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::InMemoryCategoryService;
    use crate::errors::ServiceError;
    use crate::notify::{Notification, NotificationLog};

    struct RejectingService;

    impl CategoryService for RejectingService {
        fn get_all(&self) -> ServiceResult<Option<Vec<Category>>> {
            Ok(None)
        }

        fn create(&self, _fields: &CategoryFields) -> ServiceResult<Category> {
            Err(ServiceError::Rejected("boom".into()))
        }

        fn update(&self, _id: Uuid, _fields: &CategoryFields) -> ServiceResult<Category> {
            Err(ServiceError::Rejected("boom".into()))
        }

        fn delete(&self, _id: Uuid) -> ServiceResult<()> {
            Err(ServiceError::Rejected("boom".into()))
        }
    }

    #[test]
    fn new_form_uses_defaults() {
        let modal = CategoryFormModal::new(None);
        assert_eq!(modal.form(), &CategoryFields::default());
        assert_eq!(modal.title(), "Add Category");
        assert_eq!(modal.submit_label(), "Create");
    }

    #[test]
    fn whitespace_name_is_rejected_before_any_call() {
        let log = NotificationLog::new();
        let service = InMemoryCategoryService::new();
        let mut modal = CategoryFormModal::new(None);
        modal.set_field(FieldUpdate::Name("   ".into())).unwrap();

        let outcome = modal.submit(&service, &log);
        assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::MissingName));
        assert!(service.snapshot().unwrap().is_empty());
        assert_eq!(
            log.entries(),
            vec![Notification::error("Please enter a category name")]
        );
        assert!(!modal.is_busy());
    }

    #[test]
    fn unset_kind_has_its_own_message() {
        let log = NotificationLog::new();
        let mut modal = CategoryFormModal::new(None);
        modal.set_field(FieldUpdate::Name("Rent".into())).unwrap();
        modal.set_field(FieldUpdate::Kind(None)).unwrap();

        let outcome = modal.submit(&InMemoryCategoryService::new(), &log);
        assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::MissingKind));
        assert_eq!(log.messages(), vec!["Please select a category type"]);
    }

    #[test]
    fn inputs_are_locked_while_submitting() {
        let log = NotificationLog::new();
        let mut modal = CategoryFormModal::new(None);
        modal.set_field(FieldUpdate::Name("Fuel".into())).unwrap();

        let request = modal.begin_submit(&log).unwrap();
        assert!(matches!(request, SubmitRequest::Create(ref f) if f.name == "Fuel"));
        assert_eq!(modal.submit_label(), "Saving...");
        assert_eq!(
            modal.set_field(FieldUpdate::Name("Other".into())),
            Err(FormError::Busy)
        );
        assert_eq!(modal.begin_submit(&log), Err(SubmitOutcome::Busy));
        assert_eq!(modal.cancel(), None);

        let outcome = modal.complete_submit(Err(ServiceError::Rejected("down".into())), &log);
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(!modal.is_busy());
        assert_eq!(modal.cancel(), Some(ModalClose { refresh: false }));
    }

    #[test]
    fn failed_update_keeps_form_and_reports_update() {
        let log = NotificationLog::new();
        let existing = Category {
            id: Uuid::new_v4(),
            name: "Travel".into(),
            kind: Some(CategoryKind::Expense),
            color: Some("#10b981".into()),
            is_default: Some(false),
        };
        let mut modal = CategoryFormModal::new(Some(existing));
        modal.set_field(FieldUpdate::Name("Trips".into())).unwrap();
        let before = modal.form().clone();

        assert_eq!(modal.submit(&RejectingService, &log), SubmitOutcome::Failed);
        assert_eq!(modal.form(), &before);
        assert_eq!(log.messages(), vec!["Failed to update category"]);
    }

    #[test]
    fn failed_create_reports_create() {
        let log = NotificationLog::new();
        let mut modal = CategoryFormModal::new(None);
        modal.set_field(FieldUpdate::Name("Gifts".into())).unwrap();
        assert_eq!(modal.submit(&RejectingService, &log), SubmitOutcome::Failed);
        assert_eq!(log.messages(), vec!["Failed to create category"]);
    }

    #[test]
    fn successful_create_requests_refresh() {
        let log = NotificationLog::new();
        let service = InMemoryCategoryService::new();
        let mut modal = CategoryFormModal::new(None);
        modal.set_field(FieldUpdate::Name("Groceries".into())).unwrap();

        match modal.submit(&service, &log) {
            SubmitOutcome::Saved { category, close } => {
                assert_eq!(category.name, "Groceries");
                assert!(close.refresh);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(log.messages(), vec!["Category created successfully"]);
    }

    #[test]
    fn kind_options_cover_both_types() {
        let options = CategoryFormModal::kind_options();
        assert_eq!(
            options,
            vec![
                SelectOption {
                    value: "expense",
                    label: "Expense"
                },
                SelectOption {
                    value: "income",
                    label: "Income"
                },
            ]
        );
    }
}
