//! The remote boundary: payload shapes, the client trait, and the toast
//! channel through which every remote outcome reaches the user.
//!
//! The controller layer behind this trait owns persistence, permission
//! scoping, and duplicate detection; this crate only shapes requests and
//! interprets failures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pulseform_types::{InputType, ScaleConfigurations, SelectOption};

use crate::catalog::{CatalogFilter, FormRecord};
use crate::matrix::AdminResponses;
use crate::review::EmployeeReview;
use crate::sheet::FeedbackData;

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub variant: ToastVariant,
}

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Error,
    Info,
    Warning,
}

impl Toast {
    fn new(title: impl Into<String>, message: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, ToastVariant::Success)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, ToastVariant::Error)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, ToastVariant::Info)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, ToastVariant::Warning)
    }

    pub fn is_success(&self) -> bool {
        self.variant == ToastVariant::Success
    }
}

/// Substring marking a duplicate-form rejection in remote error messages.
///
/// The controller reports the conflict as a generic exception; the message
/// text is the only signal distinguishing it.
pub const DUPLICATE_FORM_MARKER: &str = "already exists";

/// A failure surfaced by a remote call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A form already exists for the same department and month.
    #[error("a feedback form for this department and month already exists")]
    Conflict,

    /// Any other remote failure; the raw message passes through to the user.
    #[error(transparent)]
    Remote(anyhow::Error),
}

impl ClientError {
    /// Classify a remote failure, detecting the duplicate-form conflict by
    /// its message substring.
    pub fn classify(error: impl Into<anyhow::Error>) -> Self {
        let error = error.into();
        if format!("{error:#}").contains(DUPLICATE_FORM_MARKER) {
            Self::Conflict
        } else {
            Self::Remote(error)
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict)
    }
}

/// The form header as transmitted to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPayload {
    pub title: String,
    pub department: String,
    /// First-of-month date the form applies to.
    pub applicable_month: NaiveDate,
}

/// One question as transmitted to the controller.
///
/// Only fields relevant to the question's resolved state are populated:
/// `picklist_values` is `None` unless the question is a custom picklist,
/// `scale_group` is `None` for Text/Picklist/Slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    pub question_text: String,
    pub input_type: InputType,
    pub picklist_values: Option<String>,
    pub scale_group: Option<String>,
}

/// One answer as transmitted to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPayload {
    pub question_id: String,
    pub answer: String,
}

/// A manager's feedback on an employee's submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerResponsePayload {
    pub employee_id: String,
    pub manager_response_text: String,
}

/// A platform user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub department: String,
    pub role: String,
}

/// The caller's visibility scope, as resolved server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissions {
    pub user_id: String,
    pub user_department: String,
    pub user_role: String,
    pub can_view_all_departments: bool,
    pub can_view_branch_filters: bool,
}

/// Form-builder metadata: offered input types, scale sets, and reusable
/// picklist groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputTypeMetadata {
    pub input_type_options: Vec<SelectOption>,
    pub scale_configurations: ScaleConfigurations,
    pub picklist_groups: Vec<SelectOption>,
}

/// The opaque remote-procedure boundary to the controller layer.
///
/// Calls are treated as non-cancellable once issued; callers guard against
/// concurrent submissions with explicit submitting flags. Implementations
/// take `&self` so a single client can serve every view.
pub trait FeedbackClient {
    /// The error type for this client.
    type Error: Into<anyhow::Error>;

    /// Create a form; fails with a duplicate-form conflict when one already
    /// exists for the same department and month. Returns the new form id.
    fn create_form(
        &self,
        form: &FormPayload,
        questions: &[QuestionPayload],
    ) -> Result<String, Self::Error>;

    /// Fetch form-builder metadata.
    fn input_type_metadata(&self) -> Result<InputTypeMetadata, Self::Error>;

    /// Fetch the current user.
    fn current_user(&self) -> Result<User, Self::Error>;

    /// Fetch the current user's visibility scope.
    fn current_user_permissions(&self) -> Result<UserPermissions, Self::Error>;

    /// Fetch the active form's questions and the caller's submission state.
    fn feedback_data(&self) -> Result<FeedbackData, Self::Error>;

    /// Submit a complete answer set for the given respondent.
    fn submit_feedback(
        &self,
        answers: &[AnswerPayload],
        respondent_id: &str,
    ) -> Result<(), Self::Error>;

    /// Dispatch the post-submission notification. A failure here is a
    /// partial failure, not a failed submission.
    fn notify_feedback_submitted(&self) -> Result<(), Self::Error>;

    /// Fetch the direct reports of the current user.
    fn users_under_current_user(&self) -> Result<Vec<User>, Self::Error>;

    /// Fetch an employee's submission for manager review.
    fn employee_response_for_manager(
        &self,
        employee_id: &str,
    ) -> Result<EmployeeReview, Self::Error>;

    /// Submit the manager's feedback on an employee's responses.
    fn submit_manager_response(
        &self,
        response: &ManagerResponsePayload,
    ) -> Result<(), Self::Error>;

    /// Fetch every user's responses for a form (admin view).
    fn all_user_responses_for_admin(&self, form_id: &str) -> Result<AdminResponses, Self::Error>;

    /// List previous forms matching the filter, scoped to the caller's role.
    fn forms_for_user(&self, filter: &CatalogFilter) -> Result<Vec<FormRecord>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_is_detected_by_message_substring() {
        let error = anyhow::anyhow!("A feedback form already exists for Sales in March");
        assert!(ClientError::classify(error).is_conflict());

        let error = anyhow::anyhow!("row lock timeout");
        assert!(!ClientError::classify(error).is_conflict());
    }

    #[test]
    fn conflict_is_detected_in_error_chain() {
        let root = anyhow::anyhow!("form already exists for this month");
        let wrapped = root.context("createForm failed");
        assert!(ClientError::classify(wrapped).is_conflict());
    }
}
