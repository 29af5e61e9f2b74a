use crate::{MAX_CUSTOM_PICKLIST_LEN, MAX_QUESTION_TEXT_LEN};

/// A local, pre-submission validation failure.
///
/// Validation is entirely client-side and short-circuits submission; all
/// violations are collected and reported together before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Title, department, or applicable month is missing.
    #[error("form title, department, and applicable month must all be set")]
    IncompleteHeader,

    /// The form has no questions.
    #[error("a form needs at least one question")]
    NoQuestions,

    /// A question has no text.
    #[error("question {display_number} has no text")]
    InvalidQuestion { display_number: u32 },

    /// A question's text exceeds the maximum length.
    #[error("question {display_number} text exceeds {max} characters", max = MAX_QUESTION_TEXT_LEN)]
    TextTooLong { display_number: u32 },

    /// A custom picklist value string exceeds the maximum length.
    #[error(
        "question {display_number} picklist values exceed {max} characters",
        max = MAX_CUSTOM_PICKLIST_LEN
    )]
    PicklistTooLong { display_number: u32 },
}
