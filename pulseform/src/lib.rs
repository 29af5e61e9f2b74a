//! Employee-feedback form model: drafting, answering, reviewing, and
//! aggregating monthly feedback forms.
//!
//! The crate is transport-agnostic. Every remote interaction goes through
//! the [`FeedbackClient`] trait; views are plain state machines driven by
//! caller events and report outcomes as [`Toast`] values.
//!
//! - [`FormDraft`] builds and submits a new form (admin).
//! - [`AnswerSheet`] collects and submits a respondent's answers.
//! - [`ReviewBoard`] lets a manager read and respond to reports' submissions.
//! - [`ResponseMatrix`] aggregates every user's answers for the admin view.
//! - [`FormCatalog`] lists previous forms under role-based scoping.
//!
//! Core question and answer types are re-exported from `pulseform-types`.

pub use pulseform_types::*;

pub mod catalog;
pub mod client;
pub mod draft;
pub mod matrix;
pub mod review;
pub mod sheet;
pub mod test_client;

pub use catalog::{CatalogFilter, FormCatalog, FormRecord, FormSummary};
pub use client::{
    AnswerPayload, ClientError, FeedbackClient, FormPayload, InputTypeMetadata,
    ManagerResponsePayload, QuestionPayload, Toast, ToastVariant, User, UserPermissions,
};
pub use draft::{DraftError, DraftQuestion, FormDraft, QuestionPatch};
pub use matrix::{
    AdminResponses, OrgFilterState, ResponseFilter, ResponseMatrix, StatusFilter, UserResponse,
};
pub use review::{EmployeeReview, ReviewBoard};
pub use sheet::{AnswerSheet, FeedbackData, FeedbackQuestion, SheetError};
pub use test_client::TestClient;
