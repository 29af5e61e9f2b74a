//! An in-memory [`FeedbackClient`] for tests: scripted responses, recorded
//! requests, and natural duplicate-form rejection.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::catalog::{CatalogFilter, FormRecord};
use crate::client::{
    AnswerPayload, FeedbackClient, FormPayload, InputTypeMetadata, ManagerResponsePayload,
    QuestionPayload, User, UserPermissions,
};
use crate::matrix::AdminResponses;
use crate::review::EmployeeReview;
use crate::sheet::FeedbackData;

/// Error type of the test client; carries a scripted message.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TestClientError(pub String);

/// One recorded form creation.
#[derive(Debug, Clone)]
pub struct CreatedForm {
    pub form: FormPayload,
    pub questions: Vec<QuestionPayload>,
}

/// One recorded answer-set submission.
#[derive(Debug, Clone)]
pub struct SubmittedAnswers {
    pub respondent_id: String,
    pub answers: Vec<AnswerPayload>,
}

/// In-memory client with builder-style scripting.
#[derive(Debug, Default)]
pub struct TestClient {
    metadata: InputTypeMetadata,
    user: Option<User>,
    permissions: UserPermissions,
    feedback_data: FeedbackData,
    reports: Vec<User>,
    employee_reviews: HashMap<String, EmployeeReview>,
    admin_responses: HashMap<String, AdminResponses>,
    form_records: Vec<FormRecord>,
    fail_submit: Option<String>,
    fail_notify: bool,
    created_forms: RefCell<Vec<CreatedForm>>,
    submitted_answers: RefCell<Vec<SubmittedAnswers>>,
    manager_responses: RefCell<Vec<ManagerResponsePayload>>,
    review_fetches: RefCell<HashMap<String, usize>>,
    notifications: RefCell<usize>,
}

impl TestClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, metadata: InputTypeMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_permissions(mut self, permissions: UserPermissions) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_feedback_data(mut self, data: FeedbackData) -> Self {
        self.feedback_data = data;
        self
    }

    pub fn with_report(mut self, report: User) -> Self {
        self.reports.push(report);
        self
    }

    pub fn with_employee_review(mut self, employee_id: &str, review: EmployeeReview) -> Self {
        self.employee_reviews.insert(employee_id.to_string(), review);
        self
    }

    pub fn with_admin_responses(mut self, form_id: &str, responses: AdminResponses) -> Self {
        self.admin_responses.insert(form_id.to_string(), responses);
        self
    }

    pub fn with_form_record(mut self, record: FormRecord) -> Self {
        self.form_records.push(record);
        self
    }

    /// Script every answer submission to fail with the given message.
    pub fn fail_submit(mut self, message: impl Into<String>) -> Self {
        self.fail_submit = Some(message.into());
        self
    }

    /// Script the post-submission notification to fail.
    pub fn fail_notify(mut self) -> Self {
        self.fail_notify = true;
        self
    }

    pub fn created_forms(&self) -> Vec<CreatedForm> {
        self.created_forms.borrow().clone()
    }

    pub fn submitted_answers(&self) -> Vec<SubmittedAnswers> {
        self.submitted_answers.borrow().clone()
    }

    pub fn manager_responses(&self) -> Vec<ManagerResponsePayload> {
        self.manager_responses.borrow().clone()
    }

    /// How often a given employee's review was fetched.
    pub fn review_fetch_count(&self, employee_id: &str) -> usize {
        self.review_fetches
            .borrow()
            .get(employee_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn notification_count(&self) -> usize {
        *self.notifications.borrow()
    }

    fn month_matches(record_month: Option<NaiveDate>, filter: &CatalogFilter) -> bool {
        let month_ok = filter.month == 0
            || record_month.is_some_and(|date| date.month() == filter.month);
        let year_ok =
            filter.year == 0 || record_month.is_some_and(|date| date.year() == filter.year);
        month_ok && year_ok
    }
}

impl FeedbackClient for TestClient {
    type Error = TestClientError;

    fn create_form(
        &self,
        form: &FormPayload,
        questions: &[QuestionPayload],
    ) -> Result<String, Self::Error> {
        let duplicate = self.created_forms.borrow().iter().any(|created| {
            created.form.department == form.department
                && created.form.applicable_month == form.applicable_month
        });
        if duplicate {
            return Err(TestClientError(format!(
                "A feedback form for {} already exists for the selected month",
                form.department
            )));
        }
        let mut created = self.created_forms.borrow_mut();
        created.push(CreatedForm {
            form: form.clone(),
            questions: questions.to_vec(),
        });
        Ok(format!("form-{}", created.len()))
    }

    fn input_type_metadata(&self) -> Result<InputTypeMetadata, Self::Error> {
        Ok(self.metadata.clone())
    }

    fn current_user(&self) -> Result<User, Self::Error> {
        self.user
            .clone()
            .ok_or_else(|| TestClientError("no current user scripted".to_string()))
    }

    fn current_user_permissions(&self) -> Result<UserPermissions, Self::Error> {
        Ok(self.permissions.clone())
    }

    fn feedback_data(&self) -> Result<FeedbackData, Self::Error> {
        Ok(self.feedback_data.clone())
    }

    fn submit_feedback(
        &self,
        answers: &[AnswerPayload],
        respondent_id: &str,
    ) -> Result<(), Self::Error> {
        if let Some(message) = self.fail_submit.as_ref() {
            return Err(TestClientError(message.clone()));
        }
        self.submitted_answers.borrow_mut().push(SubmittedAnswers {
            respondent_id: respondent_id.to_string(),
            answers: answers.to_vec(),
        });
        Ok(())
    }

    fn notify_feedback_submitted(&self) -> Result<(), Self::Error> {
        if self.fail_notify {
            return Err(TestClientError("email dispatch failed".to_string()));
        }
        *self.notifications.borrow_mut() += 1;
        Ok(())
    }

    fn users_under_current_user(&self) -> Result<Vec<User>, Self::Error> {
        Ok(self.reports.clone())
    }

    fn employee_response_for_manager(
        &self,
        employee_id: &str,
    ) -> Result<EmployeeReview, Self::Error> {
        *self
            .review_fetches
            .borrow_mut()
            .entry(employee_id.to_string())
            .or_insert(0) += 1;
        self.employee_reviews
            .get(employee_id)
            .cloned()
            .ok_or_else(|| TestClientError(format!("no review scripted for {employee_id}")))
    }

    fn submit_manager_response(
        &self,
        response: &ManagerResponsePayload,
    ) -> Result<(), Self::Error> {
        self.manager_responses.borrow_mut().push(response.clone());
        Ok(())
    }

    fn all_user_responses_for_admin(&self, form_id: &str) -> Result<AdminResponses, Self::Error> {
        self.admin_responses
            .get(form_id)
            .cloned()
            .ok_or_else(|| TestClientError(format!("no responses scripted for {form_id}")))
    }

    fn forms_for_user(&self, filter: &CatalogFilter) -> Result<Vec<FormRecord>, Self::Error> {
        Ok(self
            .form_records
            .iter()
            .filter(|record| {
                let department_ok = filter
                    .department
                    .as_deref()
                    .is_none_or(|department| record.department == department);
                department_ok && Self::month_matches(record.applicable_month, filter)
            })
            .cloned()
            .collect())
    }
}
