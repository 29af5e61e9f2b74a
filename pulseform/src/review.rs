//! The manager's review board: per-report expansion, lazy response
//! fetching, and feedback submission.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::client::{FeedbackClient, ManagerResponsePayload, Toast, User};

/// Maximum length of a manager's feedback text.
pub const MAX_FEEDBACK_LEN: usize = 500;

/// One of an employee's answered questions, pre-rendered server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    pub question_text: String,
    pub answer: String,
}

/// An employee's submission as fetched for manager review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeReview {
    /// Whether an active form exists for the employee's department.
    pub form_exists: bool,
    pub has_employee_submitted: bool,
    pub has_manager_submitted: bool,
    #[serde(default)]
    pub manager_response_text: Option<String>,
    #[serde(default)]
    pub questions: Vec<AnsweredQuestion>,
}

/// Per-employee state on the review board.
#[derive(Debug, Clone, Default)]
pub struct ReviewEntry {
    pub expanded: bool,
    /// Fetched lazily on first expansion.
    pub response: Option<EmployeeReview>,
    pub feedback_text: String,
    pub show_feedback_input: bool,
    submitting: bool,
}

impl ReviewEntry {
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

/// The manager's view over their direct reports.
#[derive(Debug, Clone, Default)]
pub struct ReviewBoard {
    reports: Vec<User>,
    entries: HashMap<String, ReviewEntry>,
}

impl ReviewBoard {
    /// Load the current manager's direct reports.
    pub fn load<C: FeedbackClient>(client: &C) -> Result<Self, C::Error> {
        let reports = client.users_under_current_user()?;
        let entries = reports
            .iter()
            .map(|report| (report.id.clone(), ReviewEntry::default()))
            .collect();
        Ok(Self { reports, entries })
    }

    pub fn reports(&self) -> &[User] {
        &self.reports
    }

    pub fn entry(&self, employee_id: &str) -> Option<&ReviewEntry> {
        self.entries.get(employee_id)
    }

    fn entry_mut(&mut self, employee_id: &str) -> &mut ReviewEntry {
        self.entries.entry(employee_id.to_string()).or_default()
    }

    /// Toggle an employee's expansion, fetching their submission on first
    /// expansion. Collapsing keeps the fetched response cached.
    pub fn toggle_expanded<C: FeedbackClient>(
        &mut self,
        client: &C,
        employee_id: &str,
    ) -> Result<(), C::Error> {
        let needs_fetch = {
            let entry = self.entry_mut(employee_id);
            entry.expanded = !entry.expanded;
            entry.expanded && entry.response.is_none()
        };
        if needs_fetch {
            let response = client.employee_response_for_manager(employee_id)?;
            self.entry_mut(employee_id).response = Some(response);
        }
        Ok(())
    }

    pub fn set_feedback_text(&mut self, employee_id: &str, text: impl Into<String>) {
        self.entry_mut(employee_id).feedback_text = text.into();
    }

    pub fn show_feedback_input(&mut self, employee_id: &str) {
        self.entry_mut(employee_id).show_feedback_input = true;
    }

    /// Dismiss the feedback editor, discarding the unsubmitted draft.
    pub fn cancel_feedback_input(&mut self, employee_id: &str) {
        let entry = self.entry_mut(employee_id);
        entry.show_feedback_input = false;
        entry.feedback_text.clear();
    }

    /// Validate and submit the manager's feedback for one employee.
    ///
    /// On success the entry's fetched response records the submission, so
    /// re-expanding shows the feedback without another fetch.
    pub fn submit_feedback<C: FeedbackClient>(
        &mut self,
        client: &C,
        employee_id: &str,
    ) -> Toast {
        let entry = self.entry_mut(employee_id);
        if entry.submitting {
            return Toast::warning("Please wait", "A submission is already in progress");
        }
        let text = entry.feedback_text.trim().to_string();
        if text.is_empty() {
            return Toast::error("Error", "Please enter feedback before submitting");
        }
        if text.chars().count() > MAX_FEEDBACK_LEN {
            return Toast::error(
                "Error",
                format!("Feedback must be less than {MAX_FEEDBACK_LEN} characters"),
            );
        }

        entry.submitting = true;
        let payload = ManagerResponsePayload {
            employee_id: employee_id.to_string(),
            manager_response_text: text.clone(),
        };
        let toast = match client.submit_manager_response(&payload) {
            Ok(()) => {
                let entry = self.entry_mut(employee_id);
                if let Some(response) = entry.response.as_mut() {
                    response.has_manager_submitted = true;
                    response.manager_response_text = Some(text);
                }
                entry.show_feedback_input = false;
                entry.feedback_text.clear();
                Toast::success("Success", "Feedback submitted successfully")
            }
            Err(error) => Toast::error("Error", format!("{:#}", error.into())),
        };
        self.entry_mut(employee_id).submitting = false;
        toast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_client::TestClient;

    fn board(client: &TestClient) -> ReviewBoard {
        ReviewBoard::load(client).unwrap()
    }

    fn client_with_report() -> TestClient {
        TestClient::new()
            .with_report(User {
                id: "emp1".to_string(),
                name: "Asha Rao".to_string(),
                department: "Sales".to_string(),
                role: "Executive".to_string(),
            })
            .with_employee_review(
                "emp1",
                EmployeeReview {
                    form_exists: true,
                    has_employee_submitted: true,
                    has_manager_submitted: false,
                    manager_response_text: None,
                    questions: vec![AnsweredQuestion {
                        question_text: "How was this month?".to_string(),
                        answer: "Great".to_string(),
                    }],
                },
            )
    }

    #[test]
    fn expansion_fetches_once_and_caches() {
        let client = client_with_report();
        let mut board = board(&client);

        board.toggle_expanded(&client, "emp1").unwrap();
        assert!(board.entry("emp1").unwrap().expanded);
        assert!(board.entry("emp1").unwrap().response.is_some());

        board.toggle_expanded(&client, "emp1").unwrap();
        board.toggle_expanded(&client, "emp1").unwrap();
        assert_eq!(client.review_fetch_count("emp1"), 1);
    }

    #[test]
    fn empty_feedback_is_rejected() {
        let client = client_with_report();
        let mut board = board(&client);
        board.set_feedback_text("emp1", "   ");
        let toast = board.submit_feedback(&client, "emp1");
        assert_eq!(toast.message, "Please enter feedback before submitting");
    }

    #[test]
    fn overlong_feedback_is_rejected() {
        let client = client_with_report();
        let mut board = board(&client);
        board.set_feedback_text("emp1", "x".repeat(MAX_FEEDBACK_LEN + 1));
        let toast = board.submit_feedback(&client, "emp1");
        assert_eq!(
            toast.message,
            "Feedback must be less than 500 characters"
        );
    }

    #[test]
    fn successful_feedback_updates_cached_response() {
        let client = client_with_report();
        let mut board = board(&client);
        board.toggle_expanded(&client, "emp1").unwrap();
        board.show_feedback_input("emp1");
        board.set_feedback_text("emp1", "Keep it up");

        let toast = board.submit_feedback(&client, "emp1");
        assert!(toast.is_success());

        let entry = board.entry("emp1").unwrap();
        assert!(!entry.show_feedback_input);
        assert!(entry.feedback_text.is_empty());
        let response = entry.response.as_ref().unwrap();
        assert!(response.has_manager_submitted);
        assert_eq!(response.manager_response_text.as_deref(), Some("Keep it up"));
    }

    #[test]
    fn cancel_discards_the_draft() {
        let client = client_with_report();
        let mut board = board(&client);
        board.show_feedback_input("emp1");
        board.set_feedback_text("emp1", "half-written");
        board.cancel_feedback_input("emp1");

        let entry = board.entry("emp1").unwrap();
        assert!(!entry.show_feedback_input);
        assert!(entry.feedback_text.is_empty());
    }
}
