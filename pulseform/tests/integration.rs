use chrono::{Duration, NaiveDate, TimeZone, Utc};
use serde_json::json;

use pulseform::client::{AnswerPayload, FormPayload, QuestionPayload};
use pulseform::matrix::{Branch, QuestionColumn, QuestionResponse, UserResponse};
use pulseform::review::{AnsweredQuestion, EmployeeReview};
use pulseform::sheet::{FeedbackData, FeedbackQuestion};
use pulseform::{
    AnswerSheet, FeedbackClient, FormCatalog, FormDraft, FormRecord, InputType, InputTypeMetadata,
    OrgFilterState, Question, QuestionPatch, ResponseFilter, ResponseMatrix, ReviewBoard,
    ScaleConfigurations, ScaleOption, SelectOption, StatusFilter, TestClient, ToastVariant, User,
    UserPermissions,
};

fn metadata() -> InputTypeMetadata {
    let mut scales = ScaleConfigurations::new();
    scales.insert(InputType::Rating, ScaleOption::new("Support", "⭐", "⭐", 1));
    scales.insert(InputType::Emoji, ScaleOption::new("Mood", "😀", "Happy", 1));
    scales.insert(InputType::Emoji, ScaleOption::new("Mood", "😞", "Sad", 2));
    InputTypeMetadata {
        input_type_options: InputType::ALL
            .into_iter()
            .map(|input_type| SelectOption::uniform(input_type.as_str()))
            .collect(),
        scale_configurations: scales,
        picklist_groups: vec![SelectOption::uniform("Satisfaction")],
    }
}

fn complete_draft() -> FormDraft {
    let mut draft = FormDraft::new(metadata());
    draft.set_department("Sales");
    draft.set_month_input("2024-03");
    draft
        .update_question(0, QuestionPatch::text("How was this month?"))
        .unwrap();
    draft.add_question();
    draft
        .update_question(1, QuestionPatch::input_type(InputType::Rating))
        .unwrap();
    draft
        .update_question(1, QuestionPatch::text("Rate support"))
        .unwrap();
    draft
        .update_question(1, QuestionPatch::scale_group("Support"))
        .unwrap();
    draft
}

#[test]
fn draft_submission_resets_and_raises_the_banner() {
    let client = TestClient::new();
    let now = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();

    let mut draft = complete_draft();
    let toast = draft.submit(&client, now);
    assert!(toast.is_success());
    assert_eq!(draft.created_form_id(), Some("form-1"));

    // Reset to a fresh single-question draft.
    assert_eq!(draft.title(), "");
    assert_eq!(draft.questions().len(), 1);
    assert!(draft.success_banner_visible(now));
    assert!(!draft.success_banner_visible(now + Duration::seconds(6)));

    let created = client.created_forms();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].form.title, "Sales Feedback March 2024");
    assert_eq!(created[0].questions.len(), 2);
    assert_eq!(created[0].questions[1].scale_group.as_deref(), Some("Support"));
}

#[test]
fn duplicate_form_surfaces_a_conflict_toast() {
    let client = TestClient::new();
    let now = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();

    complete_draft().submit(&client, now);
    let toast = complete_draft().submit(&client, now);

    assert_eq!(toast.variant, ToastVariant::Error);
    assert_eq!(toast.title, "Error creating form");
    assert!(toast.message.contains("already exists"));
    assert_eq!(client.created_forms().len(), 1);
}

fn fetched_questions() -> Vec<FeedbackQuestion> {
    let mut text = Question::new("q1", 1);
    text.text = "How was this month?".to_string();

    let mut rating = Question::new("q2", 2);
    rating.text = "Rate support".to_string();
    rating.input_type = InputType::Rating;
    rating.scale_group = Some("Support".to_string());

    vec![
        FeedbackQuestion {
            question: text,
            scale_options: Vec::new(),
            slider_min: None,
            slider_max: None,
            answer: None,
        },
        FeedbackQuestion {
            question: rating,
            scale_options: vec![ScaleOption::new("Support", "⭐", "⭐", 1)],
            slider_min: None,
            slider_max: None,
            answer: None,
        },
    ]
}

#[test]
fn answer_sheet_submits_encoded_answers_and_renders_them_back() {
    let client = TestClient::new();
    let mut sheet = AnswerSheet::new(FeedbackData {
        questions: fetched_questions(),
        has_submitted: false,
    });
    sheet.record_text("q1", "Busy but good").unwrap();
    sheet.record_rating("q2", 4).unwrap();

    let toast = sheet.submit(&client, "user-1");
    assert!(toast.is_success());
    assert!(sheet.has_submitted());

    let submissions = client.submitted_answers();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].respondent_id, "user-1");
    assert_eq!(submissions[0].answers[1].answer, "rating//Support//4");
    assert_eq!(client.notification_count(), 1);

    // Stored answers re-render through the respondent policy.
    assert_eq!(sheet.questions()[1].display_answer(), Some("⭐⭐⭐⭐"));
}

#[test]
fn notification_failure_is_a_partial_success() {
    let client = TestClient::new().fail_notify();
    let mut sheet = AnswerSheet::new(FeedbackData {
        questions: fetched_questions(),
        has_submitted: false,
    });
    sheet.record_text("q1", "Fine").unwrap();
    sheet.record_rating("q2", 3).unwrap();

    let toast = sheet.submit(&client, "user-1");
    assert_eq!(toast.variant, ToastVariant::Warning);
    assert_eq!(toast.title, "Partial Success");
    // The submission itself still landed.
    assert!(sheet.has_submitted());
    assert_eq!(client.submitted_answers().len(), 1);
}

#[test]
fn incomplete_sheet_never_reaches_the_client() {
    let client = TestClient::new();
    let mut sheet = AnswerSheet::new(FeedbackData {
        questions: fetched_questions(),
        has_submitted: false,
    });
    sheet.record_text("q1", "Fine").unwrap();

    let toast = sheet.submit(&client, "user-1");
    assert_eq!(toast.title, "Missing Answers");
    assert!(client.submitted_answers().is_empty());
    assert!(!sheet.has_submitted());
}

#[test]
fn admin_matrix_round_trip_through_the_client() {
    let responses = pulseform::AdminResponses {
        form_name: "Sales Feedback March 2024".to_string(),
        form_department: "Sales".to_string(),
        questions: vec![
            QuestionColumn {
                id: "q1".to_string(),
                text: "How was this month?".to_string(),
                input_type: InputType::Text,
            },
            QuestionColumn {
                id: "q2".to_string(),
                text: "Rate support".to_string(),
                input_type: InputType::Rating,
            },
        ],
        user_responses: vec![
            UserResponse {
                user_id: "u1".to_string(),
                user_name: "Asha Rao".to_string(),
                department: "Sales".to_string(),
                role: "Executive".to_string(),
                branch: Some(Branch {
                    region: "North".to_string(),
                    cluster: "N1".to_string(),
                    branch_name: "Oak".to_string(),
                }),
                has_submitted: true,
                has_manager_response: false,
                question_responses: vec![QuestionResponse {
                    question_id: "q2".to_string(),
                    answer: Some("rating//Support//5".to_string()),
                }],
            },
            UserResponse {
                user_id: "u2".to_string(),
                user_name: "Ben Ode".to_string(),
                department: "Sales".to_string(),
                role: "Executive".to_string(),
                branch: None,
                has_submitted: false,
                has_manager_response: false,
                question_responses: Vec::new(),
            },
        ],
        has_org_hierarchy: true,
    };
    let client = TestClient::new().with_admin_responses("form-1", responses);

    let fetched = client.all_user_responses_for_admin("form-1").unwrap();
    let matrix = ResponseMatrix::build(fetched.questions, fetched.user_responses.clone());

    for row in matrix.rows() {
        assert_eq!(row.cells.len(), 2);
    }
    assert_eq!(matrix.rows()[0].cells[1].text, "5/5");
    assert_eq!(matrix.status_counts().submitted, 1);

    let mut org = OrgFilterState::new(&fetched.user_responses);
    org.select_region(&fetched.user_responses, "North");
    let rows = matrix.filter(
        &ResponseFilter {
            search_term: String::new(),
            status: StatusFilter::All,
        },
        Some(&org),
        &UserPermissions::default(),
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user.user_id, "u1");
}

#[test]
fn manager_review_flow_submits_and_caches() {
    let client = TestClient::new()
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
                    answer: "Busy but good".to_string(),
                }],
            },
        );

    let mut board = ReviewBoard::load(&client).unwrap();
    board.toggle_expanded(&client, "emp1").unwrap();
    board.show_feedback_input("emp1");
    board.set_feedback_text("emp1", "Strong month, keep it up");

    let toast = board.submit_feedback(&client, "emp1");
    assert!(toast.is_success());

    let recorded = client.manager_responses();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].employee_id, "emp1");

    let response = board.entry("emp1").unwrap().response.as_ref().unwrap();
    assert!(response.has_manager_submitted);
}

#[test]
fn catalog_scopes_and_messages_follow_permissions() {
    let client = TestClient::new().with_form_record(FormRecord {
        id: "f1".to_string(),
        name: "Sales Feedback March 2024".to_string(),
        department: "Sales".to_string(),
        applicable_month: NaiveDate::from_ymd_opt(2024, 3, 1),
    });

    let mut catalog = FormCatalog::new(UserPermissions {
        user_id: "u1".to_string(),
        user_department: "Marketing".to_string(),
        user_role: "Manager".to_string(),
        can_view_all_departments: false,
        can_view_branch_filters: false,
    });
    catalog.load(&client).unwrap();

    // Department pinned to Marketing, so the Sales form is filtered out.
    assert!(catalog.forms().is_empty());
    assert_eq!(
        catalog.no_forms_message().as_deref(),
        Some("No forms found for Marketing department.")
    );
    assert_eq!(catalog.access_level_label(), "Department Access - Marketing");
}

#[test]
fn payloads_serialize_in_camel_case() {
    let form = FormPayload {
        title: "Sales Feedback March 2024".to_string(),
        department: "Sales".to_string(),
        applicable_month: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    };
    assert_eq!(
        serde_json::to_value(&form).unwrap(),
        json!({
            "title": "Sales Feedback March 2024",
            "department": "Sales",
            "applicableMonth": "2024-03-01",
        })
    );

    let question = QuestionPayload {
        question_text: "Rate support".to_string(),
        input_type: InputType::Rating,
        picklist_values: None,
        scale_group: Some("Support".to_string()),
    };
    assert_eq!(
        serde_json::to_value(&question).unwrap(),
        json!({
            "questionText": "Rate support",
            "inputType": "Rating",
            "picklistValues": null,
            "scaleGroup": "Support",
        })
    );

    let answer = AnswerPayload {
        question_id: "q1".to_string(),
        answer: "rating//Support//4".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&answer).unwrap(),
        json!({
            "questionId": "q1",
            "answer": "rating//Support//4",
        })
    );
}
