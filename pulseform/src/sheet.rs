//! The respondent's answer sheet: one in-progress answer per question,
//! submitted all-or-nothing.

use serde::{Deserialize, Serialize};

use pulseform_types::{
    Answer, PreviewOption, Question, ScaleOption, SelectOption, rating_star_options,
    respondent_display,
};

use crate::client::{AnswerPayload, FeedbackClient, Toast};

/// Maximum length of a free-text answer.
pub const MAX_ANSWER_LEN: usize = 500;

/// Default slider bounds when the question does not configure them.
pub const DEFAULT_SLIDER_MIN: i64 = 1;
pub const DEFAULT_SLIDER_MAX: i64 = 10;

/// The active form as fetched for the current respondent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackData {
    pub questions: Vec<FeedbackQuestion>,
    pub has_submitted: bool,
}

/// One question as fetched for the respondent, with its presentation
/// metadata resolved server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuestion {
    #[serde(flatten)]
    pub question: Question,
    #[serde(default)]
    pub scale_options: Vec<ScaleOption>,
    #[serde(default)]
    pub slider_min: Option<i64>,
    #[serde(default)]
    pub slider_max: Option<i64>,
    /// The previously stored answer, present once submitted.
    #[serde(default)]
    pub answer: Option<String>,
}

/// One question on the sheet plus the respondent's in-progress answer.
#[derive(Debug, Clone)]
pub struct SheetQuestion {
    pub question: Question,
    pub scale_options: Vec<ScaleOption>,
    pub slider_min: i64,
    pub slider_max: i64,
    answer: Option<Answer>,
    /// The glyph clicked for an emoji answer, tracked separately from the
    /// encoded label for immediate UI feedback.
    emoji_display: Option<String>,
    display_answer: Option<String>,
}

impl SheetQuestion {
    fn new(fetched: FeedbackQuestion) -> Self {
        Self {
            question: fetched.question,
            scale_options: fetched.scale_options,
            slider_min: fetched.slider_min.unwrap_or(DEFAULT_SLIDER_MIN),
            slider_max: fetched.slider_max.unwrap_or(DEFAULT_SLIDER_MAX),
            answer: None,
            emoji_display: None,
            display_answer: fetched.answer,
        }
    }

    /// The current answer, if any.
    pub fn answer(&self) -> Option<&Answer> {
        self.answer.as_ref()
    }

    /// The human-readable answer shown on the review screen.
    pub fn display_answer(&self) -> Option<&str> {
        self.display_answer.as_deref()
    }

    /// The five star options of a Rating question.
    pub fn star_options(&self) -> Vec<PreviewOption> {
        rating_star_options(&self.scale_options)
    }

    /// Picklist options for a Picklist question.
    pub fn picklist_options(&self) -> Vec<SelectOption> {
        self.question.picklist_options()
    }
}

/// Error type for answer-sheet operations.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("no question with id {0}")]
    UnknownQuestion(String),

    #[error("answer must be {MAX_ANSWER_LEN} characters or fewer")]
    AnswerTooLong,

    #[error("all questions must be answered before submitting")]
    Unanswered,
}

/// Collects answers for the active form and drives the submission flow.
#[derive(Debug, Clone)]
pub struct AnswerSheet {
    questions: Vec<SheetQuestion>,
    submitting: bool,
    submitted: bool,
}

impl AnswerSheet {
    /// Build a sheet from fetched feedback data.
    pub fn new(data: FeedbackData) -> Self {
        Self {
            submitted: data.has_submitted,
            submitting: false,
            questions: data.questions.into_iter().map(SheetQuestion::new).collect(),
        }
    }

    pub fn questions(&self) -> &[SheetQuestion] {
        &self.questions
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn has_submitted(&self) -> bool {
        self.submitted
    }

    fn question_mut(&mut self, question_id: &str) -> Result<&mut SheetQuestion, SheetError> {
        self.questions
            .iter_mut()
            .find(|entry| entry.question.id == question_id)
            .ok_or_else(|| SheetError::UnknownQuestion(question_id.to_string()))
    }

    /// Record a free-text answer.
    pub fn record_text(
        &mut self,
        question_id: &str,
        value: impl Into<String>,
    ) -> Result<(), SheetError> {
        let value = value.into();
        if value.chars().count() > MAX_ANSWER_LEN {
            return Err(SheetError::AnswerTooLong);
        }
        let entry = self.question_mut(question_id)?;
        entry.answer = (!value.is_empty()).then_some(Answer::Text(value));
        Ok(())
    }

    /// Record a picklist selection.
    pub fn record_picklist(
        &mut self,
        question_id: &str,
        value: impl Into<String>,
    ) -> Result<(), SheetError> {
        let value = value.into();
        let entry = self.question_mut(question_id)?;
        entry.answer = (!value.is_empty()).then_some(Answer::Picklist(value));
        Ok(())
    }

    /// Record a star click. Clicking rank k selects ranks 1..k visually, but
    /// only k is encoded.
    pub fn record_rating(&mut self, question_id: &str, rank: u8) -> Result<(), SheetError> {
        let entry = self.question_mut(question_id)?;
        let scale_group = entry.question.scale_group.clone().unwrap_or_default();
        entry.answer = Some(Answer::Rating { scale_group, rank });
        Ok(())
    }

    /// Record an emoji click: the option's label is encoded, the clicked
    /// glyph is kept for display.
    pub fn record_emoji(
        &mut self,
        question_id: &str,
        label: impl Into<String>,
        display_value: impl Into<String>,
    ) -> Result<(), SheetError> {
        let entry = self.question_mut(question_id)?;
        let scale_group = entry.question.scale_group.clone().unwrap_or_default();
        entry.answer = Some(Answer::Emoji {
            scale_group,
            label: label.into(),
        });
        entry.emoji_display = Some(display_value.into());
        Ok(())
    }

    /// Record a slider position.
    pub fn record_slider(&mut self, question_id: &str, value: i64) -> Result<(), SheetError> {
        let entry = self.question_mut(question_id)?;
        entry.answer = Some(Answer::Slider(value));
        Ok(())
    }

    /// Collect the complete answer set, rejecting partial sheets.
    ///
    /// Unanswered questions are never transmitted as empty values; a single
    /// missing answer aborts the whole submission before the network.
    pub fn collect(&self) -> Result<Vec<AnswerPayload>, SheetError> {
        let mut answers = Vec::with_capacity(self.questions.len());
        for entry in &self.questions {
            let Some(answer) = entry.answer.as_ref() else {
                return Err(SheetError::Unanswered);
            };
            answers.push(AnswerPayload {
                question_id: entry.question.id.clone(),
                answer: answer.encode(),
            });
        }
        Ok(answers)
    }

    /// Submit the sheet and interpret the outcome as a toast.
    ///
    /// Refuses while a submission is in flight; the submitting flag is
    /// cleared on every path. A notification failure after a successful
    /// submission is a partial success, not a failure.
    pub fn submit<C: FeedbackClient>(&mut self, client: &C, respondent_id: &str) -> Toast {
        if self.submitting {
            return Toast::warning("Please wait", "A submission is already in progress");
        }
        if self.submitted {
            return Toast::info("Already submitted", "Feedback has already been submitted");
        }
        let answers = match self.collect() {
            Ok(answers) => answers,
            Err(SheetError::Unanswered) => {
                return Toast::error(
                    "Missing Answers",
                    "Please answer all questions before submitting",
                );
            }
            Err(error) => return Toast::error("Error", error.to_string()),
        };

        self.submitting = true;
        let toast = match client.submit_feedback(&answers, respondent_id) {
            Ok(()) => {
                self.submitted = true;
                self.apply_submitted_answers();
                match client.notify_feedback_submitted() {
                    Ok(()) => Toast::success(
                        "Success",
                        "Feedback submitted and emails sent successfully",
                    ),
                    Err(_) => Toast::warning(
                        "Partial Success",
                        "Feedback submitted, but email notification failed",
                    ),
                }
            }
            Err(error) => Toast::error("Error", format!("{:#}", error.into())),
        };
        self.submitting = false;
        toast
    }

    /// Re-render every stored answer through the respondent display policy.
    fn apply_submitted_answers(&mut self) {
        for entry in &mut self.questions {
            if let Some(answer) = entry.answer.as_ref() {
                entry.display_answer = Some(respondent_display(
                    &answer.encode(),
                    entry.question.input_type,
                    &entry.scale_options,
                    entry.emoji_display.as_deref(),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulseform_types::{InputType, Question};

    fn question(id: &str, number: u32, input_type: InputType) -> FeedbackQuestion {
        let mut question = Question::new(id, number);
        question.text = format!("Question {number}");
        question.input_type = input_type;
        if input_type.uses_scale_group() {
            question.scale_group = Some("Support".to_string());
        }
        FeedbackQuestion {
            question,
            scale_options: vec![ScaleOption::new("Support", "⭐", "⭐", 1)],
            slider_min: None,
            slider_max: None,
            answer: None,
        }
    }

    fn sheet() -> AnswerSheet {
        AnswerSheet::new(FeedbackData {
            questions: vec![
                question("q1", 1, InputType::Text),
                question("q2", 2, InputType::Rating),
            ],
            has_submitted: false,
        })
    }

    #[test]
    fn collect_rejects_partial_sheets() {
        let mut sheet = sheet();
        sheet.record_text("q1", "Fine").unwrap();
        assert!(matches!(sheet.collect(), Err(SheetError::Unanswered)));

        sheet.record_rating("q2", 3).unwrap();
        let answers = sheet.collect().unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[1].answer, "rating//Support//3");
    }

    #[test]
    fn clearing_a_text_answer_removes_it() {
        let mut sheet = sheet();
        sheet.record_text("q1", "Fine").unwrap();
        sheet.record_text("q1", "").unwrap();
        assert!(sheet.questions()[0].answer().is_none());
    }

    #[test]
    fn overlong_text_is_rejected() {
        let mut sheet = sheet();
        let result = sheet.record_text("q1", "x".repeat(MAX_ANSWER_LEN + 1));
        assert!(matches!(result, Err(SheetError::AnswerTooLong)));
    }

    #[test]
    fn unknown_question_is_an_error() {
        let mut sheet = sheet();
        assert!(matches!(
            sheet.record_text("nope", "hi"),
            Err(SheetError::UnknownQuestion(_))
        ));
    }

    #[test]
    fn slider_bounds_default_when_unconfigured() {
        let sheet = sheet();
        assert_eq!(sheet.questions()[0].slider_min, DEFAULT_SLIDER_MIN);
        assert_eq!(sheet.questions()[0].slider_max, DEFAULT_SLIDER_MAX);
    }

    #[test]
    fn star_options_share_the_configured_icon() {
        let sheet = sheet();
        let stars = sheet.questions()[1].star_options();
        assert_eq!(stars.len(), 5);
        assert!(stars.iter().all(|star| star.label == "⭐"));
        assert_eq!(stars[4].value, "5");
    }
}
