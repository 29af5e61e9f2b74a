//! In-progress form definitions: an ordered question list plus header
//! fields, validated locally before anything touches the network.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use pulseform_types::{
    InputType, MAX_CUSTOM_PICKLIST_LEN, MAX_QUESTION_TEXT_LEN, PicklistSource, PreviewPlan,
    Question, RenderPlan, SelectOption, ValidationError, generate_preview, resolve,
};

use crate::client::{
    ClientError, FeedbackClient, FormPayload, InputTypeMetadata, QuestionPayload, Toast,
};

/// How long the post-creation success banner stays visible.
const SUCCESS_BANNER_SECS: i64 = 5;

/// A question under construction, with its derived display state.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftQuestion {
    pub question: Question,
    pub plan: RenderPlan,
    pub preview: PreviewPlan,
}

/// A partial update to one draft question. Unset fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    pub text: Option<String>,
    pub input_type: Option<InputType>,
    pub picklist_source: Option<PicklistSource>,
    pub picklist_values: Option<String>,
    pub scale_group: Option<String>,
}

impl QuestionPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn input_type(input_type: InputType) -> Self {
        Self {
            input_type: Some(input_type),
            ..Self::default()
        }
    }

    pub fn scale_group(scale_group: impl Into<String>) -> Self {
        Self {
            scale_group: Some(scale_group.into()),
            ..Self::default()
        }
    }
}

/// Error type for draft structure edits.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("no question at index {0}")]
    IndexOutOfRange(usize),
}

/// An in-progress form definition.
///
/// Created client-side, mutated through user edits, and replaced with a
/// fresh empty draft on successful submission. The title is a pure
/// derivation of department and applicable month and is never independently
/// editable; edits made by other means would be overwritten on the next
/// dependency change, so no setter is offered.
#[derive(Debug, Clone)]
pub struct FormDraft {
    metadata: InputTypeMetadata,
    department: Option<String>,
    applicable_month: Option<NaiveDate>,
    title: String,
    questions: Vec<DraftQuestion>,
    next_id: u64,
    submitting: bool,
    banner_until: Option<DateTime<Utc>>,
    created_form_id: Option<String>,
}

impl FormDraft {
    /// Create an empty draft seeded with one default question.
    pub fn new(metadata: InputTypeMetadata) -> Self {
        let mut draft = Self {
            metadata,
            department: None,
            applicable_month: None,
            title: String::new(),
            questions: Vec::new(),
            next_id: 0,
            submitting: false,
            banner_until: None,
            created_form_id: None,
        };
        draft.add_question();
        draft
    }

    /// Departments a form can target.
    pub fn department_options() -> Vec<SelectOption> {
        ["Sales", "Marketing", "Technical"]
            .into_iter()
            .map(SelectOption::uniform)
            .collect()
    }

    /// The input types offered by metadata.
    pub fn input_type_options(&self) -> &[SelectOption] {
        &self.metadata.input_type_options
    }

    /// The derived form title, empty until both dependencies are set.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn applicable_month(&self) -> Option<NaiveDate> {
        self.applicable_month
    }

    pub fn questions(&self) -> &[DraftQuestion] {
        &self.questions
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The id of the most recently created form, if any.
    pub fn created_form_id(&self) -> Option<&str> {
        self.created_form_id.as_deref()
    }

    /// Set or clear the target department. An empty string clears it.
    pub fn set_department(&mut self, department: impl Into<String>) {
        let department = department.into();
        self.department = (!department.is_empty()).then_some(department);
        self.recompute_title();
    }

    /// Set or clear the applicable month.
    pub fn set_applicable_month(&mut self, month: Option<NaiveDate>) {
        self.applicable_month = month.and_then(|date| date.with_day(1));
        self.recompute_title();
    }

    /// Accept a month input in `YYYY-MM` form, clearing on anything else.
    pub fn set_month_input(&mut self, value: &str) {
        self.set_applicable_month(parse_month_input(value));
    }

    fn recompute_title(&mut self) {
        self.title = match (self.department.as_deref(), self.applicable_month) {
            (Some(department), Some(month)) => {
                format!("{department} Feedback {}", month.format("%B %Y"))
            }
            _ => String::new(),
        };
    }

    /// Append a new default Text question at the end of the form.
    pub fn add_question(&mut self) {
        self.next_id += 1;
        let question = Question::new(
            format!("q-{}", self.next_id),
            self.questions.len() as u32 + 1,
        );
        let plan = self.plan_for(&question);
        self.questions.push(DraftQuestion {
            question,
            plan,
            preview: PreviewPlan::default(),
        });
    }

    /// Remove the question at `index`, renumbering the remainder so display
    /// numbers stay contiguous from 1.
    pub fn remove_question(&mut self, index: usize) -> Result<(), DraftError> {
        if index >= self.questions.len() {
            return Err(DraftError::IndexOutOfRange(index));
        }
        self.questions.remove(index);
        self.renumber();
        Ok(())
    }

    /// Merge a patch into the question at `index`.
    ///
    /// Changing the input type discards all prior type-specific
    /// configuration; values never migrate across types. Derived plan and
    /// preview are recomputed after every patch.
    pub fn update_question(&mut self, index: usize, patch: QuestionPatch) -> Result<(), DraftError> {
        let entry = self
            .questions
            .get_mut(index)
            .ok_or(DraftError::IndexOutOfRange(index))?;
        let question = &mut entry.question;

        if let Some(input_type) = patch.input_type
            && input_type != question.input_type
        {
            question.input_type = input_type;
            question.clear_type_config();
        }
        if let Some(text) = patch.text {
            question.text = text;
        }
        if let Some(source) = patch.picklist_source {
            question.picklist_source = Some(source);
        }
        if let Some(values) = patch.picklist_values {
            question.picklist_values = Some(values);
        }
        if let Some(scale_group) = patch.scale_group {
            question.scale_group = Some(scale_group);
        }

        entry.plan = resolve(
            entry.question.input_type,
            entry.question.picklist_source,
            &self.metadata.scale_configurations,
            &self.metadata.picklist_groups,
        );
        entry.preview = match entry.question.scale_group.as_deref() {
            Some(scale_group) => generate_preview(
                entry.question.input_type,
                scale_group,
                &self.metadata.scale_configurations,
            ),
            None => PreviewPlan::default(),
        };
        Ok(())
    }

    fn plan_for(&self, question: &Question) -> RenderPlan {
        resolve(
            question.input_type,
            question.picklist_source,
            &self.metadata.scale_configurations,
            &self.metadata.picklist_groups,
        )
    }

    fn renumber(&mut self) {
        for (index, entry) in self.questions.iter_mut().enumerate() {
            entry.question.display_number = index as u32 + 1;
        }
    }

    /// Validate the draft, collecting every violation.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.title.is_empty() || self.department.is_none() || self.applicable_month.is_none() {
            errors.push(ValidationError::IncompleteHeader);
        }
        if self.questions.is_empty() {
            errors.push(ValidationError::NoQuestions);
        }
        for entry in &self.questions {
            let question = &entry.question;
            if question.text.trim().is_empty() {
                errors.push(ValidationError::InvalidQuestion {
                    display_number: question.display_number,
                });
            } else if question.text.chars().count() > MAX_QUESTION_TEXT_LEN {
                errors.push(ValidationError::TextTooLong {
                    display_number: question.display_number,
                });
            }
            if question.picklist_source == Some(PicklistSource::Custom)
                && let Some(values) = question.picklist_values.as_deref()
                && values.chars().count() > MAX_CUSTOM_PICKLIST_LEN
            {
                errors.push(ValidationError::PicklistTooLong {
                    display_number: question.display_number,
                });
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Shape the draft into its wire payload.
    ///
    /// Emits only the fields relevant to each question's resolved state:
    /// custom picklist values only for custom picklists, scale group only
    /// for Rating/Emoji.
    pub fn to_payload(&self) -> Result<(FormPayload, Vec<QuestionPayload>), Vec<ValidationError>> {
        self.validate()?;
        let (Some(department), Some(month)) = (self.department.clone(), self.applicable_month)
        else {
            return Err(vec![ValidationError::IncompleteHeader]);
        };

        let form = FormPayload {
            title: self.title.clone(),
            department,
            applicable_month: month,
        };
        let questions = self
            .questions
            .iter()
            .map(|entry| {
                let question = &entry.question;
                let is_custom_picklist = question.input_type.is_picklist()
                    && question.picklist_source == Some(PicklistSource::Custom);
                QuestionPayload {
                    question_text: question.text.clone(),
                    input_type: question.input_type,
                    picklist_values: is_custom_picklist
                        .then(|| question.picklist_values.clone())
                        .flatten(),
                    scale_group: question
                        .input_type
                        .uses_scale_group()
                        .then(|| question.scale_group.clone())
                        .flatten(),
                }
            })
            .collect();
        Ok((form, questions))
    }

    /// Validate, submit, and interpret the outcome as a toast.
    ///
    /// Refuses while a prior submission is in flight; the submitting flag is
    /// cleared on every path. On success the draft resets to a single fresh
    /// question and raises the success banner.
    pub fn submit<C: FeedbackClient>(&mut self, client: &C, now: DateTime<Utc>) -> Toast {
        if self.submitting {
            return Toast::warning("Please wait", "A submission is already in progress");
        }
        let (form, questions) = match self.to_payload() {
            Ok(payload) => payload,
            Err(errors) => {
                let message = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                return Toast::error("Validation failed", message);
            }
        };

        self.submitting = true;
        let result = client.create_form(&form, &questions);
        self.submitting = false;

        match result {
            Ok(form_id) => {
                self.created_form_id = Some(form_id);
                self.reset(now);
                Toast::success("Success", "Form created successfully")
            }
            Err(error) => match ClientError::classify(error) {
                ClientError::Conflict => Toast::error(
                    "Error creating form",
                    ClientError::Conflict.to_string(),
                ),
                ClientError::Remote(remote) => {
                    Toast::error("Error creating form", format!("{remote:#}"))
                }
            },
        }
    }

    fn reset(&mut self, now: DateTime<Utc>) {
        self.department = None;
        self.applicable_month = None;
        self.title.clear();
        self.questions.clear();
        self.add_question();
        self.banner_until = Some(now + Duration::seconds(SUCCESS_BANNER_SECS));
    }

    /// Whether the success banner is still within its display window.
    ///
    /// The banner is a deadline checked against the caller's clock rather
    /// than a fire-and-forget timer, so teardown has nothing to cancel.
    pub fn success_banner_visible(&self, now: DateTime<Utc>) -> bool {
        self.banner_until.is_some_and(|until| now < until)
    }

    /// Dismiss the success banner early.
    pub fn clear_success_banner(&mut self) {
        self.banner_until = None;
    }
}

fn parse_month_input(value: &str) -> Option<NaiveDate> {
    let (year, month) = value.split_once('-')?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}
