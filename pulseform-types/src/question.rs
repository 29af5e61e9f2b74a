use serde::{Deserialize, Serialize};

use crate::{InputType, PicklistSource, SelectOption};

/// Maximum length of a question's text, enforced at form submission.
pub const MAX_QUESTION_TEXT_LEN: usize = 255;

/// Maximum length of a custom picklist value string.
pub const MAX_CUSTOM_PICKLIST_LEN: usize = 100;

/// A single question in a feedback form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Opaque identifier, unique within a form.
    pub id: String,

    /// The prompt text shown to the respondent.
    pub text: String,

    /// The input affordance.
    pub input_type: InputType,

    /// Where picklist options come from; meaningful only for Picklist.
    pub picklist_source: Option<PicklistSource>,

    /// Delimited option labels for custom picklists (comma or semicolon).
    pub picklist_values: Option<String>,

    /// The named scale set for Rating/Emoji presentation.
    pub scale_group: Option<String>,

    /// 1-based position within the form. Always contiguous starting at 1;
    /// recomputed whenever questions are reordered or deleted.
    pub display_number: u32,
}

impl Question {
    /// Create a new empty Text question at the given position.
    pub fn new(id: impl Into<String>, display_number: u32) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            input_type: InputType::Text,
            picklist_source: None,
            picklist_values: None,
            scale_group: None,
            display_number,
        }
    }

    /// Split the delimited picklist value string into options.
    ///
    /// Semicolons take precedence over commas as the separator; entries are
    /// trimmed and empty entries dropped.
    pub fn picklist_options(&self) -> Vec<SelectOption> {
        let Some(values) = self.picklist_values.as_deref() else {
            return Vec::new();
        };
        let separator = if values.contains(';') { ';' } else { ',' };
        values
            .split(separator)
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(SelectOption::uniform)
            .collect()
    }

    /// Discard all type-specific configuration.
    ///
    /// Called when the input type changes: prior configuration never migrates
    /// across types.
    pub fn clear_type_config(&mut self) {
        self.picklist_source = None;
        self.picklist_values = None;
        self.scale_group = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picklist_options_split_on_comma() {
        let mut question = Question::new("q1", 1);
        question.picklist_values = Some("Good, Bad ,Neutral".to_string());

        let options = question.picklist_options();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0], SelectOption::uniform("Good"));
        assert_eq!(options[1], SelectOption::uniform("Bad"));
        assert_eq!(options[2], SelectOption::uniform("Neutral"));
    }

    #[test]
    fn semicolon_separator_takes_precedence() {
        let mut question = Question::new("q1", 1);
        question.picklist_values = Some("Yes, definitely; No, not really".to_string());

        let options = question.picklist_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "Yes, definitely");
        assert_eq!(options[1].value, "No, not really");
    }

    #[test]
    fn empty_entries_are_dropped() {
        let mut question = Question::new("q1", 1);
        question.picklist_values = Some("One,,Two, ".to_string());

        let options = question.picklist_options();
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn clear_type_config_resets_all_type_specific_fields() {
        let mut question = Question::new("q1", 1);
        question.input_type = InputType::Picklist;
        question.picklist_source = Some(PicklistSource::Custom);
        question.picklist_values = Some("A,B".to_string());
        question.scale_group = Some("Mood".to_string());

        question.clear_type_config();
        assert_eq!(question.picklist_source, None);
        assert_eq!(question.picklist_values, None);
        assert_eq!(question.scale_group, None);
    }
}
