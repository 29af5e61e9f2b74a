use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::InputType;

/// The glyph used for rating presentation when no scale entry provides one.
pub const DEFAULT_RATING_ICON: &str = "⭐";

/// A label/value pair offered in a selection control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Human-readable label.
    pub label: String,

    /// The value submitted when this option is chosen.
    pub value: String,
}

impl SelectOption {
    /// Create a new option.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Create an option whose label and value are the same string.
    pub fn uniform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            value: text,
        }
    }
}

/// One entry of a named scale set, as configured in metadata.
///
/// A scale group is an ordered collection of these entries sharing the same
/// `scale_group` key. Label and value are both optional in metadata; consumers
/// fall back from one to the other and finally to [`DEFAULT_RATING_ICON`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleOption {
    /// The named group this entry belongs to.
    pub scale_group: String,

    /// Display label (an emoji glyph or a word like "Happy").
    pub label: Option<String>,

    /// Stored value, when distinct from the label.
    pub value: Option<String>,

    /// Sort position within the group, ascending.
    pub order: i32,
}

impl ScaleOption {
    /// Create a new scale entry with both label and value set.
    pub fn new(
        scale_group: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
        order: i32,
    ) -> Self {
        Self {
            scale_group: scale_group.into(),
            label: Some(label.into()),
            value: Some(value.into()),
            order,
        }
    }

    /// The display glyph for this entry: label, else value, else the default.
    pub fn icon(&self) -> &str {
        self.label
            .as_deref()
            .or(self.value.as_deref())
            .unwrap_or(DEFAULT_RATING_ICON)
    }
}

/// The icon shared by every star of a rating control: taken from the first
/// entry of the question's scale options, falling back to the default glyph.
pub fn rating_icon(options: &[ScaleOption]) -> &str {
    options
        .first()
        .map(ScaleOption::icon)
        .unwrap_or(DEFAULT_RATING_ICON)
}

/// Scale metadata keyed by input type, as returned by the metadata service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfigurations {
    by_type: HashMap<InputType, Vec<ScaleOption>>,
}

impl ScaleConfigurations {
    /// Create an empty configuration table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry for the given input type.
    pub fn insert(&mut self, input_type: InputType, option: ScaleOption) {
        self.by_type.entry(input_type).or_default().push(option);
    }

    /// Append an entry, builder-style.
    pub fn with(mut self, input_type: InputType, option: ScaleOption) -> Self {
        self.insert(input_type, option);
        self
    }

    /// All entries configured for the given input type, in metadata order.
    pub fn options_for(&self, input_type: InputType) -> &[ScaleOption] {
        self.by_type.get(&input_type).map_or(&[], Vec::as_slice)
    }

    /// The distinct scale-group names available for the given input type,
    /// first-seen order preserved, with underscores rendered as spaces in
    /// the label.
    pub fn scale_groups_for(&self, input_type: InputType) -> Vec<SelectOption> {
        let mut seen = Vec::new();
        for entry in self.options_for(input_type) {
            if !seen.iter().any(|s: &SelectOption| s.value == entry.scale_group) {
                seen.push(SelectOption::new(
                    entry.scale_group.replace('_', " "),
                    entry.scale_group.clone(),
                ));
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_groups_are_deduplicated_in_first_seen_order() {
        let scales = ScaleConfigurations::new()
            .with(InputType::Rating, ScaleOption::new("Customer_Service", "⭐", "⭐", 1))
            .with(InputType::Rating, ScaleOption::new("Support", "★", "★", 1))
            .with(InputType::Rating, ScaleOption::new("Customer_Service", "⭐", "⭐", 2));

        let groups = scales.scale_groups_for(InputType::Rating);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Customer Service");
        assert_eq!(groups[0].value, "Customer_Service");
        assert_eq!(groups[1].value, "Support");
    }

    #[test]
    fn missing_type_yields_empty_slice() {
        let scales = ScaleConfigurations::new();
        assert!(scales.options_for(InputType::Emoji).is_empty());
        assert!(scales.scale_groups_for(InputType::Emoji).is_empty());
    }

    #[test]
    fn icon_falls_back_through_label_value_default() {
        let full = ScaleOption::new("G", "😀", "grin", 1);
        assert_eq!(full.icon(), "😀");

        let value_only = ScaleOption {
            scale_group: "G".into(),
            label: None,
            value: Some("grin".into()),
            order: 1,
        };
        assert_eq!(value_only.icon(), "grin");

        let bare = ScaleOption {
            scale_group: "G".into(),
            label: None,
            value: None,
            order: 1,
        };
        assert_eq!(bare.icon(), DEFAULT_RATING_ICON);
    }
}
