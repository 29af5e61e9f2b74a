use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The input affordance of a question.
///
/// This is the single source of truth for type-dependent behavior. Derived
/// display state (`RenderPlan`, `PreviewPlan`) is computed from it once per
/// question rather than re-checked ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputType {
    /// Free-form text entry.
    Text,

    /// Single selection from a list of options.
    Picklist,

    /// 1-5 star rating backed by a scale group.
    Rating,

    /// Emoji selection backed by a scale group.
    Emoji,

    /// Numeric slider with configurable bounds.
    Slider,
}

impl InputType {
    /// All input types, in the order they are offered to form authors.
    pub const ALL: [Self; 5] = [
        Self::Text,
        Self::Picklist,
        Self::Rating,
        Self::Emoji,
        Self::Slider,
    ];

    /// The wire tag for this input type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Picklist => "Picklist",
            Self::Rating => "Rating",
            Self::Emoji => "Emoji",
            Self::Slider => "Slider",
        }
    }

    /// Check if questions of this type select their presentation from a
    /// named scale group (everything except Text, Picklist, and Slider).
    pub fn uses_scale_group(self) -> bool {
        matches!(self, Self::Rating | Self::Emoji)
    }

    /// Check if questions of this type carry picklist options.
    pub fn is_picklist(self) -> bool {
        self == Self::Picklist
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized input type tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown input type tag: {0}")]
pub struct UnknownInputType(pub String);

impl FromStr for InputType {
    type Err = UnknownInputType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Text" => Ok(Self::Text),
            "Picklist" => Ok(Self::Picklist),
            "Rating" => Ok(Self::Rating),
            "Emoji" => Ok(Self::Emoji),
            "Slider" => Ok(Self::Slider),
            other => Err(UnknownInputType(other.to_string())),
        }
    }
}

/// Where a picklist question sources its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PicklistSource {
    /// A named, reusable option set from metadata.
    Metadata,

    /// A per-question delimited value string entered by the form author.
    Custom,
}

impl PicklistSource {
    /// The wire tag for this source.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Metadata => "Metadata",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for PicklistSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        for input_type in InputType::ALL {
            assert_eq!(input_type.as_str().parse(), Ok(input_type));
        }
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let err = "Checkbox".parse::<InputType>().unwrap_err();
        assert_eq!(err, UnknownInputType("Checkbox".to_string()));
    }

    #[test]
    fn scale_group_applies_to_rating_and_emoji_only() {
        assert!(InputType::Rating.uses_scale_group());
        assert!(InputType::Emoji.uses_scale_group());
        assert!(!InputType::Text.uses_scale_group());
        assert!(!InputType::Picklist.uses_scale_group());
        assert!(!InputType::Slider.uses_scale_group());
    }
}
