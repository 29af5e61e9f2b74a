//! Core types for the pulseform crate.
//!
//! This crate provides the foundational types for modelling feedback forms:
//! - `InputType` and `PicklistSource` - The question input taxonomy
//! - `Question` - A single form question and its configuration
//! - `ScaleOption` and `ScaleConfigurations` - Metadata-driven scale sets
//! - `RenderPlan` and `PreviewPlan` - Derived presentation state
//! - `Answer` - The tagged answer union and its wire encoding

mod input_type;
pub use input_type::{InputType, PicklistSource, UnknownInputType};

mod scale;
pub use scale::{DEFAULT_RATING_ICON, ScaleConfigurations, ScaleOption, SelectOption, rating_icon};

mod question;
pub use question::{MAX_CUSTOM_PICKLIST_LEN, MAX_QUESTION_TEXT_LEN, Question};

mod render;
pub use render::{
    PreviewOption, PreviewPlan, RenderPlan, generate_preview, rating_star_options, resolve,
};

mod answer;
pub use answer::{Answer, admin_display, respondent_display};

mod error;
pub use error::ValidationError;
