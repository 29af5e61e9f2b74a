use crate::{DEFAULT_RATING_ICON, InputType, ScaleOption, rating_icon};

/// A committed answer to a single question.
///
/// This is the explicit form of the wire encoding: Rating and Emoji answers
/// travel as a metadata reference token `"<kind>//<scaleGroup>//<selector>"`,
/// everything else as the literal captured value. Legacy stored answers may
/// be a bare numeric string 1-5, interpreted as a rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Free-form text.
    Text(String),

    /// A picklist selection.
    Picklist(String),

    /// A slider position.
    Slider(i64),

    /// A star rating: the 1-based rank clicked. Clicking rank k lights ranks
    /// 1..k visually, but only k is encoded.
    Rating { scale_group: String, rank: u8 },

    /// An emoji selection: the clicked option's label, not its glyph.
    Emoji { scale_group: String, label: String },
}

impl Answer {
    /// Encode this answer into its canonical wire string.
    ///
    /// Never produces an empty string for an answered question; unanswered
    /// questions are omitted from the submitted set entirely.
    pub fn encode(&self) -> String {
        match self {
            Self::Text(value) | Self::Picklist(value) => value.clone(),
            Self::Slider(value) => value.to_string(),
            Self::Rating { scale_group, rank } => format!("rating//{scale_group}//{rank}"),
            Self::Emoji { scale_group, label } => format!("emoji//{scale_group}//{label}"),
        }
    }

    /// Decode a stored answer string for a question of the given type.
    ///
    /// Two-stage parse: structured metadata reference token first, then the
    /// legacy bare-number rating, finally the literal value for the question
    /// type. Never fails; an unrecognizable token comes back as text.
    pub fn decode(raw: &str, input_type: InputType) -> Self {
        if let Some((kind, scale_group, selector)) = split_token(raw) {
            match kind {
                "rating" => {
                    if let Ok(rank) = selector.parse::<u8>() {
                        return Self::Rating {
                            scale_group: scale_group.to_string(),
                            rank,
                        };
                    }
                }
                "emoji" => {
                    return Self::Emoji {
                        scale_group: scale_group.to_string(),
                        label: selector.to_string(),
                    };
                }
                _ => {}
            }
        }

        if input_type == InputType::Rating
            && let Ok(rank) = raw.trim().parse::<u8>()
            && (1..=5).contains(&rank)
        {
            return Self::Rating {
                scale_group: String::new(),
                rank,
            };
        }

        match input_type {
            InputType::Picklist => Self::Picklist(raw.to_string()),
            InputType::Slider => raw
                .trim()
                .parse::<i64>()
                .map(Self::Slider)
                .unwrap_or_else(|_| Self::Text(raw.to_string())),
            _ => Self::Text(raw.to_string()),
        }
    }
}

fn split_token(raw: &str) -> Option<(&str, &str, &str)> {
    let mut parts = raw.splitn(3, "//");
    let kind = parts.next()?;
    let scale_group = parts.next()?;
    let selector = parts.next()?;
    Some((kind, scale_group, selector))
}

/// Render a stored answer for the respondent-facing review screen.
///
/// Ratings repeat the question's configured icon `rank` times; emoji answers
/// render as `"<value> (<label>)"` using the display value tracked at click
/// time. Unparseable tokens come back unchanged.
pub fn respondent_display(
    raw: &str,
    input_type: InputType,
    scale_options: &[ScaleOption],
    emoji_display: Option<&str>,
) -> String {
    match input_type {
        InputType::Rating => format_rating_for_respondent(raw, scale_options),
        InputType::Emoji => {
            let Some(display_value) = emoji_display else {
                return raw.to_string();
            };
            match scale_options
                .iter()
                .find(|option| option.value.as_deref() == Some(display_value))
            {
                Some(option) => match option.label.as_deref() {
                    Some(label) => format!("{display_value} ({label})"),
                    None => display_value.to_string(),
                },
                None => display_value.to_string(),
            }
        }
        _ => raw.to_string(),
    }
}

fn format_rating_for_respondent(raw: &str, scale_options: &[ScaleOption]) -> String {
    if let Some(("rating", _, selector)) = split_token(raw)
        && let Ok(rank) = selector.parse::<u32>()
        && (1..=5).contains(&rank)
    {
        return rating_icon(scale_options).repeat(rank as usize);
    }

    // Legacy bare-number answers predate scale groups and always render with
    // the default glyph.
    if let Ok(rank) = raw.trim().parse::<u32>()
        && (1..=5).contains(&rank)
    {
        return DEFAULT_RATING_ICON.repeat(rank as usize);
    }

    raw.to_string()
}

/// Render a stored answer for the admin/manager review screen.
///
/// The textual counterpart of [`respondent_display`]: ratings render as
/// `"<rank>/5"`, emoji answers as their stored label, sliders as
/// `"<value>/10"`. The slider upper bound is fixed at 10 regardless of the
/// question's configured maximum.
pub fn admin_display(raw: &str, input_type: InputType) -> String {
    match input_type {
        InputType::Rating => format_rating_for_admin(raw),
        InputType::Emoji => match split_token(raw) {
            Some(("emoji", _, label)) => label.to_string(),
            _ => raw.to_string(),
        },
        InputType::Slider => format!("{raw}/10"),
        _ => raw.to_string(),
    }
}

fn format_rating_for_admin(raw: &str) -> String {
    if let Some(("rating", _, selector)) = split_token(raw)
        && let Ok(rank) = selector.parse::<u32>()
        && (1..=5).contains(&rank)
    {
        return format!("{rank}/5");
    }

    if let Ok(rank) = raw.trim().parse::<u32>()
        && (1..=5).contains(&rank)
    {
        return format!("{rank}/5");
    }

    // Some historic answers were stored pre-formatted as "N out of 5".
    if raw.contains("out of") {
        return raw.replacen("out of", "/", 1);
    }

    raw.to_string()
}
