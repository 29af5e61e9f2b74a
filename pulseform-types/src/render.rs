use crate::{
    DEFAULT_RATING_ICON, InputType, PicklistSource, ScaleConfigurations, SelectOption, rating_icon,
};

/// Derived display state for a question's configuration editor.
///
/// Computed once from the input type and metadata; pure function of its
/// inputs. Callers persist the plan against the owning question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderPlan {
    /// Show the picklist configuration section.
    pub show_picklist_values: bool,

    /// Show the free-text editor for custom picklist values.
    pub show_custom_picklist_editor: bool,

    /// Show the scale-group selector (Rating/Emoji questions).
    pub show_scale_group_picker: bool,

    /// Scale groups available for this input type.
    pub scale_group_options: Vec<SelectOption>,

    /// Named reusable picklist sets from metadata.
    pub picklist_type_options: Vec<SelectOption>,
}

/// Compute the render plan for a question's input type.
///
/// Unknown metadata is not an error: absent configuration yields empty option
/// lists so the editor still renders safely.
pub fn resolve(
    input_type: InputType,
    picklist_source: Option<PicklistSource>,
    scales: &ScaleConfigurations,
    picklist_groups: &[SelectOption],
) -> RenderPlan {
    let is_picklist = input_type.is_picklist();
    RenderPlan {
        show_picklist_values: is_picklist,
        show_custom_picklist_editor: is_picklist && picklist_source == Some(PicklistSource::Custom),
        show_scale_group_picker: input_type.uses_scale_group(),
        scale_group_options: scales.scale_groups_for(input_type),
        picklist_type_options: picklist_groups.to_vec(),
    }
}

/// One option of a question preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewOption {
    /// Display label (glyph or text).
    pub label: String,

    /// The value that would be captured.
    pub value: String,

    /// 1-based position.
    pub order: i32,
}

/// A rendered preview of how a Rating/Emoji question will appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewPlan {
    /// Whether a preview applies to this question at all.
    pub show_preview: bool,

    /// The preview options, in display order.
    pub options: Vec<PreviewOption>,
}

/// Build the preview for a question's `(input_type, scale_group)` pair.
///
/// Entries are sorted by `order` ascending, ties keeping metadata order.
/// Emoji previews emit one option per configured entry; Rating previews
/// always emit exactly five stars sharing the first entry's icon, regardless
/// of how many scale entries exist. Any other type, or a group with no
/// entries, yields no preview.
pub fn generate_preview(
    input_type: InputType,
    scale_group: &str,
    scales: &ScaleConfigurations,
) -> PreviewPlan {
    let mut entries: Vec<_> = scales
        .options_for(input_type)
        .iter()
        .filter(|entry| entry.scale_group == scale_group)
        .collect();
    entries.sort_by_key(|entry| entry.order);

    match input_type {
        InputType::Emoji if !entries.is_empty() => PreviewPlan {
            show_preview: true,
            options: entries
                .iter()
                .enumerate()
                .map(|(index, entry)| {
                    let value = entry
                        .value
                        .as_deref()
                        .or(entry.label.as_deref())
                        .unwrap_or(DEFAULT_RATING_ICON)
                        .to_string();
                    PreviewOption {
                        label: entry.label.clone().unwrap_or_else(|| value.clone()),
                        value,
                        order: index as i32 + 1,
                    }
                })
                .collect(),
        },
        InputType::Rating if !entries.is_empty() => {
            let icon = entries
                .first()
                .map(|entry| entry.icon())
                .unwrap_or(DEFAULT_RATING_ICON);
            PreviewPlan {
                show_preview: true,
                options: (1..=5)
                    .map(|rank| PreviewOption {
                        label: icon.to_string(),
                        value: rank.to_string(),
                        order: rank,
                    })
                    .collect(),
            }
        }
        _ => PreviewPlan::default(),
    }
}

/// The five star options of a rating control, all sharing the icon of the
/// first scale entry.
pub fn rating_star_options(scale_options: &[crate::ScaleOption]) -> Vec<PreviewOption> {
    let icon = rating_icon(scale_options);
    (1..=5)
        .map(|rank| PreviewOption {
            label: icon.to_string(),
            value: rank.to_string(),
            order: rank,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScaleOption;

    fn sample_scales() -> ScaleConfigurations {
        ScaleConfigurations::new()
            .with(InputType::Rating, ScaleOption::new("Support", "★", "★", 1))
            .with(InputType::Emoji, ScaleOption::new("Mood", "🙂", "ok", 2))
            .with(InputType::Emoji, ScaleOption::new("Mood", "😀", "great", 1))
    }

    #[test]
    fn picklist_plan_shows_custom_editor_only_for_custom_source() {
        let scales = sample_scales();
        let groups = vec![SelectOption::new("Satisfaction", "Satisfaction")];

        let metadata = resolve(
            InputType::Picklist,
            Some(PicklistSource::Metadata),
            &scales,
            &groups,
        );
        assert!(metadata.show_picklist_values);
        assert!(!metadata.show_custom_picklist_editor);
        assert_eq!(metadata.picklist_type_options, groups);

        let custom = resolve(
            InputType::Picklist,
            Some(PicklistSource::Custom),
            &scales,
            &groups,
        );
        assert!(custom.show_custom_picklist_editor);
    }

    #[test]
    fn scale_picker_hidden_for_text_picklist_slider() {
        let scales = sample_scales();
        for input_type in [InputType::Text, InputType::Picklist, InputType::Slider] {
            let plan = resolve(input_type, None, &scales, &[]);
            assert!(!plan.show_scale_group_picker, "{input_type}");
        }
        assert!(resolve(InputType::Rating, None, &scales, &[]).show_scale_group_picker);
    }

    #[test]
    fn absent_metadata_fails_open_to_empty_plan() {
        let plan = resolve(InputType::Rating, None, &ScaleConfigurations::new(), &[]);
        assert!(plan.show_scale_group_picker);
        assert!(plan.scale_group_options.is_empty());
        assert!(plan.picklist_type_options.is_empty());
    }

    #[test]
    fn rating_preview_always_has_five_stars() {
        let preview = generate_preview(InputType::Rating, "Support", &sample_scales());
        assert!(preview.show_preview);
        assert_eq!(preview.options.len(), 5);
        for (index, option) in preview.options.iter().enumerate() {
            assert_eq!(option.label, "★");
            assert_eq!(option.value, (index + 1).to_string());
        }
    }

    #[test]
    fn emoji_preview_sorts_by_order() {
        let preview = generate_preview(InputType::Emoji, "Mood", &sample_scales());
        assert!(preview.show_preview);
        assert_eq!(preview.options.len(), 2);
        assert_eq!(preview.options[0].value, "great");
        assert_eq!(preview.options[1].value, "ok");
    }

    #[test]
    fn unmatched_group_or_type_yields_no_preview() {
        let scales = sample_scales();
        assert!(!generate_preview(InputType::Rating, "Unknown", &scales).show_preview);
        assert!(!generate_preview(InputType::Text, "Support", &scales).show_preview);
        assert!(!generate_preview(InputType::Slider, "Support", &scales).show_preview);
    }
}
