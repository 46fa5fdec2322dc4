//! Render snapshot for the Select widget.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::aria::AriaAttrs;

use super::SelectControl;

/// One row of the open option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionRow {
    pub id: String,
    pub label: String,
    pub selected: bool,
    pub focused: bool,
    pub disabled: bool,
    pub aria: AriaAttrs,
}

/// Everything a host needs to draw a select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectView {
    pub id: String,
    /// Label text, empty when the select has no label.
    pub label: String,
    /// Id the label element must carry (present only with a label).
    pub label_id: Option<String>,
    /// Selected label, or the placeholder when nothing matches.
    pub display_text: String,
    pub is_placeholder: bool,
    /// Text indicator for character-cell hosts.
    pub indicator: &'static str,
    pub open: bool,
    pub disabled: bool,
    pub error: bool,
    pub listbox_id: String,
    /// Option rows; empty while closed.
    pub options: Vec<OptionRow>,
    /// First visible row of the list.
    pub scroll_offset: u16,
    pub aria: AriaAttrs,
}

impl SelectView {
    /// Style classes matching the current state.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["ui-select"];
        if self.open {
            classes.push("ui-select-open");
        }
        if self.disabled {
            classes.push("ui-select-disabled");
        }
        if self.error {
            classes.push("ui-select-error");
        }
        if self.is_placeholder {
            classes.push("ui-select-placeholder");
        }
        classes
    }
}

impl<V> SelectControl<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    /// Snapshot the current state for rendering.
    pub fn view(&self) -> SelectView {
        let id = self.id().clone();
        let listbox_id = id.listbox_id();

        let built = self.with_inner(|s| {
            let is_placeholder = s.selected_label.is_empty();
            let display_text = if is_placeholder {
                s.placeholder.to_string()
            } else {
                s.selected_label.to_string()
            };
            let label_id = (!s.label.is_empty()).then(|| id.label_id());

            let options: Vec<OptionRow> = if s.is_open {
                s.options
                    .iter()
                    .enumerate()
                    .map(|(i, opt)| {
                        let selected = s.value == Some(&opt.value);
                        OptionRow {
                            id: id.option_id(i),
                            label: opt.label.clone(),
                            selected,
                            focused: s.focused == Some(i),
                            disabled: opt.disabled,
                            aria: AriaAttrs::with_role("option")
                                .flag("aria-selected", selected)
                                .flag("aria-disabled", opt.disabled),
                        }
                    })
                    .collect()
            } else {
                Vec::new()
            };

            let active = if s.is_open {
                s.focused.map(|i| id.option_id(i))
            } else {
                None
            };
            let aria = AriaAttrs::with_role("combobox")
                .flag("aria-expanded", s.is_open)
                .flag("aria-invalid", s.error)
                .flag("aria-disabled", s.disabled)
                .set("aria-controls", listbox_id.clone())
                .set_opt("aria-activedescendant", active)
                .set_opt("aria-labelledby", label_id.clone());

            SelectView {
                id: id.to_string(),
                label: s.label.to_string(),
                label_id,
                display_text,
                is_placeholder,
                indicator: if s.is_open { "▲" } else { "▼" },
                open: s.is_open,
                disabled: s.disabled,
                error: s.error,
                listbox_id: listbox_id.clone(),
                options,
                scroll_offset: s.scroll_offset,
                aria,
            }
        });

        built.unwrap_or_else(|| SelectView {
            id: id.to_string(),
            label: String::new(),
            label_id: None,
            display_text: String::new(),
            is_placeholder: true,
            indicator: "▼",
            open: false,
            disabled: false,
            error: false,
            listbox_id,
            options: Vec::new(),
            scroll_offset: 0,
            aria: AriaAttrs::with_role("combobox"),
        })
    }

    /// Width in terminal cells of the closed trigger: the widest of the
    /// display text and every option label, plus the indicator.
    pub fn intrinsic_width(&self) -> u16 {
        let widest = self
            .with_inner(|s| {
                let shown = if s.selected_label.is_empty() {
                    s.placeholder
                } else {
                    s.selected_label
                };
                s.options
                    .iter()
                    .map(|opt| opt.label.width())
                    .chain(std::iter::once(shown.width()))
                    .max()
                    .unwrap_or(0)
            })
            .unwrap_or(0);
        // +2 for space and dropdown arrow
        (widest + 2).max(10) as u16
    }
}
