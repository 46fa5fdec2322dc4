//! Render snapshot for the Toggle widget.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::aria::AriaAttrs;

use super::ToggleControl;

/// Everything a host needs to draw a toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleView {
    pub id: String,
    /// Label text, empty when the toggle has no label.
    pub label: String,
    /// Id the label element must carry (present only with a label).
    pub label_id: Option<String>,
    pub checked: bool,
    pub disabled: bool,
    pub loading: bool,
    /// Text indicator for character-cell hosts.
    pub indicator: &'static str,
    pub aria: AriaAttrs,
}

impl ToggleView {
    /// Style classes matching the current state.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["ui-switch"];
        if self.checked {
            classes.push("ui-switch-checked");
        }
        if self.disabled {
            classes.push("ui-switch-disabled");
        }
        if self.loading {
            classes.push("ui-switch-loading");
        }
        classes
    }
}

fn indicator(checked: bool, loading: bool) -> &'static str {
    match (loading, checked) {
        (true, _) => "(…)",
        (false, true) => "(●)",
        (false, false) => "(○)",
    }
}

impl ToggleControl {
    /// Snapshot the current state for rendering.
    pub fn view(&self) -> ToggleView {
        let checked = self.value();
        let disabled = self.is_disabled();
        let loading = self.is_loading();
        let label = self.label();
        let label_id = (!label.is_empty()).then(|| self.id().label_id());

        let aria = AriaAttrs::with_role("switch")
            .flag("aria-checked", checked)
            .flag("aria-disabled", disabled)
            .set_opt("aria-labelledby", label_id.clone());
        let aria = if loading {
            aria.flag("aria-busy", true)
        } else {
            aria
        };

        ToggleView {
            id: self.id().to_string(),
            label,
            label_id,
            checked,
            disabled,
            loading,
            indicator: indicator(checked, loading),
            aria,
        }
    }

    /// Width in terminal cells: indicator, a space, then the label.
    pub fn intrinsic_width(&self) -> u16 {
        let label = self.label();
        let indicator_width = indicator(self.value(), self.is_loading()).width();
        let width = if label.is_empty() {
            indicator_width
        } else {
            indicator_width + 1 + label.width()
        };
        width as u16
    }
}
