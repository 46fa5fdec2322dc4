//! Options displayed by a Select widget.

use serde::{Deserialize, Serialize};

/// One selectable entry: a value, its display label and a disabled flag.
///
/// Option lists are ordered and supplied by the caller. Values are expected
/// to be unique; lookups take the first match.
///
/// # Example
///
/// ```
/// use formkit::widgets::SelectOption;
///
/// let options: Vec<SelectOption<&str>> = vec![
///     ("low", "Low").into(),
///     ("medium", "Medium").into(),
///     SelectOption::new("high", "High").disabled(),
/// ];
/// assert!(options[2].is_disabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption<V> {
    pub value: V,
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
}

impl<V> SelectOption<V> {
    /// Create an enabled option.
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            disabled: false,
        }
    }

    /// Mark the option as not selectable.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

// (value, label) tuples
impl<V, S> From<(V, S)> for SelectOption<V>
where
    S: Into<String>,
{
    fn from((value, label): (V, S)) -> Self {
        Self::new(value, label)
    }
}

/// Label of the first option whose value equals `value`, or `""`.
pub(crate) fn label_for<V: PartialEq>(options: &[SelectOption<V>], value: Option<&V>) -> String {
    value
        .and_then(|v| options.iter().find(|opt| &opt.value == v))
        .map(|opt| opt.label.clone())
        .unwrap_or_default()
}

/// Index of the first option whose value equals `value`.
pub(crate) fn index_of<V: PartialEq>(options: &[SelectOption<V>], value: Option<&V>) -> Option<usize> {
    value.and_then(|v| options.iter().position(|opt| &opt.value == v))
}

/// Next enabled index when stepping from `current`, wrapping around.
///
/// With no current index, stepping forward starts at the first option and
/// stepping backward at the last. Returns `current` when no option is
/// enabled.
pub(crate) fn step_enabled<V>(
    options: &[SelectOption<V>],
    current: Option<usize>,
    forward: bool,
) -> Option<usize> {
    let len = options.len();
    if len == 0 {
        return None;
    }

    let mut index = match (current, forward) {
        (Some(i), _) if i < len => i,
        (_, true) => len - 1,
        (_, false) => 0,
    };
    for _ in 0..len {
        index = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        if !options[index].disabled {
            return Some(index);
        }
    }
    current.filter(|i| *i < len)
}

/// First enabled index scanning from the start (or from the end).
pub(crate) fn edge_enabled<V>(options: &[SelectOption<V>], from_start: bool) -> Option<usize> {
    if from_start {
        options.iter().position(|opt| !opt.disabled)
    } else {
        options.iter().rposition(|opt| !opt.disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(disabled: &[bool]) -> Vec<SelectOption<usize>> {
        disabled
            .iter()
            .enumerate()
            .map(|(i, d)| SelectOption {
                value: i,
                label: format!("Option {}", i),
                disabled: *d,
            })
            .collect()
    }

    #[test]
    fn test_step_wraps_both_ways() {
        let o = opts(&[false, false, false]);
        assert_eq!(step_enabled(&o, Some(2), true), Some(0));
        assert_eq!(step_enabled(&o, Some(0), false), Some(2));
    }

    #[test]
    fn test_step_from_none() {
        let o = opts(&[false, false, false]);
        assert_eq!(step_enabled(&o, None, true), Some(0));
        assert_eq!(step_enabled(&o, None, false), Some(2));
    }

    #[test]
    fn test_step_skips_disabled() {
        let o = opts(&[false, true, false]);
        assert_eq!(step_enabled(&o, Some(0), true), Some(2));
        assert_eq!(step_enabled(&o, Some(2), false), Some(0));
    }

    #[test]
    fn test_step_all_disabled_keeps_current() {
        let o = opts(&[true, true]);
        assert_eq!(step_enabled(&o, Some(1), true), Some(1));
        assert_eq!(step_enabled(&o, None, true), None);
        assert_eq!(step_enabled::<usize>(&[], None, true), None);
    }

    #[test]
    fn test_first_match_wins() {
        let o = vec![
            SelectOption::new(1, "first"),
            SelectOption::new(1, "second"),
        ];
        assert_eq!(label_for(&o, Some(&1)), "first");
        assert_eq!(label_for(&o, Some(&7)), "");
        assert_eq!(label_for(&o, None), "");
    }
}
