//! ARIA attributes mirrored from control state.

use serde::{Deserialize, Serialize};

/// Ordered attribute list a host copies onto the rendered control.
///
/// Values are the literal strings the attribute should carry
/// (`"true"`/`"false"` for boolean states).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AriaAttrs {
    attrs: Vec<(String, String)>,
}

impl AriaAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an attribute list with a `role`.
    pub fn with_role(role: &str) -> Self {
        Self::new().set("role", role)
    }

    /// Set an attribute, replacing a previous value.
    pub fn set(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
        self
    }

    /// Set a boolean state attribute.
    pub fn flag(self, name: &str, on: bool) -> Self {
        self.set(name, if on { "true" } else { "false" })
    }

    /// Set an attribute only when `value` is present.
    pub fn set_opt(self, name: &str, value: Option<String>) -> Self {
        match value {
            Some(v) => self.set(name, v),
            None => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}
