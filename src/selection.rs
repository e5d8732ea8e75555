//! Multi-select model for the registration form's category and language fields.
//!
//! Selections are not checked against the offered options list.

use serde::{Deserialize, Serialize};

/// Returns `selected` with `option` removed if present, appended otherwise.
pub fn toggle(selected: &[String], option: &str) -> Vec<String> {
    if selected.iter().any(|s| s == option) {
        remove(selected, option)
    } else {
        let mut next = selected.to_vec();
        next.push(option.to_string());
        next
    }
}

/// Returns `selected` without `option`.
pub fn remove(selected: &[String], option: &str) -> Vec<String> {
    selected.iter().filter(|s| *s != option).cloned().collect()
}

/// Ordered set of chosen labels, kept in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Selection(Vec<String>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggled(&self, option: &str) -> Self {
        Self(toggle(&self.0, option))
    }

    pub fn contains(&self, option: &str) -> bool {
        self.0.iter().any(|s| s == option)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Selection {
    /// keeps the first occurrence of each label
    fn from(items: Vec<String>) -> Self {
        items
            .into_iter()
            .fold(Self::new(), |sel, item| if sel.contains(&item) { sel } else { sel.toggled(&item) })
    }
}

impl From<Selection> for Vec<String> {
    fn from(sel: Selection) -> Self {
        sel.0
    }
}
