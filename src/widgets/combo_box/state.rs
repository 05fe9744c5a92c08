use super::props::ComboBoxProps;
use crate::core::option::ListOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    /// Typing; the list shows suggestions.
    OpenUnfocused,
    /// Keyboard focus rests on an option.
    OpenFocused,
}

/// Interaction state of a combo box.
///
/// Invariants kept by the reducer:
/// - `focus_list_box` implies `focused_option.is_some()`;
/// - `suggested_option` is `None` whenever `focus_list_box` is set;
/// - a closed combo box has no focused option, search or suggestion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComboBoxState {
    pub expanded: bool,
    pub focus_list_box: bool,
    pub search: Option<String>,
    pub focused_option: Option<ListOption>,
    /// Best match for the search, kept apart from `focused_option` so it never
    /// overrides an option the user navigated to.
    pub suggested_option: Option<ListOption>,
    /// Complete the input text with the suggestion's remaining label.
    pub inline_autoselect: bool,
    /// The last edit removed text; autoselect holds off until the user types.
    pub deleting: bool,
}

impl ComboBoxState {
    pub fn phase(&self) -> Phase {
        match (self.expanded, self.focus_list_box) {
            (false, _) => Phase::Closed,
            (true, false) => Phase::OpenUnfocused,
            (true, true) => Phase::OpenFocused,
        }
    }

    pub fn show_list_box(&self, props: &ComboBoxProps) -> bool {
        self.expanded && props.options.results().next().is_some()
    }

    pub fn show_not_found(&self, props: &ComboBoxProps) -> bool {
        self.expanded
            && props.options.results().next().is_none()
            && self
                .search
                .as_deref()
                .is_some_and(|search| !search.trim().is_empty())
    }

    /// Text the input should display.
    pub fn input_text(&self, props: &ComboBoxProps) -> String {
        match (&self.search, &self.focused_option) {
            (Some(search), Some(focused)) if self.inline_autoselect => {
                inline_completion(search, &focused.label).unwrap_or_else(|| search.clone())
            }
            (Some(search), _) => search.clone(),
            (None, _) => props.value_label(),
        }
    }

    /// Key of the option to expose through `aria-activedescendant`.
    pub fn active_descendant(&self) -> Option<&str> {
        if !self.expanded {
            return None;
        }
        self.focused_option.as_ref().map(|option| option.key.as_str())
    }
}

/// `search` followed by the rest of `label`, when `label` starts with it.
pub(crate) fn inline_completion(search: &str, label: &str) -> Option<String> {
    if !crate::core::search::prefix_match(label, search) {
        return None;
    }
    let rest: String = label.chars().skip(search.chars().count()).collect();
    Some(format!("{search}{rest}"))
}
