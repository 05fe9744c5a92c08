use crate::core::option::ListOption;

/// Interaction state of a drop-down. There is no free text; `search` is the
/// type-ahead buffer and is cleared after a period without typing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DropDownState {
    pub expanded: bool,
    pub focused_option: Option<ListOption>,
    pub search: String,
}

impl DropDownState {
    pub fn active_descendant(&self) -> Option<&str> {
        if !self.expanded {
            return None;
        }
        self.focused_option.as_ref().map(|option| option.key.as_str())
    }
}
