use crate::core::option::Identity;
use crate::runtime::key::KeyEvent;
use crate::widgets::focus_boundary::FocusChange;

/// User or caller intents, translated from DOM events by the embedder.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// The input's text changed through typing, paste or deletion.
    InputChange(String),
    KeyDown(KeyEvent),
    InputClick,
    /// Raw focus event on the widget root; routed through a `FocusBoundary`.
    Focus(FocusChange),
    /// Focus has left the widget, for embedders doing their own boundary check.
    Blur,
    OptionClick(Identity),
    /// The clear button was pressed.
    Clear,
    /// The caller supplied a new option list.
    OptionsChanged,
    /// The caller changed the committed value.
    ValueChanged,
}
