use super::host::DomHost;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Side effects a dispatch performed, in order.
///
/// `SetInputValue` and `DispatchInputEvent` write the input element directly
/// instead of going through the declarative render, so composition/IME input
/// never races a controlled re-render. The value is always written before the
/// synthetic event is dispatched.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FocusInput,
    FocusButton,
    FocusListBox,
    FocusOption { key: String },
    SetInputValue(String),
    DispatchInputEvent,
    /// UTF-16 offsets, as `HTMLInputElement.setSelectionRange` takes them.
    SetSelectionRange { start: usize, end: usize },
    CommitValue(Option<Value>),
    CommitValues(Vec<Value>),
    Search(String),
}

/// Caller callbacks, read from the props snapshot at dispatch time.
#[derive(Clone, Default)]
pub struct Callbacks {
    pub on_value: Option<Callback<Option<Value>>>,
    pub on_values: Option<Callback<Vec<Value>>>,
    pub on_search: Option<Callback<String>>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_value", &self.on_value.is_some())
            .field("on_values", &self.on_values.is_some())
            .field("on_search", &self.on_search.is_some())
            .finish()
    }
}

impl Callbacks {
    pub fn with_on_value(mut self, f: impl Fn(Option<Value>) + Send + Sync + 'static) -> Self {
        self.on_value = Some(Arc::new(f));
        self
    }

    pub fn with_on_values(mut self, f: impl Fn(Vec<Value>) + Send + Sync + 'static) -> Self {
        self.on_values = Some(Arc::new(f));
        self
    }

    pub fn with_on_search(mut self, f: impl Fn(String) + Send + Sync + 'static) -> Self {
        self.on_search = Some(Arc::new(f));
        self
    }
}

/// Replays effects against the host and the caller's callbacks.
pub fn perform(effects: &[Effect], host: &mut dyn DomHost, callbacks: &Callbacks) {
    for effect in effects {
        match effect {
            Effect::FocusInput => host.focus_input(),
            Effect::FocusButton => host.focus_button(),
            Effect::FocusListBox => host.focus_listbox(),
            Effect::FocusOption { key } => host.focus_option(key),
            Effect::SetInputValue(value) => host.set_input_value(value),
            Effect::DispatchInputEvent => host.dispatch_input_event(),
            Effect::SetSelectionRange { start, end } => host.set_selection_range(*start, *end),
            Effect::CommitValue(value) => match &callbacks.on_value {
                Some(on_value) => on_value(value.clone()),
                None => tracing::warn!("value committed but no on_value callback is set"),
            },
            Effect::CommitValues(values) => match &callbacks.on_values {
                Some(on_values) => on_values(values.clone()),
                None => tracing::warn!("values committed but no on_values callback is set"),
            },
            Effect::Search(text) => {
                if let Some(on_search) = &callbacks.on_search {
                    on_search(text.clone());
                }
            }
        }
    }
}
