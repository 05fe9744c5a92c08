use crate::core::option::{Identity, ListOption, Options};
use crate::runtime::effect::Callbacks;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Props shared by the native-control widgets: select, radios and checkboxes.
#[derive(Clone, Debug)]
pub struct ChoiceProps {
    pub options: Arc<Options>,
    /// Committed value of a single-choice widget.
    pub value: Option<Value>,
    /// Committed values of a multi-choice widget.
    pub values: Vec<Value>,
    pub callbacks: Callbacks,
    pub disabled: bool,
}

impl ChoiceProps {
    pub fn new(options: Options) -> Self {
        Self {
            options: Arc::new(options),
            value: None,
            values: Vec::new(),
            callbacks: Callbacks::default(),
            disabled: false,
        }
    }

    pub fn with_value(mut self, value: Option<Value>) -> Self {
        self.value = value;
        self
    }

    pub fn with_values(mut self, values: Vec<Value>) -> Self {
        self.values = values;
        self
    }

    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn skip(option: &ListOption) -> bool {
        option.unselectable || option.disabled
    }

    pub fn value_option(&self) -> Option<&ListOption> {
        self.value
            .as_ref()
            .filter(|value| !value.is_null())
            .and_then(|value| self.options.find_value(value))
    }

    pub fn checked_identities(&self) -> HashSet<Identity> {
        self.values
            .iter()
            .map(|value| self.options.identity_for_value(value))
            .collect()
    }
}
