use crate::config::ComboBoxConfig;
use crate::core::option::{Identity, ListOption, Options, SkipOption};
use crate::runtime::effect::Callbacks;
use crate::runtime::key::Platform;
use serde_json::Value;
use std::sync::Arc;

/// Read-only snapshot of the caller's configuration, passed to every dispatch.
#[derive(Clone, Debug)]
pub struct ComboBoxProps {
    pub options: Arc<Options>,
    pub value: Option<Value>,
    pub config: ComboBoxConfig,
    pub callbacks: Callbacks,
    pub skip_option: Option<SkipOptionFn>,
    pub platform: Platform,
}

/// Debug-printable wrapper around a skip predicate.
#[derive(Clone)]
pub struct SkipOptionFn(pub SkipOption);

impl std::fmt::Debug for SkipOptionFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SkipOptionFn")
    }
}

impl ComboBoxProps {
    pub fn new(options: Options) -> Self {
        Self {
            options: Arc::new(options),
            value: None,
            config: ComboBoxConfig::default(),
            callbacks: Callbacks::default(),
            skip_option: None,
            platform: Platform::detect(),
        }
    }

    /// Normalizes `raw` with option keys prefixed by `config.id`.
    pub fn from_config(raw: &[Value], config: ComboBoxConfig) -> Self {
        let options = Options::builder(raw).with_id_prefix(config.id.as_str()).build();
        Self::new(options).with_config(config)
    }

    pub fn with_value(mut self, value: Option<Value>) -> Self {
        self.value = value;
        self
    }

    pub fn with_config(mut self, config: ComboBoxConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn with_skip_option(mut self, skip: SkipOption) -> Self {
        self.skip_option = Some(SkipOptionFn(skip));
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn set_options(&mut self, options: Options) {
        self.options = Arc::new(options);
    }

    /// Structural rows are always skipped; the caller's predicate replaces
    /// the default disabled check.
    pub fn skip(&self, option: &ListOption) -> bool {
        option.unselectable
            || match &self.skip_option {
                Some(SkipOptionFn(skip)) => skip(option),
                None => option.disabled,
            }
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref().filter(|value| !value.is_null())
    }

    pub fn value_identity(&self) -> Option<Identity> {
        self.value()
            .map(|value| self.options.identity_for_value(value))
    }

    pub fn value_option(&self) -> Option<&ListOption> {
        self.value().and_then(|value| self.options.find_value(value))
    }

    /// Resolves a (possibly stale) option against the current list.
    pub fn resolve(&self, option: &ListOption) -> Option<&ListOption> {
        self.options.find(&option.identity)
    }

    /// Text of the committed value, shown in the input while no search is
    /// active.
    pub fn value_label(&self) -> String {
        match (self.value_option(), self.value()) {
            (Some(option), _) => option.label.clone(),
            (None, Some(Value::String(text))) => text.clone(),
            (None, Some(other)) => other
                .get("label")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_default(),
            (None, None) => String::new(),
        }
    }
}
