use crate::config::DropDownConfig;
use crate::core::option::{ListOption, Options, SkipOption};
use crate::runtime::effect::Callbacks;
use crate::runtime::key::Platform;
use crate::widgets::combo_box::SkipOptionFn;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct DropDownProps {
    pub options: Arc<Options>,
    pub value: Option<Value>,
    pub config: DropDownConfig,
    pub callbacks: Callbacks,
    pub skip_option: Option<SkipOptionFn>,
    pub platform: Platform,
}

impl DropDownProps {
    pub fn new(options: Options) -> Self {
        Self {
            options: Arc::new(options),
            value: None,
            config: DropDownConfig::default(),
            callbacks: Callbacks::default(),
            skip_option: None,
            platform: Platform::detect(),
        }
    }

    /// Normalizes `raw` with option keys prefixed by `config.id`.
    pub fn from_config(raw: &[Value], config: DropDownConfig) -> Self {
        let options = Options::builder(raw).with_id_prefix(config.id.as_str()).build();
        Self::new(options).with_config(config)
    }

    pub fn with_value(mut self, value: Option<Value>) -> Self {
        self.value = value;
        self
    }

    pub fn with_config(mut self, config: DropDownConfig) -> Self {
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

    pub fn skip(&self, option: &ListOption) -> bool {
        option.unselectable
            || match &self.skip_option {
                Some(SkipOptionFn(skip)) => skip(option),
                None => option.disabled,
            }
    }

    pub fn value_option(&self) -> Option<&ListOption> {
        self.value
            .as_ref()
            .filter(|value| !value.is_null())
            .and_then(|value| self.options.find_value(value))
    }

    pub fn resolve(&self, option: &ListOption) -> Option<&ListOption> {
        self.options.find(&option.identity)
    }

    /// Label shown on the button.
    pub fn button_label(&self) -> String {
        self.value_option()
            .map(|option| option.label.clone())
            .unwrap_or_default()
    }
}
