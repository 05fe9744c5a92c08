use crate::error::ConfigError;
use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::{RootSchema, Schema};
use serde::{Deserialize, Serialize};

/// How the best match for the typed text is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "AutoselectRepr", into = "AutoselectRepr")]
pub enum Autoselect {
    #[default]
    Off,
    /// Focus the suggested option.
    On,
    /// Focus it and complete the input text with the rest of its label.
    Inline,
}

impl Autoselect {
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl JsonSchema for Autoselect {
    fn schema_name() -> String {
        "Autoselect".to_string()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        AutoselectRepr::json_schema(generator)
    }
}

/// Wire form: `false`, `true` or `"inline"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
enum AutoselectRepr {
    Flag(bool),
    Mode(AutoselectMode),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
enum AutoselectMode {
    Inline,
}

impl From<AutoselectRepr> for Autoselect {
    fn from(repr: AutoselectRepr) -> Self {
        match repr {
            AutoselectRepr::Flag(false) => Self::Off,
            AutoselectRepr::Flag(true) => Self::On,
            AutoselectRepr::Mode(AutoselectMode::Inline) => Self::Inline,
        }
    }
}

impl From<Autoselect> for AutoselectRepr {
    fn from(value: Autoselect) -> Self {
        match value {
            Autoselect::Off => Self::Flag(false),
            Autoselect::On => Self::Flag(true),
            Autoselect::Inline => Self::Mode(AutoselectMode::Inline),
        }
    }
}

/// Live-region strings. `{count}`, `{label}`, `{position}` and `{total}` are
/// substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Messages {
    pub not_found: String,
    pub found_one: String,
    pub found_many: String,
    pub highlighted: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            not_found: "No results found".to_string(),
            found_one: "1 result is available".to_string(),
            found_many: "{count} results are available".to_string(),
            highlighted: "{label} {position} of {total} is highlighted".to_string(),
        }
    }
}

impl Messages {
    pub fn found_results(&self, count: usize) -> String {
        let template = if count == 1 {
            &self.found_one
        } else {
            &self.found_many
        };
        template.replace("{count}", &count.to_string())
    }

    pub fn highlighted_option(&self, label: &str, position: usize, total: usize) -> String {
        self.highlighted
            .replace("{label}", label)
            .replace("{position}", &position.to_string())
            .replace("{total}", &total.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ComboBoxConfig {
    /// Prefix for rendered option keys; see [`ComboBoxProps::from_config`].
    ///
    /// [`ComboBoxProps::from_config`]: crate::widgets::combo_box::ComboBoxProps::from_config
    pub id: String,
    pub autoselect: Autoselect,
    /// Move DOM focus onto options while navigating.
    pub managed_focus: bool,
    /// Tab accepts the suggested option.
    pub tab_autocomplete: bool,
    /// Blurring commits the focused option.
    pub select_on_blur: bool,
    pub close_on_select: bool,
    pub expand_on_focus: bool,
    pub disabled: bool,
    /// Quiet period before an asynchronous search starts; read by
    /// [`SearchController::from_config`](crate::task::SearchController::from_config).
    pub search_debounce_ms: u64,
    pub messages: Messages,
}

impl Default for ComboBoxConfig {
    fn default() -> Self {
        Self {
            id: "combo-box".to_string(),
            autoselect: Autoselect::Off,
            managed_focus: true,
            tab_autocomplete: false,
            select_on_blur: true,
            close_on_select: true,
            expand_on_focus: false,
            disabled: false,
            search_debounce_ms: 0,
            messages: Messages::default(),
        }
    }
}

impl ComboBoxConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn json_schema() -> RootSchema {
        schemars::schema_for!(ComboBoxConfig)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct DropDownConfig {
    /// Prefix for rendered option keys.
    pub id: String,
    pub disabled: bool,
    /// Idle time after which the type-ahead buffer is cleared.
    pub type_ahead_ms: u64,
    pub messages: Messages,
}

impl Default for DropDownConfig {
    fn default() -> Self {
        Self {
            id: "drop-down".to_string(),
            disabled: false,
            type_ahead_ms: 1000,
            messages: Messages::default(),
        }
    }
}

impl DropDownConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn json_schema() -> RootSchema {
        schemars::schema_for!(DropDownConfig)
    }
}
