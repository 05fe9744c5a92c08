pub mod config;
pub mod core;
pub mod error;
pub mod runtime;
pub mod task;
pub mod widgets;

pub use config::{Autoselect, ComboBoxConfig, DropDownConfig, Messages};
pub use error::{ConfigError, SearchError};

pub use crate::core::nav;
pub use crate::core::option;
pub use crate::core::search;

pub use runtime::effect;
pub use runtime::host;
pub use runtime::key;
pub use runtime::scheduler;

pub use widgets::checkboxes;
pub use widgets::combo_box;
pub use widgets::drop_down;
pub use widgets::radios;
pub use widgets::select;
