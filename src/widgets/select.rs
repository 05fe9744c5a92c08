//! Native `<select>` bridge. The element only knows option keys; this maps
//! them to caller values and back.

use crate::core::option::ListOption;
use crate::runtime::effect::{Effect, perform};
use crate::runtime::host::DomHost;
use crate::widgets::choice::ChoiceProps;

/// Rows of a rendered `<select>`: loose options, or an `<optgroup>`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionGroup<'a> {
    pub label: Option<&'a str>,
    pub options: Vec<&'a ListOption>,
}

/// Key of the `<option>` that shows the committed value.
pub fn selected_key(props: &ChoiceProps) -> Option<&str> {
    props.value_option().map(|option| option.key.as_str())
}

pub fn groups(props: &ChoiceProps) -> Vec<OptionGroup<'_>> {
    let mut out: Vec<OptionGroup<'_>> = Vec::new();
    for option in props.options.iter() {
        if option.unselectable {
            out.push(OptionGroup {
                label: Some(option.label.as_str()),
                options: Vec::new(),
            });
            continue;
        }
        match out.last_mut() {
            Some(group) if group.label.is_some() && option.group.is_some() => {
                group.options.push(option)
            }
            Some(group) if group.label.is_none() => group.options.push(option),
            _ => out.push(OptionGroup {
                label: None,
                options: vec![option],
            }),
        }
    }
    out
}

/// Handles the element's `change` event.
pub fn change(key: &str, props: &ChoiceProps, host: &mut dyn DomHost) -> Vec<Effect> {
    let mut effects = Vec::new();
    if props.disabled {
        return effects;
    }
    match props.options.find_by_key(key) {
        Some(option) if !ChoiceProps::skip(option) => {
            effects.push(Effect::CommitValue(Some(option.value.clone())));
        }
        Some(_) => {}
        None => tracing::warn!(key, "select changed to an unknown option key"),
    }
    perform(&effects, host, &props.callbacks);
    effects
}
