//! Radio group with roving selection: moving is selecting.

use crate::core::nav::{NavOptions, first_in_list, last_in_list, next_in_list, previous_in_list};
use crate::core::option::{Identity, ListOption};
use crate::runtime::effect::{Effect, perform};
use crate::runtime::host::DomHost;
use crate::runtime::key::{KeyCode, KeyEvent};
use crate::widgets::choice::ChoiceProps;

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    KeyDown(KeyEvent),
    Click(Identity),
    /// A radio input received focus.
    Focus(Identity),
}

#[derive(Debug, Default, Clone)]
pub struct Radios {
    focused: Option<Identity>,
}

impl Radios {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single radio in the tab order: the checked one, else the first
    /// enabled one.
    pub fn tab_stop<'a>(&self, props: &'a ChoiceProps) -> Option<&'a ListOption> {
        props
            .value_option()
            .filter(|option| !ChoiceProps::skip(option))
            .or_else(|| first_in_list(props.options.as_slice(), &ChoiceProps::skip))
    }

    pub fn dispatch(
        &mut self,
        intent: Intent,
        props: &ChoiceProps,
        host: &mut dyn DomHost,
    ) -> Vec<Effect> {
        tracing::debug!(?intent, "radios dispatch");
        let mut effects = Vec::new();
        if props.disabled {
            return effects;
        }

        match intent {
            Intent::Focus(identity) => self.focused = Some(identity),
            Intent::Click(identity) => {
                if let Some(option) = props.options.find(&identity) {
                    if !ChoiceProps::skip(option) {
                        self.focused = Some(identity);
                        commit(option, props, &mut effects);
                    }
                }
            }
            Intent::KeyDown(key) => {
                let options = props.options.as_slice();
                let current = self
                    .focused
                    .as_ref()
                    .and_then(|identity| props.options.find(identity))
                    .or_else(|| self.tab_stop(props))
                    .map(|option| option.index);
                let nav = NavOptions::new(&ChoiceProps::skip);
                let target = match key.code {
                    KeyCode::Down | KeyCode::Right => next_in_list(options, current, nav),
                    KeyCode::Up | KeyCode::Left => previous_in_list(options, current, nav),
                    KeyCode::Home => first_in_list(options, &ChoiceProps::skip),
                    KeyCode::End => last_in_list(options, &ChoiceProps::skip),
                    KeyCode::Char(' ') => current.and_then(|index| options.get(index)),
                    _ => None,
                };
                if let Some(option) = target.filter(|option| !ChoiceProps::skip(option)) {
                    self.focused = Some(option.identity.clone());
                    effects.push(Effect::FocusOption {
                        key: option.key.clone(),
                    });
                    commit(option, props, &mut effects);
                }
            }
        }

        perform(&effects, host, &props.callbacks);
        effects
    }
}

fn commit(option: &ListOption, props: &ChoiceProps, effects: &mut Vec<Effect>) {
    let current = props.value_option().map(|current| &current.identity);
    if current != Some(&option.identity) {
        effects.push(Effect::CommitValue(Some(option.value.clone())));
    }
}

#[cfg(test)]
mod tests {
    use super::{Intent, Radios};
    use crate::core::option::Options;
    use crate::runtime::effect::Effect;
    use crate::runtime::host::testing::{HostCall, RecordingHost};
    use crate::runtime::key::{KeyCode, KeyEvent};
    use crate::widgets::choice::ChoiceProps;
    use serde_json::json;

    fn props(value: Option<&str>) -> ChoiceProps {
        ChoiceProps::new(Options::from_raw(&[
            json!({ "value": "s", "label": "Small" }),
            json!({ "value": "m", "label": "Medium", "disabled": true }),
            json!({ "value": "l", "label": "Large" }),
        ]))
        .with_value(value.map(|value| json!(value)))
    }

    #[test]
    fn arrows_skip_disabled_and_commit() {
        let props = props(Some("s"));
        let mut host = RecordingHost::default();
        let mut radios = Radios::new();
        let effects = radios.dispatch(Intent::KeyDown(KeyEvent::key(KeyCode::Down)), &props, &mut host);
        let large = props.options.as_slice()[2].key.clone();
        assert_eq!(
            effects,
            vec![
                Effect::FocusOption { key: large.clone() },
                Effect::CommitValue(Some(json!({ "value": "l", "label": "Large" }))),
            ]
        );
        assert_eq!(host.take(), vec![HostCall::FocusOption(large)]);
    }

    #[test]
    fn movement_wraps_around() {
        let props = props(Some("l"));
        let mut host = RecordingHost::default();
        let mut radios = Radios::new();
        radios.dispatch(Intent::KeyDown(KeyEvent::key(KeyCode::Right)), &props, &mut host);
        let small = props.options.as_slice()[0].key.clone();
        assert_eq!(host.take(), vec![HostCall::FocusOption(small)]);
    }

    #[test]
    fn tab_stop_falls_back_to_the_first_enabled_radio() {
        let props = props(None);
        let radios = Radios::new();
        assert_eq!(radios.tab_stop(&props).map(|o| o.label.as_str()), Some("Small"));
    }

    #[test]
    fn clicking_the_checked_radio_commits_nothing() {
        let props = props(Some("s"));
        let mut host = RecordingHost::default();
        let mut radios = Radios::new();
        let small = props.options.as_slice()[0].identity.clone();
        assert!(radios.dispatch(Intent::Click(small), &props, &mut host).is_empty());
        let medium = props.options.as_slice()[1].identity.clone();
        assert!(radios.dispatch(Intent::Click(medium), &props, &mut host).is_empty());
    }
}
