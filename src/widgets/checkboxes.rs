use crate::core::option::{Identity, ListOption};
use crate::runtime::effect::{Effect, perform};
use crate::runtime::host::DomHost;
use crate::widgets::choice::ChoiceProps;
use serde_json::Value;

pub fn is_checked(option: &ListOption, props: &ChoiceProps) -> bool {
    props.checked_identities().contains(&option.identity)
}

/// Flips one checkbox and commits the resulting set, in option order.
pub fn toggle(identity: &Identity, props: &ChoiceProps, host: &mut dyn DomHost) -> Vec<Effect> {
    let mut effects = Vec::new();
    let Some(option) = props.options.find(identity) else {
        return effects;
    };
    if props.disabled || ChoiceProps::skip(option) {
        return effects;
    }

    let mut checked = props.checked_identities();
    if !checked.remove(identity) {
        checked.insert(identity.clone());
    }
    tracing::debug!(option = %identity, checked = checked.contains(identity), "checkbox toggled");

    let values: Vec<Value> = props
        .options
        .iter()
        .filter(|option| checked.contains(&option.identity))
        .map(|option| option.value.clone())
        .collect();
    effects.push(Effect::CommitValues(values));
    perform(&effects, host, &props.callbacks);
    effects
}

#[cfg(test)]
mod tests {
    use super::{is_checked, toggle};
    use crate::core::option::Options;
    use crate::runtime::effect::{Callbacks, Effect};
    use crate::runtime::host::DetachedHost;
    use crate::widgets::choice::ChoiceProps;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    fn props(values: Vec<Value>) -> ChoiceProps {
        ChoiceProps::new(Options::from_raw(&[
            json!({ "id": 1, "label": "Email" }),
            json!({ "id": 2, "label": "Phone", "disabled": true }),
            json!({ "id": 3, "label": "Post" }),
        ]))
        .with_values(values)
    }

    #[test]
    fn toggling_keeps_option_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let props = props(vec![json!({ "id": 3, "label": "Post" })]).with_callbacks(
            Callbacks::default().with_on_values(move |values| {
                sink.lock().expect("lock").push(values);
            }),
        );
        let email = props.options.as_slice()[0].identity.clone();
        let effects = toggle(&email, &props, &mut DetachedHost);
        let expected = vec![
            json!({ "id": 1, "label": "Email" }),
            json!({ "id": 3, "label": "Post" }),
        ];
        assert_eq!(effects, vec![Effect::CommitValues(expected.clone())]);
        assert_eq!(*seen.lock().expect("lock"), vec![expected]);
    }

    #[test]
    fn toggling_a_checked_box_removes_it() {
        let props = props(vec![json!({ "id": 1, "label": "Email" })]);
        let email = &props.options.as_slice()[0];
        assert!(is_checked(email, &props));
        let effects = toggle(&email.identity, &props, &mut DetachedHost);
        assert_eq!(effects, vec![Effect::CommitValues(Vec::new())]);
    }

    #[test]
    fn disabled_boxes_do_not_toggle() {
        let props = props(Vec::new());
        let phone = props.options.as_slice()[1].identity.clone();
        assert!(toggle(&phone, &props, &mut DetachedHost).is_empty());
    }
}
