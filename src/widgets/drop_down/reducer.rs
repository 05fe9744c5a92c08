use super::props::DropDownProps;
use super::state::DropDownState;
use crate::core::nav::first_in_list;
use crate::core::option::ListOption;

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Opens on the committed value, or the first selectable option.
    Open,
    Close,
    FocusOption(ListOption),
    /// Type-ahead buffer grew; `matched` is the option it now points at.
    TypeAhead {
        search: String,
        matched: Option<ListOption>,
    },
    ClearSearch,
    OptionsReplaced,
}

/// Returns `None` when the transition leaves the state untouched.
pub fn reduce(
    state: &DropDownState,
    transition: &Transition,
    props: &DropDownProps,
) -> Option<DropDownState> {
    let skip = |option: &ListOption| props.skip(option);
    let next = match transition {
        Transition::Open => {
            if state.expanded {
                return None;
            }
            let focused = props
                .value_option()
                .filter(|option| !skip(*option))
                .or_else(|| first_in_list(props.options.as_slice(), &skip))?;
            DropDownState {
                expanded: true,
                focused_option: Some(focused.clone()),
                ..state.clone()
            }
        }
        Transition::Close => DropDownState::default(),
        Transition::FocusOption(option) => DropDownState {
            focused_option: Some(option.clone()),
            ..state.clone()
        },
        Transition::TypeAhead { search, matched } => DropDownState {
            search: search.clone(),
            focused_option: matched.clone().or_else(|| state.focused_option.clone()),
            ..state.clone()
        },
        Transition::ClearSearch => DropDownState {
            search: String::new(),
            ..state.clone()
        },
        Transition::OptionsReplaced => {
            if !state.expanded {
                return None;
            }
            let resolved = state
                .focused_option
                .as_ref()
                .and_then(|focused| props.resolve(focused))
                .or_else(|| first_in_list(props.options.as_slice(), &skip))
                .cloned();
            DropDownState {
                focused_option: resolved,
                ..state.clone()
            }
        }
    };

    (next != *state).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::{Transition, reduce};
    use crate::core::option::Options;
    use crate::widgets::drop_down::props::DropDownProps;
    use crate::widgets::drop_down::state::DropDownState;
    use serde_json::json;

    fn props() -> DropDownProps {
        DropDownProps::new(Options::from_strings(["Red", "Green", "Blue"]))
    }

    #[test]
    fn open_focuses_the_value_or_first_option() {
        let first = reduce(&DropDownState::default(), &Transition::Open, &props()).expect("open");
        assert_eq!(first.focused_option.map(|o| o.label), Some("Red".to_string()));

        let valued = props().with_value(Some(json!("Blue")));
        let open = reduce(&DropDownState::default(), &Transition::Open, &valued).expect("open");
        assert_eq!(open.focused_option.map(|o| o.label), Some("Blue".to_string()));
    }

    #[test]
    fn open_with_no_options_is_a_no_op() {
        let empty = DropDownProps::new(Options::from_strings(Vec::<String>::new()));
        assert!(reduce(&DropDownState::default(), &Transition::Open, &empty).is_none());
    }

    #[test]
    fn options_replaced_falls_back_to_the_first_option() {
        let mut props = props();
        let open = reduce(&DropDownState::default(), &Transition::Open, &props).expect("open");
        let blue = props.options.get(2).cloned().expect("blue");
        let focused = reduce(&open, &Transition::FocusOption(blue), &props).expect("focus");

        props.set_options(Options::from_strings(["Cyan", "Blue"]));
        let kept = reduce(&focused, &Transition::OptionsReplaced, &props).expect("re-resolved");
        assert_eq!(kept.focused_option.as_ref().map(|o| o.index), Some(1));

        props.set_options(Options::from_strings(["Cyan", "Magenta"]));
        let fallback = reduce(&kept, &Transition::OptionsReplaced, &props).expect("fallback");
        assert_eq!(fallback.focused_option.map(|o| o.label), Some("Cyan".to_string()));
    }

    #[test]
    fn type_ahead_without_a_match_keeps_focus() {
        let props = props();
        let open = reduce(&DropDownState::default(), &Transition::Open, &props).expect("open");
        let next = reduce(
            &open,
            &Transition::TypeAhead {
                search: "x".into(),
                matched: None,
            },
            &props,
        )
        .expect("buffered");
        assert_eq!(next.search, "x");
        assert_eq!(next.focused_option, open.focused_option);
    }
}
