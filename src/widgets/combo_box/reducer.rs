use super::props::ComboBoxProps;
use super::state::{ComboBoxState, inline_completion};
use crate::config::Autoselect;
use crate::core::option::ListOption;
use crate::core::search::suggest_option;

/// Plain state transitions. Produced by the interpreter after any side
/// effects are decided; reduced without touching the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Open,
    Close,
    Search { text: String, deleting: bool },
    FocusOption {
        option: Option<ListOption>,
        focus_list_box: bool,
    },
    ClearFocusedOption,
    /// A value was committed and the list stays open on it.
    Selected(Option<ListOption>),
    FocusInput,
    OptionsReplaced,
    ValueReplaced,
}

/// A reducer stage returns `None` when it leaves the state untouched.
pub type Stage = fn(&ComboBoxState, &Transition, &ComboBoxProps) -> Option<ComboBoxState>;

/// Stages in the order they run over one transition.
pub const STAGES: &[Stage] = &[reduce, apply_autoselect];

/// Runs every stage; `None` means the state is unchanged.
pub fn run(
    state: &ComboBoxState,
    transition: &Transition,
    props: &ComboBoxProps,
) -> Option<ComboBoxState> {
    let mut changed: Option<ComboBoxState> = None;
    for stage in STAGES {
        let current = changed.as_ref().unwrap_or(state);
        if let Some(next) = stage(current, transition, props) {
            changed = Some(next);
        }
    }
    changed.filter(|next| next != state)
}

/// Stage one: the transition itself.
///
/// Computes `suggested_option` for transitions that change the search or the
/// option list; promotion to `focused_option` is left to [`apply_autoselect`].
pub fn reduce(
    state: &ComboBoxState,
    transition: &Transition,
    props: &ComboBoxProps,
) -> Option<ComboBoxState> {
    let next = match transition {
        Transition::Open => {
            if state.expanded {
                return None;
            }
            ComboBoxState {
                expanded: true,
                ..state.clone()
            }
        }
        Transition::Close => ComboBoxState::default(),
        Transition::Search { text, deleting } => {
            let mut next = ComboBoxState {
                expanded: true,
                focus_list_box: false,
                search: Some(text.clone()),
                focused_option: None,
                suggested_option: None,
                inline_autoselect: false,
                deleting: *deleting,
            };
            next.suggested_option = suggestion(&next, props);
            next
        }
        Transition::FocusOption {
            option,
            focus_list_box,
        } => ComboBoxState {
            expanded: true,
            focus_list_box: *focus_list_box && option.is_some(),
            focused_option: option.clone(),
            inline_autoselect: false,
            ..state.clone()
        },
        Transition::ClearFocusedOption => ComboBoxState {
            focus_list_box: false,
            focused_option: None,
            suggested_option: None,
            inline_autoselect: false,
            ..state.clone()
        },
        Transition::Selected(option) => ComboBoxState {
            expanded: true,
            focus_list_box: false,
            search: None,
            focused_option: option.clone(),
            suggested_option: None,
            inline_autoselect: false,
            deleting: false,
        },
        Transition::FocusInput => ComboBoxState {
            focus_list_box: false,
            ..state.clone()
        },
        Transition::OptionsReplaced => {
            if !state.expanded {
                return None;
            }
            let mut next = state.clone();
            let was_suggestion = match (&state.focused_option, &state.suggested_option) {
                (Some(focused), Some(suggested)) => focused.same_identity(suggested),
                _ => false,
            };
            next.focused_option = if was_suggestion && !state.focus_list_box {
                None
            } else {
                state
                    .focused_option
                    .as_ref()
                    .and_then(|focused| props.resolve(focused))
                    .cloned()
            };
            if next.focused_option.is_none() {
                next.focus_list_box = false;
                next.inline_autoselect = false;
            }
            next.suggested_option = suggestion(&next, props);
            next
        }
        Transition::ValueReplaced => {
            if !state.expanded {
                return None;
            }
            let focused = props.value_option().cloned();
            ComboBoxState {
                focus_list_box: state.focus_list_box && focused.is_some(),
                focused_option: focused,
                inline_autoselect: false,
                ..state.clone()
            }
        }
    };

    (next != *state).then_some(next)
}

/// Stage two: promote the suggestion unless the user is on the list.
///
/// Inline completion additionally needs the whole label to start with the
/// search; word matches elsewhere in the label are focused but not inlined.
pub fn apply_autoselect(
    state: &ComboBoxState,
    _transition: &Transition,
    props: &ComboBoxProps,
) -> Option<ComboBoxState> {
    let mut next = state.clone();
    if next.focus_list_box {
        next.suggested_option = None;
        next.inline_autoselect = false;
    } else if props.config.autoselect.is_enabled() {
        if let Some(suggested) = &next.suggested_option {
            next.inline_autoselect = props.config.autoselect == Autoselect::Inline
                && next
                    .search
                    .as_deref()
                    .and_then(|search| inline_completion(search, &suggested.label))
                    .is_some();
            next.focused_option = Some(suggested.clone());
        }
    } else {
        next.inline_autoselect = false;
    }

    (next != *state).then_some(next)
}

fn suggestion(state: &ComboBoxState, props: &ComboBoxProps) -> Option<ListOption> {
    let wanted = props.config.autoselect.is_enabled() || props.config.tab_autocomplete;
    if !wanted || state.focus_list_box || state.deleting {
        return None;
    }
    let search = state.search.as_deref()?;
    suggest_option(search, props.options.as_slice(), &|option| props.skip(option)).cloned()
}

#[cfg(test)]
mod tests {
    use super::{Transition, apply_autoselect, reduce, run};
    use crate::config::{Autoselect, ComboBoxConfig};
    use crate::core::option::Options;
    use crate::widgets::combo_box::props::ComboBoxProps;
    use crate::widgets::combo_box::state::{ComboBoxState, Phase};

    fn props(autoselect: Autoselect) -> ComboBoxProps {
        ComboBoxProps::new(Options::from_strings(["Apple", "Banana", "Cherry"])).with_config(
            ComboBoxConfig {
                autoselect,
                ..ComboBoxConfig::default()
            },
        )
    }

    fn search(text: &str) -> Transition {
        Transition::Search {
            text: text.to_string(),
            deleting: false,
        }
    }

    #[test]
    fn search_opens_without_focusing_the_list() {
        let props = props(Autoselect::Off);
        let next = run(&ComboBoxState::default(), &search("a"), &props).expect("changed");
        assert_eq!(next.phase(), Phase::OpenUnfocused);
        assert_eq!(next.search.as_deref(), Some("a"));
        assert!(next.focused_option.is_none());
        assert!(next.suggested_option.is_none());
    }

    #[test]
    fn autoselect_promotes_the_first_match() {
        let props = props(Autoselect::On);
        let next = run(&ComboBoxState::default(), &search("a"), &props).expect("changed");
        assert_eq!(next.focused_option.as_ref().map(|o| o.label.as_str()), Some("Apple"));
        assert!(!next.focus_list_box);
        assert!(!next.inline_autoselect);
    }

    #[test]
    fn inline_mode_sets_inline_flag() {
        let props = props(Autoselect::Inline);
        let next = run(&ComboBoxState::default(), &search("ap"), &props).expect("changed");
        assert!(next.inline_autoselect);
        assert_eq!(next.input_text(&props), "apple");
    }

    #[test]
    fn autoselect_focuses_the_first_match_anywhere_in_the_list() {
        let props = props(Autoselect::On);
        let next = run(&ComboBoxState::default(), &search("b"), &props).expect("changed");
        assert_eq!(next.focused_option.as_ref().map(|o| o.label.as_str()), Some("Banana"));
        assert!(!next.focus_list_box);
    }

    #[test]
    fn word_matches_autoselect_but_only_label_prefixes_inline() {
        let filtered = || Options::from_strings(["Red Apple", "Green Apple"]);
        let on = ComboBoxProps::new(filtered()).with_config(ComboBoxConfig {
            autoselect: Autoselect::On,
            ..ComboBoxConfig::default()
        });
        let next = run(&ComboBoxState::default(), &search("apple"), &on).expect("changed");
        assert_eq!(next.focused_option.as_ref().map(|o| o.label.as_str()), Some("Red Apple"));

        let inline = ComboBoxProps::new(filtered()).with_config(ComboBoxConfig {
            autoselect: Autoselect::Inline,
            ..ComboBoxConfig::default()
        });
        let word = run(&ComboBoxState::default(), &search("apple"), &inline).expect("changed");
        assert_eq!(word.focused_option.as_ref().map(|o| o.label.as_str()), Some("Red Apple"));
        assert!(!word.inline_autoselect);
        assert_eq!(word.input_text(&inline), "apple");

        let prefix = run(&ComboBoxState::default(), &search("gr"), &inline).expect("changed");
        assert!(prefix.inline_autoselect);
        assert_eq!(prefix.input_text(&inline), "green Apple");
    }

    #[test]
    fn selected_keeps_the_list_open_and_drops_the_search() {
        let props = props(Autoselect::On);
        let typed = run(&ComboBoxState::default(), &search("ban"), &props).expect("typed");
        let banana = props.options.get(1).cloned();
        let next = run(&typed, &Transition::Selected(banana), &props).expect("changed");
        assert!(next.expanded);
        assert!(next.search.is_none());
        assert!(next.suggested_option.is_none());
        assert_eq!(next.focused_option.as_ref().map(|o| o.label.as_str()), Some("Banana"));
    }

    #[test]
    fn deleting_holds_off_autoselect() {
        let props = props(Autoselect::Inline);
        let next = run(
            &ComboBoxState::default(),
            &Transition::Search {
                text: "ap".into(),
                deleting: true,
            },
            &props,
        )
        .expect("changed");
        assert!(next.focused_option.is_none());
        assert!(!next.inline_autoselect);
    }

    #[test]
    fn focusing_the_list_clears_the_suggestion() {
        let props = props(Autoselect::On);
        let typed = run(&ComboBoxState::default(), &search("a"), &props).expect("changed");
        let banana = props.options.get(1).cloned();
        let next = run(
            &typed,
            &Transition::FocusOption {
                option: banana,
                focus_list_box: true,
            },
            &props,
        )
        .expect("changed");
        assert!(next.focus_list_box);
        assert!(next.suggested_option.is_none());
        assert_eq!(next.focused_option.as_ref().map(|o| o.label.as_str()), Some("Banana"));
    }

    #[test]
    fn focus_list_box_requires_an_option() {
        let props = props(Autoselect::Off);
        let open = run(&ComboBoxState::default(), &Transition::Open, &props).expect("open");
        let focused = run(
            &open,
            &Transition::FocusOption {
                option: props.options.get(0).cloned(),
                focus_list_box: true,
            },
            &props,
        )
        .expect("focused");
        let cleared = reduce(
            &focused,
            &Transition::FocusOption {
                option: None,
                focus_list_box: true,
            },
            &props,
        )
        .expect("changed");
        assert!(cleared.focused_option.is_none());
        assert!(!cleared.focus_list_box);
        assert!(cleared.expanded);
    }

    #[test]
    fn close_clears_everything() {
        let props = props(Autoselect::On);
        let typed = run(&ComboBoxState::default(), &search("a"), &props).expect("changed");
        let closed = run(&typed, &Transition::Close, &props).expect("closed");
        assert_eq!(closed, ComboBoxState::default());
        assert!(run(&closed, &Transition::Close, &props).is_none());
    }

    #[test]
    fn options_replaced_resolves_focus_by_identity() {
        let mut props = props(Autoselect::Off);
        let open = run(&ComboBoxState::default(), &Transition::Open, &props).expect("open");
        let cherry = props.options.get(2).cloned();
        let focused = run(
            &open,
            &Transition::FocusOption {
                option: cherry,
                focus_list_box: true,
            },
            &props,
        )
        .expect("focused");

        props.set_options(Options::from_strings(["Cherry", "Date"]));
        let next = run(&focused, &Transition::OptionsReplaced, &props).expect("re-resolved");
        let resolved = next.focused_option.as_ref().expect("still focused");
        assert_eq!(resolved.index, 0);
        assert!(next.focus_list_box);

        props.set_options(Options::from_strings(["Date"]));
        let gone = run(&next, &Transition::OptionsReplaced, &props).expect("dropped");
        assert!(gone.focused_option.is_none());
        assert!(!gone.focus_list_box);
    }

    #[test]
    fn options_replaced_recomputes_the_suggestion() {
        let mut props = props(Autoselect::On);
        let typed = run(&ComboBoxState::default(), &search("b"), &props).expect("typed");
        assert_eq!(typed.focused_option.as_ref().map(|o| o.label.as_str()), Some("Banana"));

        props.set_options(Options::from_strings(["Blueberry", "Banana"]));
        let next = run(&typed, &Transition::OptionsReplaced, &props).expect("suggested");
        assert_eq!(next.focused_option.as_ref().map(|o| o.label.as_str()), Some("Blueberry"));

        props.set_options(Options::from_strings(["Cranberry"]));
        let none = run(&next, &Transition::OptionsReplaced, &props).expect("cleared");
        assert!(none.focused_option.is_none());
    }

    #[test]
    fn unchanged_options_leave_state_untouched() {
        let props = props(Autoselect::On);
        let typed = run(&ComboBoxState::default(), &search("a"), &props).expect("typed");
        assert!(run(&typed, &Transition::OptionsReplaced, &props).is_none());
        assert!(apply_autoselect(&typed, &Transition::OptionsReplaced, &props).is_none());
    }

    #[test]
    fn value_replaced_follows_the_new_value() {
        let props = props(Autoselect::Off).with_value(Some(serde_json::json!("Banana")));
        let open = run(&ComboBoxState::default(), &Transition::Open, &props).expect("open");
        let next = run(&open, &Transition::ValueReplaced, &props).expect("changed");
        assert_eq!(next.focused_option.as_ref().map(|o| o.index), Some(1));
        assert!(run(&ComboBoxState::default(), &Transition::ValueReplaced, &props).is_none());
    }
}
