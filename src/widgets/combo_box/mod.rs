//! Combo box: a text input paired with a filterable list box.
//!
//! [`ComboBox::dispatch`] is the command interpreter. It decides which side
//! effects an [`Intent`] needs, feeds plain [`Transition`]s through the
//! reducer stages, then replays the effects against the host in order.

mod intent;
mod props;
mod reducer;
mod state;

pub use intent::Intent;
pub use props::{ComboBoxProps, SkipOptionFn};
pub use reducer::{STAGES, Stage, Transition, apply_autoselect, reduce, run};
pub use state::{ComboBoxState, Phase};

use crate::core::nav::{
    Bounds, ListGeometry, NavOptions, PageDirection, first_in_list, last_in_list, move_page,
    next_in_list, previous_in_list,
};
use crate::core::option::ListOption;
use crate::runtime::effect::{Effect, perform};
use crate::runtime::host::DomHost;
use crate::runtime::key::{KeyCode, KeyEvent, get_key};
use crate::runtime::time::Instant;
use crate::widgets::focus_boundary::{BoundaryEvent, FocusBoundary};
use crate::widgets::live_region::{Announcement, LiveRegion, LiveRegionInput};
use state::inline_completion;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct ComboBox {
    state: Arc<ComboBoxState>,
    boundary: FocusBoundary,
    live_region: LiveRegion,
}

impl ComboBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state. Dispatches that change nothing keep the same `Arc`.
    pub fn state(&self) -> &Arc<ComboBoxState> {
        &self.state
    }

    pub fn dispatch(
        &mut self,
        intent: Intent,
        props: &ComboBoxProps,
        host: &mut dyn DomHost,
    ) -> Vec<Effect> {
        self.dispatch_at(intent, props, host, Instant::now())
    }

    pub fn dispatch_at(
        &mut self,
        intent: Intent,
        props: &ComboBoxProps,
        host: &mut dyn DomHost,
        now: Instant,
    ) -> Vec<Effect> {
        tracing::debug!(?intent, "combo box dispatch");
        let before = Arc::clone(&self.state);
        let mut effects = Vec::new();

        match intent {
            Intent::InputChange(text) if !props.config.disabled => {
                self.on_input_change(text, props, &mut effects);
            }
            Intent::KeyDown(event) if !props.config.disabled => {
                self.on_key_down(event, props, &*host, &mut effects);
            }
            Intent::InputClick if !props.config.disabled => {
                self.apply(Transition::Open, props);
            }
            Intent::Focus(change) => match self.boundary.handle(change) {
                Some(BoundaryEvent::Entered) => {
                    if props.config.expand_on_focus && !props.config.disabled {
                        self.apply(Transition::Open, props);
                    }
                }
                Some(BoundaryEvent::Left) => self.on_blur(props, &mut effects),
                None => {}
            },
            Intent::Blur => self.on_blur(props, &mut effects),
            Intent::OptionClick(identity) if !props.config.disabled => {
                let Some(option) = props.options.find(&identity).cloned() else {
                    return effects;
                };
                if props.skip(&option) {
                    if props.config.managed_focus {
                        effects.push(Effect::FocusInput);
                    }
                } else {
                    self.select(Some(option), props.config.managed_focus, props, &mut effects);
                }
            }
            Intent::Clear if !props.config.disabled => {
                self.select(None, true, props, &mut effects);
            }
            Intent::OptionsChanged => self.apply(Transition::OptionsReplaced, props),
            Intent::ValueChanged => self.apply(Transition::ValueReplaced, props),
            _ => {}
        }

        self.complete_inline(&before, &mut effects);
        self.announce(props, now);
        perform(&effects, host, &props.callbacks);
        effects
    }

    /// Commits the pending live-region message once its quiet period passed.
    pub fn tick(&mut self, now: Instant) -> Option<Announcement> {
        self.live_region.tick(now).cloned()
    }

    pub fn screen_reader_message(&self) -> Option<&Announcement> {
        self.live_region.current()
    }

    /// Cancels pending timers. The widget must not be dispatched to afterwards.
    pub fn unmount(&mut self) {
        self.live_region.cancel();
    }

    fn apply(&mut self, transition: Transition, props: &ComboBoxProps) {
        if let Some(next) = run(&self.state, &transition, props) {
            tracing::trace!(?transition, phase = ?next.phase(), "combo box transition");
            self.state = Arc::new(next);
        }
    }

    fn on_input_change(&mut self, text: String, props: &ComboBoxProps, effects: &mut Vec<Effect>) {
        let before = Arc::clone(&self.state);
        // Only text the user typed counts; replacing the committed label is not a deletion.
        let deleting = before.search.as_deref().is_some_and(|previous| {
            text.len() <= previous.len() && previous.starts_with(text.as_str())
        });
        let had_selection = props.value().is_some() || before.focused_option.is_some();

        self.apply(
            Transition::Search {
                text: text.clone(),
                deleting,
            },
            props,
        );
        effects.push(Effect::Search(text.clone()));
        if text.is_empty() && had_selection {
            effects.push(Effect::CommitValue(None));
        }
    }

    fn on_key_down(
        &mut self,
        event: KeyEvent,
        props: &ComboBoxProps,
        host: &dyn DomHost,
        effects: &mut Vec<Effect>,
    ) {
        let key = get_key(event, props.platform);
        let state = Arc::clone(&self.state);
        let options = props.options.as_slice();
        let skip = |option: &ListOption| props.skip(option);
        let focused = state
            .focused_option
            .as_ref()
            .and_then(|focused| props.resolve(focused));
        let managed = props.config.managed_focus;

        match key.code {
            KeyCode::Down | KeyCode::Up if options.is_empty() => {}
            KeyCode::Down | KeyCode::Up if !state.expanded => {
                self.apply(Transition::Open, props);
            }
            KeyCode::Up if key.alt_key() => self.close_to_input(props, effects),
            KeyCode::Down if key.alt_key() => {}
            KeyCode::Down => {
                let nav = NavOptions::new(&skip).allow_empty(true);
                let next = next_in_list(options, focused.map(|o| o.index), nav).cloned();
                self.focus_to(next, props, effects);
            }
            KeyCode::Up => {
                let nav = NavOptions::new(&skip).allow_empty(true);
                let next = previous_in_list(options, focused.map(|o| o.index), nav).cloned();
                self.focus_to(next, props, effects);
            }
            KeyCode::Home | KeyCode::End if state.expanded && state.focus_list_box => {
                let next = if key.code == KeyCode::Home {
                    first_in_list(options, &skip)
                } else {
                    last_in_list(options, &skip)
                };
                if let Some(next) = next.cloned() {
                    self.focus_to(Some(next), props, effects);
                }
            }
            KeyCode::PageUp | KeyCode::PageDown if state.expanded && !options.is_empty() => {
                let direction = if key.code == KeyCode::PageUp {
                    PageDirection::Up
                } else {
                    PageDirection::Down
                };
                let geometry = HostGeometry(host);
                if let Some(next) = move_page(direction, options, focused, &geometry, &skip).cloned() {
                    self.focus_to(Some(next), props, effects);
                }
            }
            KeyCode::Enter if state.expanded => {
                if let Some(option) = focused.filter(|option| !skip(*option)).cloned() {
                    let refocus = state.focus_list_box && managed;
                    self.select(Some(option), refocus, props, effects);
                }
            }
            KeyCode::Esc if state.expanded => self.close_to_input(props, effects),
            KeyCode::Tab
                if state.expanded && props.config.tab_autocomplete && !key.has_modifier() =>
            {
                let suggested = state
                    .suggested_option
                    .as_ref()
                    .and_then(|suggested| props.resolve(suggested));
                if let Some(option) = suggested {
                    if Some(&option.identity) != props.value_identity().as_ref() {
                        let option = option.clone();
                        self.select(Some(option), false, props, effects);
                    }
                }
            }
            KeyCode::Delete => {
                if state.focus_list_box && managed {
                    effects.push(Effect::FocusInput);
                }
                self.apply(Transition::ClearFocusedOption, props);
            }
            KeyCode::Backspace | KeyCode::Left | KeyCode::Right => self.return_to_input(props, effects),
            KeyCode::Char(_) if key.is_printable() => self.return_to_input(props, effects),
            _ => {}
        }
    }

    fn on_blur(&mut self, props: &ComboBoxProps, effects: &mut Vec<Effect>) {
        let state = Arc::clone(&self.state);
        if state.expanded && props.config.select_on_blur {
            let focused = state
                .focused_option
                .as_ref()
                .and_then(|focused| props.resolve(focused))
                .filter(|focused| !props.skip(focused));
            if let Some(option) = focused {
                if Some(&option.identity) != props.value_identity().as_ref() {
                    let option = option.clone();
                    self.select(Some(option), false, props, effects);
                }
            }
        }
        self.apply(Transition::Close, props);
    }

    /// Typing and caret keys always win over list focus.
    fn return_to_input(&mut self, props: &ComboBoxProps, effects: &mut Vec<Effect>) {
        if !self.state.focus_list_box {
            return;
        }
        if props.config.managed_focus {
            effects.push(Effect::FocusInput);
        }
        self.apply(Transition::FocusInput, props);
    }

    fn close_to_input(&mut self, props: &ComboBoxProps, effects: &mut Vec<Effect>) {
        if self.state.focus_list_box && props.config.managed_focus {
            effects.push(Effect::FocusInput);
        }
        self.apply(Transition::Close, props);
    }

    fn focus_to(
        &mut self,
        option: Option<ListOption>,
        props: &ComboBoxProps,
        effects: &mut Vec<Effect>,
    ) {
        let was_on_list = self.state.focus_list_box;
        let focus_list_box = option.is_some();
        if props.config.managed_focus {
            match &option {
                Some(option) => effects.push(Effect::FocusOption {
                    key: option.key.clone(),
                }),
                None if was_on_list => effects.push(Effect::FocusInput),
                None => {}
            }
        }
        self.apply(
            Transition::FocusOption {
                option,
                focus_list_box,
            },
            props,
        );
    }

    /// Commit protocol: close, write the label straight into the input,
    /// dispatch a synthetic input event, then report the value.
    /// Structural rows are never committed.
    fn select(
        &mut self,
        option: Option<ListOption>,
        refocus: bool,
        props: &ComboBoxProps,
        effects: &mut Vec<Effect>,
    ) {
        if option.as_ref().is_some_and(|option| option.unselectable) {
            return;
        }
        let label = option
            .as_ref()
            .map(|option| option.label.clone())
            .unwrap_or_default();
        let value = option.as_ref().map(|option| option.value.clone());

        if refocus {
            effects.push(Effect::FocusInput);
        }
        if props.config.close_on_select {
            self.apply(Transition::Close, props);
        } else {
            self.apply(Transition::Selected(option), props);
        }
        effects.push(Effect::SetInputValue(label));
        effects.push(Effect::DispatchInputEvent);
        effects.push(Effect::CommitValue(value));
    }

    /// Writes the inline completion and selects the completed suffix.
    fn complete_inline(&self, before: &Arc<ComboBoxState>, effects: &mut Vec<Effect>) {
        let state = &self.state;
        if Arc::ptr_eq(before, state) || !state.inline_autoselect {
            return;
        }
        let (Some(search), Some(focused)) = (&state.search, &state.focused_option) else {
            return;
        };
        let unchanged = before.inline_autoselect
            && before.search == state.search
            && before
                .focused_option
                .as_ref()
                .is_some_and(|previous| previous.same_identity(focused));
        if unchanged {
            return;
        }
        let Some(completed) = inline_completion(search, &focused.label) else {
            return;
        };
        effects.push(Effect::SetInputValue(completed.clone()));
        effects.push(Effect::SetSelectionRange {
            start: search.encode_utf16().count(),
            end: completed.encode_utf16().count(),
        });
    }

    fn announce(&mut self, props: &ComboBoxProps, now: Instant) {
        let state = Arc::clone(&self.state);
        let focused = state
            .focused_option
            .as_ref()
            .and_then(|focused| props.resolve(focused));
        self.live_region.update(
            LiveRegionInput {
                show_list_box: state.show_list_box(props),
                show_not_found: state.show_not_found(props),
                options: &props.options,
                focused_option: focused,
            },
            &props.config.messages,
            now,
        );
    }
}

struct HostGeometry<'a>(&'a dyn DomHost);

impl ListGeometry for HostGeometry<'_> {
    fn listbox_height(&self) -> Option<f64> {
        self.0.listbox_height()
    }

    fn option_bounds(&self, key: &str) -> Option<Bounds> {
        self.0.option_bounds(key)
    }
}
