//! Drop-down: a button that opens a list box, with type-ahead instead of
//! free text.

mod props;
mod reducer;
mod state;

pub use props::DropDownProps;
pub use reducer::{Transition, reduce};
pub use state::DropDownState;

use crate::core::nav::{
    Bounds, ListGeometry, NavOptions, PageDirection, first_in_list, last_in_list, move_page,
    next_in_list, previous_in_list,
};
use crate::core::option::{Identity, ListOption};
use crate::core::search::find_by_prefix;
use crate::runtime::effect::{Effect, perform};
use crate::runtime::host::DomHost;
use crate::runtime::key::{KeyCode, KeyEvent, get_key};
use crate::runtime::scheduler::{Scheduler, SchedulerCommand};
use crate::runtime::time::{Duration, Instant};
use crate::widgets::focus_boundary::{BoundaryEvent, FocusBoundary, FocusChange};
use crate::widgets::live_region::{Announcement, LiveRegion, LiveRegionInput};
use std::sync::Arc;

const TYPE_AHEAD_KEY: &str = "type_ahead";

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    ButtonClick,
    KeyDown(KeyEvent),
    Focus(FocusChange),
    Blur,
    OptionClick(Identity),
    OptionsChanged,
}

#[derive(Debug, Default)]
pub struct DropDown {
    state: Arc<DropDownState>,
    boundary: FocusBoundary,
    live_region: LiveRegion,
    type_ahead: Scheduler<()>,
}

impl DropDown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Arc<DropDownState> {
        &self.state
    }

    pub fn dispatch(
        &mut self,
        intent: Intent,
        props: &DropDownProps,
        host: &mut dyn DomHost,
    ) -> Vec<Effect> {
        self.dispatch_at(intent, props, host, Instant::now())
    }

    pub fn dispatch_at(
        &mut self,
        intent: Intent,
        props: &DropDownProps,
        host: &mut dyn DomHost,
        now: Instant,
    ) -> Vec<Effect> {
        tracing::debug!(?intent, "drop-down dispatch");
        let mut effects = Vec::new();
        let disabled = props.config.disabled;

        match intent {
            Intent::ButtonClick if !disabled => {
                if self.state.expanded {
                    self.apply(Transition::Close, props);
                } else {
                    self.open(props, &mut effects);
                }
            }
            Intent::KeyDown(event) if !disabled => {
                self.on_key_down(event, props, &*host, now, &mut effects);
            }
            Intent::Focus(change) => {
                if self.boundary.handle(change) == Some(BoundaryEvent::Left) {
                    self.on_blur(props, &mut effects);
                }
            }
            Intent::Blur => self.on_blur(props, &mut effects),
            Intent::OptionClick(identity) if !disabled => {
                if let Some(option) = props.options.find(&identity).cloned() {
                    if props.skip(&option) {
                        effects.push(Effect::FocusListBox);
                    } else {
                        self.commit(option, true, props, &mut effects);
                    }
                }
            }
            Intent::OptionsChanged => self.apply(Transition::OptionsReplaced, props),
            _ => {}
        }

        self.announce(props, now);
        perform(&effects, host, &props.callbacks);
        effects
    }

    /// Clears an idle type-ahead buffer and commits a pending announcement.
    pub fn tick(&mut self, props: &DropDownProps, now: Instant) -> Option<Announcement> {
        if !self.type_ahead.drain_ready(now).is_empty() {
            self.apply(Transition::ClearSearch, props);
        }
        self.live_region.tick(now).cloned()
    }

    pub fn screen_reader_message(&self) -> Option<&Announcement> {
        self.live_region.current()
    }

    pub fn unmount(&mut self) {
        self.type_ahead.cancel_all();
        self.live_region.cancel();
    }

    fn apply(&mut self, transition: Transition, props: &DropDownProps) {
        if let Some(next) = reduce(&self.state, &transition, props) {
            tracing::trace!(?transition, expanded = next.expanded, "drop-down transition");
            self.state = Arc::new(next);
        }
    }

    fn open(&mut self, props: &DropDownProps, effects: &mut Vec<Effect>) {
        self.apply(Transition::Open, props);
        if self.state.expanded {
            effects.push(Effect::FocusListBox);
        }
    }

    fn on_key_down(
        &mut self,
        event: KeyEvent,
        props: &DropDownProps,
        host: &dyn DomHost,
        now: Instant,
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

        if !state.expanded {
            match key.code {
                KeyCode::Down | KeyCode::Up | KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open(props, effects);
                }
                KeyCode::Char(ch) if key.is_printable() => {
                    self.open(props, effects);
                    if self.state.expanded {
                        self.type_ahead(ch, props, now);
                    }
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Up if key.alt_key() => match focused.filter(|option| !skip(*option)) {
                Some(option) => self.commit(option.clone(), true, props, effects),
                None => self.close(props, effects),
            },
            KeyCode::Down if key.alt_key() => {}
            KeyCode::Down => {
                let index = focused.map(|option| option.index);
                if let Some(next) = next_in_list(options, index, NavOptions::new(&skip)).cloned() {
                    self.apply(Transition::FocusOption(next), props);
                }
            }
            KeyCode::Up => {
                let index = focused.map(|option| option.index);
                if let Some(next) = previous_in_list(options, index, NavOptions::new(&skip)).cloned()
                {
                    self.apply(Transition::FocusOption(next), props);
                }
            }
            KeyCode::Home | KeyCode::End => {
                let next = if key.code == KeyCode::Home {
                    first_in_list(options, &skip)
                } else {
                    last_in_list(options, &skip)
                };
                if let Some(next) = next.cloned() {
                    self.apply(Transition::FocusOption(next), props);
                }
            }
            KeyCode::PageUp | KeyCode::PageDown => {
                let direction = if key.code == KeyCode::PageUp {
                    PageDirection::Up
                } else {
                    PageDirection::Down
                };
                let geometry = HostGeometry(host);
                if let Some(next) = move_page(direction, options, focused, &geometry, &skip).cloned() {
                    self.apply(Transition::FocusOption(next), props);
                }
            }
            KeyCode::Enter | KeyCode::Tab => {
                let refocus = key.code == KeyCode::Enter;
                match focused.filter(|option| !skip(*option)) {
                    Some(option) => self.commit(option.clone(), refocus, props, effects),
                    None if refocus => self.close(props, effects),
                    None => self.apply(Transition::Close, props),
                }
            }
            KeyCode::Esc => self.close(props, effects),
            KeyCode::Char(' ') if state.search.is_empty() => {
                if let Some(option) = focused.filter(|option| !skip(*option)) {
                    self.commit(option.clone(), true, props, effects);
                }
            }
            KeyCode::Char(ch) if key.is_printable() => self.type_ahead(ch, props, now),
            _ => {}
        }
    }

    fn type_ahead(&mut self, ch: char, props: &DropDownProps, now: Instant) {
        let mut search = self.state.search.clone();
        search.push(ch);
        let skip = |option: &ListOption| props.skip(option);
        let matched = find_by_prefix(&search, props.options.as_slice(), &skip).cloned();
        self.apply(Transition::TypeAhead { search, matched }, props);
        self.type_ahead.schedule(
            SchedulerCommand::Debounce {
                key: TYPE_AHEAD_KEY,
                delay: Duration::from_millis(props.config.type_ahead_ms),
                event: (),
            },
            now,
        );
    }

    fn on_blur(&mut self, props: &DropDownProps, effects: &mut Vec<Effect>) {
        let state = Arc::clone(&self.state);
        if !state.expanded {
            return;
        }
        let focused = state
            .focused_option
            .as_ref()
            .and_then(|focused| props.resolve(focused))
            .filter(|option| !props.skip(option));
        match focused {
            Some(option) => self.commit(option.clone(), false, props, effects),
            None => self.apply(Transition::Close, props),
        }
    }

    fn close(&mut self, props: &DropDownProps, effects: &mut Vec<Effect>) {
        self.apply(Transition::Close, props);
        effects.push(Effect::FocusButton);
    }

    fn commit(
        &mut self,
        option: ListOption,
        refocus: bool,
        props: &DropDownProps,
        effects: &mut Vec<Effect>,
    ) {
        self.apply(Transition::Close, props);
        if refocus {
            effects.push(Effect::FocusButton);
        }
        effects.push(Effect::CommitValue(Some(option.value)));
    }

    fn announce(&mut self, props: &DropDownProps, now: Instant) {
        let state = Arc::clone(&self.state);
        let focused = state
            .focused_option
            .as_ref()
            .and_then(|focused| props.resolve(focused));
        self.live_region.update(
            LiveRegionInput {
                show_list_box: state.expanded,
                show_not_found: false,
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
