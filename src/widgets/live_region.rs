use crate::config::Messages;
use crate::core::option::{ListOption, Options};
use crate::runtime::scheduler::{Scheduler, SchedulerCommand};
use crate::runtime::time::{Duration, Instant};

pub const ANNOUNCE_DELAY: Duration = Duration::from_millis(1400);
const KEY: &str = "live_region";

/// What the list currently shows.
#[derive(Debug, Clone, Copy)]
pub struct LiveRegionInput<'a> {
    pub show_list_box: bool,
    pub show_not_found: bool,
    pub options: &'a Options,
    pub focused_option: Option<&'a ListOption>,
}

/// A message ready to render. The container is keyed on `key` so identical
/// consecutive text still gets a fresh element and is read again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub text: String,
    pub key: String,
}

pub fn compose_message(input: LiveRegionInput<'_>, messages: &Messages) -> Option<String> {
    if input.show_not_found {
        return Some(messages.not_found.clone());
    }
    if !input.show_list_box {
        return None;
    }
    let results: Vec<&ListOption> = input.options.results().collect();
    let mut message = messages.found_results(results.len());
    if let Some(focused) = input.focused_option {
        if let Some(position) = results
            .iter()
            .position(|option| option.same_identity(focused))
        {
            message.push_str(", ");
            message.push_str(&messages.highlighted_option(
                &focused.label,
                position + 1,
                results.len(),
            ));
        }
    }
    Some(message)
}

/// Debounced screen-reader status for one widget instance.
#[derive(Debug)]
pub struct LiveRegion {
    scheduler: Scheduler<Option<String>>,
    composed: Option<String>,
    current: Option<Announcement>,
    delay: Duration,
}

impl Default for LiveRegion {
    fn default() -> Self {
        Self::new(ANNOUNCE_DELAY)
    }
}

impl LiveRegion {
    pub fn new(delay: Duration) -> Self {
        Self {
            scheduler: Scheduler::new(),
            composed: None,
            current: None,
            delay,
        }
    }

    /// Records the latest state. A changed message clears the region at once
    /// and is committed only after `delay` without further changes.
    pub fn update(&mut self, input: LiveRegionInput<'_>, messages: &Messages, now: Instant) {
        let composed = compose_message(input, messages);
        if composed == self.composed {
            return;
        }
        self.composed = composed.clone();
        self.current = None;
        self.scheduler.schedule(
            SchedulerCommand::Debounce {
                key: KEY,
                delay: self.delay,
                event: composed,
            },
            now,
        );
    }

    /// Commits the pending message if its quiet period has passed.
    pub fn tick(&mut self, now: Instant) -> Option<&Announcement> {
        let fired = self.scheduler.drain_ready(now).into_iter().last()?;
        self.current = fired.map(|text| Announcement {
            key: text.clone(),
            text,
        });
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&Announcement> {
        self.current.as_ref()
    }

    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.scheduler
            .is_pending(KEY)
            .then(|| self.scheduler.poll_timeout(now, self.delay))
    }

    /// Drops pending messages; call on unmount.
    pub fn cancel(&mut self) {
        self.scheduler.cancel_all();
        self.current = None;
    }
}
