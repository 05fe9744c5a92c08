use super::time::{Duration, Instant};
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone)]
pub enum SchedulerCommand<E> {
    EmitNow(E),
    EmitAfter {
        key: &'static str,
        delay: Duration,
        event: E,
    },
    /// Like `EmitAfter`, but invalidates anything still pending under `key`.
    Debounce {
        key: &'static str,
        delay: Duration,
        event: E,
    },
    Cancel {
        key: &'static str,
    },
}

#[derive(Debug, Clone)]
struct Guard {
    key: &'static str,
    version: u64,
}

#[derive(Debug, Clone)]
struct DelayedTask<E> {
    due_at: Instant,
    guard: Option<Guard>,
    event: E,
}

/// Keyed timers for a single widget instance. Time is supplied by the caller.
#[derive(Debug)]
pub struct Scheduler<E> {
    ready: VecDeque<E>,
    delayed: Vec<DelayedTask<E>>,
    key_versions: HashMap<&'static str, u64>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            ready: VecDeque::new(),
            delayed: Vec::new(),
            key_versions: HashMap::new(),
        }
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, command: SchedulerCommand<E>, now: Instant) {
        match command {
            SchedulerCommand::EmitNow(event) => {
                self.ready.push_back(event);
            }
            SchedulerCommand::EmitAfter { key, delay, event } => {
                let version = *self.key_versions.entry(key).or_insert(0);
                self.delayed.push(DelayedTask {
                    due_at: now + delay,
                    guard: Some(Guard { key, version }),
                    event,
                });
            }
            SchedulerCommand::Debounce { key, delay, event } => {
                let version = self.bump_version(key);
                self.delayed.retain(|task| {
                    task.guard
                        .as_ref()
                        .is_none_or(|guard| guard.key != key)
                });
                self.delayed.push(DelayedTask {
                    due_at: now + delay,
                    guard: Some(Guard { key, version }),
                    event,
                });
            }
            SchedulerCommand::Cancel { key } => {
                self.bump_version(key);
            }
        }
    }

    pub fn drain_ready(&mut self, now: Instant) -> Vec<E> {
        let mut due = Vec::new();
        let mut idx = 0usize;
        while idx < self.delayed.len() {
            if self.delayed[idx].due_at <= now {
                due.push(self.delayed.swap_remove(idx));
            } else {
                idx += 1;
            }
        }
        due.sort_by_key(|task| task.due_at);
        for task in due {
            if self.task_is_valid(&task) {
                self.ready.push_back(task.event);
            }
        }

        self.ready.drain(..).collect()
    }

    pub fn is_pending(&self, key: &'static str) -> bool {
        self.delayed.iter().any(|task| {
            task.guard
                .as_ref()
                .is_some_and(|guard| guard.key == key && self.guard_is_current(guard))
        })
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        let mut next = default_timeout;

        for task in &self.delayed {
            let due_in = task.due_at.saturating_duration_since(now);
            if due_in < next {
                next = due_in;
            }
        }

        next
    }

    /// Drops every pending and ready event. Called when the widget unmounts.
    pub fn cancel_all(&mut self) {
        self.ready.clear();
        self.delayed.clear();
        for version in self.key_versions.values_mut() {
            *version = version.saturating_add(1);
        }
    }

    fn task_is_valid(&self, task: &DelayedTask<E>) -> bool {
        task.guard
            .as_ref()
            .is_none_or(|guard| self.guard_is_current(guard))
    }

    fn guard_is_current(&self, guard: &Guard) -> bool {
        let current = *self.key_versions.get(guard.key).unwrap_or(&0);
        current == guard.version
    }

    fn bump_version(&mut self, key: &'static str) -> u64 {
        let entry = self.key_versions.entry(key).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}
