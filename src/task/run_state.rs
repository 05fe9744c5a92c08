use crate::runtime::time::Instant;

/// Tracks which search run the controller is waiting on.
#[derive(Debug, Clone, Default)]
pub struct SearchRunState {
    awaiting: Option<u64>,
    last_started_at: Option<Instant>,
    last_finished_at: Option<Instant>,
    sequence: u64,
}

impl SearchRunState {
    pub fn is_running(&self) -> bool {
        self.awaiting.is_some()
    }

    pub fn awaiting(&self) -> Option<u64> {
        self.awaiting
    }

    pub fn last_started_at(&self) -> Option<Instant> {
        self.last_started_at
    }

    pub fn last_finished_at(&self) -> Option<Instant> {
        self.last_finished_at
    }

    pub fn next_run_id(&mut self) -> u64 {
        self.sequence = self.sequence.saturating_add(1);
        self.sequence
    }

    pub fn on_started(&mut self, run_id: u64, now: Instant) {
        self.awaiting = Some(run_id);
        self.last_started_at = Some(now);
    }

    /// Returns whether `run_id` was the run being waited on.
    pub fn on_finished(&mut self, run_id: u64, now: Instant) -> bool {
        if self.awaiting != Some(run_id) {
            return false;
        }
        self.awaiting = None;
        self.last_finished_at = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.awaiting = None;
    }
}
