use crate::config::ComboBoxConfig;
use crate::error::SearchError;
use crate::runtime::scheduler::{Scheduler, SchedulerCommand};
use crate::runtime::time::{Duration, Instant};
use crate::task::executor::{SearchCompletion, SearchExecutor, SearchFn};
use crate::task::run_state::SearchRunState;
use serde_json::Value;

const SEARCH_KEY: &str = "search";

/// What happens to a failed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Returned from [`SearchController::poll`].
    #[default]
    Propagate,
    /// Kept as observable state; read it with [`SearchController::error`].
    Capture,
}

/// Debounced, last-request-wins asynchronous search feeding a combo box.
#[derive(Debug)]
pub struct SearchController {
    executor: SearchExecutor,
    scheduler: Scheduler<String>,
    run_state: SearchRunState,
    debounce: Duration,
    error_mode: ErrorMode,
    results: Option<Vec<Value>>,
    error: Option<SearchError>,
}

impl SearchController {
    pub fn new(search: SearchFn) -> Self {
        Self {
            executor: SearchExecutor::new(search),
            scheduler: Scheduler::new(),
            run_state: SearchRunState::default(),
            debounce: Duration::ZERO,
            error_mode: ErrorMode::default(),
            results: None,
            error: None,
        }
    }

    /// A controller debounced by `config.search_debounce_ms`.
    pub fn from_config(search: SearchFn, config: &ComboBoxConfig) -> Self {
        Self::new(search).with_debounce(Duration::from_millis(config.search_debounce_ms))
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }

    /// Requests a search for `query`. Any search still running is cancelled
    /// at once so its results can never overwrite newer ones.
    pub fn search(&mut self, query: impl Into<String>, now: Instant) {
        let query = query.into();
        self.executor.cancel();
        self.run_state.reset();
        if self.debounce.is_zero() {
            self.scheduler.schedule(SchedulerCommand::Cancel { key: SEARCH_KEY }, now);
            self.start(query, now);
        } else {
            self.scheduler.schedule(
                SchedulerCommand::Debounce {
                    key: SEARCH_KEY,
                    delay: self.debounce,
                    event: query,
                },
                now,
            );
        }
    }

    /// Starts due searches and applies finished ones. Returns whether the
    /// results changed.
    pub fn poll(&mut self, now: Instant) -> Result<bool, SearchError> {
        if let Some(query) = self.scheduler.drain_ready(now).pop() {
            self.start(query, now);
        }

        let mut changed = false;
        let mut failure = None;
        for completion in self.executor.drain_ready() {
            match self.finish(completion, now) {
                Ok(updated) => changed |= updated,
                Err(err) => failure = Some(err),
            }
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(changed),
        }
    }

    /// A search is pending or running.
    pub fn busy(&self) -> bool {
        self.run_state.is_running() || self.scheduler.is_pending(SEARCH_KEY)
    }

    pub fn results(&self) -> Option<&[Value]> {
        self.results.as_deref()
    }

    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref()
    }

    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.scheduler
            .is_pending(SEARCH_KEY)
            .then(|| self.scheduler.poll_timeout(now, self.debounce))
    }

    /// Drops pending and running searches; call on unmount.
    pub fn cancel(&mut self) {
        self.scheduler.cancel_all();
        self.executor.cancel();
        self.run_state.reset();
    }

    fn start(&mut self, query: String, now: Instant) {
        let run_id = self.run_state.next_run_id();
        tracing::debug!(run_id, query = %query, "starting search");
        self.executor.spawn(run_id, query);
        self.run_state.on_started(run_id, now);
    }

    fn finish(&mut self, completion: SearchCompletion, now: Instant) -> Result<bool, SearchError> {
        if !self.run_state.on_finished(completion.run_id, now) {
            return Ok(false);
        }
        match completion.result {
            Ok(values) => {
                self.results = Some(values);
                self.error = None;
                Ok(true)
            }
            Err(err) if err.is_abort() => Ok(false),
            Err(err) => {
                tracing::debug!(run_id = completion.run_id, error = %err, "search failed");
                match self.error_mode {
                    ErrorMode::Propagate => Err(err),
                    ErrorMode::Capture => {
                        self.error = Some(err);
                        Ok(false)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorMode, SearchController};
    use crate::config::ComboBoxConfig;
use crate::error::SearchError;
    use crate::runtime::time::{Duration, Instant};
    use crate::task::cancel::CancellationToken;
    use crate::task::executor::SearchFn;
    use serde_json::{Value, json};
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};

    fn echo() -> SearchFn {
        Arc::new(|query: &str, _: &CancellationToken| match query {
            "boom" => Err(SearchError::failed("backend down")),
            "stop" => Err(SearchError::Aborted),
            _ => Ok(vec![json!(format!("{query} result"))]),
        })
    }

    fn settle(controller: &mut SearchController, now: Instant) -> Result<bool, SearchError> {
        let mut changed = false;
        for _ in 0..500 {
            changed |= controller.poll(now)?;
            if !controller.busy() {
                return Ok(changed);
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        panic!("search did not settle");
    }

    #[test]
    fn results_arrive_and_busy_clears() {
        let mut controller = SearchController::new(echo());
        let now = Instant::now();
        controller.search("ap", now);
        assert!(controller.busy());
        assert_eq!(settle(&mut controller, now), Ok(true));
        assert_eq!(controller.results(), Some(&[json!("ap result")][..]));
    }

    #[test]
    fn a_slow_earlier_search_never_overwrites_a_newer_one() {
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let gate = Arc::new(Mutex::new(gate_rx));
        let done = Arc::new(Mutex::new(done_tx));
        let search: SearchFn = Arc::new(move |query: &str, _: &CancellationToken| {
            if query == "ap" {
                let _ = gate.lock().expect("gate").recv();
                let _ = done.lock().expect("done").send(());
            }
            Ok(vec![Value::String(query.to_string())])
        });

        let mut controller = SearchController::new(search);
        let now = Instant::now();
        controller.search("ap", now);
        controller.search("app", now);
        settle(&mut controller, now).expect("settled");
        assert_eq!(controller.results(), Some(&[json!("app")][..]));

        gate_tx.send(()).expect("release");
        done_rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("slow search finished");
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(controller.poll(now), Ok(false));
        assert_eq!(controller.results(), Some(&[json!("app")][..]));
    }

    #[test]
    fn debounce_starts_only_the_last_query() {
        let (query_tx, query_rx) = mpsc::channel::<String>();
        let queries = Arc::new(Mutex::new(query_tx));
        let search: SearchFn = Arc::new(move |query: &str, _: &CancellationToken| {
            let _ = queries.lock().expect("queries").send(query.to_string());
            Ok(Vec::new())
        });
        let mut controller =
            SearchController::new(search).with_debounce(Duration::from_millis(300));
        let start = Instant::now();
        controller.search("a", start);
        controller.search("ap", start + Duration::from_millis(100));
        assert_eq!(controller.poll(start + Duration::from_millis(350)), Ok(false));
        assert!(controller.busy());

        let later = start + Duration::from_millis(400);
        settle(&mut controller, later).expect("settled");
        let started: Vec<String> = query_rx.try_iter().collect();
        assert_eq!(started, vec!["ap".to_string()]);
    }

    #[test]
    fn configured_debounce_delays_the_search() {
        let config = ComboBoxConfig::from_yaml("search_debounce_ms: 200\n").expect("config");
        let mut controller = SearchController::from_config(echo(), &config);
        let start = Instant::now();
        controller.search("ap", start);
        assert_eq!(controller.poll(start + Duration::from_millis(100)), Ok(false));
        assert!(controller.results().is_none());

        let later = start + Duration::from_millis(250);
        assert_eq!(settle(&mut controller, later), Ok(true));
        assert_eq!(controller.results(), Some(&[json!("ap result")][..]));
    }

    #[test]
    fn failures_propagate_by_default() {
        let mut controller = SearchController::new(echo());
        let now = Instant::now();
        controller.search("boom", now);
        assert_eq!(
            settle(&mut controller, now),
            Err(SearchError::failed("backend down"))
        );
        assert!(controller.error().is_none());
    }

    #[test]
    fn captured_failures_become_state() {
        let mut controller = SearchController::new(echo()).with_error_mode(ErrorMode::Capture);
        let now = Instant::now();
        controller.search("boom", now);
        assert_eq!(settle(&mut controller, now), Ok(false));
        assert_eq!(controller.error(), Some(&SearchError::failed("backend down")));

        controller.search("ok", now);
        assert_eq!(settle(&mut controller, now), Ok(true));
        assert!(controller.error().is_none());
    }

    #[test]
    fn aborts_are_swallowed() {
        let mut controller = SearchController::new(echo());
        let now = Instant::now();
        controller.search("stop", now);
        assert_eq!(settle(&mut controller, now), Ok(false));
        assert!(controller.error().is_none());
        assert!(controller.results().is_none());
    }
}
