use crate::error::SearchError;
use crate::task::cancel::CancellationToken;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Caller-supplied search. Long searches should poll the token and return
/// [`SearchError::Aborted`] once it is cancelled.
pub type SearchFn =
    Arc<dyn Fn(&str, &CancellationToken) -> Result<Vec<Value>, SearchError> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct SearchCompletion {
    pub run_id: u64,
    pub query: String,
    pub result: Result<Vec<Value>, SearchError>,
    token: CancellationToken,
}

impl SearchCompletion {
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Runs searches on worker threads. Starting a search cancels the previous
/// one, and completions of cancelled searches are dropped on receipt.
pub struct SearchExecutor {
    search: SearchFn,
    completion_tx: Sender<SearchCompletion>,
    completion_rx: Receiver<SearchCompletion>,
    current: Option<CancellationToken>,
}

impl fmt::Debug for SearchExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchExecutor")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl SearchExecutor {
    pub fn new(search: SearchFn) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<SearchCompletion>();
        Self {
            search,
            completion_tx,
            completion_rx,
            current: None,
        }
    }

    pub fn spawn(&mut self, run_id: u64, query: String) -> CancellationToken {
        self.cancel();
        let token = CancellationToken::new();
        self.current = Some(token.clone());

        let search = Arc::clone(&self.search);
        let completion_tx = self.completion_tx.clone();
        let worker_token = token.clone();
        std::thread::spawn(move || {
            let result = if worker_token.is_cancelled() {
                Err(SearchError::Aborted)
            } else {
                search(&query, &worker_token)
            };
            let _ = completion_tx.send(SearchCompletion {
                run_id,
                query,
                result,
                token: worker_token,
            });
        });
        token
    }

    /// Cancels the in-flight search, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }

    pub fn drain_ready(&self) -> Vec<SearchCompletion> {
        let mut out = Vec::<SearchCompletion>::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => {
                    if let Some(completion) = keep_live(completion) {
                        out.push(completion);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }

    /// Blocks until a live completion arrives or `timeout` elapses.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<SearchCompletion>, SearchError> {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            match self.completion_rx.recv_timeout(remaining) {
                Ok(completion) => {
                    if let Some(completion) = keep_live(completion) {
                        return Ok(Some(completion));
                    }
                }
                Err(RecvTimeoutError::Timeout) => return Ok(None),
                Err(RecvTimeoutError::Disconnected) => return Err(SearchError::Disconnected),
            }
        }
    }
}

fn keep_live(completion: SearchCompletion) -> Option<SearchCompletion> {
    if completion.is_cancelled() {
        tracing::trace!(
            run_id = completion.run_id,
            query = %completion.query,
            "dropping superseded search result"
        );
        return None;
    }
    Some(completion)
}
