pub mod cancel;
pub mod controller;
pub mod executor;
pub mod run_state;

pub use cancel::CancellationToken;
pub use controller::{ErrorMode, SearchController};
pub use executor::{SearchCompletion, SearchExecutor, SearchFn};
pub use run_state::SearchRunState;
