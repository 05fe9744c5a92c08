pub mod effect;
pub mod host;
pub mod key;
pub mod scheduler;
pub mod time;

pub use effect::{Callback, Callbacks, Effect};
pub use host::{DetachedHost, DomHost};
pub use key::{KeyCode, KeyEvent, KeyModifiers, Platform, get_key};
pub use scheduler::{Scheduler, SchedulerCommand};
