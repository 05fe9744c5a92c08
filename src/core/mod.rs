pub mod nav;
pub mod option;
pub mod search;

pub use nav::{Bounds, ListGeometry, NavOptions, PageDirection};
pub use option::{Identity, ListOption, MapOption, Options, SkipOption};
