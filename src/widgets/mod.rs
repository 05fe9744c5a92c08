pub mod checkboxes;
pub mod choice;
pub mod combo_box;
pub mod drop_down;
pub mod focus_boundary;
pub mod live_region;
pub mod radios;
pub mod select;

pub use choice::ChoiceProps;
pub use combo_box::{ComboBox, ComboBoxProps, ComboBoxState, Phase};
pub use drop_down::{DropDown, DropDownProps, DropDownState};
pub use focus_boundary::{BoundaryEvent, FocusBoundary, FocusChange};
pub use live_region::{Announcement, LiveRegion, LiveRegionInput, compose_message};
pub use radios::Radios;
