use crate::core::nav::ListGeometry;

/// The embedding application's imperative surface over the rendered widget.
///
/// Every method defaults to a no-op so hosts only implement what their markup
/// has; a drop-down has no text input, a combo box has no button.
pub trait DomHost: ListGeometry {
    fn focus_input(&mut self) {}
    fn focus_button(&mut self) {}
    fn focus_listbox(&mut self) {}
    fn focus_option(&mut self, _key: &str) {}
    fn set_input_value(&mut self, _value: &str) {}
    fn dispatch_input_event(&mut self) {}
    fn set_selection_range(&mut self, _start: usize, _end: usize) {}
}

/// Host with no rendered output: nothing to focus, no geometry.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedHost;

impl ListGeometry for DetachedHost {
    fn listbox_height(&self) -> Option<f64> {
        None
    }

    fn option_bounds(&self, _key: &str) -> Option<crate::core::nav::Bounds> {
        None
    }
}

impl DomHost for DetachedHost {}
