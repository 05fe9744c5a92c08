/// A native focus event observed on the widget root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusChange {
    /// `focusin`; `related_inside` tells whether focus came from inside.
    FocusIn { related_inside: bool },
    /// `focusout`; `related_inside` tells whether focus moves to a node inside.
    FocusOut {
        related_inside: bool,
        document_has_focus: bool,
    },
    /// The document regained focus; `active_inside` tells whether the active
    /// element is inside the widget.
    DocumentFocus { active_inside: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryEvent {
    Entered,
    Left,
}

/// Turns raw focus/blur events on a composite widget into enter/leave events.
///
/// Moving between the widget's own input and list box produces nothing. When
/// the whole window loses focus (devtools, another app) the leave decision is
/// deferred until the document is focused again.
#[derive(Debug, Default, Clone)]
pub struct FocusBoundary {
    deferred: bool,
}

impl FocusBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred
    }

    pub fn handle(&mut self, change: FocusChange) -> Option<BoundaryEvent> {
        match change {
            FocusChange::FocusIn { related_inside } => {
                if self.deferred {
                    self.deferred = false;
                    return None;
                }
                (!related_inside).then_some(BoundaryEvent::Entered)
            }
            FocusChange::FocusOut {
                related_inside,
                document_has_focus,
            } => {
                if related_inside {
                    return None;
                }
                if !document_has_focus {
                    self.deferred = true;
                    tracing::trace!("window lost focus, deferring blur");
                    return None;
                }
                Some(BoundaryEvent::Left)
            }
            FocusChange::DocumentFocus { active_inside } => {
                if !self.deferred {
                    return None;
                }
                self.deferred = false;
                (!active_inside).then_some(BoundaryEvent::Left)
            }
        }
    }
}
