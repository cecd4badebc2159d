// src/touch.rs
//! Touch input capability and click-tracking state.
//!
//! The core consumes already-calibrated display-space samples from a
//! [`TouchSource`]; axis calibration, swapping, and flipping belong to the
//! driver. The tracker itself is a two-state machine: `Idle`, or
//! `Tracking` a specific element between its Down and Up samples. The
//! per-sample transitions live in [`Gui`](crate::gui::Gui), which owns the
//! pages the tracker's handle points into.

use crate::ui::core::TouchSample;
use crate::ui::element::ElementRef;

/// Non-blocking source of touch samples.
pub trait TouchSource {
    /// Return at most one pending sample, or `None` immediately.
    fn poll(&mut self) -> Option<TouchSample>;
}

/// Click-tracking state: either idle or bound to one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum TrackState {
    #[default]
    Idle,
    Tracking(ElementRef),
}

/// Persistent tracker state carried across update cycles.
#[derive(Debug, Default)]
pub(crate) struct TouchTracker {
    pub(crate) state: TrackState,
}

impl TouchTracker {
    /// Abort any in-flight track back to idle.
    pub(crate) fn reset(&mut self) {
        self.state = TrackState::Idle;
    }

    /// The element currently bound to a press, if any.
    pub(crate) fn tracked(&self) -> Option<ElementRef> {
        match self.state {
            TrackState::Idle => None,
            TrackState::Tracking(eref) => Some(eref),
        }
    }
}
