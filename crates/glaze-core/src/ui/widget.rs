// src/ui/widget.rs
//! The extended-element dispatch contract.
//!
//! Widgets beyond the built-in kinds implement [`Widget`] and are installed
//! at creation time via
//! [`Page::create_extended`](crate::pages::page::Page::create_extended).
//! The trait is the *only* polymorphism mechanism the core knows about:
//! exactly draw, touch, and tick, nothing more. Widget state lives inside
//! the implementing type; the shared flags, rectangle, and colors stay in
//! the [`ElementBase`] passed to every call.

use crate::error::RenderError;
use crate::ui::core::{Action, Redraw, TouchEvent};
use crate::ui::element::ElementBase;
use crate::ui::fonts::FontTable;
use crate::ui::render::Renderer;

/// Custom draw/touch/tick behavior for an extended element.
pub trait Widget {
    /// Paint the element. The implementation is fully responsible for
    /// clearing the redraw flag (`base.clear_redraw()`) on completion;
    /// leaving it set schedules another paint next cycle.
    fn draw(
        &mut self,
        base: &mut ElementBase,
        renderer: &mut dyn Renderer,
        fonts: &FontTable,
        reason: Redraw,
    ) -> Result<(), RenderError>;

    /// Handle a touch event routed to this element. Returning an action
    /// overrides the element's own activation action.
    fn on_touch(&mut self, base: &mut ElementBase, event: TouchEvent) -> Option<Action> {
        let _ = (base, event);
        None
    }

    /// Called once per update cycle regardless of dirty state. The only
    /// supported mechanism for time-driven visual updates; mark the base
    /// dirty to schedule a repaint.
    fn tick(&mut self, base: &mut ElementBase) {
        let _ = base;
    }

    /// Radio-style widgets return `true` so the core enforces
    /// at-most-one-selected per group on activation.
    fn exclusive_select(&self) -> bool {
        false
    }

    /// Scalar value for application queries (e.g. slider position).
    fn value(&self) -> Option<i32> {
        None
    }
}
