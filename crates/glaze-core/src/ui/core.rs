// src/ui/core.rs
//! Core identifiers, touch types, and the redraw tri-state.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Identifier of a page, unique within one [`Gui`](crate::gui::Gui).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub u8);

impl PageId {
    /// Sentinel used by [`ElementRef`](crate::ui::element::ElementRef) for
    /// definition copies that are not bound to any page. Cannot be used as a
    /// real page id.
    pub const DETACHED: PageId = PageId(u8::MAX);
}

/// Identifier of an element, unique within its owning page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElemId(pub u16);

impl ElemId {
    /// Request auto-assignment of the next free id at creation time.
    pub const AUTO: ElemId = ElemId(u16::MAX);

    /// Auto-assigned ids start here so they stay clear of user-chosen ids.
    pub(crate) const AUTO_BASE: u16 = 0x4000;
}

/// Identifier of a font slot in the [`FontTable`](crate::ui::fonts::FontTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontId(pub u8);

/// A calibrated touch coordinate in display space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: i32,
    pub y: i32,
}

impl TouchPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One raw sample from a touch source, already calibrated by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchSample {
    pub x: i32,
    pub y: i32,
    /// Whether pressure indicates the surface is currently pressed.
    pub pressed: bool,
}

impl TouchSample {
    pub const fn new(x: i32, y: i32, pressed: bool) -> Self {
        Self { x, y, pressed }
    }
}

/// Touch events delivered to the tracked element.
///
/// Only [`TouchEvent::UpInside`] is the conventional activation signal; a
/// press that ends outside the element's rectangle delivers
/// [`TouchEvent::UpOutside`] and activates nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    /// A press started on this element.
    Down(TouchPoint),
    /// The press moved while held. `inside` reports whether the point is
    /// still within the element's rectangle; tracking is retained either
    /// way so drags can leave and re-enter.
    Move { at: TouchPoint, inside: bool },
    /// The press was released inside the element's rectangle.
    UpInside(TouchPoint),
    /// The press was released outside the element's rectangle.
    UpOutside(TouchPoint),
}

/// Per-element redraw state.
///
/// Mutators raise this to at least [`Redraw::Partial`]; a page switch
/// promotes every element to [`Redraw::Full`] for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Redraw {
    #[default]
    None,
    Partial,
    Full,
}

/// Actions fired by elements on activation (`UpInside`).
///
/// [`Action::Navigate`] is applied by the [`Gui`](crate::gui::Gui) itself
/// and also returned to the caller; everything else is application-defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Switch the current page.
    Navigate(PageId),
    /// Application-defined action with an id.
    Custom(u16),
}

/// A rectangle with zero extent never hits and never draws.
pub(crate) fn rect_is_degenerate(rect: &Rectangle) -> bool {
    rect.size.width == 0 || rect.size.height == 0
}
