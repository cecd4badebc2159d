//! Hardware-independent retained-mode GUI core for small touch displays.
//!
//! glaze manages a flat set of pages, each owning a fixed-capacity arena of
//! widget elements. Touch samples are folded into a click-tracking state
//! machine that routes Down/Move/Up events to the hit element, and the frame
//! update only repaints elements whose redraw state was marked by a mutation.
//!
//! The core never talks to hardware directly: displays are reached through
//! the [`Renderer`](ui::render::Renderer) capability surface and touch
//! controllers through [`TouchSource`](touch::TouchSource). It is
//! `#![no_std]` with `extern crate alloc` so it compiles on both embedded
//! targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod error;
pub mod gui;
pub mod pages;
pub mod touch;
pub mod ui;
pub mod widgets;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{RenderError, UiError};
pub use gui::Gui;
pub use pages::page::{Background, Page};
pub use touch::TouchSource;
pub use ui::core::{Action, ElemId, FontId, PageId, Redraw, TouchEvent, TouchPoint, TouchSample};
pub use ui::element::{Element, ElementKind, ElementRef};
pub use ui::render::{EgRenderer, Renderer};
pub use ui::styling::ElementColors;
pub use ui::widget::Widget;
