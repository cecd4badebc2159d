//! UI building blocks: ids, touch types, elements, rendering, and styling.

pub mod core;
pub mod element;
pub mod fonts;
pub mod render;
pub mod styling;
pub mod widget;

pub use core::{Action, ElemId, FontId, PageId, Redraw, TouchEvent, TouchPoint, TouchSample};
pub use element::{Element, ElementKind, ElementRef};
pub use fonts::{DEFAULT_FONT, FontTable};
pub use render::{EgRenderer, Renderer};
pub use styling::ElementColors;
pub use widget::Widget;
