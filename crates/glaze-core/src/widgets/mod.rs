//! Stock extended widgets built on the [`Widget`](crate::ui::widget::Widget)
//! dispatch contract.
//!
//! These are ordinary extended elements: the core treats them exactly like
//! any application-defined widget. They double as reference implementations
//! for the draw/touch/tick surface.

pub mod checkbox;
pub mod slider;

pub use checkbox::Checkbox;
pub use slider::Slider;
