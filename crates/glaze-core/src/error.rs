//! Error types for page construction, font registration, and drawing.
//!
//! Configuration errors (capacity exhausted, duplicate ids, font table full)
//! surface as `Err` from the setup call that caused them and are expected to
//! abort application startup. Drawing failures during the frame walk are
//! absorbed and logged; only `present()` failures propagate out of
//! [`Gui::update`](crate::gui::Gui::update).

use thiserror_no_std::Error;

use crate::ui::core::{ElemId, FontId, PageId};

/// A drawing call into the display driver failed.
///
/// The driver's own error type is logged at the adapter boundary; the core
/// only needs to know that the call did not complete.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("display driver reported a drawing failure")]
pub struct RenderError;

/// Errors reported by the GUI core.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UiError {
    #[error("page {0:?} is already registered")]
    DuplicatePage(PageId),

    #[error("page id {0:?} is reserved")]
    ReservedPage(PageId),

    #[error("page {0:?} is not registered")]
    UnknownPage(PageId),

    #[error("page {0:?} element capacity ({1}) exhausted")]
    PageFull(PageId, usize),

    #[error("element {1:?} already exists on page {0:?}")]
    DuplicateElement(PageId, ElemId),

    #[error("font table is full")]
    FontTableFull,

    #[error("font {0:?} is already loaded")]
    DuplicateFont(FontId),

    #[error("page {0:?} cannot be both global and current")]
    GlobalIsCurrent(PageId),

    #[error("render error: {0}")]
    Render(#[from] RenderError),
}
