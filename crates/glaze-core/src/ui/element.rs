// src/ui/element.rs
//! Element storage: the per-widget state record and the stable handle type.
//!
//! An [`Element`] is one widget instance living inside a page's arena. The
//! built-in kinds (box, text, buttons, image, line) are drawn by
//! [`ElementBase::draw_builtin`]; anything richer is an *extended* element
//! carrying a boxed [`Widget`](crate::ui::widget::Widget) that takes over
//! draw, touch, and tick dispatch.
//!
//! # Write-marks-dirty
//!
//! Every mutator routes through [`ElementBase::mark_changed`], which raises
//! the redraw state to at least [`Redraw::Partial`]. The frame walk never
//! diffs state; it only looks at what was marked.
//!
//! # Handles, not pointers
//!
//! Outside holders (quick-access references saved by the application, the
//! touch tracker's tracked field) keep an [`ElementRef`], a page-id/index
//! pair. Resolving a stale handle after a page reconfiguration yields
//! `None`, never a dangling pointer, and every entry point treats the miss
//! as a no-op.

use alloc::boxed::Box;
use core::ops::{Deref, DerefMut};

use embedded_graphics::primitives::{ContainsPoint, Rectangle};
use embedded_graphics::text::Alignment;

use crate::error::RenderError;
use crate::ui::core::{Action, ElemId, PageId, Redraw, TouchPoint, rect_is_degenerate};
use crate::ui::fonts::FontTable;
use crate::ui::render::Renderer;
use crate::ui::styling::ElementColors;
use crate::ui::widget::Widget;

/// Maximum label length; longer strings are truncated, never an error.
pub const MAX_TEXT_LEN: usize = 64;

/// Widget-type tag for the built-in draw and touch behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Filled/framed rectangle.
    Box,
    /// Static label.
    Text,
    /// Clickable label with glow feedback.
    TextButton,
    /// Clickable image region (pixels supplied by a custom widget or
    /// treated as a framed placeholder).
    ImageButton,
    /// Passive image region.
    Image,
    /// Diagonal line across the element rectangle.
    Line,
    /// Custom widget dispatched through the [`Widget`] trait.
    Extended,
}

/// Stable handle to an element, indirect from its storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRef {
    pub(crate) page: PageId,
    pub(crate) index: u16,
}

impl ElementRef {
    pub(crate) const fn new(page: PageId, index: u16) -> Self {
        Self { page, index }
    }

    /// Handle for a definition copy that is not bound to any page.
    pub const fn detached() -> Self {
        Self {
            page: PageId::DETACHED,
            index: u16::MAX,
        }
    }

    /// Whether this handle refers to a definition copy rather than a
    /// page-bound instance. Detached handles never resolve.
    pub const fn is_detached(&self) -> bool {
        matches!(self.page, PageId::DETACHED)
    }

    /// The page this handle points into.
    pub const fn page(&self) -> PageId {
        self.page
    }
}

/// The state shared by every element kind.
#[derive(Debug)]
pub struct ElementBase {
    id: ElemId,
    kind: ElementKind,
    rect: Rectangle,
    colors: ElementColors,
    text: heapless::String<MAX_TEXT_LEN>,
    font: crate::ui::core::FontId,
    text_align: Alignment,
    text_margin: u32,
    group: Option<u16>,
    action: Option<Action>,
    visible: bool,
    clickable: bool,
    fill_enabled: bool,
    frame_enabled: bool,
    glow_enabled: bool,
    glowing: bool,
    selected: bool,
    redraw: Redraw,
}

impl ElementBase {
    pub(crate) fn new(id: ElemId, kind: ElementKind, rect: Rectangle, colors: ElementColors) -> Self {
        let (clickable, fill_enabled, frame_enabled, glow_enabled) = match kind {
            ElementKind::Box => (false, true, true, false),
            ElementKind::Text => (false, true, false, false),
            ElementKind::TextButton => (true, true, true, true),
            ElementKind::ImageButton => (true, false, true, true),
            ElementKind::Image => (false, false, false, false),
            ElementKind::Line => (false, false, true, false),
            ElementKind::Extended => (true, true, false, false),
        };

        Self {
            id,
            kind,
            rect,
            colors,
            text: heapless::String::new(),
            font: crate::ui::core::FontId::default(),
            text_align: Alignment::Center,
            text_margin: 2,
            group: None,
            action: None,
            visible: true,
            clickable,
            fill_enabled,
            frame_enabled,
            glow_enabled,
            glowing: false,
            selected: false,
            // Freshly created elements paint on the next cycle.
            redraw: Redraw::Full,
        }
    }

    // -----------------------------------------------------------------------
    // Dirty tracking
    // -----------------------------------------------------------------------

    /// The single path every mutator goes through: raise the redraw state
    /// to at least `Partial`.
    fn mark_changed(&mut self) {
        self.redraw = self.redraw.max(Redraw::Partial);
    }

    /// Request a repaint of this element on the next cycle.
    pub fn mark_dirty(&mut self) {
        self.mark_changed();
    }

    /// Promote to a full repaint (used on page switches).
    pub(crate) fn force_full(&mut self) {
        self.redraw = Redraw::Full;
    }

    /// Clear the redraw flag after a completed draw. Custom widget draw
    /// implementations must call this themselves.
    pub fn clear_redraw(&mut self) {
        self.redraw = Redraw::None;
    }

    pub fn redraw(&self) -> Redraw {
        self.redraw
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn id(&self) -> ElemId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rectangle) {
        self.rect = rect;
        self.mark_changed();
    }

    pub fn colors(&self) -> ElementColors {
        self.colors
    }

    pub fn set_colors(&mut self, colors: ElementColors) {
        self.colors = colors;
        self.mark_changed();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the label. Strings longer than [`MAX_TEXT_LEN`] are
    /// truncated at a character boundary.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        for ch in text.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }
        self.mark_changed();
    }

    pub fn font(&self) -> crate::ui::core::FontId {
        self.font
    }

    pub fn set_font(&mut self, font: crate::ui::core::FontId) {
        self.font = font;
        self.mark_changed();
    }

    pub fn text_align(&self) -> Alignment {
        self.text_align
    }

    pub fn set_text_align(&mut self, align: Alignment) {
        self.text_align = align;
        self.mark_changed();
    }

    pub fn text_margin(&self) -> u32 {
        self.text_margin
    }

    pub fn set_text_margin(&mut self, margin: u32) {
        self.text_margin = margin;
        self.mark_changed();
    }

    pub fn group(&self) -> Option<u16> {
        self.group
    }

    /// Assign this element to a mutually-exclusive selection family.
    pub fn set_group(&mut self, group: Option<u16>) {
        self.group = group;
        self.mark_changed();
    }

    pub fn action(&self) -> Option<Action> {
        self.action
    }

    /// Action fired when a press is released inside this element.
    pub fn set_action(&mut self, action: Option<Action>) {
        self.action = action;
        self.mark_changed();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.mark_changed();
    }

    pub fn is_clickable(&self) -> bool {
        self.clickable
    }

    pub fn set_clickable(&mut self, clickable: bool) {
        self.clickable = clickable;
        self.mark_changed();
    }

    pub fn fill_enabled(&self) -> bool {
        self.fill_enabled
    }

    pub fn set_fill_enabled(&mut self, enabled: bool) {
        self.fill_enabled = enabled;
        self.mark_changed();
    }

    pub fn frame_enabled(&self) -> bool {
        self.frame_enabled
    }

    pub fn set_frame_enabled(&mut self, enabled: bool) {
        self.frame_enabled = enabled;
        self.mark_changed();
    }

    pub fn glow_enabled(&self) -> bool {
        self.glow_enabled
    }

    pub fn set_glow_enabled(&mut self, enabled: bool) {
        self.glow_enabled = enabled;
        self.mark_changed();
    }

    pub fn is_glowing(&self) -> bool {
        self.glowing
    }

    /// Pressed-visual state, driven by the touch tracker. Only marks dirty
    /// on an actual transition so drag samples don't force repaints.
    pub(crate) fn set_glowing(&mut self, glowing: bool) {
        if self.glowing != glowing {
            self.glowing = glowing;
            self.mark_changed();
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.mark_changed();
    }

    // -----------------------------------------------------------------------
    // Hit testing and built-in drawing
    // -----------------------------------------------------------------------

    /// Whether the point falls inside this element's rectangle. Degenerate
    /// rectangles never hit.
    pub fn hit(&self, at: TouchPoint) -> bool {
        !rect_is_degenerate(&self.rect) && self.rect.contains(at.to_point())
    }

    /// Built-in draw sequence: interior fill (glow color while pressed),
    /// frame stroke, then the label. Clears the redraw flag on completion.
    pub(crate) fn draw_builtin(
        &mut self,
        renderer: &mut dyn Renderer,
        fonts: &FontTable,
    ) -> Result<(), RenderError> {
        if rect_is_degenerate(&self.rect) {
            self.clear_redraw();
            return Ok(());
        }

        match self.kind {
            ElementKind::Line => {
                let p0 = self.rect.top_left;
                let p1 = p0
                    + embedded_graphics::prelude::Point::new(
                        self.rect.size.width as i32 - 1,
                        self.rect.size.height as i32 - 1,
                    );
                renderer.draw_line(p0, p1, self.colors.frame)?;
            }
            _ => {
                if self.fill_enabled {
                    let fill = if self.glowing && self.glow_enabled {
                        self.colors.glow
                    } else {
                        self.colors.fill
                    };
                    renderer.fill_rect(self.rect, fill)?;
                }

                if self.frame_enabled {
                    renderer.frame_rect(self.rect, self.colors.frame)?;
                }

                if !self.text.is_empty() {
                    renderer.draw_text(
                        self.rect,
                        &self.text,
                        fonts.get(self.font),
                        self.colors.frame,
                        self.text_align,
                        self.text_margin,
                    )?;
                }
            }
        }

        self.clear_redraw();
        Ok(())
    }
}

/// One widget instance: the shared base plus an optional extended widget.
pub struct Element {
    pub(crate) base: ElementBase,
    pub(crate) widget: Option<Box<dyn Widget>>,
}

impl Element {
    pub(crate) fn builtin(base: ElementBase) -> Self {
        Self { base, widget: None }
    }

    pub(crate) fn extended(base: ElementBase, widget: Box<dyn Widget>) -> Self {
        Self {
            base,
            widget: Some(widget),
        }
    }

    /// Scalar value exposed by the extended widget, if any (e.g. a slider
    /// position).
    pub fn value(&self) -> Option<i32> {
        self.widget.as_ref().and_then(|w| w.value())
    }
}

impl Deref for Element {
    type Target = ElementBase;

    fn deref(&self) -> &ElementBase {
        &self.base
    }
}

impl DerefMut for Element {
    fn deref_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}
