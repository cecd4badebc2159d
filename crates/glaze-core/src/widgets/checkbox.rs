// src/widgets/checkbox.rs
//! Checkbox and radio-button widget.
//!
//! Both modes share the same visual: an outer frame, an interior that
//! glows while pressed, and an inset marker when selected. A plain
//! checkbox toggles its own selected flag on activation; in radio mode
//! the widget reports [`Widget::exclusive_select`] and leaves selection
//! to the core, which sets the activated element and clears the rest of
//! its group.

use alloc::boxed::Box;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::error::{RenderError, UiError};
use crate::pages::page::Page;
use crate::ui::core::{Action, ElemId, Redraw, TouchEvent};
use crate::ui::element::{ElementBase, ElementRef};
use crate::ui::fonts::FontTable;
use crate::ui::render::Renderer;
use crate::ui::styling::ElementColors;
use crate::ui::widget::Widget;

/// Pixels between the outer frame and the selected marker.
const MARKER_INSET: i32 = 3;

pub struct Checkbox {
    radio: bool,
}

impl Checkbox {
    /// A toggling checkbox.
    pub fn new() -> Self {
        Self { radio: false }
    }

    /// A radio button; selection is exclusive within the element's group.
    pub fn radio() -> Self {
        Self { radio: true }
    }

    /// Create a checkbox element on `page` with glow feedback enabled.
    pub fn attach(
        page: &mut Page,
        id: ElemId,
        rect: Rectangle,
        colors: ElementColors,
    ) -> Result<ElementRef, UiError> {
        Self::install(page, id, rect, colors, Self::new(), None)
    }

    /// Create a radio button bound to a selection group.
    pub fn attach_radio(
        page: &mut Page,
        id: ElemId,
        rect: Rectangle,
        colors: ElementColors,
        group: u16,
    ) -> Result<ElementRef, UiError> {
        Self::install(page, id, rect, colors, Self::radio(), Some(group))
    }

    fn install(
        page: &mut Page,
        id: ElemId,
        rect: Rectangle,
        colors: ElementColors,
        widget: Checkbox,
        group: Option<u16>,
    ) -> Result<ElementRef, UiError> {
        let eref = page.create_extended(id, rect, colors, Box::new(widget))?;
        if let Some(el) = page.element_mut(eref.index) {
            el.set_glow_enabled(true);
            if group.is_some() {
                el.set_group(group);
            }
        }
        Ok(eref)
    }

    fn marker_rect(rect: &Rectangle) -> Rectangle {
        let inset = MARKER_INSET.min(rect.size.width as i32 / 2 - 1).max(1);
        Rectangle::new(
            rect.top_left + Point::new(inset, inset),
            Size::new(
                rect.size.width.saturating_sub(2 * inset as u32),
                rect.size.height.saturating_sub(2 * inset as u32),
            ),
        )
    }
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Checkbox {
    fn draw(
        &mut self,
        base: &mut ElementBase,
        renderer: &mut dyn Renderer,
        _fonts: &FontTable,
        _reason: Redraw,
    ) -> Result<(), RenderError> {
        let rect = base.rect();
        if rect.size.width == 0 || rect.size.height == 0 {
            base.clear_redraw();
            return Ok(());
        }
        let colors = base.colors();

        let fill = if base.is_glowing() { colors.glow } else { colors.fill };
        renderer.fill_rect(rect, fill)?;
        renderer.frame_rect(rect, colors.frame)?;

        if base.is_selected() {
            renderer.fill_rect(Self::marker_rect(&rect), colors.frame)?;
        }

        base.clear_redraw();
        Ok(())
    }

    fn on_touch(&mut self, base: &mut ElementBase, event: TouchEvent) -> Option<Action> {
        if let TouchEvent::UpInside(_) = event
            && !self.radio
        {
            base.set_selected(!base.is_selected());
        }
        None
    }

    fn exclusive_select(&self) -> bool {
        self.radio
    }
}
