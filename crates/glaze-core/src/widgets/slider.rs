// src/widgets/slider.rs
//! Horizontal slider widget: a track line with a draggable thumb.
//!
//! The slider updates continuously from `Down` and `Move` events — including
//! moves outside its rectangle, so a drag that wanders off the track keeps
//! following the finger's x coordinate until release.

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

/// Thumb width in pixels.
const THUMB_WIDTH: u32 = 8;

/// Horizontal inset of the track from the element edges.
const TRACK_INSET: i32 = 2;

pub struct Slider {
    min: i32,
    max: i32,
    value: i32,
}

impl Slider {
    /// A slider over `[min, max]`; `value` is clamped into the range.
    pub fn new(min: i32, max: i32, value: i32) -> Self {
        let max = max.max(min + 1);
        Self {
            min,
            max,
            value: value.clamp(min, max),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Create a slider element on `page` with glow feedback enabled.
    pub fn attach(
        page: &mut Page,
        id: ElemId,
        rect: Rectangle,
        colors: ElementColors,
        min: i32,
        max: i32,
        value: i32,
    ) -> Result<ElementRef, UiError> {
        let eref = page.create_extended(id, rect, colors, Box::new(Self::new(min, max, value)))?;
        if let Some(el) = page.element_mut(eref.index) {
            el.set_glow_enabled(true);
        }
        Ok(eref)
    }

    /// Map a display x coordinate onto the value range.
    fn value_from_x(&self, rect: &Rectangle, x: i32) -> i32 {
        let left = rect.top_left.x + TRACK_INSET;
        let right = rect.top_left.x + rect.size.width as i32 - 1 - TRACK_INSET;
        if right <= left {
            return self.min;
        }
        let x = x.clamp(left, right);
        let span = (self.max - self.min) as i64;
        let offset = (x - left) as i64 * span / (right - left) as i64;
        self.min + offset as i32
    }

    /// Thumb rectangle for the current value.
    fn thumb_rect(&self, rect: &Rectangle) -> Rectangle {
        let left = rect.top_left.x + TRACK_INSET;
        let right = rect.top_left.x + rect.size.width as i32 - 1 - TRACK_INSET;
        let span = (right - left).max(1) as i64;
        let range = (self.max - self.min).max(1) as i64;
        let center = left + ((self.value - self.min) as i64 * span / range) as i32;

        let x = center - THUMB_WIDTH as i32 / 2;
        Rectangle::new(
            Point::new(x, rect.top_left.y + 1),
            Size::new(THUMB_WIDTH, rect.size.height.saturating_sub(2)),
        )
    }
}

impl Widget for Slider {
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

        if base.fill_enabled() {
            renderer.fill_rect(rect, colors.fill)?;
        }

        // Track line through the vertical center.
        let cy = rect.top_left.y + rect.size.height as i32 / 2;
        renderer.draw_line(
            Point::new(rect.top_left.x + TRACK_INSET, cy),
            Point::new(rect.top_left.x + rect.size.width as i32 - 1 - TRACK_INSET, cy),
            colors.frame,
        )?;

        let thumb_color = if base.is_glowing() { colors.glow } else { colors.frame };
        renderer.fill_rect(self.thumb_rect(&rect), thumb_color)?;

        if base.frame_enabled() {
            renderer.frame_rect(rect, colors.frame)?;
        }

        base.clear_redraw();
        Ok(())
    }

    fn on_touch(&mut self, base: &mut ElementBase, event: TouchEvent) -> Option<Action> {
        match event {
            TouchEvent::Down(at) | TouchEvent::Move { at, .. } => {
                let value = self.value_from_x(&base.rect(), at.x);
                if value != self.value {
                    self.value = value;
                    base.mark_dirty();
                }
                None
            }
            TouchEvent::UpInside(_) | TouchEvent::UpOutside(_) => None,
        }
    }

    fn value(&self) -> Option<i32> {
        Some(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{RecordingRenderer, ScriptTouch, press, release};
    use crate::gui::Gui;
    use crate::ui::core::{PageId, TouchSample};

    fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    fn slider_gui() -> (Gui, ElementRef) {
        let mut g = Gui::new(rect(0, 0, 320, 240));
        g.add_page(PageId(0), 4).unwrap();
        let eref = Slider::attach(
            g.page_mut(PageId(0)).unwrap(),
            ElemId(1),
            rect(10, 100, 104, 20),
            ElementColors::button(),
            0,
            100,
            50,
        )
        .unwrap();
        (g, eref)
    }

    fn feed(g: &mut Gui, samples: &[TouchSample]) {
        let mut touch = ScriptTouch::new();
        for s in samples {
            touch.push(*s);
        }
        let mut r = RecordingRenderer::new();
        while !touch.is_drained() {
            g.update(&mut r, &mut touch).unwrap();
        }
    }

    #[test]
    fn test_value_clamped_at_construction() {
        assert_eq!(Slider::new(0, 10, 99).value(), 10);
        assert_eq!(Slider::new(0, 10, -5).value(), 0);
    }

    #[test]
    fn test_press_moves_thumb_to_touch_position() {
        let (mut g, eref) = slider_gui();
        // Track spans x = 12..=111; x = 12 is the minimum.
        feed(&mut g, &[press(12, 110), release(12, 110)]);
        assert_eq!(g.element(eref).unwrap().value(), Some(0));
    }

    #[test]
    fn test_drag_updates_continuously_and_clamps() {
        let (mut g, eref) = slider_gui();
        feed(&mut g, &[press(60, 110)]);
        let mid = g.element(eref).unwrap().value().unwrap();
        assert!((40..=60).contains(&mid), "mid drag value {}", mid);

        // Dragging far off the right edge clamps to max while still
        // tracking.
        feed(&mut g, &[press(300, 300)]);
        assert_eq!(g.element(eref).unwrap().value(), Some(100));
        assert_eq!(g.tracked_element(), Some(eref));

        feed(&mut g, &[release(300, 300)]);
        assert_eq!(g.element(eref).unwrap().value(), Some(100));
        assert_eq!(g.tracked_element(), None);
    }

    #[test]
    fn test_value_change_repaints() {
        let (mut g, _eref) = slider_gui();
        // Settle the initial paint.
        let mut r = RecordingRenderer::new();
        let mut idle = ScriptTouch::new();
        g.update(&mut r, &mut idle).unwrap();

        // A drag that changes the value repaints within the same cycle.
        r.clear();
        let mut touch = ScriptTouch::new();
        touch.push(press(12, 110));
        g.update(&mut r, &mut touch).unwrap();
        assert!(r.paint_count() > 0);

        // A drag that lands on the same value does not.
        r.clear();
        let mut touch = ScriptTouch::new();
        touch.push(press(12, 110));
        g.update(&mut r, &mut touch).unwrap();
        assert_eq!(r.paint_count(), 0);
    }
}
