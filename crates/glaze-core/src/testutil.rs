//! Shared test doubles: a recording renderer and a scripted touch source.

use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;

use crate::error::RenderError;
use crate::touch::TouchSource;
use crate::ui::core::TouchSample;
use crate::ui::render::Renderer;

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Fill(Rectangle, Rgb565),
    Frame(Rectangle, Rgb565),
    Line(Point, Point, Rgb565),
    Text(Rectangle, String),
    Present,
}

/// Renderer that records every call instead of painting.
#[derive(Default)]
pub(crate) struct RecordingRenderer {
    pub ops: Vec<Op>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Number of calls that paint pixels (everything except `Present`).
    pub fn paint_count(&self) -> usize {
        self.ops.iter().filter(|op| **op != Op::Present).count()
    }
}

impl Renderer for RecordingRenderer {
    fn fill_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), RenderError> {
        self.ops.push(Op::Fill(rect, color));
        Ok(())
    }

    fn frame_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), RenderError> {
        self.ops.push(Op::Frame(rect, color));
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb565) -> Result<(), RenderError> {
        self.ops.push(Op::Line(from, to, color));
        Ok(())
    }

    fn draw_text(
        &mut self,
        rect: Rectangle,
        text: &str,
        _font: &'static MonoFont<'static>,
        _color: Rgb565,
        _align: Alignment,
        _margin: u32,
    ) -> Result<(), RenderError> {
        self.ops.push(Op::Text(rect, String::from(text)));
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.ops.push(Op::Present);
        Ok(())
    }
}

/// Touch source that replays a scripted sample sequence, one per poll.
#[derive(Default)]
pub(crate) struct ScriptTouch {
    samples: Vec<TouchSample>,
    next: usize,
}

impl ScriptTouch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: TouchSample) {
        self.samples.push(sample);
    }

    pub fn is_drained(&self) -> bool {
        self.next >= self.samples.len()
    }
}

impl TouchSource for ScriptTouch {
    fn poll(&mut self) -> Option<TouchSample> {
        let sample = self.samples.get(self.next).copied();
        if sample.is_some() {
            self.next += 1;
        }
        sample
    }
}

/// Shorthand for a pressed sample.
pub(crate) fn press(x: i32, y: i32) -> TouchSample {
    TouchSample::new(x, y, true)
}

/// Shorthand for a released sample.
pub(crate) fn release(x: i32, y: i32) -> TouchSample {
    TouchSample::new(x, y, false)
}
