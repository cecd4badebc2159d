// src/ui/render.rs
//! The pixel-drawing capability surface the core consumes.
//!
//! [`Renderer`] is deliberately small and object-safe so extended widgets
//! can draw through `&mut dyn Renderer`. [`EgRenderer`] adapts any
//! `embedded-graphics` [`DrawTarget`] (hardware display, framebuffer, or
//! the SDL simulator) to it.

use embedded_graphics::Drawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use log::warn;

use crate::error::RenderError;

/// Synchronous pixel operations in element-coordinate space.
pub trait Renderer {
    fn fill_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), RenderError>;

    fn frame_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), RenderError>;

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb565) -> Result<(), RenderError>;

    /// Render a single line of text inside `rect`, anchored by `align` and
    /// inset horizontally by `margin` pixels, vertically centered.
    fn draw_text(
        &mut self,
        rect: Rectangle,
        text: &str,
        font: &'static MonoFont<'static>,
        color: Rgb565,
        align: Alignment,
        margin: u32,
    ) -> Result<(), RenderError>;

    /// Flush the frame to the display. Drivers that paint directly may
    /// treat this as a no-op.
    fn present(&mut self) -> Result<(), RenderError>;
}

/// Adapter from any `embedded-graphics` draw target to [`Renderer`].
///
/// Driver errors are logged here (where the concrete error type is still
/// known) and collapsed into [`RenderError`].
pub struct EgRenderer<'d, D> {
    target: &'d mut D,
}

impl<'d, D> EgRenderer<'d, D> {
    pub fn new(target: &'d mut D) -> Self {
        Self { target }
    }
}

fn absorb<E: core::fmt::Debug>(err: E) -> RenderError {
    warn!("display driver error: {:?}", err);
    RenderError
}

impl<D> Renderer for EgRenderer<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: core::fmt::Debug,
{
    fn fill_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), RenderError> {
        rect.into_styled(PrimitiveStyle::with_fill(color))
            .draw(self.target)
            .map_err(absorb)
    }

    fn frame_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), RenderError> {
        rect.into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(self.target)
            .map_err(absorb)
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb565) -> Result<(), RenderError> {
        Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(self.target)
            .map_err(absorb)
    }

    fn draw_text(
        &mut self,
        rect: Rectangle,
        text: &str,
        font: &'static MonoFont<'static>,
        color: Rgb565,
        align: Alignment,
        margin: u32,
    ) -> Result<(), RenderError> {
        let center_y = rect.top_left.y + rect.size.height as i32 / 2;
        let anchor = match align {
            Alignment::Left => Point::new(rect.top_left.x + margin as i32, center_y),
            Alignment::Center => rect.center(),
            Alignment::Right => Point::new(
                rect.top_left.x + rect.size.width as i32 - 1 - margin as i32,
                center_y,
            ),
        };

        let text_style = TextStyleBuilder::new()
            .alignment(align)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(text, anchor, MonoTextStyle::new(font, color), text_style)
            .draw(self.target)
            .map_err(absorb)?;
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}
