// src/ui/fonts.rs
//! Font table: fixed id-to-font slots referenced by element text drawing.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use heapless::Vec;
use log::debug;

use crate::error::UiError;
use crate::ui::core::FontId;

/// Fallback when an element references a font id that was never loaded.
pub const DEFAULT_FONT: &MonoFont<'static> = &FONT_6X10;

/// Number of font slots. Exceeding it is a fatal configuration error.
pub const MAX_FONTS: usize = 8;

/// Fixed-capacity mapping from [`FontId`] to `embedded-graphics` fonts.
#[derive(Default)]
pub struct FontTable {
    slots: Vec<(FontId, &'static MonoFont<'static>), MAX_FONTS>,
}

impl FontTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font under `id`. Duplicate ids and a full table are
    /// configuration errors.
    pub fn load(&mut self, id: FontId, font: &'static MonoFont<'static>) -> Result<(), UiError> {
        if self.lookup(id).is_some() {
            return Err(UiError::DuplicateFont(id));
        }
        self.slots
            .push((id, font))
            .map_err(|_| UiError::FontTableFull)?;
        Ok(())
    }

    pub fn lookup(&self, id: FontId) -> Option<&'static MonoFont<'static>> {
        self.slots
            .iter()
            .find(|(slot, _)| *slot == id)
            .map(|(_, font)| *font)
    }

    /// Resolve a font id, falling back to [`DEFAULT_FONT`] for unknown ids.
    pub fn get(&self, id: FontId) -> &'static MonoFont<'static> {
        self.lookup(id).unwrap_or_else(|| {
            debug!("font {:?} not loaded, using default", id);
            DEFAULT_FONT
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mono_font::ascii::FONT_10X20;

    #[test]
    fn test_load_and_lookup() {
        let mut fonts = FontTable::new();
        fonts.load(FontId(1), &FONT_10X20).unwrap();
        assert_eq!(
            fonts.lookup(FontId(1)).map(|f| f.character_size),
            Some(FONT_10X20.character_size)
        );
    }

    #[test]
    fn test_unknown_font_falls_back_to_default() {
        let fonts = FontTable::new();
        assert_eq!(
            fonts.get(FontId(42)).character_size,
            DEFAULT_FONT.character_size
        );
    }

    #[test]
    fn test_duplicate_font_rejected() {
        let mut fonts = FontTable::new();
        fonts.load(FontId(1), &FONT_10X20).unwrap();
        assert_eq!(
            fonts.load(FontId(1), &FONT_10X20),
            Err(UiError::DuplicateFont(FontId(1)))
        );
    }

    #[test]
    fn test_table_capacity_exhaustion() {
        let mut fonts = FontTable::new();
        for i in 0..MAX_FONTS {
            fonts.load(FontId(i as u8), &FONT_10X20).unwrap();
        }
        assert_eq!(
            fonts.load(FontId(200), &FONT_10X20),
            Err(UiError::FontTableFull)
        );
    }
}
