// src/pages/page.rs
//! A page: an ordered, fixed-capacity arena of elements.
//!
//! Insertion order is paint order (back to front) and reverse insertion
//! order is hit-test order (front to back), so later-created elements win
//! on overlap. The arena is reserved once at page creation and never
//! grows; exceeding the capacity is a configuration error reported to the
//! caller, and already-created elements stay intact.

use alloc::boxed::Box;
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;

use crate::error::UiError;
use crate::ui::core::{ElemId, PageId, TouchPoint};
use crate::ui::element::{Element, ElementBase, ElementKind, ElementRef};
use crate::ui::styling::ElementColors;
use crate::ui::widget::Widget;

/// What the page paints behind its elements on a full repaint.
///
/// There is no image variant: the renderer surface has no image
/// primitive, so full-screen imagery belongs to an extended element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    /// Leave the framebuffer contents alone.
    #[default]
    None,
    /// Flat color over the whole display.
    Color(Rgb565),
}

/// An ordered collection of elements with its own background and redraw
/// state.
pub struct Page {
    id: PageId,
    elements: Vec<Element>,
    capacity: usize,
    background: Background,
    needs_full_redraw: bool,
}

impl Page {
    pub(crate) fn new(id: PageId, capacity: usize) -> Self {
        Self {
            id,
            // Reserved once; pushes stay within capacity so the arena
            // never reallocates and indices stay stable.
            elements: Vec::with_capacity(capacity),
            capacity,
            background: Background::None,
            needs_full_redraw: true,
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
        self.needs_full_redraw = true;
    }

    /// Force a complete repaint of this page on the next cycle.
    pub fn mark_full_redraw(&mut self) {
        self.needs_full_redraw = true;
    }

    pub(crate) fn take_full_redraw(&mut self) -> bool {
        core::mem::take(&mut self.needs_full_redraw)
    }

    // -----------------------------------------------------------------------
    // Element factory
    // -----------------------------------------------------------------------

    /// Create a built-in element. Pass [`ElemId::AUTO`] to have an id
    /// assigned from the auto range; explicit ids must be unique within
    /// the page.
    pub fn create_element(
        &mut self,
        id: ElemId,
        kind: ElementKind,
        rect: Rectangle,
        colors: ElementColors,
    ) -> Result<ElementRef, UiError> {
        let id = self.resolve_id(id);
        self.insert(Element::builtin(ElementBase::new(id, kind, rect, colors)))
    }

    /// Create an extended element dispatched through the given widget.
    pub fn create_extended(
        &mut self,
        id: ElemId,
        rect: Rectangle,
        colors: ElementColors,
        widget: Box<dyn Widget>,
    ) -> Result<ElementRef, UiError> {
        let id = self.resolve_id(id);
        self.insert(Element::extended(
            ElementBase::new(id, ElementKind::Extended, rect, colors),
            widget,
        ))
    }

    fn insert(&mut self, element: Element) -> Result<ElementRef, UiError> {
        if self.elements.len() >= self.capacity {
            return Err(UiError::PageFull(self.id, self.capacity));
        }
        if self.find_element(element.id()).is_some() {
            return Err(UiError::DuplicateElement(self.id, element.id()));
        }
        let index = self.elements.len() as u16;
        self.elements.push(element);
        Ok(ElementRef::new(self.id, index))
    }

    /// Resolve an id request: explicit ids pass through, [`ElemId::AUTO`]
    /// picks the next free id starting at the auto base.
    fn resolve_id(&self, requested: ElemId) -> ElemId {
        if requested != ElemId::AUTO {
            return requested;
        }
        let mut candidate = ElemId::AUTO_BASE;
        while self.elements.iter().any(|el| el.id() == ElemId(candidate)) {
            candidate += 1;
        }
        ElemId(candidate)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Linear scan by element id. The sanctioned way for applications to
    /// retain quick-access handles after construction.
    pub fn find_element(&self, id: ElemId) -> Option<ElementRef> {
        self.elements
            .iter()
            .position(|el| el.id() == id)
            .map(|index| ElementRef::new(self.id, index as u16))
    }

    /// Resolve a handle against this page. Handles minted by another page
    /// (or detached handles) yield `None`.
    pub fn get(&self, eref: ElementRef) -> Option<&Element> {
        if eref.page != self.id {
            return None;
        }
        self.element(eref.index)
    }

    pub fn get_mut(&mut self, eref: ElementRef) -> Option<&mut Element> {
        if eref.page != self.id {
            return None;
        }
        self.element_mut(eref.index)
    }

    pub(crate) fn element(&self, index: u16) -> Option<&Element> {
        self.elements.get(index as usize)
    }

    pub(crate) fn element_mut(&mut self, index: u16) -> Option<&mut Element> {
        self.elements.get_mut(index as usize)
    }

    pub(crate) fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut()
    }

    /// Front-most visible, clickable element containing the point.
    pub(crate) fn hit_test(&self, at: TouchPoint) -> Option<ElementRef> {
        self.elements
            .iter()
            .enumerate()
            .rev()
            .find(|(_, el)| el.is_visible() && el.is_clickable() && el.hit(at))
            .map(|(index, _)| ElementRef::new(self.id, index as u16))
    }

    /// Clear the selected flag of every element in `group` except the one
    /// at `keep`, marking the cleared elements dirty.
    pub(crate) fn clear_group_selection(&mut self, group: u16, keep: u16) {
        for (index, el) in self.elements.iter_mut().enumerate() {
            if index as u16 != keep && el.group() == Some(group) && el.is_selected() {
                el.set_selected(false);
            }
        }
    }
}
