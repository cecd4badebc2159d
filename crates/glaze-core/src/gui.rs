// src/gui.rs
//! The GUI controller: pages, touch dispatch, and the update cycle.
//!
//! [`Gui`] is an explicitly constructed context object; the application
//! owns one instance and passes it by reference. There is no global
//! state. Each call to [`Gui::update`] runs one cooperative cycle:
//!
//! 1. Poll the touch source for at most one sample and feed the
//!    click-tracking state machine.
//! 2. Run every extended element's tick, dirty or not.
//! 3. Pages flagged for a full repaint promote every element to
//!    [`Redraw::Full`] for this cycle; the current page additionally
//!    paints its background first (the global page never does, since it
//!    composites on top of the current page).
//! 4. Walk the current page then the global page in insertion order and
//!    draw each element whose redraw state was marked.
//! 5. Present the frame if anything painted.
//!
//! Nothing in the cycle blocks; drawing calls into the renderer are
//! assumed synchronous.

use alloc::vec::Vec;

use embedded_graphics::primitives::Rectangle;
use log::{debug, warn};

use crate::error::UiError;
use crate::pages::page::{Background, Page};
use crate::touch::{TouchSource, TouchTracker, TrackState};
use crate::ui::core::{Action, ElemId, PageId, Redraw, TouchEvent, TouchPoint, TouchSample};
use crate::ui::element::{Element, ElementRef};
use crate::ui::fonts::FontTable;
use crate::ui::render::Renderer;

/// Owns the page set, the touch tracker, and the font table.
pub struct Gui {
    pages: Vec<Page>,
    current: Option<PageId>,
    global: Option<PageId>,
    tracker: TouchTracker,
    fonts: FontTable,
    display_bounds: Rectangle,
}

impl Gui {
    /// Create a controller for a display of the given bounds. Backgrounds
    /// are painted over the whole bounds on full repaints.
    pub fn new(display_bounds: Rectangle) -> Self {
        Self {
            pages: Vec::new(),
            current: None,
            global: None,
            tracker: TouchTracker::default(),
            fonts: FontTable::new(),
            display_bounds,
        }
    }

    pub fn display_bounds(&self) -> Rectangle {
        self.display_bounds
    }

    // -----------------------------------------------------------------------
    // Page management
    // -----------------------------------------------------------------------

    /// Register a page with a fixed element capacity. The first page added
    /// becomes the current page.
    pub fn add_page(&mut self, id: PageId, capacity: usize) -> Result<(), UiError> {
        if id == PageId::DETACHED {
            return Err(UiError::ReservedPage(id));
        }
        if self.page(id).is_some() {
            return Err(UiError::DuplicatePage(id));
        }
        self.pages.push(Page::new(id, capacity));
        if self.current.is_none() {
            self.current = Some(id);
        }
        debug!("page {:?} registered (capacity {})", id, capacity);
        Ok(())
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id() == id)
    }

    pub fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id() == id)
    }

    pub fn current_page(&self) -> Option<PageId> {
        self.current
    }

    pub fn global_page(&self) -> Option<PageId> {
        self.global
    }

    /// Switch the active page. The new current page and the global page
    /// are flagged for a full repaint, since the framebuffer contents of
    /// the prior page are stale. Any in-flight touch track is aborted.
    pub fn set_current_page(&mut self, id: PageId) -> Result<(), UiError> {
        if self.page(id).is_none() {
            return Err(UiError::UnknownPage(id));
        }
        if self.global == Some(id) {
            return Err(UiError::GlobalIsCurrent(id));
        }

        self.current = Some(id);
        self.tracker.reset();

        for pid in [Some(id), self.global].into_iter().flatten() {
            if let Some(page) = self.page_mut(pid) {
                page.mark_full_redraw();
            }
        }
        debug!("current page -> {:?}", id);
        Ok(())
    }

    /// Designate (or clear) the always-on-top overlay page.
    pub fn set_global_page(&mut self, id: Option<PageId>) -> Result<(), UiError> {
        if let Some(id) = id {
            if self.page(id).is_none() {
                return Err(UiError::UnknownPage(id));
            }
            if self.current == Some(id) {
                return Err(UiError::GlobalIsCurrent(id));
            }
        }
        self.global = id;
        if let Some(page) = id.and_then(|id| self.page_mut(id)) {
            page.mark_full_redraw();
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Element access
    // -----------------------------------------------------------------------

    /// Look up an element by page and id; the sanctioned way to retain a
    /// quick-access handle after construction.
    pub fn find_element(&self, page: PageId, id: ElemId) -> Option<ElementRef> {
        self.page(page)?.find_element(id)
    }

    /// Resolve a handle. Stale or detached handles yield `None`.
    pub fn element(&self, eref: ElementRef) -> Option<&Element> {
        self.page(eref.page)?.element(eref.index)
    }

    pub fn element_mut(&mut self, eref: ElementRef) -> Option<&mut Element> {
        self.page_mut(eref.page)?.element_mut(eref.index)
    }

    /// Run a closure against the referenced element; a defensive no-op
    /// when the handle does not resolve.
    pub fn with_element<R>(
        &mut self,
        eref: ElementRef,
        f: impl FnOnce(&mut Element) -> R,
    ) -> Option<R> {
        self.element_mut(eref).map(f)
    }

    // -----------------------------------------------------------------------
    // Fonts
    // -----------------------------------------------------------------------

    pub fn load_font(
        &mut self,
        id: crate::ui::core::FontId,
        font: &'static embedded_graphics::mono_font::MonoFont<'static>,
    ) -> Result<(), UiError> {
        self.fonts.load(id, font)
    }

    pub fn fonts(&self) -> &FontTable {
        &self.fonts
    }

    // -----------------------------------------------------------------------
    // Touch tracking
    // -----------------------------------------------------------------------

    /// Abort any in-flight touch track (external reset).
    pub fn reset_tracking(&mut self) {
        self.tracker.reset();
    }

    /// The element currently bound to a press, if any.
    pub fn tracked_element(&self) -> Option<ElementRef> {
        self.tracker.tracked()
    }

    /// Fold one raw sample into the tracking state machine and dispatch
    /// the resulting event to the hit element.
    fn dispatch_sample(&mut self, sample: TouchSample) -> Option<Action> {
        let at = TouchPoint::new(sample.x, sample.y);

        match (self.tracker.state, sample.pressed) {
            // A miss while idle is a legal no-op.
            (TrackState::Idle, false) => None,

            (TrackState::Idle, true) => {
                let eref = self.hit_test(at)?;
                self.tracker.state = TrackState::Tracking(eref);
                if let Some(el) = self.element_mut(eref)
                    && el.glow_enabled()
                {
                    el.base.set_glowing(true);
                }
                self.dispatch_event(eref, TouchEvent::Down(at))
            }

            (TrackState::Tracking(eref), true) => {
                let inside = match self.element_mut(eref) {
                    Some(el) if el.is_visible() && el.is_clickable() => {
                        let inside = el.hit(at);
                        // Leaving the rect drops the glow but keeps the
                        // track; re-entering restores it.
                        let glow = inside && el.glow_enabled();
                        el.base.set_glowing(glow);
                        inside
                    }
                    // The tracked element went away or stopped being
                    // interactive: abort gracefully.
                    _ => {
                        if let Some(el) = self.element_mut(eref) {
                            el.base.set_glowing(false);
                        }
                        self.tracker.reset();
                        return None;
                    }
                };
                self.dispatch_event(eref, TouchEvent::Move { at, inside })
            }

            (TrackState::Tracking(eref), false) => {
                self.tracker.reset();
                let inside = match self.element_mut(eref) {
                    Some(el) if el.is_visible() && el.is_clickable() => {
                        let inside = el.hit(at);
                        el.base.set_glowing(false);
                        el.mark_dirty();
                        inside
                    }
                    _ => return None,
                };
                let event = if inside {
                    TouchEvent::UpInside(at)
                } else {
                    TouchEvent::UpOutside(at)
                };
                self.dispatch_event(eref, event)
            }
        }
    }

    /// Front-to-back hit test: current page first, then the global page.
    fn hit_test(&self, at: TouchPoint) -> Option<ElementRef> {
        for pid in [self.current, self.global].into_iter().flatten() {
            if let Some(eref) = self.page(pid).and_then(|page| page.hit_test(at)) {
                return Some(eref);
            }
        }
        None
    }

    /// Deliver a touch event to an element and apply activation side
    /// effects (actions, group exclusivity).
    fn dispatch_event(&mut self, eref: ElementRef, event: TouchEvent) -> Option<Action> {
        let mut clear_group: Option<u16> = None;
        let action;
        {
            let el = self.element_mut(eref)?;
            let Element { base, widget } = el;

            let widget_action = widget.as_mut().and_then(|w| w.on_touch(base, event));
            let activated = matches!(event, TouchEvent::UpInside(_));
            action = if activated {
                widget_action.or(base.action())
            } else {
                widget_action
            };

            if activated
                && let Some(group) = base.group()
                && widget.as_ref().is_some_and(|w| w.exclusive_select())
            {
                base.set_selected(true);
                clear_group = Some(group);
            }
        }

        if let Some(group) = clear_group
            && let Some(page) = self.page_mut(eref.page)
        {
            page.clear_group_selection(group, eref.index);
        }
        action
    }

    // -----------------------------------------------------------------------
    // Update cycle
    // -----------------------------------------------------------------------

    /// Run one cooperative frame cycle. Returns the action fired by an
    /// activated element, if any; `Action::Navigate` has already been
    /// applied when it is returned.
    pub fn update(
        &mut self,
        renderer: &mut dyn Renderer,
        touch: &mut dyn TouchSource,
    ) -> Result<Option<Action>, UiError> {
        let mut action = None;
        if let Some(sample) = touch.poll() {
            action = self.dispatch_sample(sample);
        }

        if let Some(Action::Navigate(target)) = action
            && let Err(err) = self.set_current_page(target)
        {
            warn!("navigation to {:?} rejected: {}", target, err);
        }

        self.run_ticks();

        let painted = self.draw_pages(renderer);
        if painted > 0 {
            renderer.present()?;
        }

        Ok(action)
    }

    /// Tick every extended element on the composited pages, dirty or not.
    fn run_ticks(&mut self) {
        let Self {
            pages,
            current,
            global,
            ..
        } = self;
        for pid in [*current, *global].into_iter().flatten() {
            if let Some(page) = pages.iter_mut().find(|p| p.id() == pid) {
                for el in page.elements_mut() {
                    let Element { base, widget } = el;
                    if let Some(w) = widget {
                        w.tick(base);
                    }
                }
            }
        }
    }

    /// Paint the current page then the global page, returning how many
    /// elements were actually drawn. Per-element draw failures are logged
    /// and absorbed; the rest of the frame still renders.
    fn draw_pages(&mut self, renderer: &mut dyn Renderer) -> usize {
        let Self {
            pages,
            current,
            global,
            fonts,
            display_bounds,
            ..
        } = self;

        let mut painted = 0;
        for pid in [*current, *global].into_iter().flatten() {
            let Some(page) = pages.iter_mut().find(|p| p.id() == pid) else {
                continue;
            };

            if page.take_full_redraw() {
                // Only the current page owns the display-wide background;
                // the overlay composites on top of it.
                if Some(pid) == *current
                    && let Background::Color(color) = page.background()
                    && let Err(err) = renderer.fill_rect(*display_bounds, color)
                {
                    warn!("page {:?} background draw failed: {}", pid, err);
                }
                for el in page.elements_mut() {
                    el.base.force_full();
                }
            }

            for el in page.elements_mut() {
                if el.redraw() == Redraw::None {
                    continue;
                }
                if !el.is_visible() {
                    // Nothing to paint; drop the flag so the element does
                    // not stay pending forever.
                    el.base.clear_redraw();
                    continue;
                }

                let reason = el.redraw();
                let Element { base, widget } = el;
                let result = match widget {
                    Some(w) => w.draw(base, renderer, fonts, reason),
                    None => base.draw_builtin(renderer, fonts),
                };
                if let Err(err) = result {
                    warn!("element {:?} draw failed: {}", base.id(), err);
                }
                painted += 1;
            }
        }
        painted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Op, RecordingRenderer, ScriptTouch, press, release};
    use crate::ui::element::{ElementBase, ElementKind};
    use crate::ui::styling::ElementColors;
    use crate::ui::widget::Widget;
    use crate::error::RenderError;

    use alloc::boxed::Box;
    use embedded_graphics::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec as StdVec;

    const MAIN: PageId = PageId(0);
    const SECOND: PageId = PageId(1);
    const OVERLAY: PageId = PageId(2);

    fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    fn gui() -> Gui {
        Gui::new(rect(0, 0, 320, 240))
    }

    /// Runs one update cycle with the given samples queued.
    fn cycle(gui: &mut Gui, renderer: &mut RecordingRenderer, samples: &[TouchSample]) {
        let mut touch = ScriptTouch::new();
        for s in samples {
            touch.push(*s);
        }
        // One sample is consumed per cycle.
        loop {
            gui.update(renderer, &mut touch).unwrap();
            if touch.is_drained() {
                break;
            }
        }
    }

    /// Test widget that records every touch event it receives.
    struct Probe {
        events: Rc<RefCell<StdVec<TouchEvent>>>,
        exclusive: bool,
    }

    impl Widget for Probe {
        fn draw(
            &mut self,
            base: &mut ElementBase,
            _renderer: &mut dyn Renderer,
            _fonts: &FontTable,
            _reason: Redraw,
        ) -> Result<(), RenderError> {
            base.clear_redraw();
            Ok(())
        }

        fn on_touch(&mut self, _base: &mut ElementBase, event: TouchEvent) -> Option<Action> {
            self.events.borrow_mut().push(event);
            None
        }

        fn exclusive_select(&self) -> bool {
            self.exclusive
        }
    }

    fn probe(gui: &mut Gui, page: PageId, r: Rectangle) -> (ElementRef, Rc<RefCell<StdVec<TouchEvent>>>) {
        let events = Rc::new(RefCell::new(StdVec::new()));
        let widget = Probe {
            events: Rc::clone(&events),
            exclusive: false,
        };
        let eref = gui
            .page_mut(page)
            .unwrap()
            .create_extended(ElemId::AUTO, r, ElementColors::button(), Box::new(widget))
            .unwrap();
        (eref, events)
    }

    // -- page management ----------------------------------------------------

    #[test]
    fn test_first_page_becomes_current() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        g.add_page(SECOND, 4).unwrap();
        assert_eq!(g.current_page(), Some(MAIN));
    }

    #[test]
    fn test_duplicate_and_reserved_page_rejected() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        assert_eq!(g.add_page(MAIN, 4), Err(UiError::DuplicatePage(MAIN)));
        assert_eq!(
            g.add_page(PageId::DETACHED, 4),
            Err(UiError::ReservedPage(PageId::DETACHED))
        );
    }

    #[test]
    fn test_global_page_cannot_be_current() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        g.add_page(OVERLAY, 4).unwrap();
        assert_eq!(
            g.set_global_page(Some(MAIN)),
            Err(UiError::GlobalIsCurrent(MAIN))
        );
        g.set_global_page(Some(OVERLAY)).unwrap();
        assert_eq!(
            g.set_current_page(OVERLAY),
            Err(UiError::GlobalIsCurrent(OVERLAY))
        );
    }

    // -- redraw cycle -------------------------------------------------------

    #[test]
    fn test_clean_elements_do_not_touch_the_renderer() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        g.page_mut(MAIN)
            .unwrap()
            .create_element(ElemId(1), ElementKind::Box, rect(10, 10, 50, 50), ElementColors::default())
            .unwrap();

        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[]);
        assert!(r.paint_count() > 0, "first cycle paints the new page");

        // Everything drawn; a second cycle must be a no-op.
        r.clear();
        cycle(&mut g, &mut r, &[]);
        assert_eq!(r.paint_count(), 0);
        assert!(!r.ops.contains(&Op::Present));
    }

    #[test]
    fn test_builtin_draw_clears_redraw_state() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        let eref = g
            .page_mut(MAIN)
            .unwrap()
            .create_element(ElemId(1), ElementKind::Box, rect(10, 10, 50, 50), ElementColors::default())
            .unwrap();

        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[]);
        assert_eq!(g.element(eref).unwrap().redraw(), Redraw::None);
    }

    #[test]
    fn test_mutation_schedules_exactly_one_repaint() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        let eref = g
            .page_mut(MAIN)
            .unwrap()
            .create_element(ElemId(1), ElementKind::Text, rect(10, 10, 100, 20), ElementColors::default())
            .unwrap();

        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[]);
        r.clear();

        g.with_element(eref, |el| el.set_text("updated"));
        cycle(&mut g, &mut r, &[]);
        assert!(r.ops.iter().any(|op| matches!(op, Op::Text(_, t) if t == "updated")));

        r.clear();
        cycle(&mut g, &mut r, &[]);
        assert_eq!(r.paint_count(), 0);
    }

    #[test]
    fn test_page_switch_forces_full_repaint_of_current_and_global() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        g.add_page(SECOND, 4).unwrap();
        g.add_page(OVERLAY, 4).unwrap();
        g.set_global_page(Some(OVERLAY)).unwrap();

        g.page_mut(SECOND)
            .unwrap()
            .create_element(ElemId(1), ElementKind::Box, rect(0, 0, 20, 20), ElementColors::default())
            .unwrap();
        g.page_mut(SECOND)
            .unwrap()
            .create_element(ElemId(2), ElementKind::Box, rect(30, 0, 20, 20), ElementColors::default())
            .unwrap();
        g.page_mut(OVERLAY)
            .unwrap()
            .create_element(ElemId(1), ElementKind::Box, rect(300, 0, 20, 20), ElementColors::default())
            .unwrap();

        // Drain the initial paint.
        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[]);
        r.clear();

        // Nothing was individually mutated, yet every element of the new
        // current page and the global page repaints.
        g.set_current_page(SECOND).unwrap();
        cycle(&mut g, &mut r, &[]);
        let fills = r
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Fill(_, _)))
            .count();
        // 2 on SECOND + 1 on OVERLAY (frames draw too, fills are enough
        // to count the boxes).
        assert!(fills >= 3, "expected at least 3 fills, got {:?}", r.ops);
    }

    #[test]
    fn test_background_painted_before_elements_on_full_redraw() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        g.page_mut(MAIN)
            .unwrap()
            .set_background(Background::Color(crate::ui::styling::BLACK));
        g.page_mut(MAIN)
            .unwrap()
            .create_element(ElemId(1), ElementKind::Box, rect(10, 10, 20, 20), ElementColors::default())
            .unwrap();

        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[]);

        let first_fill = r.ops.first().unwrap();
        assert!(
            matches!(first_fill, Op::Fill(rect, _) if *rect == g.display_bounds()),
            "background fill must come first, got {:?}",
            first_fill
        );
    }

    #[test]
    fn test_overlay_background_never_erases_current_page() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        g.add_page(OVERLAY, 4).unwrap();
        g.page_mut(MAIN)
            .unwrap()
            .set_background(Background::Color(crate::ui::styling::BLACK));
        g.page_mut(OVERLAY)
            .unwrap()
            .set_background(Background::Color(crate::ui::styling::GRAY));
        g.set_global_page(Some(OVERLAY)).unwrap();

        g.page_mut(MAIN)
            .unwrap()
            .create_element(ElemId(1), ElementKind::Box, rect(10, 10, 20, 20), ElementColors::default())
            .unwrap();
        g.page_mut(OVERLAY)
            .unwrap()
            .create_element(ElemId(1), ElementKind::Box, rect(0, 224, 320, 16), ElementColors::default())
            .unwrap();

        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[]);

        // Exactly one display-wide fill, and it opens the frame. The
        // overlay's colored background must not repaint the display after
        // the current page's elements.
        let wide: StdVec<usize> = r
            .ops
            .iter()
            .enumerate()
            .filter(|(_, op)| matches!(op, Op::Fill(rect, _) if *rect == g.display_bounds()))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(wide, [0], "ops: {:?}", r.ops);

        let box_rect = rect(10, 10, 20, 20);
        let bar_rect = rect(0, 224, 320, 16);
        let box_fill = r
            .ops
            .iter()
            .position(|op| matches!(op, Op::Fill(rect, _) if *rect == box_rect))
            .expect("current-page box painted");
        let bar_fill = r
            .ops
            .iter()
            .position(|op| matches!(op, Op::Fill(rect, _) if *rect == bar_rect))
            .expect("overlay bar painted");
        assert!(box_fill < bar_fill, "overlay draws after the current page");
    }

    #[test]
    fn test_invisible_dirty_element_is_skipped_and_settles() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        let eref = g
            .page_mut(MAIN)
            .unwrap()
            .create_element(ElemId(1), ElementKind::Box, rect(10, 10, 20, 20), ElementColors::default())
            .unwrap();
        g.with_element(eref, |el| el.set_visible(false));

        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[]);
        assert_eq!(r.paint_count(), 0);
        assert_eq!(g.element(eref).unwrap().redraw(), Redraw::None);
    }

    // -- touch tracking -----------------------------------------------------

    #[test]
    fn test_press_miss_while_idle_is_no_op() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();

        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[press(5, 5), release(5, 5)]);
        assert_eq!(g.tracked_element(), None);
    }

    #[test]
    fn test_hit_test_priority_later_created_wins() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        let (_a, events_a) = probe(&mut g, MAIN, rect(0, 0, 100, 100));
        let (b, events_b) = probe(&mut g, MAIN, rect(50, 50, 100, 100));

        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[press(60, 60)]);

        assert_eq!(g.tracked_element(), Some(b));
        assert!(events_a.borrow().is_empty());
        assert_eq!(events_b.borrow().len(), 1);
    }

    #[test]
    fn test_global_page_elements_are_hit_after_current() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        g.add_page(OVERLAY, 4).unwrap();
        g.set_global_page(Some(OVERLAY)).unwrap();
        let (on_overlay, events) = probe(&mut g, OVERLAY, rect(200, 0, 50, 20));

        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[press(210, 10)]);

        assert_eq!(g.tracked_element(), Some(on_overlay));
        assert!(matches!(events.borrow()[0], TouchEvent::Down(_)));
    }

    #[test]
    fn test_drag_reentry_activates_exactly_once() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        let (eref, events) = probe(&mut g, MAIN, rect(160, 80, 80, 40));
        g.with_element(eref, |el| el.set_glow_enabled(true));

        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[press(170, 90)]);
        assert!(g.element(eref).unwrap().is_glowing());

        cycle(&mut g, &mut r, &[press(500, 500)]);
        assert!(!g.element(eref).unwrap().is_glowing());
        assert_eq!(g.tracked_element(), Some(eref), "tracking is retained");

        cycle(&mut g, &mut r, &[press(170, 90)]);
        assert!(g.element(eref).unwrap().is_glowing());

        cycle(&mut g, &mut r, &[release(170, 90)]);
        assert!(!g.element(eref).unwrap().is_glowing());
        assert_eq!(g.tracked_element(), None);

        let events = events.borrow();
        let ups: StdVec<_> = events
            .iter()
            .filter(|e| matches!(e, TouchEvent::UpInside(_)))
            .collect();
        assert_eq!(ups.len(), 1, "exactly one activation: {:?}", events);
        assert!(matches!(events[0], TouchEvent::Down(_)));
        assert!(matches!(events[1], TouchEvent::Move { inside: false, .. }));
        assert!(matches!(events[2], TouchEvent::Move { inside: true, .. }));
    }

    #[test]
    fn test_up_outside_does_not_activate() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        let (eref, events) = probe(&mut g, MAIN, rect(0, 0, 50, 50));
        g.with_element(eref, |el| el.set_action(Some(Action::Custom(7))));

        let mut touch = ScriptTouch::new();
        touch.push(press(10, 10));
        touch.push(release(200, 200));

        let mut r = RecordingRenderer::new();
        assert_eq!(g.update(&mut r, &mut touch).unwrap(), None);
        assert_eq!(g.update(&mut r, &mut touch).unwrap(), None);
        assert!(
            events
                .borrow()
                .iter()
                .any(|e| matches!(e, TouchEvent::UpOutside(_)))
        );
    }

    #[test]
    fn test_activation_fires_element_action() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        let eref = g
            .page_mut(MAIN)
            .unwrap()
            .create_element(ElemId(1), ElementKind::TextButton, rect(0, 0, 50, 50), ElementColors::button())
            .unwrap();
        g.with_element(eref, |el| el.set_action(Some(Action::Custom(7))));

        let mut touch = ScriptTouch::new();
        touch.push(press(10, 10));
        touch.push(release(10, 10));

        let mut r = RecordingRenderer::new();
        assert_eq!(g.update(&mut r, &mut touch).unwrap(), None);
        assert_eq!(
            g.update(&mut r, &mut touch).unwrap(),
            Some(Action::Custom(7))
        );
    }

    #[test]
    fn test_navigate_action_switches_page() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        g.add_page(SECOND, 4).unwrap();
        let eref = g
            .page_mut(MAIN)
            .unwrap()
            .create_element(ElemId(1), ElementKind::TextButton, rect(0, 0, 50, 50), ElementColors::button())
            .unwrap();
        g.with_element(eref, |el| el.set_action(Some(Action::Navigate(SECOND))));

        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[press(10, 10), release(10, 10)]);
        assert_eq!(g.current_page(), Some(SECOND));
    }

    #[test]
    fn test_tracked_element_hidden_mid_press_aborts_gracefully() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        let (eref, events) = probe(&mut g, MAIN, rect(0, 0, 50, 50));

        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[press(10, 10)]);
        assert_eq!(g.tracked_element(), Some(eref));

        g.with_element(eref, |el| el.set_clickable(false));
        cycle(&mut g, &mut r, &[press(12, 12)]);
        assert_eq!(g.tracked_element(), None, "tracking aborted to idle");

        // The element never saw a Move or an Up.
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_page_switch_mid_press_aborts_tracking() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        g.add_page(SECOND, 4).unwrap();
        let (eref, _) = probe(&mut g, MAIN, rect(0, 0, 50, 50));

        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[press(10, 10)]);
        assert_eq!(g.tracked_element(), Some(eref));

        g.set_current_page(SECOND).unwrap();
        assert_eq!(g.tracked_element(), None);
    }

    // -- group exclusivity --------------------------------------------------

    #[test]
    fn test_group_exclusivity_leaves_exactly_one_selected() {
        let mut g = gui();
        g.add_page(MAIN, 8).unwrap();

        let mut radios = StdVec::new();
        for i in 0..3u16 {
            let events = Rc::new(RefCell::new(StdVec::new()));
            let widget = Probe {
                events,
                exclusive: true,
            };
            let eref = g
                .page_mut(MAIN)
                .unwrap()
                .create_extended(
                    ElemId::AUTO,
                    rect(10, 10 + 30 * i as i32, 40, 20),
                    ElementColors::button(),
                    Box::new(widget),
                )
                .unwrap();
            g.with_element(eref, |el| el.set_group(Some(1)));
            radios.push(eref);
        }

        // Arbitrary prior state: first and third selected.
        g.with_element(radios[0], |el| el.set_selected(true));
        g.with_element(radios[2], |el| el.set_selected(true));

        // Activate the middle one.
        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[press(20, 50), release(20, 50)]);

        let selected: StdVec<bool> = radios
            .iter()
            .map(|eref| g.element(*eref).unwrap().is_selected())
            .collect();
        assert_eq!(selected, [false, true, false]);
    }

    // -- ticks --------------------------------------------------------------

    #[test]
    fn test_tick_runs_every_cycle_and_may_mark_dirty() {
        struct Blinker {
            ticks: u32,
        }

        impl Widget for Blinker {
            fn draw(
                &mut self,
                base: &mut ElementBase,
                _renderer: &mut dyn Renderer,
                _fonts: &FontTable,
                _reason: Redraw,
            ) -> Result<(), RenderError> {
                base.clear_redraw();
                Ok(())
            }

            fn tick(&mut self, base: &mut ElementBase) {
                self.ticks += 1;
                if self.ticks % 2 == 0 {
                    base.mark_dirty();
                }
            }
        }

        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        let eref = g
            .page_mut(MAIN)
            .unwrap()
            .create_extended(
                ElemId::AUTO,
                rect(0, 0, 10, 10),
                ElementColors::default(),
                Box::new(Blinker { ticks: 0 }),
            )
            .unwrap();

        let mut r = RecordingRenderer::new();
        cycle(&mut g, &mut r, &[]); // settles initial paint (tick 1)
        assert_eq!(g.element(eref).unwrap().redraw(), Redraw::None);

        cycle(&mut g, &mut r, &[]); // tick 2 marks dirty, draw clears
        assert_eq!(g.element(eref).unwrap().redraw(), Redraw::None);
    }

    // -- stale handles ------------------------------------------------------

    #[test]
    fn test_detached_and_stale_refs_are_no_ops() {
        let mut g = gui();
        g.add_page(MAIN, 2).unwrap();

        assert!(g.with_element(ElementRef::detached(), |_| ()).is_none());

        let stale = ElementRef::new(MAIN, 5);
        assert!(g.element(stale).is_none());
        assert!(g.with_element(stale, |_| ()).is_none());

        let other_page = ElementRef::new(SECOND, 0);
        assert!(g.element(other_page).is_none());
    }

    // -- end-to-end scenario ------------------------------------------------

    #[test]
    fn test_example_scenario_box_and_button() {
        let mut g = gui();
        g.add_page(MAIN, 4).unwrap();
        g.page_mut(MAIN)
            .unwrap()
            .create_element(ElemId(1), ElementKind::Box, rect(10, 50, 300, 150), ElementColors::default())
            .unwrap();
        let (btn, events) = probe(&mut g, MAIN, rect(160, 80, 80, 40));
        g.with_element(btn, |el| el.set_glow_enabled(true));

        let mut r = RecordingRenderer::new();

        cycle(&mut g, &mut r, &[press(170, 90)]);
        assert_eq!(g.tracked_element(), Some(btn));
        assert!(g.element(btn).unwrap().is_glowing());

        cycle(&mut g, &mut r, &[press(500, 500)]);
        assert!(!g.element(btn).unwrap().is_glowing());
        assert_eq!(g.tracked_element(), Some(btn));

        cycle(&mut g, &mut r, &[press(170, 90)]);
        assert!(g.element(btn).unwrap().is_glowing());

        cycle(&mut g, &mut r, &[release(170, 90)]);
        assert!(!g.element(btn).unwrap().is_glowing());
        assert_eq!(g.tracked_element(), None);

        let ups = events
            .borrow()
            .iter()
            .filter(|e| matches!(e, TouchEvent::UpInside(_)))
            .count();
        assert_eq!(ups, 1);
    }
}
