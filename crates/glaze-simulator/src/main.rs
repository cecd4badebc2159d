//! Desktop simulator demo for the glaze GUI toolkit.
//!
//! Renders a small two-page UI in an SDL2 window via
//! `embedded-graphics-simulator` and forwards mouse input as touch
//! samples, so the toolkit can be exercised without hardware.
//!
//! # Key bindings
//!
//! | Key | Action        |
//! |-----|---------------|
//! | 1   | Home page     |
//! | 2   | Settings page |
//! | Q   | Quit          |
//!
//! Mouse press/drag/release maps to touch down/move/up.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info};

use glaze_core::ui::styling::{self, ElementColors};
use glaze_core::widgets::{Checkbox, Slider};
use glaze_core::{
    Action, Background, EgRenderer, ElemId, ElementKind, FontId, Gui, PageId,
    TouchSample, TouchSource, UiError,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH: u32 = 320;
const DISPLAY_HEIGHT: u32 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

// Page ids
const PAGE_HOME: PageId = PageId(0);
const PAGE_SETTINGS: PageId = PageId(1);
const PAGE_STATUS: PageId = PageId(2);

// Element ids the loop needs quick access to
const ELEM_SLIDER: ElemId = ElemId(10);
const ELEM_READOUT: ElemId = ElemId(11);
const ELEM_STATUS_TEXT: ElemId = ElemId(20);
const ELEM_OVERLAY_TOGGLE: ElemId = ElemId(30);

// Fonts
const FONT_LARGE: FontId = FontId(1);

// Custom actions
const ACTION_TOGGLE_OVERLAY: u16 = 1;

// ---------------------------------------------------------------------------
// Touch forwarding
// ---------------------------------------------------------------------------

/// Queues SDL mouse events as touch samples, one per poll.
#[derive(Default)]
struct MouseTouch {
    queue: VecDeque<TouchSample>,
    held: bool,
}

impl MouseTouch {
    fn push_down(&mut self, point: Point) {
        self.held = true;
        self.queue.push_back(TouchSample::new(point.x, point.y, true));
    }

    fn push_move(&mut self, point: Point) {
        if self.held {
            self.queue.push_back(TouchSample::new(point.x, point.y, true));
        }
    }

    fn push_up(&mut self, point: Point) {
        self.held = false;
        self.queue.push_back(TouchSample::new(point.x, point.y, false));
    }
}

impl TouchSource for MouseTouch {
    fn poll(&mut self) -> Option<TouchSample> {
        self.queue.pop_front()
    }
}

// ---------------------------------------------------------------------------
// UI construction
// ---------------------------------------------------------------------------

fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(w, h))
}

/// Build the demo UI: home and settings pages plus a status-bar overlay.
fn build_ui() -> Result<Gui, UiError> {
    let mut gui = Gui::new(rect(0, 0, DISPLAY_WIDTH, DISPLAY_HEIGHT));
    gui.load_font(FONT_LARGE, &FONT_10X20)?;

    // --- Home page ---------------------------------------------------------
    gui.add_page(PAGE_HOME, 12)?;
    {
        let page = gui.page_mut(PAGE_HOME).expect("page just added");
        page.set_background(Background::Color(styling::BLACK));

        let title = page.create_element(
            ElemId::AUTO,
            ElementKind::Text,
            rect(10, 8, 300, 24),
            ElementColors::new(styling::WHITE, styling::BLACK, styling::BLACK),
        )?;
        if let Some(el) = page.get_mut(title) {
            el.set_text("glaze demo");
            el.set_font(FONT_LARGE);
            el.set_text_align(Alignment::Left);
        }

        // Panel behind the radio group
        page.create_element(
            ElemId::AUTO,
            ElementKind::Box,
            rect(10, 40, 140, 110),
            ElementColors::surface(),
        )?;

        for i in 0..3 {
            Checkbox::attach_radio(
                page,
                ElemId::AUTO,
                rect(20, 50 + 32 * i, 20, 20),
                ElementColors::button(),
                1,
            )?;
        }

        Slider::attach(
            page,
            ELEM_SLIDER,
            rect(170, 60, 140, 24),
            ElementColors::button(),
            0,
            100,
            50,
        )?;

        page.create_element(
            ELEM_READOUT,
            ElementKind::Text,
            rect(170, 92, 140, 16),
            ElementColors::new(styling::LIGHT_GRAY, styling::BLACK, styling::BLACK),
        )?;

        let settings = page.create_element(
            ElemId::AUTO,
            ElementKind::TextButton,
            rect(200, 190, 110, 36),
            ElementColors::button(),
        )?;
        if let Some(el) = page.get_mut(settings) {
            el.set_text("Settings");
            el.set_action(Some(Action::Navigate(PAGE_SETTINGS)));
        }
    }

    // --- Settings page -----------------------------------------------------
    gui.add_page(PAGE_SETTINGS, 8)?;
    {
        let page = gui.page_mut(PAGE_SETTINGS).expect("page just added");
        page.set_background(Background::Color(styling::SURFACE_DARK));

        let toggle = Checkbox::attach(
            page,
            ELEM_OVERLAY_TOGGLE,
            rect(20, 60, 20, 20),
            ElementColors::button(),
        )?;
        if let Some(el) = page.get_mut(toggle) {
            el.set_action(Some(Action::Custom(ACTION_TOGGLE_OVERLAY)));
        }

        let label = page.create_element(
            ElemId::AUTO,
            ElementKind::Text,
            rect(50, 60, 200, 20),
            ElementColors::new(styling::WHITE, styling::SURFACE_DARK, styling::SURFACE_DARK),
        )?;
        if let Some(el) = page.get_mut(label) {
            el.set_text("Show status bar");
            el.set_text_align(Alignment::Left);
        }

        let back = page.create_element(
            ElemId::AUTO,
            ElementKind::TextButton,
            rect(200, 190, 110, 36),
            ElementColors::button(),
        )?;
        if let Some(el) = page.get_mut(back) {
            el.set_text("Back");
            el.set_action(Some(Action::Navigate(PAGE_HOME)));
        }
    }

    // --- Status-bar overlay ------------------------------------------------
    gui.add_page(PAGE_STATUS, 2)?;
    {
        let page = gui.page_mut(PAGE_STATUS).expect("page just added");
        page.create_element(
            ElemId::AUTO,
            ElementKind::Box,
            rect(0, 224, DISPLAY_WIDTH, 16),
            ElementColors::new(styling::GRAY, styling::DARK_GRAY, styling::DARK_GRAY),
        )?;
        let status = page.create_element(
            ELEM_STATUS_TEXT,
            ElementKind::Text,
            rect(4, 224, DISPLAY_WIDTH - 8, 16),
            ElementColors::new(styling::LIGHT_GRAY, styling::DARK_GRAY, styling::DARK_GRAY),
        )?;
        if let Some(el) = page.get_mut(status) {
            el.set_text_align(Alignment::Left);
        }
    }

    Ok(gui)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting glaze simulator");
    info!(
        "Display: {}x{} (scale {}x)  Keys: 1=Home  2=Settings  Q=Quit",
        DISPLAY_WIDTH, DISPLAY_HEIGHT, WINDOW_SCALE
    );

    let mut gui = match build_ui() {
        Ok(gui) => gui,
        Err(err) => {
            error!("UI construction failed: {}", err);
            std::process::exit(1);
        }
    };

    // Quick-access handles for the loop.
    let slider = gui.find_element(PAGE_HOME, ELEM_SLIDER);
    let readout = gui.find_element(PAGE_HOME, ELEM_READOUT);
    let status_text = gui.find_element(PAGE_STATUS, ELEM_STATUS_TEXT);
    let overlay_toggle = gui.find_element(PAGE_SETTINGS, ELEM_OVERLAY_TOGGLE);

    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("glaze simulator", &output_settings);

    let mut touch = MouseTouch::default();
    let mut overlay_shown = false;
    let mut frames: u64 = 0;

    // The SDL window is lazily initialized on the first `update()` call;
    // run one frame before polling events.
    run_frame(&mut gui, &mut display, &mut touch);
    window.update(&display);

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,
                    Keycode::Num1 | Keycode::Kp1 => {
                        let _ = gui.set_current_page(PAGE_HOME);
                    }
                    Keycode::Num2 | Keycode::Kp2 => {
                        let _ = gui.set_current_page(PAGE_SETTINGS);
                    }
                    _ => {}
                },

                SimulatorEvent::MouseButtonDown { point, .. } => touch.push_down(point),
                SimulatorEvent::MouseMove { point } => touch.push_move(point),
                SimulatorEvent::MouseButtonUp { point, .. } => touch.push_up(point),

                _ => {}
            }
        }

        // Drain all queued samples, one per update cycle.
        loop {
            let action = run_frame(&mut gui, &mut display, &mut touch);
            if let Some(action) = action {
                info!("action: {:?}", action);
                if action == Action::Custom(ACTION_TOGGLE_OVERLAY) {
                    let selected = overlay_toggle
                        .and_then(|eref| gui.element(eref))
                        .map(|el| el.is_selected())
                        .unwrap_or(false);
                    if selected != overlay_shown {
                        overlay_shown = selected;
                        let target = overlay_shown.then_some(PAGE_STATUS);
                        if let Err(err) = gui.set_global_page(target) {
                            error!("overlay toggle failed: {}", err);
                        }
                    }
                }
            }
            if touch.queue.is_empty() {
                break;
            }
        }

        // Refresh the readout and status bar from the slider position.
        frames += 1;
        if frames % 10 == 0 {
            let value = slider
                .and_then(|eref| gui.element(eref))
                .and_then(|el| el.value());
            if let (Some(value), Some(readout)) = (value, readout) {
                gui.with_element(readout, |el| {
                    el.set_text(&format!("value: {}", value));
                });
            }
            if let (Some(value), Some(status_text)) = (value, status_text) {
                gui.with_element(status_text, |el| {
                    el.set_text(&format!("glaze  |  slider {}", value));
                });
            }
        }

        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}

/// One update cycle against the SDL display.
fn run_frame(
    gui: &mut Gui,
    display: &mut SimulatorDisplay<Rgb565>,
    touch: &mut MouseTouch,
) -> Option<Action> {
    let mut renderer = EgRenderer::new(display);
    match gui.update(&mut renderer, touch) {
        Ok(action) => action,
        Err(err) => {
            error!("update failed: {}", err);
            None
        }
    }
}
