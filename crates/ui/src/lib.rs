use fltk::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

use editor_core::enums::ArrowKey;
use editor_state::session::Session;
use layout::font::{FONT_SIZE_OPTIONS, FontFamily};
use layout::geometry::{BORDER_WIDTH, MARGIN, Point, TOOLBAR_HEIGHT, TOP_MARGIN, TOP_MARGIN_VALUE};
use layout::gesture::{DragTransition, PointerButton};
use renderer::fltk_backend::FontFaces;
use tracing::{debug, info, warn};

const BLINK_SECS: f64 = 0.5;
const FLUSH_SECS: f64 = 2.0;
/// Pixels scrolled per wheel notch.
const WHEEL_STEP: f64 = 40.0;

const FAMILIES: [FontFamily; 2] = [FontFamily::Default, FontFamily::Handwriting];

// ==========================================
// 1. STATE
// ==========================================
pub struct State {
    pub session: Session,
    pub faces: FontFaces,
    pub caret_on: bool,
    pub last_interaction: std::time::Instant,
}

impl State {
    fn touch(&mut self) {
        self.caret_on = true;
        self.last_interaction = std::time::Instant::now();
    }
}

// ==========================================
// 2. MAIN COMPONENT API
// ==========================================
#[derive(Clone)]
pub struct Toolbar {
    pub row: fltk::group::Flex,
    pub font_type: fltk::menu::Choice,
    pub font_size: fltk::menu::Choice,
    pub clear: fltk::button::Button,
    pub load: fltk::button::Button,
    pub save: fltk::button::Button,
    pub angle: fltk::valuator::HorNiceSlider,
    pub angle_label: fltk::frame::Frame,
}

pub struct TextEditor {
    pub toolbar: Toolbar,
    pub canvas: fltk::widget::Widget,
    pub state: Rc<RefCell<State>>,
}

impl TextEditor {
    /// Builds the toolbar and canvas inside `window`, which must be the
    /// current group.
    pub fn new(window: &mut fltk::window::Window, session: Session, faces: FontFaces) -> Self {
        let state = Rc::new(RefCell::new(State {
            session,
            faces,
            caret_on: true,
            last_interaction: std::time::Instant::now(),
        }));

        let mut toolbar = Self::build_toolbar(window.width());

        let mut canvas = fltk::widget::Widget::default()
            .with_pos(MARGIN, TOP_MARGIN)
            .with_size(window.width() - 2 * MARGIN, window.height() - TOP_MARGIN - MARGIN);

        window.resizable(&canvas);

        LayoutSync::apply_to_toolbar(&state.borrow(), &mut toolbar);
        Renderer::wire(&mut canvas, state.clone());
        Controller::wire(window, &mut canvas, &mut toolbar, state.clone());

        Self {
            toolbar,
            canvas,
            state,
        }
    }

    /// Writes pending preference changes. Call once more on exit.
    pub fn flush(&self) {
        if let Err(error) = self.state.borrow_mut().session.flush_preferences() {
            warn!(%error, "failed to write preferences");
        }
    }

    fn build_toolbar(window_width: i32) -> Toolbar {
        let mut row = fltk::group::Flex::default()
            .with_pos(MARGIN, TOP_MARGIN_VALUE)
            .with_size(window_width - 2 * MARGIN, TOOLBAR_HEIGHT)
            .row();
        row.set_pad(8);

        let mut font_type = fltk::menu::Choice::default();
        for family in FAMILIES {
            font_type.add_choice(family.label());
        }
        row.fixed(&font_type, 130);

        let mut font_size = fltk::menu::Choice::default();
        for size in FONT_SIZE_OPTIONS {
            font_size.add_choice(&format!("{size}px"));
        }
        row.fixed(&font_size, 80);

        let clear = fltk::button::Button::default().with_label("Clear");
        row.fixed(&clear, 70);
        let load = fltk::button::Button::default().with_label("Load");
        row.fixed(&load, 70);
        let save = fltk::button::Button::default().with_label("Save");
        row.fixed(&save, 70);

        let mut angle = fltk::valuator::HorNiceSlider::default();
        angle.set_bounds(0.0, 90.0);
        angle.set_step(1.0, 1);
        row.fixed(&angle, 180);

        let angle_label = fltk::frame::Frame::default();
        row.fixed(&angle_label, 90);

        // Spacer
        fltk::frame::Frame::default();

        row.end();

        Toolbar {
            row,
            font_type,
            font_size,
            clear,
            load,
            save,
            angle,
            angle_label,
        }
    }
}

// ==========================================
// 3. TOOLBAR SYNC
// ==========================================
struct LayoutSync;

impl LayoutSync {
    /// Mirrors session state into the toolbar widgets.
    fn apply_to_toolbar(be: &State, toolbar: &mut Toolbar) {
        let font = be.session.font();

        if let Some(idx) = FAMILIES.iter().position(|family| *family == font.family) {
            toolbar.font_type.set_value(idx as i32);
        }

        if let Some(idx) = FONT_SIZE_OPTIONS
            .iter()
            .position(|size| f64::from(*size) == font.size)
        {
            toolbar.font_size.set_value(idx as i32);
        }

        toolbar.angle.set_value(font.angle_degrees);
        toolbar
            .angle_label
            .set_label(&format!("Angle: {}°", font.angle_degrees.round()));

        if be.session.can_save() {
            toolbar.save.activate();
        } else {
            toolbar.save.deactivate();
        }
    }
}

// ==========================================
// 4. RENDERER (View)
// ==========================================
struct Renderer;

impl Renderer {
    fn wire(canvas: &mut fltk::widget::Widget, state: Rc<RefCell<State>>) {
        canvas.draw({
            let state = state.clone();
            move |w| {
                let be = state.borrow();
                Self::draw_border(w);

                fltk::draw::push_clip(
                    w.x() + BORDER_WIDTH,
                    w.y() + BORDER_WIDTH,
                    w.width() - 2 * BORDER_WIDTH,
                    w.height() - 2 * BORDER_WIDTH,
                );

                let font = be.session.font();
                let frame = renderer::paint::Frame {
                    layout: be.session.layout(),
                    font: &font,
                    viewport: be.session.viewport(),
                    scrollbars: be.session.scrollbars(),
                    caret_on: be.caret_on,
                };
                let mut surface = renderer::fltk_backend::FltkCanvas::new(
                    w.x() + BORDER_WIDTH,
                    w.y() + BORDER_WIDTH,
                    be.faces,
                );
                renderer::paint::paint(&frame, &mut surface);

                fltk::draw::pop_clip();
            }
        });

        let mut t_canvas = canvas.clone();
        fltk::app::add_timeout3(BLINK_SECS, move |handle| {
            if let Ok(mut be) = state.try_borrow_mut() {
                if be.last_interaction.elapsed().as_secs_f64() >= BLINK_SECS {
                    be.caret_on = !be.caret_on;
                    t_canvas.redraw();
                } else {
                    be.caret_on = true;
                }
            }
            fltk::app::repeat_timeout3(BLINK_SECS, handle);
        });
    }

    fn draw_border(w: &mut fltk::widget::Widget) {
        fltk::draw::draw_rect_with_color(
            w.x(),
            w.y(),
            w.width(),
            w.height(),
            fltk::enums::Color::from_rgb(204, 204, 204),
        );
    }
}

// ==========================================
// 5. CONTROLLER (Input & Events)
// ==========================================
struct Controller;

impl Controller {
    fn wire(
        window: &mut fltk::window::Window,
        canvas: &mut fltk::widget::Widget,
        toolbar: &mut Toolbar,
        state: Rc<RefCell<State>>,
    ) {
        Self::wire_toolbar(canvas, toolbar, &state);

        window.resize_callback({
            let state = state.clone();
            move |_, _, _, w, h| {
                let viewport = layout::geometry::canvas_dimensions(w, h);
                debug!(?viewport, "window resized");
                state.borrow_mut().session.resize(viewport);
            }
        });

        fltk::app::add_timeout3(FLUSH_SECS, {
            let state = state.clone();
            move |handle| {
                if let Ok(mut be) = state.try_borrow_mut()
                    && let Err(error) = be.session.flush_preferences()
                {
                    warn!(%error, "failed to write preferences");
                }
                fltk::app::repeat_timeout3(FLUSH_SECS, handle);
            }
        });

        let st = state.clone();
        let mut tb = toolbar.clone();

        canvas.handle(move |c, ev| match ev {
            fltk::enums::Event::Enter => {
                if !st.borrow().session.is_dragging()
                    && let Some(mut w) = c.window()
                {
                    w.set_cursor(fltk::enums::Cursor::Insert);
                }
                true
            }
            fltk::enums::Event::Leave => {
                if !st.borrow().session.is_dragging()
                    && let Some(mut w) = c.window()
                {
                    w.set_cursor(fltk::enums::Cursor::Default);
                }
                true
            }
            fltk::enums::Event::Push => Self::on_push(c, &mut st.borrow_mut()),
            fltk::enums::Event::Drag => Self::on_drag(c, &mut st.borrow_mut()),
            fltk::enums::Event::Released => Self::on_release(c, &mut st.borrow_mut()),
            fltk::enums::Event::MouseWheel => Self::on_mouse_wheel(c, &mut st.borrow_mut()),
            fltk::enums::Event::KeyDown => Self::on_keydown(c, &mut st.borrow_mut(), &mut tb),
            fltk::enums::Event::Paste => Self::on_paste(c, &mut st.borrow_mut(), &mut tb),
            fltk::enums::Event::Unfocus | fltk::enums::Event::Hide => {
                Self::on_cancel(c, &mut st.borrow_mut());
                true
            }
            fltk::enums::Event::Focus => true,
            _ => false,
        });
    }

    fn wire_toolbar(canvas: &fltk::widget::Widget, toolbar: &mut Toolbar, state: &Rc<RefCell<State>>) {
        toolbar.font_type.set_callback({
            let state = state.clone();
            let mut c = canvas.clone();
            move |choice| {
                let Some(family) = usize::try_from(choice.value())
                    .ok()
                    .and_then(|idx| FAMILIES.get(idx))
                else {
                    return;
                };
                state.borrow_mut().session.set_font_family(*family);
                c.redraw();
            }
        });

        toolbar.font_size.set_callback({
            let state = state.clone();
            let mut c = canvas.clone();
            move |choice| {
                let Some(size) = usize::try_from(choice.value())
                    .ok()
                    .and_then(|idx| FONT_SIZE_OPTIONS.get(idx))
                else {
                    return;
                };
                state.borrow_mut().session.set_font_size(f64::from(*size));
                c.redraw();
            }
        });

        toolbar.angle.set_callback({
            let state = state.clone();
            let mut c = canvas.clone();
            let mut tb = toolbar.clone();
            move |slider| {
                let mut be = state.borrow_mut();
                be.session.set_angle(slider.value());
                LayoutSync::apply_to_toolbar(&be, &mut tb);
                c.redraw();
            }
        });

        toolbar.clear.set_callback({
            let state = state.clone();
            let mut c = canvas.clone();
            let mut tb = toolbar.clone();
            move |_| {
                let mut be = state.borrow_mut();
                be.session.clear();
                Self::refresh(&mut be, &mut c, &mut tb);
            }
        });

        toolbar.load.set_callback({
            let state = state.clone();
            let mut c = canvas.clone();
            let mut tb = toolbar.clone();
            move |_| Self::on_load(&state, &mut c, &mut tb)
        });

        toolbar.save.set_callback({
            let state = state.clone();
            let mut tb = toolbar.clone();
            let mut c = canvas.clone();
            move |_| Self::on_save(&state, &mut c, &mut tb)
        });
    }

    // --- Utility Input Math ---

    fn mouse_to_canvas(c: &fltk::widget::Widget) -> Point {
        Point::new(
            f64::from(fltk::app::event_x() - c.x() - BORDER_WIDTH),
            f64::from(fltk::app::event_y() - c.y() - BORDER_WIDTH),
        )
    }

    fn pointer_button() -> Option<PointerButton> {
        match fltk::app::event_mouse_button() {
            fltk::app::MouseButton::Left => Some(PointerButton::Primary),
            fltk::app::MouseButton::Middle => Some(PointerButton::Middle),
            fltk::app::MouseButton::Right => Some(PointerButton::Secondary),
            _ => None,
        }
    }

    fn arrow_key(key: fltk::enums::Key) -> Option<ArrowKey> {
        match key {
            fltk::enums::Key::Up => Some(ArrowKey::Up),
            fltk::enums::Key::Down => Some(ArrowKey::Down),
            fltk::enums::Key::Left => Some(ArrowKey::Left),
            fltk::enums::Key::Right => Some(ArrowKey::Right),
            _ => None,
        }
    }

    fn apply_transition(c: &fltk::widget::Widget, transition: Option<DragTransition>) {
        let cursor = match transition {
            Some(DragTransition::Attach) => fltk::enums::Cursor::Move,
            Some(DragTransition::Detach) => fltk::enums::Cursor::Insert,
            None => return,
        };

        if let Some(mut w) = c.window() {
            w.set_cursor(cursor);
        }
    }

    // --- Event Handlers ---

    fn on_push(c: &mut fltk::widget::Widget, be: &mut State) -> bool {
        if let Err(error) = c.take_focus() {
            debug!(%error, "canvas refused focus");
        }

        let Some(button) = Self::pointer_button() else {
            return false;
        };

        let transition = be.session.press(button, Self::mouse_to_canvas(c));
        Self::apply_transition(c, transition);
        be.touch();

        true
    }

    fn on_drag(c: &mut fltk::widget::Widget, be: &mut State) -> bool {
        if be.session.drag_to(Self::mouse_to_canvas(c)) {
            c.redraw();
        }
        true
    }

    fn on_release(c: &mut fltk::widget::Widget, be: &mut State) -> bool {
        let transition = be.session.release(Self::mouse_to_canvas(c));
        Self::apply_transition(c, transition);
        be.touch();
        c.redraw();
        true
    }

    fn on_cancel(c: &mut fltk::widget::Widget, be: &mut State) {
        let transition = be.session.cancel_drag();
        if transition.is_some() {
            debug!("drag cancelled");
        }
        Self::apply_transition(c, transition);
    }

    fn on_mouse_wheel(c: &mut fltk::widget::Widget, be: &mut State) -> bool {
        let dy = fltk::app::event_dy_value();
        if dy == 0 {
            return false;
        }

        be.session.wheel(f64::from(dy) * WHEEL_STEP);
        be.touch();
        c.redraw();

        true
    }

    fn on_keydown(c: &mut fltk::widget::Widget, be: &mut State, tb: &mut Toolbar) -> bool {
        let key = fltk::app::event_key();
        let state = fltk::app::event_state();
        let shift = state.contains(fltk::enums::EventState::Shift);

        if state.contains(fltk::enums::EventState::Ctrl) || state.contains(fltk::enums::EventState::Command) {
            return Self::on_shortcut(c, be, tb, key);
        }

        if let Some(arrow) = Self::arrow_key(key) {
            be.session.arrow(arrow, shift);
            Self::refresh(be, c, tb);
            return true;
        }

        let result = match key {
            fltk::enums::Key::BackSpace => be.session.backspace(),
            fltk::enums::Key::Delete => be.session.delete_forward(),
            fltk::enums::Key::Enter | fltk::enums::Key::KPEnter => be.session.insert_text("\n"),
            _ => {
                let text = fltk::app::event_text();
                if text.is_empty() || text.chars().any(char::is_control) {
                    return false;
                }
                be.session.insert_text(&text)
            }
        };

        if let Err(error) = result {
            warn!(%error, ?key, "edit failed");
        }

        Self::refresh(be, c, tb);
        true
    }

    fn on_shortcut(
        c: &mut fltk::widget::Widget,
        be: &mut State,
        tb: &mut Toolbar,
        key: fltk::enums::Key,
    ) -> bool {
        if key == fltk::enums::Key::from_char('v') {
            fltk::app::paste(c);
            return true;
        }

        let cut = key == fltk::enums::Key::from_char('x');
        if !cut && key != fltk::enums::Key::from_char('c') {
            return false;
        }

        let selected = be.session.selected_text();
        if selected.is_empty() {
            return true;
        }
        fltk::app::copy(selected);

        if cut {
            if let Err(error) = be.session.backspace() {
                warn!(%error, "cut failed");
            }
            Self::refresh(be, c, tb);
        }

        true
    }

    fn on_paste(c: &mut fltk::widget::Widget, be: &mut State, tb: &mut Toolbar) -> bool {
        let text = fltk::app::event_text();
        if text.is_empty() {
            return false;
        }

        if let Err(error) = be.session.insert_text(&text.replace("\r\n", "\n")) {
            warn!(%error, "paste failed");
        }

        Self::refresh(be, c, tb);
        true
    }

    fn on_load(state: &Rc<RefCell<State>>, c: &mut fltk::widget::Widget, tb: &mut Toolbar) {
        let mut chooser =
            fltk::dialog::NativeFileChooser::new(fltk::dialog::NativeFileChooserType::BrowseFile);
        chooser.set_filter("Text\t*.{txt,md}");
        chooser.show();

        let path = chooser.filename();
        if path.as_os_str().is_empty() {
            return;
        }

        let result = state.borrow_mut().session.load_file(&path, None);

        match result {
            Ok(()) => {
                info!(?path, "loaded");
                Self::refresh(&mut state.borrow_mut(), c, tb);
            }
            Err(error) => {
                warn!(%error, ?path, "load failed");
                fltk::dialog::alert_default(&error.to_string());
            }
        }
    }

    fn on_save(state: &Rc<RefCell<State>>, c: &mut fltk::widget::Widget, tb: &mut Toolbar) {
        let Some(dir) = dirs::download_dir().or_else(dirs::home_dir) else {
            fltk::dialog::alert_default("No download directory available");
            return;
        };

        let result = state.borrow_mut().session.save_file(&dir);

        match result {
            Ok(path) => info!(?path, "saved"),
            Err(error) => {
                warn!(%error, ?dir, "save failed");
                fltk::dialog::alert_default(&error.to_string());
            }
        }

        Self::refresh(&mut state.borrow_mut(), c, tb);
    }

    // --- UI Refresh Helpers ---

    fn refresh(be: &mut State, c: &mut fltk::widget::Widget, tb: &mut Toolbar) {
        be.touch();
        LayoutSync::apply_to_toolbar(be, tb);
        c.redraw();
    }
}
