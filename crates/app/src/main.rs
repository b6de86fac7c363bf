use fltk::prelude::{GroupExt, WidgetExt, WindowExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const WINDOW_WIDTH: i32 = 1024;
const WINDOW_HEIGHT: i32 = 720;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn,editor_state=info,ui=info,renderer=info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn open_preferences() -> editor_state::preferences::PreferencesStore {
    match editor_state::preferences::PreferencesStore::open_default() {
        Ok(store) => store,
        Err(error) => {
            warn!(%error, "preferences unavailable, nothing will persist");
            editor_state::preferences::PreferencesStore::in_memory()
        }
    }
}

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let app = fltk::app::App::default().load_system_fonts();
    let faces = renderer::fltk_backend::FontFaces::resolve();

    let mut win = fltk::window::Window::default()
        .with_size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .with_label("Slant Pad");
    win.size_range(320, 240, 0, 0);

    let session = editor_state::session::Session::new(
        open_preferences(),
        Box::new(renderer::fltk_backend::FltkMeasurer::new(faces)),
        layout::geometry::canvas_dimensions(WINDOW_WIDTH, WINDOW_HEIGHT),
    );
    let editor = ui::TextEditor::new(&mut win, session, faces);

    win.end();
    win.show();

    info!("editor ready");
    app.run()?;

    editor.flush();
    Ok(())
}
