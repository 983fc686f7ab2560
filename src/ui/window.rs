// Main window for the showcase
// GTK4 ApplicationWindow with the catalog card grid, the detail overlay and CSS

use gdk4::{Display, Key as GdkKey};
use gtk4::prelude::*;
use gtk4::{
    Align, Application, ApplicationWindow, Box as GtkBox, Button, CssProvider, EventControllerKey,
    FlowBox, Label, Orientation, Overlay, PolicyType, PropagationPhase, ScrolledWindow,
    SelectionMode, STYLE_PROVIDER_PRIORITY_APPLICATION,
};
use std::cell::RefCell;
use std::rc::Rc;

use super::viewer::OverlayView;
use crate::config::Config;
use crate::keybindings::{Key, PointerTarget};
use crate::models;
use crate::overlay::OverlayController;

type SharedController = Rc<RefCell<OverlayController<OverlayView>>>;

const CSS: &str = r#"
* {
    border-radius: 0;
    box-shadow: none;
    background-image: none;
}

window {
    background-color: #0a0a0a;
    color: #e0e0e0;
}

button {
    background-color: transparent;
    border: 1px solid #333333;
    color: #e0e0e0;
}

button:hover {
    background-color: rgba(224, 224, 224, 0.05);
    border-color: #555555;
}

.entry-card {
    background-color: #121212;
    padding: 16px;
}

.entry-card .kind {
    color: #00ff88;
    font-size: 11px;
}

.modal-backdrop {
    background-color: rgba(0, 0, 0, 0.8);
}

.modal-content {
    background-color: #121212;
    border: 1px solid #333333;
    padding: 16px;
}

.modal-title {
    font-size: 20px;
    font-weight: bold;
}

.status-tag,
.slide-dot.active {
    color: #00ff88;
    border-color: #00ff88;
}

.badge {
    border: 1px solid #333333;
    padding: 2px 6px;
    font-size: 11px;
}

.muted {
    color: #888888;
}
"#;

/// Load and apply the window stylesheet
fn load_css() {
    let provider = CssProvider::new();
    provider.load_from_string(CSS);

    if let Some(display) = Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

fn map_key(key: GdkKey) -> Key {
    match key {
        GdkKey::Escape => Key::Escape,
        GdkKey::Left | GdkKey::KP_Left => Key::Left,
        GdkKey::Right | GdkKey::KP_Right => Key::Right,
        GdkKey::Up | GdkKey::KP_Up => Key::Up,
        GdkKey::Down | GdkKey::KP_Down => Key::Down,
        other => other.to_unicode().map(Key::Char).unwrap_or(Key::Other),
    }
}

/// Route a pointer event to the controller; events arriving while the
/// controller is busy rendering are dropped.
fn dispatch_pointer(controller: &SharedController, target: PointerTarget) {
    match controller.try_borrow_mut() {
        Ok(mut controller) => {
            controller.handle_pointer(&target);
        }
        Err(_) => tracing::debug!("window: dropped {:?} during render", target),
    }
}

/// Main window for the showcase
pub struct MainWindow {
    window: ApplicationWindow,
}

impl MainWindow {
    pub fn new(app: &Application, config: &Config) -> Self {
        load_css();

        let window = ApplicationWindow::builder()
            .application(app)
            .title("PMs Shipping Code")
            .default_width(1100)
            .default_height(760)
            .build();

        let catalog = models::builtin();

        // Card grid
        let grid = FlowBox::new();
        grid.set_selection_mode(SelectionMode::None);
        grid.set_valign(Align::Start);
        grid.set_max_children_per_line(4);
        grid.set_column_spacing(12);
        grid.set_row_spacing(12);
        grid.set_margin_start(24);
        grid.set_margin_end(24);
        grid.set_margin_top(24);
        grid.set_margin_bottom(24);

        let page = ScrolledWindow::new();
        page.set_policy(PolicyType::Never, PolicyType::Automatic);
        page.set_child(Some(&grid));

        let layers = Overlay::new();
        layers.set_child(Some(&page));

        let view = OverlayView::new(&layers, &page, &config.asset_dir);
        let controller: SharedController = Rc::new(RefCell::new(
            OverlayController::new(catalog.clone(), view)
                .with_policy(config.key_policy)
                .with_autoplay(config.autoplay),
        ));

        for entry in catalog.iter() {
            let card = GtkBox::new(Orientation::Vertical, 6);
            let kind = Label::new(Some(if entry.is_video() {
                "> VIDEO DEMO"
            } else {
                "> LEARNING"
            }));
            kind.set_halign(Align::Start);
            kind.add_css_class("kind");
            let title = Label::new(Some(&entry.title));
            title.set_halign(Align::Start);
            title.set_wrap(true);
            let status = Label::new(Some(&entry.status));
            status.set_halign(Align::Start);
            status.add_css_class("muted");
            card.append(&kind);
            card.append(&title);
            card.append(&status);

            let button = Button::new();
            button.set_child(Some(&card));
            button.add_css_class("entry-card");
            button.set_size_request(220, 140);

            let controller = controller.clone();
            let id = entry.id.clone();
            button.connect_clicked(move |_| {
                dispatch_pointer(&controller, PointerTarget::Card(id.clone()));
            });
            grid.insert(&button, -1);
        }

        {
            // The view lives inside the controller, so hold it weakly here
            let weak = Rc::downgrade(&controller);
            controller.borrow().port().connect_pointer(move |target| {
                if let Some(shared) = weak.upgrade() {
                    dispatch_pointer(&shared, target);
                }
            });
        }

        let keys = EventControllerKey::new();
        keys.set_propagation_phase(PropagationPhase::Capture);
        let key_controller = controller.clone();
        keys.connect_key_pressed(move |_, keyval, _keycode, _state| {
            let handled = match key_controller.try_borrow_mut() {
                Ok(mut controller) => controller.handle_key(map_key(keyval)),
                Err(_) => false,
            };
            if handled {
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });
        window.add_controller(keys);

        window.set_child(Some(&layers));
        tracing::info!("Showing {} catalog entries", catalog.len());

        Self { window }
    }

    pub fn present(&self) {
        self.window.present();
    }
}
