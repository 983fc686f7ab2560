use gtk4::prelude::*;
use gtk4::Application;

use crate::config::Config;
use crate::ui::MainWindow;

const APP_ID: &str = "com.pmsc.Showcase";

pub struct ShowcaseApp {
    app: Application,
}

impl ShowcaseApp {
    pub fn new(config: Config) -> Self {
        let app = Application::builder().application_id(APP_ID).build();

        app.connect_activate(move |app| {
            let window = MainWindow::new(app, &config);
            window.present();
        });

        Self { app }
    }

    pub fn run(&self) -> i32 {
        // Command-line arguments are not forwarded to GTK.
        self.app.run_with_args::<&str>(&[]).into()
    }
}
