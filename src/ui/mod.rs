mod viewer;
mod window;

pub use viewer::OverlayView;
pub use window::MainWindow;
