//! Application entry point for the 2D lightning fractal viewer.
//!
//! This binary sets up eframe/egui and delegates all interactive
//! logic and rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use viewer::{CANVAS_HEIGHT, CANVAS_WIDTH, Viewer};

/// Starts the native eframe application.
///
/// The window is sized to the persistent canvas plus a strip for the
/// status bar; the main window is titled `"2D Lightning Fractal"`. All
/// UI state and rendering are handled by [`Viewer`].
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32 + 40.0]),
        ..Default::default()
    };

    eframe::run_native(
        "2D Lightning Fractal",
        options,
        Box::new(|_cc| {
            // Construct the root app state for the viewer.
            Ok(Box::new(Viewer::new()))
        }),
    )
}
