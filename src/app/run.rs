//! Top-level entry point for running the monitor as a native window.

use super::VitalsApp;

/// Launch the monitor in a native window.
///
/// Installs the Phosphor icon font, opens a 1200x720 window titled after the
/// app's config and blocks until the window is closed.
pub fn run_dashboard(app: VitalsApp) -> eframe::Result<()> {
    let title = app.cfg.title.clone();
    let mut opts = eframe::NativeOptions::default();
    opts.viewport = opts
        .viewport
        .clone()
        .with_inner_size(egui::vec2(1200.0, 720.0));

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
