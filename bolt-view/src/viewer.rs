//! Interactive lightning fractal viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the persistent canvas and
//! the generation parameters, and implements [`eframe::App`] to render
//! the canvas and control the generator through an egui UI.

use bolt_core::{canvas::Canvas, growth, preset::Preset};
use eframe::App;
use glam::Vec2;
use rand::{Rng, rng};
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::path::Path;

/// Fixed dimensions of the persistent raster surface.
pub const CANVAS_WIDTH: usize = 1280;
pub const CANVAS_HEIGHT: usize = 720;

/// Angular step applied once per frame while the rotate key is held.
const ROTATE_STEP: f32 = TAU / 60.0;

/// Length of the aim hint drawn at the hovered position, in pixels.
const HINT_LENGTH: f32 = 30.0;

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The persistent drawing surface: [`Canvas`] plus its GPU texture copy.
/// - Generation parameters: the current [`Preset`] and launch direction.
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Apply the rotate input if held.
/// 2. Handle a canvas click by running one full tree generation.
/// 3. Re-upload the canvas texture if anything was drawn.
/// 4. Render the canvas, the control window, and the status bar.
///
/// ### Fields
/// - `canvas` - Persistent pixel surface; accumulates all generations.
/// - `preset` - Scalar parameters handed to the next generation.
/// - `direction` - Launch direction in radians for the next seed branch.
///
/// - `rng` - Random stream threaded through every generation and export.
///
/// - `texture` - GPU copy of the canvas, recreated lazily.
/// - `canvas_dirty` - Whether the texture needs a re-upload this frame.
///
/// - `last_branch_count` - Branches drawn by the most recent generation.
/// - `export_status` - Outcome message of the most recent PNG export.
pub struct Viewer {
    canvas: Canvas,
    preset: Preset,
    direction: f32,

    rng: rand::rngs::ThreadRng,

    texture: Option<egui::TextureHandle>,
    canvas_dirty: bool,

    last_branch_count: usize,
    export_status: Option<String>,
}

impl Viewer {
    /// Creates a viewer with a black canvas and the default preset.
    ///
    /// The launch direction starts at `π/2`, straight down the raster,
    /// so the first click grows a bolt toward the bottom of the window.
    pub fn new() -> Self {
        Self {
            canvas: Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            preset: Preset::default(),
            direction: FRAC_PI_2,
            rng: rng(),
            texture: None,
            canvas_dirty: false,
            last_branch_count: 0,
            export_status: None,
        }
    }

    /// Applies one frame's worth of the rotate input.
    fn rotate_step(&mut self) {
        self.direction -= ROTATE_STEP;
    }

    /// Runs one full tree generation at `point` on the canvas.
    fn generate_at(&mut self, point: Vec2) {
        self.last_branch_count = growth::generate_tree(
            &mut self.canvas,
            point,
            self.direction,
            self.preset,
            &mut self.rng,
        );
        self.canvas_dirty = true;
    }

    /// Wipes the canvas back to black.
    fn clear_surface(&mut self) {
        self.canvas.clear();
        self.canvas_dirty = true;
    }

    /// Writes the canvas to a PNG with a randomized 10-digit name.
    ///
    /// The outcome lands in `export_status` either way; encoder errors
    /// are shown, never propagated.
    fn export_surface(&mut self) {
        let name = export_name(&mut self.rng);
        self.export_status = match self.canvas.save_png(Path::new(&name)) {
            Ok(()) => Some(format!("saved {name}")),
            Err(err) => Some(format!("export failed: {err}")),
        };
    }

    /// Maps a screen position to canvas pixel coordinates.
    ///
    /// The canvas is drawn 1:1 anchored at the top-left corner of `rect`.
    /// Returns `None` for positions off the canvas.
    fn screen_to_canvas(&self, p: egui::Pos2, rect: egui::Rect) -> Option<Vec2> {
        let x = p.x - rect.min.x;
        let y = p.y - rect.min.y;
        let inside = x >= 0.0
            && y >= 0.0
            && x < self.canvas.width() as f32
            && y < self.canvas.height() as f32;
        inside.then_some(Vec2::new(x, y))
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the draggable control window (presets, parameters, actions).
    fn ui_control_window(&mut self, ctx: &egui::Context) {
        egui::Window::new("Controls")
            .default_pos(egui::pos2(20.0, 40.0))
            .default_width(230.0)
            .show(ctx, |ui| {
                ui.label("Preset");
                ui.horizontal(|ui| {
                    if ui
                        .selectable_label(self.preset == Preset::lightning(), "Lightning")
                        .clicked()
                    {
                        self.preset = Preset::lightning();
                    }
                    if ui
                        .selectable_label(self.preset == Preset::branches(), "Branches")
                        .clicked()
                    {
                        self.preset = Preset::branches();
                    }
                    if ui
                        .selectable_label(self.preset == Preset::roots(), "Roots")
                        .clicked()
                    {
                        self.preset = Preset::roots();
                    }
                });

                ui.separator();
                ui.label("Width");
                Self::labeled_drag_f32(ui, "base:", &mut self.preset.branch_width, 0.0..=20.0, 0.1);
                Self::labeled_drag_f32(
                    ui,
                    "size factor:",
                    &mut self.preset.branch_width_factor,
                    0.0..=2.0,
                    0.01,
                );

                ui.separator();
                ui.label("Length");
                Self::labeled_drag_f32(
                    ui,
                    "mean:",
                    &mut self.preset.branch_length_mean,
                    0.0..=100.0,
                    0.5,
                );
                Self::labeled_drag_f32(
                    ui,
                    "deviation:",
                    &mut self.preset.branch_length_range,
                    0.0..=50.0,
                    0.5,
                );
                Self::labeled_drag_f32(
                    ui,
                    "size factor:",
                    &mut self.preset.branch_length_factor,
                    0.0..=2.0,
                    0.01,
                );

                ui.separator();
                ui.label("Split angle");
                Self::labeled_drag_f32(
                    ui,
                    "mean:",
                    &mut self.preset.branch_angle_mean,
                    0.0..=PI,
                    0.01,
                );
                Self::labeled_drag_f32(
                    ui,
                    "deviation:",
                    &mut self.preset.branch_angle_range,
                    0.0..=PI,
                    0.01,
                );
                Self::labeled_drag_f32(
                    ui,
                    "size factor:",
                    &mut self.preset.branch_angle_factor,
                    0.0..=2.0,
                    0.01,
                );

                ui.separator();
                ui.label(format!(
                    "direction: {:.0}°  (hold R to rotate)",
                    self.direction.to_degrees()
                ));

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Clear").clicked() {
                        self.clear_surface();
                    }
                    if ui.button("Save PNG").clicked() {
                        self.export_surface();
                    }
                });
                if let Some(status) = &self.export_status {
                    ui.label(status.clone());
                }
            });
    }

    /// Builds the bottom status bar (branch count, direction, canvas size).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!(
                    "canvas = {}x{}",
                    self.canvas.width(),
                    self.canvas.height()
                ));
                ui.separator();
                ui.label(format!("direction = {:.0}°", self.direction.to_degrees()));
                ui.label(format!("branches = {}", self.last_branch_count));
            });
        });
    }

    /// Draws a short aim hint at the hovered position along the current
    /// launch direction.
    fn ui_aim_hint(&self, painter: &egui::Painter, pos: egui::Pos2) {
        let tip = pos + egui::vec2(self.direction.cos(), self.direction.sin()) * HINT_LENGTH;
        painter.line_segment([pos, tip], egui::Stroke::new(1.5, egui::Color32::YELLOW));
        painter.circle_filled(pos, 2.5, egui::Color32::YELLOW);
    }

    /// Builds the central panel where the canvas is shown and clicked.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::click());
                let rect = response.rect;
                let painter = ui.painter_at(rect);

                // A click outside any UI chrome grows a new tree at the
                // clicked pixel, with the current direction and preset.
                if response.clicked()
                    && let Some(pos) = response.hover_pos()
                    && let Some(point) = self.screen_to_canvas(pos, rect)
                {
                    self.generate_at(point);
                }

                // Sync the GPU copy of the canvas after any drawing.
                if self.texture.is_none() || self.canvas_dirty {
                    let image = egui::ColorImage::from_rgb(
                        [self.canvas.width(), self.canvas.height()],
                        self.canvas.pixels(),
                    );
                    if let Some(texture) = &mut self.texture {
                        texture.set(image, egui::TextureOptions::NEAREST);
                    } else {
                        self.texture =
                            Some(ctx.load_texture("canvas", image, egui::TextureOptions::NEAREST));
                    }
                    self.canvas_dirty = false;
                }

                if let Some(texture) = &self.texture {
                    let size = egui::vec2(self.canvas.width() as f32, self.canvas.height() as f32);
                    let canvas_rect = egui::Rect::from_min_size(rect.min, size);
                    painter.image(
                        texture.id(),
                        canvas_rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }

                // Aim hint wherever the cursor hovers over the canvas.
                if let Some(pos) = response.hover_pos()
                    && self.screen_to_canvas(pos, rect).is_some()
                {
                    self.ui_aim_hint(&painter, pos);
                }
            });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    ///
    /// This method:
    /// - Applies the held rotate key to the launch direction.
    /// - Draws the central canvas view and handles click generation.
    /// - Renders the control window and the status bar.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_down(egui::Key::R)) {
            self.rotate_step();
            ctx.request_repaint();
        }

        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
        self.ui_control_window(ctx);
    }
}

/// Produces the randomized export filename.
///
/// One draw from a uniform `[0, 1)` generator, formatted to ten
/// fractional digits with the leading `"0."` sliced off, then suffixed
/// `".png"`.
fn export_name(rng: &mut impl Rng) -> String {
    let roll: f64 = rng.random();
    format!("{}.png", &format!("{roll:.10}")[2..])
}
