//! Interactive galaxy particle-field viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which acts as the frame driver for the
//! engine in `galaxy-core`: once per painted frame it snapshots the
//! settings, reads the pointer, derives the simulation bounds from the
//! central panel, calls [`Engine::tick`], and draws the returned frame.

use eframe::App;
use galaxy_core::{engine::Engine, settings::Settings, types::Bounds};
use glam::Vec2;

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`Engine`] and the live-editable [`Settings`].
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The per-frame update is:
/// 1. Build the control panels (which may mutate `settings`).
/// 2. Unless paused, tick the engine with the current settings, hover
///    position, and panel size.
/// 3. Draw the last frame: connection segments first, particles on top.
///
/// Simulation space is the central panel itself, one simulation pixel per
/// screen pixel, so the engine's bounds track the window size and the
/// pointer needs no scaling, only a translation by the panel origin.
pub struct Viewer {
    engine: Engine,
    settings: Settings,

    paused: bool,

    last_frame_time: f64,
    last_frame_dt: f64,
}

/// Particle fill color.
const PARTICLE_COLOR: egui::Color32 = egui::Color32::from_rgb(175, 195, 255);

impl Viewer {
    /// Creates a viewer with default settings and an unseeded engine.
    ///
    /// The engine stays uninitialized until the first frame reports the
    /// central panel size; from then on it ticks every painted frame.
    pub fn new() -> Self {
        Self {
            engine: Engine::new(),
            settings: Settings::default(),
            paused: false,
            last_frame_time: 0.0,
            last_frame_dt: 0.0,
        }
    }

    /// Discards all particle state and starts over.
    ///
    /// Settings are kept; the engine re-seeds itself on the next tick.
    fn reset(&mut self) {
        self.engine = Engine::new();
    }

    /// Converts a simulation-space position to screen-space.
    ///
    /// Simulation space is panel-local pixels, so this is a pure
    /// translation by the panel origin.
    fn to_screen(rect: egui::Rect, p: Vec2) -> egui::Pos2 {
        egui::pos2(rect.min.x + p.x, rect.min.y + p.y)
    }

    /// Converts a screen-space position back to simulation-space.
    ///
    /// Inverse of [`Viewer::to_screen`].
    fn to_sim(rect: egui::Rect, p: egui::Pos2) -> Vec2 {
        Vec2::new(p.x - rect.min.x, p.y - rect.min.y)
    }

    /// Stroke color for a connection segment at the given opacity.
    fn segment_color(opacity: f32) -> egui::Color32 {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
        egui::Color32::from_rgba_unmultiplied(150, 170, 230, alpha)
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
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

    /// Builds the top panel UI (pause/run and reset controls).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.paused { "▶ Run" } else { "⏸ Pause" })
                    .clicked()
                {
                    self.paused = !self.paused;
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }
            });
        });
    }

    /// Builds the bottom status bar (frame time, particle and segment counts).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt = {:.1} ms", self.last_frame_dt * 1000.0));
                ui.separator();
                ui.label(format!("particles = {}", self.engine.particles().len()));
                ui.label(format!(
                    "connections = {}",
                    self.engine.last_frame().segments.len()
                ));
            });
        });
    }

    /// Builds the right-hand settings panel.
    ///
    /// Every field edits the snapshot passed into the next tick, so all
    /// changes apply live; only the particle count causes a re-seed.
    fn ui_settings_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("settings_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Settings");

                ui.separator();
                ui.label("Particles");
                Self::labeled_drag_usize(
                    ui,
                    "count:",
                    &mut self.settings.particle_count,
                    1..=500,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "size min:",
                    &mut self.settings.particle_size.min,
                    0.1..=20.0,
                    0.1,
                );
                Self::labeled_drag_f32(
                    ui,
                    "size max:",
                    &mut self.settings.particle_size.max,
                    0.1..=20.0,
                    0.1,
                );
                ui.checkbox(&mut self.settings.particle_collisions, "collisions");

                ui.separator();
                ui.label("Motion");
                ui.add(egui::Slider::new(&mut self.settings.friction, 0.5..=1.0).text("friction"));
                Self::labeled_drag_f32(
                    ui,
                    "mouse force:",
                    &mut self.settings.mouse_force,
                    0.0..=20.0,
                    0.1,
                );
                ui.checkbox(&mut self.settings.reverse_gravity, "reverse gravity");

                ui.separator();
                ui.label("Connections");
                ui.add(
                    egui::Slider::new(&mut self.settings.connection_distance, 0.0..=300.0)
                        .text("distance"),
                );

                ui.separator();
                ui.label("Orbit");
                ui.checkbox(&mut self.settings.orbit_around_center, "orbit around center");
                Self::labeled_drag_f32(
                    ui,
                    "speed:",
                    &mut self.settings.orbit_speed,
                    -20.0..=20.0,
                    0.1,
                );
                Self::labeled_drag_f32(
                    ui,
                    "radius:",
                    &mut self.settings.orbit_radius,
                    0.0..=500.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "gravity:",
                    &mut self.settings.orbit_gravity,
                    0.0..=1.0,
                    0.005,
                );

                ui.separator();
                if ui.button("Reset settings to default").clicked() {
                    self.settings = Settings::default();
                }
            });
    }

    /// Builds the central panel: ticks the engine and draws the frame.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::from_rgb(8, 10, 24)))
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;
                let painter = ui.painter_at(rect);

                // Pointer in simulation space; NaN means "no pointer",
                // which the engine ignores.
                let pointer = response
                    .hover_pos()
                    .map(|p| Self::to_sim(rect, p))
                    .unwrap_or(Vec2::NAN);

                if !self.paused {
                    let now = ctx.input(|i| i.time);
                    if self.last_frame_time > 0.0 {
                        self.last_frame_dt = now - self.last_frame_time;
                    }
                    self.last_frame_time = now;

                    let bounds = Bounds::new(rect.width(), rect.height());
                    self.engine.tick(self.settings, pointer, bounds);
                }

                let frame = self.engine.last_frame();

                // Segments below particles, alpha from the engine's opacity.
                for seg in &frame.segments {
                    painter.line_segment(
                        [Self::to_screen(rect, seg.from), Self::to_screen(rect, seg.to)],
                        egui::Stroke::new(1.0, Self::segment_color(seg.opacity)),
                    );
                }

                for point in &frame.points {
                    painter.circle_filled(
                        Self::to_screen(rect, point.pos),
                        point.radius,
                        PARTICLE_COLOR,
                    );
                }

                // Animate continuously while running.
                if !self.paused {
                    ctx.request_repaint();
                }
            });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    ///
    /// This method:
    /// - Renders the top control bar and status bar.
    /// - Renders the settings side panel.
    /// - Ticks the engine and draws the field in the central panel.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_settings_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_core::engine::EngineState;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(120.0, 40.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn to_screen_and_back_is_roundtrip() {
        let rect = test_rect();

        let sim_points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(400.0, 300.0),
            Vec2::new(13.5, 587.25),
        ];

        for p in sim_points {
            let screen = Viewer::to_screen(rect, p);
            let back = Viewer::to_sim(rect, screen);
            assert_eq!(back, p, "roundtrip mismatch for {p:?}");
        }
    }

    #[test]
    fn to_sim_is_panel_local() {
        let rect = test_rect();
        let sim = Viewer::to_sim(rect, rect.min);
        assert_eq!(sim, Vec2::ZERO);
    }

    #[test]
    fn segment_color_maps_opacity_to_alpha() {
        assert_eq!(Viewer::segment_color(0.0).a(), 0);
        assert_eq!(Viewer::segment_color(1.0).a(), 255);

        // The engine's opacity ceiling lands at roughly 30% alpha.
        let a = Viewer::segment_color(0.3).a();
        assert!((70..=80).contains(&a), "unexpected alpha {a}");

        // Out-of-range values are clamped rather than wrapped.
        assert_eq!(Viewer::segment_color(2.0).a(), 255);
        assert_eq!(Viewer::segment_color(-1.0).a(), 0);
    }

    #[test]
    fn reset_returns_engine_to_uninitialized() {
        let mut viewer = Viewer::new();

        // Drive the engine directly, as the central panel would.
        viewer.engine.tick(
            viewer.settings,
            Vec2::NAN,
            Bounds::new(800.0, 600.0),
        );
        assert_eq!(viewer.engine.state(), EngineState::Running);
        assert!(!viewer.engine.particles().is_empty());

        viewer.reset();

        assert_eq!(viewer.engine.state(), EngineState::Uninitialized);
        assert!(viewer.engine.particles().is_empty());
    }
}
