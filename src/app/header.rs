//! Header bar with connection status, counts and panel toggles

use eframe::egui;

use super::FlockApp;
use crate::core::Connector;
use crate::theme::{colors, status_color};
use crate::time::now_seconds;

impl<C: Connector> FlockApp<C> {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        self.fps_counter.tick();

        let state = self.client.connection_state().clone();
        let (arrows, obstacles, width, height) = {
            let snapshot = self.client.snapshot();
            (
                snapshot.arrows.len(),
                snapshot.obstacles.len(),
                snapshot.world_width,
                snapshot.world_height,
            )
        };

        ui.horizontal(|ui| {
            // LEFT: status indicator
            ui.colored_label(status_color(&state), egui::RichText::new(state.label()));

            ui.add_space(10.0);

            if ui.button("Clear obstacles").clicked() {
                self.client.clear_obstacles();
            }

            // RIGHT: toggles and stats (right-to-left order)
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let controls_text = if self.show_controls { "Controls >>>" } else { "Controls <<<" };
                if ui.button(controls_text).clicked() {
                    self.show_controls = !self.show_controls;
                }
                if ui
                    .selectable_label(self.show_diagnostics, "Diagnostics")
                    .clicked()
                {
                    self.show_diagnostics = !self.show_diagnostics;
                }

                ui.add_space(10.0);

                ui.label(
                    egui::RichText::new(format!("{:.0}x{:.0}", width, height))
                        .color(colors::TEXT_MUTED),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                ui.label(
                    egui::RichText::new(format!("{} obstacles", obstacles))
                        .color(colors::TEXT_MUTED),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                ui.label(
                    egui::RichText::new(format!("{} arrows", arrows)).color(colors::TEXT_MUTED),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                ui.label(
                    egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                        .color(colors::TEXT_SECONDARY),
                );
            });
        });
    }
}

/// FPS counter using platform-agnostic time
pub struct FpsCounter {
    frames: Vec<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(60),
        }
    }

    pub fn tick(&mut self) {
        let now = now_seconds() * 1000.0;
        self.frames.push(now);
        if self.frames.len() > 60 {
            self.frames.remove(0);
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.first(), self.frames.last()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed == 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / (elapsed / 1000.0)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
