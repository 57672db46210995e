//! Simulation canvas: paints the draw list and turns clicks into obstacles

use eframe::egui;

use super::FlockApp;
use crate::core::{Connector, DrawCommand, Vec2};

fn to_pos(origin: egui::Pos2, p: Vec2) -> egui::Pos2 {
    egui::pos2(origin.x + p.x, origin.y + p.y)
}

fn rgba([r, g, b, a]: [u8; 4]) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn paint(painter: &egui::Painter, origin: egui::Pos2, command: &DrawCommand) {
    match command {
        DrawCommand::Clear { width, height, rgba: fill } => {
            let rect = egui::Rect::from_min_size(origin, egui::vec2(*width, *height));
            painter.rect_filled(rect, 0.0, rgba(*fill));
        }
        DrawCommand::Circle {
            center,
            radius,
            fill,
            stroke,
            stroke_width,
        } => {
            painter.circle(
                to_pos(origin, *center),
                *radius,
                rgba(*fill),
                egui::Stroke::new(*stroke_width, rgba(*stroke)),
            );
        }
        DrawCommand::Triangle { points, fill } => {
            let points = points.iter().map(|p| to_pos(origin, *p)).collect();
            painter.add(egui::Shape::convex_polygon(
                points,
                rgba(*fill),
                egui::Stroke::NONE,
            ));
        }
    }
}

impl<C: Connector> FlockApp<C> {
    pub(crate) fn render_canvas(&mut self, ui: &mut egui::Ui) {
        // Surface follows the world bounds of the latest snapshot
        let size = {
            let snapshot = self.client.snapshot();
            egui::vec2(snapshot.world_width.max(1.0), snapshot.world_height.max(1.0))
        };

        let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
        let origin = response.rect.min;

        for command in &self.client.scene() {
            paint(&painter, origin, command);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.client
                    .click(Vec2::new(pos.x, pos.y), Vec2::new(origin.x, origin.y));
            }
        }
    }
}
