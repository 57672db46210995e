//! Parameter sidebar - slider + numeric field per flocking parameter

use eframe::egui;

use super::FlockApp;
use crate::core::Connector;
use crate::core::{ControlSource, Param};
use crate::theme::colors;

impl<C: Connector> FlockApp<C> {
    pub(crate) fn render_controls(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("controls")
            .default_width(300.0)
            .min_width(240.0)
            .resizable(true)
            .frame(egui::Frame::new().fill(colors::BG_PANEL).inner_margin(8.0))
            .show(ctx, |ui| {
                let group_frame = egui::Frame::new()
                    .stroke(egui::Stroke::new(1.0, colors::BORDER))
                    .corner_radius(4.0)
                    .inner_margin(6.0);

                // Only widget responses land here; server pushes never do
                let mut edits: Vec<(Param, ControlSource, f32)> = Vec::new();

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(egui::RichText::new("Flocking parameters:").color(colors::TEXT_SECONDARY));
                    ui.spacing_mut().slider_width = (ui.available_width() - 90.0).max(80.0);

                    for &param in Param::ALL {
                        let pair = self.client.controls().pair(param);
                        ui.add_space(4.0);
                        ui.label(egui::RichText::new(param.label()).color(colors::TEXT_MUTED));
                        ui.horizontal(|ui| {
                            let mut coarse = pair.coarse;
                            let slider = egui::Slider::new(&mut coarse, param.range())
                                .show_value(false)
                                .clamping(egui::SliderClamping::Never);
                            if ui.add(slider).changed() {
                                edits.push((param, ControlSource::Coarse, coarse));
                            }

                            let mut fine = pair.fine;
                            let field = egui::DragValue::new(&mut fine)
                                .speed(param.step())
                                .max_decimals(3);
                            if ui.add(field).changed() {
                                edits.push((param, ControlSource::Fine, fine));
                            }
                        });
                    }
                });

                for (param, source, value) in edits {
                    self.client.edit_parameter(param, source, value);
                }

                ui.add_space(8.0);

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(egui::RichText::new("Obstacles:").color(colors::TEXT_SECONDARY));
                    ui.label(
                        egui::RichText::new("Click the canvas to place one")
                            .color(colors::TEXT_MUTED)
                            .small(),
                    );
                    if ui.button("Clear obstacles").clicked() {
                        self.client.clear_obstacles();
                    }
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::mock::MockConnector;
    use crate::core::transport::SocketEvent;
    use crate::core::{ClientConfig, FlockClient, FlockingParameters};
    use serde_json::json;

    fn run_frames(app: &mut FlockApp<MockConnector>, ctx: &egui::Context, frames: usize) {
        for _ in 0..frames {
            let _ = ctx.run(egui::RawInput::default(), |ctx| app.render_controls(ctx));
        }
    }

    #[test]
    fn server_push_renders_without_sending() {
        let connector = MockConnector::default();
        let client = FlockClient::new(connector.clone(), ClientConfig::new("ws://sim/ws"));
        let mut app = FlockApp::with_client(client, 0.0);

        // Well outside every slider range
        let pushed = FlockingParameters {
            max_speed: 50.0,
            separation_distance: 900.0,
            cohesion_strength: 7.5,
            ..FlockingParameters::default()
        };
        let state = json!({
            "type": "GameState",
            "arrows": [],
            "obstacles": [],
            "screen_width": 800.0,
            "screen_height": 600.0,
            "parameters": pushed,
        });
        connector.net.borrow_mut().push(1, SocketEvent::Opened);
        connector.net.borrow_mut().push(1, SocketEvent::Message(state.to_string()));
        app.client.tick(0.0);
        assert!(app.client.connection_state().is_connected());

        let ctx = egui::Context::default();
        run_frames(&mut app, &ctx, 6);

        assert!(connector.net.borrow().sent.is_empty());
        let stats = app.client.command_stats();
        assert_eq!((stats.sent, stats.dropped, stats.failed), (0, 0, 0));
        assert_eq!(app.client.controls().user_edits(), 0);

        let pair = app.client.controls().pair(Param::MaxSpeed);
        assert_eq!((pair.coarse, pair.fine), (50.0, 50.0));
        assert_eq!(app.client.controls().read_parameters(), pushed);
    }
}
