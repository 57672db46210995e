//! Diagnostics overlay with connection, snapshot rate and command counters

use eframe::egui;

use super::FlockApp;
use crate::core::Connector;
use crate::theme::{colors, status_color};
use crate::ws_state::WsState;

/// Format a count with human-readable suffix (1234 → "1234", 25000 → "25.0k", 5000000 → "5.0M")
pub(crate) fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 10_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Format a rate with precision that shrinks as it grows
pub(crate) fn format_rate(r: f64) -> String {
    if r >= 100.0 {
        format!("{:.0}", r)
    } else if r >= 1.0 {
        format!("{:.1}", r)
    } else {
        format!("{:.2}", r)
    }
}

impl<C: Connector> FlockApp<C> {
    pub(crate) fn draw_diagnostics(&self, ctx: &egui::Context) {
        let state = self.client.connection_state();
        let transport = self.client.transport_stats();
        let commands = self.client.command_stats();

        let indicator = match state {
            WsState::Connected | WsState::Connecting => "●",
            WsState::Error(_) | WsState::Reconnecting { .. } => "✕",
        };
        let title = egui::RichText::new(format!("{} {}", indicator, state.label()))
            .color(status_color(state));

        egui::Area::new(egui::Id::new("diagnostics_area"))
            .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(8.0, -8.0))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 20, 220))
                    .corner_radius(4.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.set_min_width(280.0);
                        egui::CollapsingHeader::new(title)
                            .default_open(true)
                            .show(ui, |ui| {
                                let muted = |text: String| egui::RichText::new(text).color(colors::TEXT_MUTED);

                                ui.label(muted(self.client.endpoint().to_string()));
                                if let WsState::Error(msg) = state {
                                    ui.label(egui::RichText::new(msg).color(colors::STATUS_ERROR));
                                }
                                ui.label(
                                    egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                                        .color(colors::TEXT_SECONDARY),
                                );
                                ui.label(muted(format!(
                                    "{}/s snapshots ({} total)",
                                    format_rate(self.snapshot_rate.rate()),
                                    format_count(self.client.store().received()),
                                )));

                                let malformed_color = if transport.malformed > 0 {
                                    colors::STATUS_ERROR
                                } else {
                                    colors::TEXT_MUTED
                                };
                                ui.label(
                                    egui::RichText::new(format!(
                                        "{} malformed / {} ignored",
                                        format_count(transport.malformed),
                                        format_count(transport.ignored),
                                    ))
                                    .color(malformed_color),
                                );
                                ui.label(muted(format!(
                                    "{} connect attempts / {} stale events",
                                    transport.connect_attempts, transport.stale_events,
                                )));
                                ui.label(muted(format!(
                                    "commands: {} sent / {} dropped / {} failed",
                                    format_count(commands.sent),
                                    format_count(commands.dropped),
                                    format_count(commands.failed),
                                )));
                            });
                    });
            });
    }
}
