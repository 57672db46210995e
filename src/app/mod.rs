//! Flock viewer egui app
//!
//! Runs on both native and WASM. Every frame: pump the transport, then paint
//! whatever the snapshot store holds. Painting never waits on the network.

mod canvas;
mod controls;
mod diagnostics;
mod header;

use eframe::egui;

use crate::core::{Connector, FlockClient};
use crate::theme::{colors, viewer_visuals};
use crate::time::{now_seconds, RateMeter};

#[cfg(target_arch = "wasm32")]
pub type PlatformConnector = crate::websocket_wasm::WasmConnector;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformConnector = crate::websocket_native::NativeConnector;

/// Flock viewer app - runs on both native and WASM
pub struct FlockApp<C: Connector = PlatformConnector> {
    pub(crate) client: FlockClient<C>,
    /// FPS counter
    pub(crate) fps_counter: header::FpsCounter,
    /// Snapshots applied per second
    pub(crate) snapshot_rate: RateMeter,
    /// Show the parameter sidebar
    pub(crate) show_controls: bool,
    /// Show the diagnostics overlay
    pub(crate) show_diagnostics: bool,
}

impl<C: Connector> FlockApp<C> {
    /// Take ownership of a not-yet-started client and open the first connection
    pub fn new(cc: &eframe::CreationContext<'_>, client: FlockClient<C>) -> Self {
        cc.egui_ctx.set_visuals(viewer_visuals());
        Self::with_client(client, now_seconds())
    }

    pub(crate) fn with_client(mut client: FlockClient<C>, now: f64) -> Self {
        client.start(now);
        Self {
            client,
            fps_counter: header::FpsCounter::new(),
            snapshot_rate: RateMeter::new(),
            show_controls: true,
            show_diagnostics: false,
        }
    }
}

impl<C: Connector> eframe::App for FlockApp<C> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Repaint on every display refresh, independent of message arrival
        ctx.request_repaint();

        let now = now_seconds();
        self.client.tick(now);
        self.snapshot_rate.update(now, self.client.store().received());

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(colors::BG_PANEL).inner_margin(4.0))
            .show(ctx, |ui| {
                self.render_header(ui);
            });

        // Sidebar must be shown before CentralPanel
        if self.show_controls {
            self.render_controls(ctx);
        }

        if self.show_diagnostics {
            self.draw_diagnostics(ctx);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PANEL).inner_margin(8.0))
            .show(ctx, |ui| {
                egui::ScrollArea::both().show(ui, |ui| {
                    self.render_canvas(ui);
                });
            });
    }
}
