//! Flock viewer - live view and control panel for a server-driven flocking simulation
//!
//! Connects to the simulation server via WebSocket and:
//! - Paints the latest snapshot (arrows and obstacles) on every display frame
//! - Places obstacles on click and clears them on request
//! - Keeps the parameter sliders in sync with the server without echo loops
//! - Reconnects forever with a fixed delay when the connection drops

pub mod core;
pub mod time;
pub mod ws_state;

#[cfg(any(
    all(feature = "native", not(target_arch = "wasm32")),
    all(feature = "wasm", target_arch = "wasm32")
))]
pub mod app;
#[cfg(any(
    all(feature = "native", not(target_arch = "wasm32")),
    all(feature = "wasm", target_arch = "wasm32")
))]
mod theme;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub mod websocket_native;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod websocket_wasm;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod web {
    use tracing::error;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::app::FlockApp;
    use crate::core::config::DEFAULT_WS_URL;
    use crate::core::{ClientConfig, FlockClient};
    use crate::websocket_wasm::{page_ws_url, WasmConnector};

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();

        // Initialize tracing for browser console
        tracing_wasm::set_as_global_default();

        let web_options = eframe::WebOptions::default();

        wasm_bindgen_futures::spawn_local(async {
            let Some(canvas) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("canvas"))
                .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
            else {
                error!("No <canvas id=\"canvas\"> element on the page");
                return;
            };

            let endpoint = page_ws_url().unwrap_or_else(|| DEFAULT_WS_URL.to_string());
            let client = FlockClient::new(WasmConnector::new(), ClientConfig::new(endpoint));

            if let Err(e) = eframe::WebRunner::new()
                .start(
                    canvas,
                    web_options,
                    Box::new(move |cc| Ok(Box::new(FlockApp::new(cc, client)))),
                )
                .await
            {
                error!(?e, "Failed to start eframe");
            }
        });
    }
}
