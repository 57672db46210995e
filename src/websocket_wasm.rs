//! Browser WebSocket connector for the flocking server

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use crate::core::config::derive_ws_url;
use crate::core::{Connector, Generation, Socket, SocketEvent, TransportError, TransportEvent};

/// Shared event queue: WS callbacks push, the app drains it in update()
pub type EventBuffer = Rc<RefCell<VecDeque<TransportEvent>>>;

/// Endpoint for the page this module was loaded from.
///
/// `window.__flock_ws_url` overrides the derived URL when set.
pub fn page_ws_url() -> Option<String> {
    let window = web_sys::window()?;
    if let Some(url) = js_sys::Reflect::get(&window, &JsValue::from_str("__flock_ws_url"))
        .ok()
        .and_then(|v| v.as_string())
    {
        return Some(url);
    }
    let location = window.location();
    Some(derive_ws_url(&location.protocol().ok()?, &location.host().ok()?))
}

#[derive(Default)]
pub struct WasmConnector {
    buffer: EventBuffer,
}

impl WasmConnector {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Live browser socket; dropping it detaches the callbacks and closes it
pub struct WasmSocket {
    ws: WebSocket,
    _on_open: Closure<dyn FnMut(JsValue)>,
    _on_msg: Closure<dyn FnMut(MessageEvent)>,
    _on_err: Closure<dyn FnMut(Event)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

impl Socket for WasmSocket {
    fn send_text(&self, text: &str) -> Result<(), TransportError> {
        self.ws
            .send_with_str(text)
            .map_err(|e| TransportError::Send(format!("{e:?}")))
    }
}

impl Drop for WasmSocket {
    fn drop(&mut self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onerror(None);
        self.ws.set_onclose(None);
        let _ = self.ws.close();
    }
}

impl Connector for WasmConnector {
    type Socket = WasmSocket;

    fn open(&mut self, url: &str, generation: Generation) -> Result<WasmSocket, TransportError> {
        let ws = WebSocket::new(url).map_err(|e| TransportError::Connect {
            url: url.to_string(),
            reason: format!("{e:?}"),
        })?;

        let push = {
            let buffer = self.buffer.clone();
            move |event: SocketEvent| {
                buffer
                    .borrow_mut()
                    .push_back(TransportEvent::new(generation, event));
            }
        };

        let on_open = {
            let push = push.clone();
            Closure::wrap(Box::new(move |_: JsValue| {
                info!(generation, "WebSocket connected");
                push(SocketEvent::Opened);
            }) as Box<dyn FnMut(JsValue)>)
        };
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let on_msg = {
            let push = push.clone();
            Closure::wrap(Box::new(move |e: MessageEvent| {
                if let Ok(txt) = e.data().dyn_into::<js_sys::JsString>() {
                    push(SocketEvent::Message(txt.into()));
                }
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        ws.set_onmessage(Some(on_msg.as_ref().unchecked_ref()));

        // Browsers deliver a plain Event here, not an ErrorEvent
        let on_err = {
            let push = push.clone();
            Closure::wrap(Box::new(move |e: Event| {
                let msg = format!("WebSocket error ({})", e.type_());
                error!(error = %msg, generation, "WebSocket error");
                push(SocketEvent::Error(msg));
            }) as Box<dyn FnMut(Event)>)
        };
        ws.set_onerror(Some(on_err.as_ref().unchecked_ref()));

        let on_close = Closure::wrap(Box::new(move |e: CloseEvent| {
            let code = e.code();
            let reason = e.reason();
            warn!(code, reason = %reason, generation, "WebSocket closed");
            push(SocketEvent::Closed {
                code: Some(code),
                reason,
            });
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        Ok(WasmSocket {
            ws,
            _on_open: on_open,
            _on_msg: on_msg,
            _on_err: on_err,
            _on_close: on_close,
        })
    }

    fn poll_event(&mut self) -> Option<TransportEvent> {
        self.buffer.borrow_mut().pop_front()
    }
}
