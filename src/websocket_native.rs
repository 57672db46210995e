//! Native WebSocket connector for the flocking server
//!
//! Each socket runs as a task on a tokio runtime (owned, or borrowed from the
//! caller). Inbound events go through one std channel that the UI thread
//! drains every frame; outbound frames go through a per-socket tokio channel.
//! Dropping a [`NativeSocket`] closes its outbound channel, which ends the task.

use std::sync::mpsc::{self, Receiver, Sender};

use futures_util::{SinkExt, StreamExt};
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

use crate::core::{Connector, Generation, Socket, SocketEvent, TransportError, TransportEvent};

/// Native connector backed by tokio-tungstenite
pub struct NativeConnector {
    /// Present when the connector created its own runtime
    _runtime: Option<Runtime>,
    handle: Handle,
    tx: Sender<TransportEvent>,
    rx: Receiver<TransportEvent>,
}

impl NativeConnector {
    /// Create a connector with its own single-worker runtime
    pub fn new() -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("flock-ws")
            .enable_all()
            .build()?;
        let handle = runtime.handle().clone();
        Ok(Self::build(Some(runtime), handle))
    }

    /// Create a connector that spawns onto an existing runtime
    pub fn with_handle(handle: Handle) -> Self {
        Self::build(None, handle)
    }

    fn build(runtime: Option<Runtime>, handle: Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            _runtime: runtime,
            handle,
            tx,
            rx,
        }
    }
}

/// Write half of a native socket
pub struct NativeSocket {
    outbound: UnboundedSender<String>,
}

impl Socket for NativeSocket {
    fn send_text(&self, text: &str) -> Result<(), TransportError> {
        self.outbound
            .send(text.to_string())
            .map_err(|e| TransportError::Send(e.to_string()))
    }
}

impl Connector for NativeConnector {
    type Socket = NativeSocket;

    fn open(&mut self, url: &str, generation: Generation) -> Result<NativeSocket, TransportError> {
        let (outbound_tx, outbound_rx) = unbounded_channel();
        self.handle.spawn(run_websocket(
            url.to_string(),
            generation,
            self.tx.clone(),
            outbound_rx,
        ));
        Ok(NativeSocket {
            outbound: outbound_tx,
        })
    }

    fn poll_event(&mut self) -> Option<TransportEvent> {
        self.rx.try_recv().ok()
    }
}

/// Returns false once the receiving side is gone
fn emit(tx: &Sender<TransportEvent>, generation: Generation, event: SocketEvent) -> bool {
    tx.send(TransportEvent::new(generation, event)).is_ok()
}

async fn run_websocket(
    url: String,
    generation: Generation,
    tx: Sender<TransportEvent>,
    mut outbound: UnboundedReceiver<String>,
) {
    let ws_stream = match connect_async(url.as_str()).await {
        Ok((stream, _)) => {
            info!(url = %url, generation, "WebSocket handshake complete");
            stream
        }
        Err(e) => {
            error!(error = %e, url = %url, "Failed to connect");
            emit(&tx, generation, SocketEvent::Error(e.to_string()));
            emit(
                &tx,
                generation,
                SocketEvent::Closed {
                    code: None,
                    reason: e.to_string(),
                },
            );
            return;
        }
    };

    if !emit(&tx, generation, SocketEvent::Opened) {
        return;
    }

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            msg = read.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    if !emit(&tx, generation, SocketEvent::Message(text.to_string())) {
                        // Receiver dropped, exit
                        return;
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = frame
                        .map(|f| (Some(u16::from(f.code)), f.reason.to_string()))
                        .unwrap_or((None, String::new()));
                    warn!(?code, reason = %reason, "WebSocket closed by server");
                    emit(&tx, generation, SocketEvent::Closed { code, reason });
                    return;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    error!(error = %e, "WebSocket error");
                    emit(&tx, generation, SocketEvent::Error(e.to_string()));
                    break;
                }
                None => break,
            },
            frame = outbound.recv() => match frame {
                Some(text) => {
                    if let Err(e) = write.send(Message::Text(text)).await {
                        error!(error = %e, "Failed to send frame");
                        emit(&tx, generation, SocketEvent::Error(e.to_string()));
                        break;
                    }
                }
                None => {
                    debug!(generation, "Socket handle dropped, closing");
                    let _ = write.send(Message::Close(None)).await;
                    return;
                }
            },
        }
    }

    warn!(generation, "WebSocket stream ended");
    emit(
        &tx,
        generation,
        SocketEvent::Closed {
            code: None,
            reason: "stream ended".into(),
        },
    );
}
