use {
    crate::{ComError, framing::check_message_size},
    base::*,
    futures_util::{SinkExt, StreamExt},
    std::{
        fmt,
        net::SocketAddr,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    },
    tokio::{
        net::{TcpListener, TcpStream, ToSocketAddrs},
        sync::Mutex,
        task::JoinHandle,
    },
    tokio_websockets::{Message, ServerBuilder, WebSocketStream},
};

/// Processes the binary messages of one stream at a time.
///
/// `process` runs on tokio's blocking pool and may be CPU-bound. Its reply is sent back as a
/// binary message; an empty reply means there is nothing new to show.
pub trait StreamHandler: Send + 'static {
    type Error: fmt::Display + Send + 'static;

    /// Called when a new stream takes ownership of the handler.
    fn begin(&mut self) {}

    fn process(&mut self, payload: &[u8]) -> Result<Vec<u8>, Self::Error>;
}

/// WebSocket server feeding every connection through one shared handler.
///
/// A connection holds the handler for its whole lifetime, so the messages of one stream are
/// processed strictly in arrival order and streams never interleave. Further connections
/// wait until the active one disconnects.
pub struct StreamServer {
    connections: Arc<AtomicUsize>,
    _accept_task: JoinHandle<()>,
    local_addr: SocketAddr,
}

impl StreamServer {
    /// Bind a TCP listener and start accepting WebSocket connections.
    pub async fn bind<H: StreamHandler>(
        addr: impl ToSocketAddrs,
        handler: H,
    ) -> Result<Self, ComError> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        let handler = Arc::new(Mutex::new(handler));
        let connections = Arc::new(AtomicUsize::new(0));
        let connections_clone = connections.clone();

        let accept_task = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((tcp_stream, addr)) => {
                        let handler = handler.clone();
                        let connections = connections_clone.clone();
                        tokio::spawn(async move {
                            let ws_stream = match ServerBuilder::new().accept(tcp_stream).await {
                                Ok((_request, ws_stream)) => ws_stream,
                                Err(e) => {
                                    log_warn!("WebSocket handshake failed for {}: {}", addr, e);
                                    return;
                                }
                            };
                            connections.fetch_add(1, Ordering::SeqCst);
                            serve_stream(ws_stream, addr, handler).await;
                            connections.fetch_sub(1, Ordering::SeqCst);
                        });
                    }
                    Err(e) => {
                        log_warn!("Accept error: {}", e);
                        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                    }
                }
            }
        });

        Ok(Self {
            connections,
            _accept_task: accept_task,
            local_addr,
        })
    }

    /// Number of open connections, active or waiting.
    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Return the local address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl Drop for StreamServer {
    fn drop(&mut self) {
        self._accept_task.abort();
    }
}

async fn serve_stream<H: StreamHandler>(
    ws_stream: WebSocketStream<TcpStream>,
    addr: SocketAddr,
    handler: Arc<Mutex<H>>,
) {
    let (mut writer, mut reader) = ws_stream.split();

    let mut guard = handler.lock_owned().await;
    log_info!("Stream {} started", addr);
    guard.begin();

    loop {
        let msg = match reader.next().await {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                log_warn!("Client {} error: {}", addr, e);
                break;
            }
            None => break,
        };
        // Ignore text messages and control frames
        if !msg.is_binary() {
            continue;
        }

        let payload = msg.into_payload();
        if let Err(e) = check_message_size(payload.len()) {
            log_warn!("Message from {} rejected: {}", addr, e);
            continue;
        }
        let payload = payload.to_vec();

        let processed = tokio::task::spawn_blocking(move || {
            let result = guard.process(&payload);
            (guard, result)
        })
        .await;
        let reply = match processed {
            Ok((returned, result)) => {
                guard = returned;
                match result {
                    Ok(bytes) => Message::binary(bytes),
                    Err(e) => {
                        log_error!("Processing frame from {} failed: {}", addr, e);
                        Message::text(e.to_string())
                    }
                }
            }
            Err(e) => {
                log_error!("Handler for {} panicked: {}", addr, e);
                return;
            }
        };

        if let Err(e) = writer.send(reply).await {
            log_warn!("Failed to send to {}: {}", addr, e);
            break;
        }
    }

    log_info!("Stream {} ended", addr);
}
