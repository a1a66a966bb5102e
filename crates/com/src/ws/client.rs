use {
    crate::{ComError, framing::check_message_size},
    futures_util::{SinkExt, StreamExt},
    std::net::SocketAddr,
    tokio_websockets::{ClientBuilder, MaybeTlsStream, Message, WebSocketStream},
};

/// Reply from a `StreamServer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Processed payload; empty when there is nothing new to show.
    Frame(Vec<u8>),
    /// Processing error reported by the server.
    Error(String),
}

/// WebSocket client for a `StreamServer`, one stream per client.
pub struct StreamClient {
    stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl StreamClient {
    pub async fn connect(addr: SocketAddr) -> Result<Self, ComError> {
        let uri = format!("ws://{}", addr);
        let parsed_uri: http::Uri = uri
            .parse()
            .map_err(|e| ComError::BadRequest(format!("invalid WebSocket URI: {e}")))?;
        let (stream, _response) = ClientBuilder::from_uri(parsed_uri).connect().await?;
        Ok(Self { stream })
    }

    /// Send a binary frame to the server.
    pub async fn send(&mut self, payload: Vec<u8>) -> Result<(), ComError> {
        check_message_size(payload.len())?;
        self.stream.send(Message::binary(payload)).await?;
        Ok(())
    }

    /// Send a text message, which the server ignores.
    pub async fn send_text(&mut self, text: &str) -> Result<(), ComError> {
        self.stream.send(Message::text(text.to_string())).await?;
        Ok(())
    }

    /// Receive the next reply from the server.
    ///
    /// Returns `ComError::ConnectionClosed` if the server closes the connection.
    /// Ignores control frames.
    pub async fn recv(&mut self) -> Result<Reply, ComError> {
        loop {
            match self.stream.next().await {
                Some(Ok(msg)) => {
                    if msg.is_binary() {
                        return Ok(Reply::Frame(msg.into_payload().to_vec()));
                    }
                    if let Some(text) = msg.as_text() {
                        return Ok(Reply::Error(text.to_string()));
                    }
                }
                Some(Err(e)) => return Err(ComError::from(e)),
                None => return Err(ComError::ConnectionClosed),
            }
        }
    }

    /// Close the connection.
    pub async fn close(mut self) -> Result<(), ComError> {
        self.stream.close().await?;
        Ok(())
    }
}
