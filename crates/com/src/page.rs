use {
    crate::{ComError, framing::MAX_REQUEST_HEAD},
    base::*,
    http::{Method, Response, StatusCode, header},
    std::{net::SocketAddr, sync::Arc},
    tokio::{
        io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
        net::{TcpListener, TcpStream, ToSocketAddrs},
        task::JoinHandle,
    },
};

/// Minimal HTTP/1.1 server for a single HTML page.
///
/// `GET /` and `GET /index.html` return the page, other paths 404 and other methods 405.
/// Every connection is closed after one response.
pub struct PageServer {
    _accept_task: JoinHandle<()>,
    local_addr: SocketAddr,
}

impl PageServer {
    pub async fn bind(addr: impl ToSocketAddrs, page: impl Into<String>) -> Result<Self, ComError> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let page: Arc<str> = Arc::from(page.into());

        let accept_task = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((tcp_stream, addr)) => {
                        let page = page.clone();
                        tokio::spawn(async move {
                            if let Err(e) = serve_connection(tcp_stream, &page).await {
                                log_warn!("Page request from {} failed: {}", addr, e);
                            }
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
            _accept_task: accept_task,
            local_addr,
        })
    }

    /// Return the local address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl Drop for PageServer {
    fn drop(&mut self) {
        self._accept_task.abort();
    }
}

/// Builds the response for a request line's method and target.
pub fn route(method: &str, target: &str, page: &str) -> Result<Response<Vec<u8>>, ComError> {
    let path = target.split(['?', '#']).next().unwrap_or(target);
    let method = Method::from_bytes(method.as_bytes())
        .map_err(|_| ComError::BadRequest(format!("invalid method {method:?}")))?;

    let response = if method != Method::GET {
        Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header(header::ALLOW, "GET")
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(b"method not allowed\n".to_vec())?
    } else if path == "/" || path == "/index.html" {
        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .header(header::CACHE_CONTROL, "no-cache")
            .body(page.as_bytes().to_vec())?
    } else {
        Response::builder()
            .status(StatusCode::NOT_FOUND)
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(b"not found\n".to_vec())?
    };
    Ok(response)
}

/// Serializes a response as HTTP/1.1 with `Content-Length` and `Connection: close`.
pub fn write_response(response: &Response<Vec<u8>>) -> Vec<u8> {
    let status = response.status();
    let mut out = format!(
        "HTTP/1.1 {} {}\r\n",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    )
    .into_bytes();
    for (name, value) in response.headers() {
        out.extend_from_slice(name.as_str().as_bytes());
        out.extend_from_slice(b": ");
        out.extend_from_slice(value.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("content-length: {}\r\n", response.body().len()).as_bytes());
    out.extend_from_slice(b"connection: close\r\n\r\n");
    out.extend_from_slice(response.body());
    out
}

async fn serve_connection(tcp_stream: TcpStream, page: &str) -> Result<(), ComError> {
    let mut reader = BufReader::new(tcp_stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).await? == 0 {
        return Err(ComError::ConnectionClosed);
    }

    // drain the headers
    let mut head_len = request_line.len();
    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line).await?;
        head_len += n;
        if head_len > MAX_REQUEST_HEAD {
            return Err(ComError::MessageTooLarge(head_len));
        }
        if n == 0 || line == "\r\n" || line == "\n" {
            break;
        }
    }

    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
        return Err(ComError::BadRequest(format!(
            "malformed request line {:?}",
            request_line.trim_end()
        )));
    };
    let response = route(method, target, page)?;
    log_debug!("{} {} -> {}", method, target, response.status().as_u16());

    let mut tcp_stream = reader.into_inner();
    tcp_stream.write_all(&write_response(&response)).await?;
    tcp_stream.shutdown().await?;
    Ok(())
}
