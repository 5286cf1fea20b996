//! Local stand-in for the provider's HTTP API, used by unit tests.
//!
//! Accepts any request on an ephemeral port, records it, and replies with a
//! fixed status and body. Counts connections so tests can assert that no
//! network call happened.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub struct StubProvider {
    base_url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubProvider {
    /// Replies to every request with `status` and a JSON `body`.
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        Self::spawn(Some((status, body.into()))).await
    }

    /// Reads requests but never replies.
    pub async fn start_silent() -> Self {
        Self::spawn(None).await
    }

    async fn spawn(reply: Option<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let task_hits = hits.clone();
        let task_requests = requests.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                task_hits.fetch_add(1, Ordering::SeqCst);
                let raw = read_request(&mut socket).await;
                task_requests.lock().unwrap().push(raw);

                match &reply {
                    Some((status, body)) => {
                        let response = format!(
                            "HTTP/1.1 {status} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                            if *status < 400 { "OK" } else { "Error" },
                            body.len()
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    }
                    None => {
                        // Hold the connection open until the client gives up.
                        tokio::spawn(async move {
                            let _socket = socket;
                            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
                        });
                    }
                }
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
            requests,
        }
    }

    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Raw text of the most recent request: request line, headers and body.
    pub fn last_request(&self) -> Option<String> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn last_request_body(&self) -> Option<serde_json::Value> {
        let raw = self.last_request()?;
        let (_, body) = raw.split_once("\r\n\r\n")?;
        serde_json::from_str(body).ok()
    }
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
