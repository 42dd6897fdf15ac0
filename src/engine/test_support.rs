// Shared test helpers: a one-shot HTTP responder and a recording transport.

use crate::atoms::error::{CigamError, CigamResult};
use crate::engine::http::{ApiRequest, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accept a single connection on an ephemeral port, answer it with
/// `status` + `body`, and hand back the raw request text.
pub async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let raw = read_request(&mut stream).await;
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.flush().await.unwrap();
        raw
    });
    (base, handle)
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            let body_len = head
                .lines()
                .filter_map(|l| l.split_once(':'))
                .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Decoded query parameters from the request line of a raw HTTP request.
pub fn query_of(raw: &str) -> HashMap<String, String> {
    let target = raw.split_whitespace().nth(1).unwrap_or("/");
    let url = url::Url::parse(&format!("http://localhost{}", target)).unwrap();
    url.query_pairs().into_owned().collect()
}

/// Records every request and answers with a canned result.
pub struct RecordingTransport {
    pub requests: Mutex<Vec<ApiRequest>>,
    reply: Reply,
}

enum Reply {
    Body(Value),
    Api(u16, String),
}

impl RecordingTransport {
    pub fn replying(body: Value) -> Self {
        RecordingTransport { requests: Mutex::new(Vec::new()), reply: Reply::Body(body) }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        RecordingTransport {
            requests: Mutex::new(Vec::new()),
            reply: Reply::Api(status, message.to_string()),
        }
    }

    pub fn last(&self) -> ApiRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> CigamResult<Value> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Reply::Body(v) => Ok(v.clone()),
            Reply::Api(status, message) => Err(CigamError::api(*status, message.clone())),
        }
    }
}
