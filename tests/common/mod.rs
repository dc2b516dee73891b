//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use search_gateway::config::GatewayConfig;
use search_gateway::http::HttpServer;
use search_gateway::lifecycle::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const TEST_API_KEY: &str = "test-key";

/// A request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    /// Path including the query string.
    pub target: String,
    /// Header names lowercased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == &name.to_ascii_lowercase())
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Requests received by a mock upstream, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<CapturedRequest>>>);

impl Captured {
    pub fn all(&self) -> Vec<CapturedRequest> {
        self.0.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    fn push(&self, request: CapturedRequest) {
        self.0.lock().unwrap().push(request);
    }
}

/// Start a mock upstream answering every request with `status` and `body`.
pub async fn start_mock_upstream(status: u16, body: &'static str) -> (SocketAddr, Captured) {
    start_programmable_upstream(move |_| (status, body.to_string())).await
}

/// Start a mock upstream whose answer depends on the received request.
pub async fn start_programmable_upstream<F>(f: F) -> (SocketAddr, Captured)
where
    F: Fn(&CapturedRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Captured::default();
    let f = Arc::new(f);

    let sink = captured.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let sink = sink.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let (status, body) = f(&request);
                        sink.push(request);

                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            401 => "401 Unauthorized",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, captured)
}

async fn read_request(socket: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body_end = buf.len().min(header_end + content_length);
    let body = String::from_utf8_lossy(&buf[header_end..body_end]).to_string();

    Some(CapturedRequest {
        method,
        target,
        headers,
        body,
    })
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Running gateway under test.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the gateway pointed at `upstream`.
pub async fn start_gateway(upstream: SocketAddr) -> TestGateway {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.base_url = format!("http://{}", upstream);
    config.upstream.api_key = TEST_API_KEY.to_string();

    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    TestGateway {
        addr,
        client,
        shutdown,
    }
}
