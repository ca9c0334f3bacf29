//! Shared test utilities for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use httpmock::{Mock, MockServer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use ur_api::{ApiClient, CallObserver, RetryAfter};
use ur_core::config::ApiConfig;

/// API key used by every test client.
pub const TEST_KEY: &str = "u1234-test";

/// One event reported through [`CallObserver`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Started { attempt: u32 },
    RateLimited { attempt: u32, retry_after: RetryAfter, delay: Duration },
    Finished { attempts: u32, ok: bool },
}

/// Observer that records every event for later assertions.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn rate_limits(&self) -> Vec<RetryAfter> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::RateLimited { retry_after, .. } => Some(retry_after),
                _ => None,
            })
            .collect()
    }

    pub fn finished(&self) -> Option<(u32, bool)> {
        self.events().into_iter().find_map(|e| match e {
            Event::Finished { attempts, ok } => Some((attempts, ok)),
            _ => None,
        })
    }
}

impl CallObserver for RecordingObserver {
    fn request_started(&self, _endpoint: &str, attempt: u32) {
        self.events.lock().unwrap().push(Event::Started { attempt });
    }

    fn rate_limited(&self, _endpoint: &str, attempt: u32, retry_after: &RetryAfter, delay: Duration) {
        self.events.lock().unwrap().push(Event::RateLimited {
            attempt,
            retry_after: retry_after.clone(),
            delay,
        });
    }

    fn call_finished(&self, _endpoint: &str, attempts: u32, ok: bool) {
        self.events.lock().unwrap().push(Event::Finished { attempts, ok });
    }
}

/// Config pointing the client at the mock server's `/v2` root.
pub fn config_for(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/v2", server.base_url()),
        ..ApiConfig::default()
    }
}

/// Create a client against the mock server with a recording observer attached.
pub fn client_for(server: &MockServer) -> (ApiClient, Arc<RecordingObserver>) {
    let observer = Arc::new(RecordingObserver::default());
    let client = ApiClient::new(TEST_KEY, &config_for(server))
        .expect("failed to build test client")
        .with_observer(observer.clone());
    (client, observer)
}

/// Poll until `mock` has been called at least `expected` times.
pub async fn wait_for_calls(mock: &Mock<'_>, expected: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    while mock.calls_async().await < expected {
        assert!(
            tokio::time::Instant::now() < deadline,
            "mock never reached {expected} calls"
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

/// Start a raw HTTP server that announces a 100-byte body, sends a few bytes,
/// and closes the connection. Returns the `/v2` base URL and a request counter.
pub async fn spawn_truncating_server() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = requests.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            if !read_request(&mut socket).await {
                continue;
            }
            counter.fetch_add(1, Ordering::SeqCst);
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"stat\":",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{addr}/v2"), requests)
}

/// Read one request: headers, then as many body bytes as `Content-Length` says.
/// Returns false if the peer closed the connection first.
async fn read_request(socket: &mut TcpStream) -> bool {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return false;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return false;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    true
}
