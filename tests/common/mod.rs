//! Shared fakes for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use vrf_range_client::blockchain::{
    BlockchainResult, ChainReader, Connection, ConnectorCapabilities, SubmitError, WalletConnector,
};
use vrf_range_client::vrf::CallSequence;
use vrf_range_client::Felt;

pub fn felts(raw: &[&str]) -> Vec<Felt> {
    raw.iter().map(|s| s.parse().unwrap()).collect()
}

pub fn controller() -> ConnectorCapabilities {
    ConnectorCapabilities {
        id: "controller".into(),
        name: "Cartridge Controller".into(),
        randomness_wrapping: false,
    }
}

pub fn argent() -> ConnectorCapabilities {
    ConnectorCapabilities {
        id: "argentX".into(),
        name: "Argent X".into(),
        randomness_wrapping: false,
    }
}

/// Wallet connector with scripted submission results.
pub struct FakeConnector {
    pub connection: Option<Connection>,
    pub capabilities: Option<ConnectorCapabilities>,
    results: Mutex<VecDeque<Result<Felt, SubmitError>>>,
    submitted: Mutex<Vec<CallSequence>>,
}

impl FakeConnector {
    pub fn new(address: Felt, capabilities: ConnectorCapabilities) -> Self {
        Self {
            connection: Some(Connection { address }),
            capabilities: Some(capabilities),
            results: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connection: None,
            capabilities: None,
            results: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn then_return(self, result: Result<Felt, SubmitError>) -> Self {
        self.results.lock().unwrap().push_back(result);
        self
    }

    pub fn submitted(&self) -> Vec<CallSequence> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletConnector for FakeConnector {
    fn active_connection(&self) -> Option<Connection> {
        self.connection.clone()
    }

    fn capabilities(&self) -> Option<ConnectorCapabilities> {
        self.capabilities.clone()
    }

    async fn submit(&self, calls: &CallSequence) -> Result<Felt, SubmitError> {
        self.submitted.lock().unwrap().push(calls.clone());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SubmitError::new("no scripted result")))
    }
}

/// Chain reader that counts calls and answers with a settable response.
pub struct CountingReader {
    response: Mutex<Vec<Felt>>,
    latency: Duration,
    calls: AtomicUsize,
}

impl CountingReader {
    pub fn new(response: &[&str]) -> Arc<Self> {
        Self::with_latency(response, Duration::ZERO)
    }

    pub fn with_latency(response: &[&str], latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(felts(response)),
            latency,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn set_response(&self, response: &[&str]) {
        *self.response.lock().unwrap() = felts(response);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainReader for CountingReader {
    async fn call(
        &self,
        _contract_address: Felt,
        _entrypoint: &str,
        calldata: &[Felt],
    ) -> BlockchainResult<Vec<Felt>> {
        assert!(calldata.is_empty());
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.response.lock().unwrap().clone())
    }
}

/// Start a mock JSON-RPC node. `f` receives the request body and returns
/// `(status, body)`.
pub async fn start_rpc_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let request = read_request_body(&mut socket).await;
                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_request_body(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.trim()
                        .eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                return String::from_utf8_lossy(&buf[header_end + 4..]).into_owned();
            }
        }
    }
    String::new()
}
