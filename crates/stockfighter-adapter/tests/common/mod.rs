/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for stockfighter-adapter tests

#![allow(dead_code)]

use futures_util::SinkExt;
use stockfighter_adapter::{ClientConfig, StockfighterClient};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_ACCOUNT: &str = "EXB123456";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client whose REST and level APIs both point at the mock server
pub fn client_for(server: &MockServer) -> StockfighterClient {
    let config = ClientConfig::new(TEST_API_KEY)
        .with_rest_url(format!("{}/ob/api", server.uri()))
        .with_gm_url(format!("{}/gm", server.uri()));
    StockfighterClient::with_config(config).expect("client init")
}

/// Client whose stream URL points at a local WebSocket server
pub fn stream_client(addr: &str) -> StockfighterClient {
    let config = ClientConfig::new(TEST_API_KEY).with_stream_url(format!("ws://{addr}/ob/api/ws"));
    StockfighterClient::with_config(config).expect("client init")
}

/// What the server saw during the opening handshake
#[derive(Debug, Clone)]
pub struct Handshake {
    pub path: String,
    pub api_key: Option<String>,
}

/// What the stream server does next
#[derive(Debug)]
pub enum ServerAction {
    /// Push a frame to the client
    Frame(Message),
    /// Close with a proper close handshake
    Close,
    /// Drop the TCP stream without a close handshake
    Abort,
}

pub type FrameSender = mpsc::UnboundedSender<ServerAction>;

/// One-connection WebSocket server.
///
/// Returns the bound address, the captured handshake and a sender that
/// pushes frames to the connected client.
pub async fn spawn_stream_server() -> (String, oneshot::Receiver<Handshake>, FrameSender) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr").to_string();
    let (handshake_tx, handshake_rx) = oneshot::channel();
    let (frame_tx, mut frame_rx) = mpsc::unbounded_channel::<ServerAction>();

    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };

        let callback = move |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
            let _ = handshake_tx.send(Handshake {
                path: request.uri().path().to_string(),
                api_key: request
                    .headers()
                    .get(stockfighter_adapter::DEFAULT_AUTH_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string),
            });
            Ok(response)
        };
        let Ok(mut socket) = tokio_tungstenite::accept_hdr_async(stream, callback).await else {
            return;
        };

        while let Some(action) = frame_rx.recv().await {
            match action {
                ServerAction::Frame(message) => {
                    if socket.send(message).await.is_err() {
                        return;
                    }
                }
                ServerAction::Close => {
                    let _ = socket.close(None).await;
                    return;
                }
                ServerAction::Abort => {
                    drop(socket);
                    return;
                }
            }
        }
    });

    (addr, handshake_rx, frame_tx)
}

pub fn quote_json(venue: &str, symbol: &str, bid: u64, ask: u64) -> serde_json::Value {
    serde_json::json!({
        "venue": venue,
        "symbol": symbol,
        "bid": bid,
        "bidSize": 100,
        "bidDepth": 300,
        "ask": ask,
        "askSize": 50,
        "askDepth": 120,
        "last": bid,
        "lastSize": 10,
        "lastTrade": "2015-07-13T05:38:17.33640392Z",
        "quoteTime": "2015-07-13T05:38:17.33640392Z"
    })
}

pub fn order_json(id: u64, direction: &str, price: u64, qty: u64, open: bool) -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "symbol": "FOOBAR",
        "venue": "TESTEX",
        "direction": direction,
        "originalQty": qty,
        "qty": if open { qty } else { 0 },
        "price": price,
        "orderType": "limit",
        "id": id,
        "account": TEST_ACCOUNT,
        "ts": "2015-07-05T22:16:18+00:00",
        "fills": [],
        "totalFilled": 0,
        "open": open
    })
}
