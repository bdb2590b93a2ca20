/*
[INPUT]:  Subscription parameters, held account and API key header
[OUTPUT]: Real-time quotes and executions via channels or a handler callback
[POS]:    WebSocket layer - per-subscription connection lifecycle
[UPDATE]: When adding new channels or changing connection logic
*/

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::http::{Result, StockfighterClient};
use crate::types::StreamKind;
use crate::ws::channel::SubscriptionParams;
use crate::ws::message::{StreamError, StreamEvent, StreamMessage};

const EVENT_BUFFER: usize = 256;

/// Lifecycle of one subscription. Never goes back to `Connecting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SubscriptionState {
    Connecting = 0,
    Open = 1,
    Closed = 2,
}

impl From<u8> for SubscriptionState {
    fn from(value: u8) -> Self {
        match value {
            0 => SubscriptionState::Connecting,
            1 => SubscriptionState::Open,
            _ => SubscriptionState::Closed,
        }
    }
}

/// Disposable handle to a running subscription.
///
/// Dropping the handle tears the subscription down; `close` does the same
/// and waits until the socket is released. Use `detach` to keep the
/// subscription running without holding the handle.
#[derive(Debug)]
#[must_use = "dropping the handle closes the subscription"]
pub struct SubscriptionHandle {
    url: Url,
    state: Arc<AtomicU8>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl SubscriptionHandle {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn state(&self) -> SubscriptionState {
        SubscriptionState::from(self.state.load(Ordering::SeqCst))
    }

    pub fn is_closed(&self) -> bool {
        self.state() == SubscriptionState::Closed
    }

    /// Stop delivering events, close the socket and wait for the background
    /// tasks to finish.
    pub async fn close(mut self) {
        self.cancel.cancel();
        for task in self.tasks.drain(..) {
            let _ = task.await;
        }
    }

    /// Give up the handle and leave the subscription running until the
    /// server closes the socket.
    pub fn detach(mut self) {
        self.tasks.clear();
        // Drop now cancels a token nothing else observes.
        self.cancel = CancellationToken::new();
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Pull-based subscription: a lazy, non-restartable sequence of events.
#[derive(Debug)]
#[must_use = "dropping the subscription closes it"]
pub struct Subscription {
    events: mpsc::Receiver<StreamEvent>,
    handle: SubscriptionHandle,
}

impl Subscription {
    /// Next event; `None` once the subscription is closed and drained.
    pub async fn next(&mut self) -> Option<StreamEvent> {
        self.events.recv().await
    }

    pub fn url(&self) -> &Url {
        self.handle.url()
    }

    pub fn state(&self) -> SubscriptionState {
        self.handle.state()
    }

    pub async fn close(self) {
        self.handle.close().await;
    }

    pub fn into_parts(self) -> (mpsc::Receiver<StreamEvent>, SubscriptionHandle) {
        (self.events, self.handle)
    }
}

impl StockfighterClient {
    /// Open a subscription and return its event sequence.
    ///
    /// The connection is established in the background; the first event is
    /// `Open` or, on failure, `Error` followed by `Closed`. Must be called
    /// from within a tokio runtime.
    pub fn subscribe(&self, params: SubscriptionParams) -> Result<Subscription> {
        let account = self.account();
        let url = params.channel_url(&self.config().base_stream_url, account.as_deref())?;

        let mut request = url.as_str().into_client_request()?;
        let (header, value) = self.auth_header();
        request.headers_mut().insert(header.clone(), value.clone());

        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let state = Arc::new(AtomicU8::new(SubscriptionState::Connecting as u8));
        let cancel = CancellationToken::new();

        info!(
            kind = params.kind.as_str(),
            venue = params.venue.as_deref().unwrap_or("*"),
            stock = params.stock.as_deref().unwrap_or("*"),
            path = url.path(),
            "opening subscription"
        );

        let task = tokio::spawn(run_subscription(
            request,
            TaskState {
                kind: params.kind,
                event_tx,
                state: Arc::clone(&state),
                cancel: cancel.clone(),
            },
        ));

        Ok(Subscription {
            events: event_rx,
            handle: SubscriptionHandle {
                url,
                state,
                cancel,
                tasks: vec![task],
            },
        })
    }

    /// Open a subscription and invoke `on_event` for every event, in arrival
    /// order. Returns immediately.
    ///
    /// The subscription lives as long as the returned handle: dropping it
    /// closes the socket and stops further invocations. Call
    /// [`SubscriptionHandle::detach`] for a fire-and-forget subscription.
    pub fn websocket<F>(&self, params: SubscriptionParams, mut on_event: F) -> Result<SubscriptionHandle>
    where
        F: FnMut(StreamEvent) + Send + 'static,
    {
        let (mut events, mut handle) = self.subscribe(params)?.into_parts();
        let cancel = handle.cancel.clone();

        let relay = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    event = events.recv() => match event {
                        Some(event) => on_event(event),
                        None => break,
                    },
                }
            }
        });
        handle.tasks.push(relay);

        Ok(handle)
    }
}

struct TaskState {
    kind: StreamKind,
    event_tx: mpsc::Sender<StreamEvent>,
    state: Arc<AtomicU8>,
    cancel: CancellationToken,
}

impl TaskState {
    fn set_state(&self, state: SubscriptionState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    /// Deliver an event; false when the consumer is gone or teardown started.
    async fn emit(&self, event: StreamEvent) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            sent = self.event_tx.send(event) => sent.is_ok(),
        }
    }

    /// Mark the subscription closed and report it. `Closed` waits for buffer
    /// space unless teardown was requested.
    async fn finish(&self) {
        self.set_state(SubscriptionState::Closed);
        if self.cancel.is_cancelled() {
            let _ = self.event_tx.try_send(StreamEvent::Closed);
        } else {
            self.emit(StreamEvent::Closed).await;
        }
    }
}

async fn run_subscription(request: Request, task: TaskState) {
    let path = request.uri().path().to_string();

    let connected = tokio::select! {
        _ = task.cancel.cancelled() => {
            task.finish().await;
            return;
        }
        result = connect_async(request) => result,
    };

    let ws_stream = match connected {
        Ok((ws_stream, _response)) => ws_stream,
        Err(err) => {
            warn!(path = %path, error = %err, "subscription connect failed");
            task.emit(StreamEvent::Error(StreamError::Connect(err.to_string())))
                .await;
            task.finish().await;
            return;
        }
    };

    task.set_state(SubscriptionState::Open);
    info!(path = %path, "subscription open");

    let (mut write, mut read) = ws_stream.split();
    let mut delivering = task.emit(StreamEvent::Open).await;

    while delivering {
        tokio::select! {
            _ = task.cancel.cancelled() => {
                let _ = write.send(WsMessage::Close(None)).await;
                break;
            }
            incoming = read.next() => {
                match incoming {
                    Some(Ok(WsMessage::Text(text))) => {
                        delivering = task.emit(decode_event(task.kind, text.as_str())).await;
                    }
                    Some(Ok(WsMessage::Binary(bytes))) => {
                        let event = match std::str::from_utf8(&bytes) {
                            Ok(text) => decode_event(task.kind, text),
                            Err(err) => StreamEvent::Error(StreamError::Malformed {
                                reason: err.to_string(),
                                raw: String::from_utf8_lossy(&bytes).into_owned(),
                            }),
                        };
                        delivering = task.emit(event).await;
                    }
                    Some(Ok(WsMessage::Close(frame))) => {
                        debug!(path = %path, frame = ?frame, "server closed subscription");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        warn!(path = %path, error = %err, "subscription transport failed");
                        task.emit(StreamEvent::Error(StreamError::Transport(err.to_string())))
                            .await;
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    if !delivering {
        let _ = write.send(WsMessage::Close(None)).await;
    }
    task.finish().await;
    info!(path = %path, "subscription closed");
}

fn decode_event(kind: StreamKind, text: &str) -> StreamEvent {
    match StreamMessage::decode(kind, text) {
        Ok(message) => StreamEvent::Message(message),
        Err(err) => {
            debug!(kind = kind.as_str(), bytes = text.len(), error = %err, "frame decode failed");
            StreamEvent::Error(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_round_trips_through_u8() {
        for state in [
            SubscriptionState::Connecting,
            SubscriptionState::Open,
            SubscriptionState::Closed,
        ] {
            assert_eq!(SubscriptionState::from(state as u8), state);
        }
    }

    #[tokio::test]
    async fn stock_without_venue_fails_before_connecting() {
        let client = StockfighterClient::new("key").expect("client init");
        let result = client.subscribe(SubscriptionParams::tickertape().with_stock("FOOBAR"));
        assert!(result.is_err());
    }
}
