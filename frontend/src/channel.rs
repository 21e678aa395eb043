use common::channel::{
    await_reply, socket_url, ChannelEvent, ChannelStatus, GameChannel, PushError, Transport,
    TransportError,
};
use common::messages::ClientRequest;
use common::ClientConfig;
use futures::channel::mpsc::{self, UnboundedSender};
use futures::{Future, SinkExt, StreamExt};
use gloo::timers::callback::Interval;
use gloo::timers::future::TimeoutFuture;
use reqwasm::websocket::{futures::WebSocket, Message};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, error, info};
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

enum Outgoing {
    Text(String),
    Close,
}

// Queues frames for the writer task that owns the socket's sink
pub struct WsTransport {
    tx: UnboundedSender<Outgoing>,
}

impl Transport for WsTransport {
    fn send(&self, text: String) -> Result<(), TransportError> {
        self.tx
            .unbounded_send(Outgoing::Text(text))
            .map_err(|_| TransportError)
    }

    fn close(&self) {
        if self.tx.unbounded_send(Outgoing::Close).is_err() {
            debug!("socket writer already gone");
        }
        self.tx.close_channel();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChannelUpdate {
    Event(ChannelEvent),
    Lost(String),
}

fn millis(duration: Duration) -> u32 {
    duration.as_millis().try_into().unwrap_or(u32::MAX)
}

// One socket and one joined `game:<id>` channel. Dropping it tears both down.
pub struct GameConnection {
    channel: Rc<RefCell<GameChannel<WsTransport>>>,
    push_timeout: Duration,
    heartbeat: Option<Interval>,
}

impl GameConnection {
    pub fn open(
        config: &ClientConfig,
        game_id: &str,
        token: &str,
        on_update: Callback<ChannelUpdate>,
    ) -> anyhow::Result<GameConnection> {
        let url = socket_url(&config.ws_url, token)?;
        let ws = WebSocket::open(&url).map_err(|e| anyhow::anyhow!("{}", e))?;
        let (mut write, mut read) = ws.split();

        let (tx, mut rx) = mpsc::unbounded::<Outgoing>();
        spawn_local(async move {
            while let Some(out) = rx.next().await {
                match out {
                    Outgoing::Text(text) => {
                        if let Err(e) = write.send(Message::Text(text)).await {
                            error!("ws send: {:?}", e);
                            break;
                        }
                    }
                    Outgoing::Close => {
                        if let Err(e) = write.close().await {
                            debug!("ws close: {:?}", e);
                        }
                        break;
                    }
                }
            }
        });

        let channel = Rc::new(RefCell::new(GameChannel::new(WsTransport { tx }, game_id)));
        channel.borrow_mut().join()?;

        let reader = channel.clone();
        spawn_local(async move {
            while let Some(msg) = read.next().await {
                let text = match msg {
                    Ok(Message::Text(text)) => text,
                    Ok(Message::Bytes(bytes)) => match String::from_utf8(bytes) {
                        Ok(text) => text,
                        Err(_) => continue,
                    },
                    Err(e) => {
                        error!("ws: {:?}", e);
                        break;
                    }
                };
                let event = reader.borrow_mut().handle_text(&text);
                if let Some(event) = event {
                    on_update.emit(ChannelUpdate::Event(event));
                }
            }
            let was_live = reader.borrow().status() != ChannelStatus::Left;
            reader.borrow_mut().transport_lost();
            if was_live {
                on_update.emit(ChannelUpdate::Lost("WebSocket connection error".to_string()));
            }
            debug!("WebSocket closed");
        });

        let beat = channel.clone();
        let heartbeat = Interval::new(millis(config.heartbeat_interval), move || {
            if let Err(err) = beat.borrow_mut().heartbeat() {
                debug!("heartbeat skipped: {}", err);
            }
        });

        info!("connecting to game {}", game_id);
        Ok(GameConnection {
            channel,
            push_timeout: config.push_timeout,
            heartbeat: Some(heartbeat),
        })
    }

    // Sends now and resolves with the reply. The returned future doesn't
    // borrow the connection.
    pub fn push(
        &self,
        request: &ClientRequest,
    ) -> impl Future<Output = Result<Value, PushError>> + 'static {
        let rx = self.channel.borrow_mut().push(request);
        let timeout = TimeoutFuture::new(millis(self.push_timeout));
        async move { await_reply(rx?, timeout).await }
    }

    pub fn is_joined(&self) -> bool {
        self.channel.borrow().is_joined()
    }

    pub fn teardown(&mut self) -> bool {
        self.heartbeat.take();
        self.channel.borrow_mut().teardown()
    }
}

impl Drop for GameConnection {
    fn drop(&mut self) {
        self.teardown();
    }
}
