mod frame;
mod pending;

pub use frame::{
    game_topic, socket_url, Frame, FrameError, ReplyPayload, ReplyStatus, HEARTBEAT, PHOENIX_TOPIC,
    PHX_CLOSE, PHX_ERROR, PHX_JOIN, PHX_LEAVE, PHX_REPLY, VSN,
};
pub use pending::{await_reply, PendingReplies, Reply, ReplyReceiver};

use crate::messages::{ChannelError, ClientRequest, ServerEvent};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
#[error("Transport closed")]
pub struct TransportError;

// The socket underneath a channel. Implementations queue text frames for
// the connection and close it.
pub trait Transport {
    fn send(&self, text: String) -> Result<(), TransportError>;
    fn close(&self);
}

#[derive(Error, Debug)]
pub enum PushError {
    #[error("Channel not connected")]
    NotConnected,
    #[error("Request timed out")]
    Timeout,
    #[error("Connection closed before a reply arrived")]
    Disconnected,
    #[error("Request rejected: {0}")]
    Rejected(ChannelError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Frame(#[from] FrameError),
}

impl PushError {
    pub fn rejection(&self) -> Option<&ChannelError> {
        match self {
            PushError::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChannelStatus {
    Idle,
    Joining,
    Joined,
    Errored,
    // Closed by the server
    Closed,
    // Torn down by this client
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChannelEvent {
    Joined,
    JoinRejected(ChannelError),
    Server(ServerEvent),
    Errored,
    Closed,
}

// Client side of one `game:<id>` channel
pub struct GameChannel<T: Transport> {
    transport: T,
    topic: String,
    join_ref: Option<String>,
    next_ref: u64,
    pending: PendingReplies,
    status: ChannelStatus,
}

impl<T: Transport> GameChannel<T> {
    pub fn new(transport: T, game_id: &str) -> Self {
        GameChannel {
            transport,
            topic: game_topic(game_id),
            join_ref: None,
            next_ref: 0,
            pending: PendingReplies::default(),
            status: ChannelStatus::Idle,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn status(&self) -> ChannelStatus {
        self.status
    }

    pub fn is_joined(&self) -> bool {
        self.status == ChannelStatus::Joined
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    fn make_ref(&mut self) -> String {
        self.next_ref += 1;
        self.next_ref.to_string()
    }

    fn send(&mut self, event: &str, payload: Value) -> Result<String, PushError> {
        let msg_ref = self.make_ref();
        let frame = Frame {
            join_ref: self.join_ref.clone(),
            msg_ref: Some(msg_ref.clone()),
            topic: self.topic.clone(),
            event: event.to_string(),
            payload,
        };
        self.transport.send(frame.encode()?)?;
        Ok(msg_ref)
    }

    pub fn join(&mut self) -> Result<(), PushError> {
        match self.status {
            ChannelStatus::Idle | ChannelStatus::Errored | ChannelStatus::Closed => {}
            ChannelStatus::Joining | ChannelStatus::Joined => return Ok(()),
            ChannelStatus::Left => return Err(PushError::NotConnected),
        }
        // A join's own ref becomes the join ref of everything sent after it
        let join_ref = (self.next_ref + 1).to_string();
        self.join_ref = Some(join_ref);
        self.send(PHX_JOIN, json!({}))?;
        self.status = ChannelStatus::Joining;
        info!("joining {}", self.topic);
        Ok(())
    }

    pub fn push(&mut self, request: &ClientRequest) -> Result<ReplyReceiver, PushError> {
        if self.status != ChannelStatus::Joined {
            return Err(PushError::NotConnected);
        }
        let msg_ref = self.send(request.event(), request.payload())?;
        debug!("pushed {} with ref {}", request.event(), msg_ref);
        Ok(self.pending.register(msg_ref))
    }

    pub fn heartbeat(&mut self) -> Result<(), PushError> {
        if self.status == ChannelStatus::Left {
            return Err(PushError::NotConnected);
        }
        let msg_ref = self.make_ref();
        self.transport.send(Frame::heartbeat(msg_ref).encode()?)?;
        Ok(())
    }

    pub fn handle_text(&mut self, text: &str) -> Option<ChannelEvent> {
        match Frame::decode(text) {
            Ok(frame) => self.handle_frame(frame),
            Err(err) => {
                warn!("dropping frame on {}: {}", self.topic, err);
                None
            }
        }
    }

    pub fn handle_frame(&mut self, frame: Frame) -> Option<ChannelEvent> {
        if self.status == ChannelStatus::Left {
            return None;
        }
        if frame.topic == PHOENIX_TOPIC {
            // heartbeat acknowledgement
            return None;
        }
        if frame.topic != self.topic {
            debug!("ignoring frame for {}", frame.topic);
            return None;
        }
        if let (Some(frame_join), Some(current)) = (&frame.join_ref, &self.join_ref) {
            if frame_join != current {
                debug!("ignoring frame from an earlier join of {}", self.topic);
                return None;
            }
        }
        match frame.event.as_str() {
            PHX_REPLY => self.handle_reply(frame),
            PHX_ERROR => {
                warn!("channel {} crashed on the server", self.topic);
                self.status = ChannelStatus::Errored;
                self.pending.fail_all();
                Some(ChannelEvent::Errored)
            }
            PHX_CLOSE => {
                info!("channel {} closed by the server", self.topic);
                self.status = ChannelStatus::Closed;
                self.pending.fail_all();
                Some(ChannelEvent::Closed)
            }
            event => match ServerEvent::decode(event, frame.payload) {
                Ok(Some(server_event)) => Some(ChannelEvent::Server(server_event)),
                Ok(None) => {
                    debug!("ignoring unhandled event {}", event);
                    None
                }
                Err(err) => {
                    warn!("failed to decode {} payload: {}", event, err);
                    None
                }
            },
        }
    }

    fn handle_reply(&mut self, frame: Frame) -> Option<ChannelEvent> {
        let msg_ref = frame.msg_ref?;
        let reply: ReplyPayload = match serde_json::from_value(frame.payload) {
            Ok(reply) => reply,
            Err(err) => {
                warn!("malformed reply to ref {}: {}", msg_ref, err);
                return None;
            }
        };
        if self.status == ChannelStatus::Joining && self.join_ref.as_deref() == Some(&msg_ref) {
            return match reply.status {
                ReplyStatus::Ok => {
                    info!("joined {}", self.topic);
                    self.status = ChannelStatus::Joined;
                    Some(ChannelEvent::Joined)
                }
                _ => {
                    let err = ChannelError::from_payload(reply.response);
                    warn!("failed to join {}: {}", self.topic, err);
                    self.status = ChannelStatus::Errored;
                    Some(ChannelEvent::JoinRejected(err))
                }
            };
        }
        let reply = match reply.status {
            ReplyStatus::Ok => Reply::Ok(reply.response),
            ReplyStatus::Error | ReplyStatus::Unknown => Reply::Error(reply.response),
        };
        self.pending.resolve(&msg_ref, reply);
        None
    }

    // The socket underneath failed or closed on its own
    pub fn transport_lost(&mut self) {
        if self.status == ChannelStatus::Left {
            return;
        }
        warn!("lost connection for {}", self.topic);
        self.status = ChannelStatus::Errored;
        self.pending.fail_all();
    }

    // Leaves the channel and closes the socket. Only the first call does
    // anything; returns whether this call tore the channel down.
    pub fn teardown(&mut self) -> bool {
        if self.status == ChannelStatus::Left {
            return false;
        }
        if matches!(self.status, ChannelStatus::Joining | ChannelStatus::Joined) {
            if let Err(err) = self.send(PHX_LEAVE, json!({})) {
                debug!("could not send leave for {}: {}", self.topic, err);
            }
        }
        self.pending.fail_all();
        self.transport.close();
        self.status = ChannelStatus::Left;
        info!("left {}", self.topic);
        true
    }
}

impl<T: Transport> Drop for GameChannel<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GameStatus;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MockTransport {
        sent: Rc<RefCell<Vec<String>>>,
        closes: Rc<Cell<usize>>,
        broken: Rc<Cell<bool>>,
    }

    impl Transport for MockTransport {
        fn send(&self, text: String) -> Result<(), TransportError> {
            if self.broken.get() {
                return Err(TransportError);
            }
            self.sent.borrow_mut().push(text);
            Ok(())
        }

        fn close(&self) {
            self.closes.set(self.closes.get() + 1);
        }
    }

    impl MockTransport {
        fn last_frame(&self) -> Frame {
            Frame::decode(self.sent.borrow().last().unwrap()).unwrap()
        }
    }

    fn joined_channel() -> (GameChannel<MockTransport>, MockTransport) {
        let transport = MockTransport::default();
        let mut channel = GameChannel::new(transport.clone(), "42");
        channel.join().unwrap();
        let event = channel.handle_text(
            r#"["1","1","game:42","phx_reply",{"status":"ok","response":{}}]"#,
        );
        assert_eq!(event, Some(ChannelEvent::Joined));
        (channel, transport)
    }

    #[test]
    fn test_join() {
        let transport = MockTransport::default();
        let mut channel = GameChannel::new(transport.clone(), "42");
        channel.join().unwrap();
        assert_eq!(channel.status(), ChannelStatus::Joining);
        let frame = transport.last_frame();
        assert_eq!(frame.event, PHX_JOIN);
        assert_eq!(frame.join_ref, frame.msg_ref);
        assert_eq!(frame.topic, "game:42");
        let event = channel.handle_text(
            r#"["1","1","game:42","phx_reply",{"status":"ok","response":{}}]"#,
        );
        assert_eq!(event, Some(ChannelEvent::Joined));
        assert!(channel.is_joined());
    }

    #[test]
    fn test_join_rejected() {
        let transport = MockTransport::default();
        let mut channel = GameChannel::new(transport, "42");
        channel.join().unwrap();
        let event = channel.handle_text(
            r#"["1","1","game:42","phx_reply",{"status":"error","response":{"reason":"unauthorized"}}]"#,
        );
        assert_eq!(
            event,
            Some(ChannelEvent::JoinRejected(ChannelError::with_reason("unauthorized")))
        );
        assert_eq!(channel.status(), ChannelStatus::Errored);
    }

    #[test]
    fn test_push_before_join() {
        let mut channel = GameChannel::new(MockTransport::default(), "42");
        let result = channel.push(&ClientRequest::EndTurn);
        assert!(matches!(result, Err(PushError::NotConnected)));
    }

    #[test]
    fn test_push_and_reply() {
        let (mut channel, transport) = joined_channel();
        let mut rx = channel
            .push(&ClientRequest::ChatMessage {
                message: "hello".to_string(),
            })
            .unwrap();
        let frame = transport.last_frame();
        assert_eq!(frame.event, "chat_message");
        assert_eq!(frame.join_ref.as_deref(), Some("1"));
        assert_eq!(frame.msg_ref.as_deref(), Some("2"));
        assert_eq!(channel.pending_replies(), 1);

        let event = channel.handle_text(
            r#"["1","2","game:42","phx_reply",{"status":"ok","response":{"sent":true}}]"#,
        );
        assert_eq!(event, None);
        assert_eq!(
            rx.try_recv().unwrap(),
            Some(Reply::Ok(json!({"sent": true})))
        );
        assert_eq!(channel.pending_replies(), 0);
    }

    #[test]
    fn test_must_discard_reply() {
        let (mut channel, _transport) = joined_channel();
        let mut rx = channel.push(&ClientRequest::EndTurn).unwrap();
        channel.handle_text(
            r#"["1","2","game:42","phx_reply",{"status":"error","response":{"reason":"must_discard","hand_size":10}}]"#,
        );
        match rx.try_recv().unwrap() {
            Some(Reply::Error(payload)) => {
                assert_eq!(ChannelError::from_payload(payload).discard_required(), Some(3))
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_server_events() {
        let (mut channel, _transport) = joined_channel();
        let event = channel.handle_text(
            r#"[null,null,"game:42","lobby_updated",{"game":{"id":42,"status":"lobby","players":[]}}]"#,
        );
        assert!(matches!(
            event,
            Some(ChannelEvent::Server(ServerEvent::LobbyUpdated(ref g)))
                if g.status == GameStatus::Lobby
        ));
        // Other topics, stale joins, unknown events and garbage are dropped
        assert_eq!(
            channel.handle_text(r#"[null,null,"game:7","chat_message",{}]"#),
            None
        );
        assert_eq!(
            channel.handle_text(r#"["0",null,"game:42","game_started",{"game":{"id":42}}]"#),
            None
        );
        assert_eq!(
            channel.handle_text(r#"[null,null,"game:42","presence_state",{}]"#),
            None
        );
        assert_eq!(channel.handle_text("{"), None);
    }

    #[test]
    fn test_phx_error_fails_pending() {
        let (mut channel, _transport) = joined_channel();
        let mut rx = channel.push(&ClientRequest::GetState).unwrap();
        let event = channel.handle_text(r#"["1","1","game:42","phx_error",{}]"#);
        assert_eq!(event, Some(ChannelEvent::Errored));
        assert!(rx.try_recv().is_err());
        assert!(matches!(
            channel.push(&ClientRequest::GetState),
            Err(PushError::NotConnected)
        ));
    }

    #[test]
    fn test_transport_failure() {
        let (mut channel, transport) = joined_channel();
        transport.broken.set(true);
        assert!(matches!(
            channel.push(&ClientRequest::EndTurn),
            Err(PushError::Transport(_))
        ));
        channel.transport_lost();
        assert_eq!(channel.status(), ChannelStatus::Errored);
    }

    #[test]
    fn test_heartbeat() {
        let (mut channel, transport) = joined_channel();
        channel.heartbeat().unwrap();
        let frame = transport.last_frame();
        assert_eq!(frame.topic, PHOENIX_TOPIC);
        assert_eq!(frame.event, HEARTBEAT);
        let reply = channel.handle_text(
            r#"[null,"2","phoenix","phx_reply",{"status":"ok","response":{}}]"#,
        );
        assert_eq!(reply, None);
    }

    #[test]
    fn test_teardown_closes_once() {
        let (mut channel, transport) = joined_channel();
        let mut rx = channel.push(&ClientRequest::GetValidMoves).unwrap();
        assert!(channel.teardown());
        assert_eq!(transport.last_frame().event, PHX_LEAVE);
        assert_eq!(transport.closes.get(), 1);
        assert!(rx.try_recv().is_err());

        assert!(!channel.teardown());
        drop(channel);
        assert_eq!(transport.closes.get(), 1);
        let leaves = transport
            .sent
            .borrow()
            .iter()
            .filter(|t| t.contains(PHX_LEAVE))
            .count();
        assert_eq!(leaves, 1);
    }

    #[test]
    fn test_drop_closes_once() {
        let transport = MockTransport::default();
        let channel = GameChannel::new(transport.clone(), "42");
        drop(channel);
        assert_eq!(transport.closes.get(), 1);
        // Never joined, so there was nothing to leave
        assert!(transport.sent.borrow().is_empty());
    }

    #[test]
    fn test_no_traffic_after_teardown() {
        let (mut channel, transport) = joined_channel();
        channel.teardown();
        let sent = transport.sent.borrow().len();
        assert!(matches!(
            channel.push(&ClientRequest::EndTurn),
            Err(PushError::NotConnected)
        ));
        assert!(channel.heartbeat().is_err());
        assert!(channel.join().is_err());
        let late = channel.handle_text(
            r#"[null,null,"game:42","chat_message",{"player_id":1,"player_name":"a","message":"b"}]"#,
        );
        assert_eq!(late, None);
        assert_eq!(transport.sent.borrow().len(), sent);
    }
}
