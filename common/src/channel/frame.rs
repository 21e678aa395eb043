use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

pub const VSN: &str = "2.0.0";
pub const PHOENIX_TOPIC: &str = "phoenix";

pub const PHX_JOIN: &str = "phx_join";
pub const PHX_LEAVE: &str = "phx_leave";
pub const PHX_REPLY: &str = "phx_reply";
pub const PHX_ERROR: &str = "phx_error";
pub const PHX_CLOSE: &str = "phx_close";
pub const HEARTBEAT: &str = "heartbeat";

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Invalid socket parameters: {0}")]
    Params(#[from] serde_urlencoded::ser::Error),
}

// One message on the socket, encoded as
// `[join_ref, ref, topic, event, payload]`
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub join_ref: Option<String>,
    pub msg_ref: Option<String>,
    pub topic: String,
    pub event: String,
    pub payload: Value,
}

impl Serialize for Frame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            &self.join_ref,
            &self.msg_ref,
            &self.topic,
            &self.event,
            &self.payload,
        )
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Frame {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (join_ref, msg_ref, topic, event, payload) =
            <(Option<String>, Option<String>, String, String, Value)>::deserialize(deserializer)?;
        Ok(Frame {
            join_ref,
            msg_ref,
            topic,
            event,
            payload,
        })
    }
}

impl Frame {
    pub fn encode(&self) -> Result<String, FrameError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(text: &str) -> Result<Frame, FrameError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn heartbeat(msg_ref: String) -> Frame {
        Frame {
            join_ref: None,
            msg_ref: Some(msg_ref),
            topic: PHOENIX_TOPIC.to_string(),
            event: HEARTBEAT.to_string(),
            payload: Value::Object(Default::default()),
        }
    }
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Ok,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ReplyPayload {
    pub status: ReplyStatus,
    #[serde(default)]
    pub response: Value,
}

pub fn game_topic(game_id: &str) -> String {
    format!("game:{}", game_id)
}

// Mirrors the URL the Phoenix JS client builds: the transport suffix plus
// the connect params and serializer version as a query string.
pub fn socket_url(ws_url: &str, token: &str) -> Result<String, FrameError> {
    let params = [("token", token), ("vsn", VSN)];
    let query = serde_urlencoded::to_string(&params[..])?;
    Ok(format!("{}/websocket?{}", ws_url.trim_end_matches('/'), query))
}
