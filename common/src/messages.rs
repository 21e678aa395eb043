use crate::model::{string_or_number, GameInfo, GameSnapshot, Sector, HAND_LIMIT};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

pub const MUST_DISCARD: &str = "must_discard";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatMessage {
    #[serde(deserialize_with = "string_or_number")]
    pub player_id: String,
    pub player_name: String,
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Deserialize)]
struct LobbyPayload {
    game: GameInfo,
}

// Events the server pushes to everyone on a game channel
#[derive(Clone, Debug, PartialEq)]
pub enum ServerEvent {
    GameState(Box<GameSnapshot>),
    ChatMessage(ChatMessage),
    LobbyUpdated(GameInfo),
    GameStarted(GameInfo),
}

impl ServerEvent {
    // Returns Ok(None) for events this client doesn't handle
    pub fn decode(event: &str, payload: Value) -> Result<Option<ServerEvent>, serde_json::Error> {
        let decoded = match event {
            "game_state" => ServerEvent::GameState(Box::new(serde_json::from_value(payload)?)),
            "chat_message" => ServerEvent::ChatMessage(serde_json::from_value(payload)?),
            "lobby_updated" => {
                let LobbyPayload { game } = serde_json::from_value(payload)?;
                ServerEvent::LobbyUpdated(game)
            }
            "game_started" => {
                let LobbyPayload { game } = serde_json::from_value(payload)?;
                ServerEvent::GameStarted(game)
            }
            _ => return Ok(None),
        };
        Ok(Some(decoded))
    }
}

// Requests a client sends over the channel. Each one gets a reply.
#[derive(Clone, Debug, PartialEq)]
pub enum ClientRequest {
    PlayerAction {
        action: String,
        params: Map<String, Value>,
    },
    EndTurn,
    ChatMessage {
        message: String,
    },
    DiscardCards {
        card_ids: Vec<String>,
    },
    GetState,
    GetValidMoves,
}

impl ClientRequest {
    pub fn event(&self) -> &'static str {
        match self {
            ClientRequest::PlayerAction { .. } => "player_action",
            ClientRequest::EndTurn => "end_turn",
            ClientRequest::ChatMessage { .. } => "chat_message",
            ClientRequest::DiscardCards { .. } => "discard_cards",
            ClientRequest::GetState => "get_state",
            ClientRequest::GetValidMoves => "get_valid_moves",
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            ClientRequest::PlayerAction { action, params } => {
                json!({ "action": action, "params": params })
            }
            ClientRequest::ChatMessage { message } => json!({ "message": message }),
            ClientRequest::DiscardCards { card_ids } => json!({ "card_ids": card_ids }),
            ClientRequest::EndTurn | ClientRequest::GetState | ClientRequest::GetValidMoves => {
                json!({})
            }
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Destination {
    pub name: String,
    #[serde(default)]
    pub color: Option<Sector>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ValidMoves {
    #[serde(default, alias = "planets")]
    pub cities: Vec<Destination>,
}

impl ValidMoves {
    pub fn contains(&self, name: &str) -> bool {
        self.cities.iter().any(|d| d.name == name)
    }
}

// Payload of an `error` reply
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ChannelError {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub hand_size: Option<usize>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ChannelError {
    pub fn with_reason(reason: &str) -> Self {
        ChannelError {
            reason: Some(reason.to_string()),
            ..Default::default()
        }
    }

    // Error replies aren't guaranteed to be objects; anything else keeps
    // its text as the reason.
    pub fn from_payload(payload: Value) -> Self {
        match payload {
            Value::Object(_) => serde_json::from_value(payload).unwrap_or_default(),
            Value::String(reason) => ChannelError {
                reason: Some(reason),
                ..Default::default()
            },
            Value::Null => ChannelError::default(),
            other => ChannelError {
                reason: Some(other.to_string()),
                ..Default::default()
            },
        }
    }

    pub fn is_must_discard(&self) -> bool {
        self.reason.as_deref() == Some(MUST_DISCARD)
    }

    // Number of cards to shed before the turn can end
    pub fn discard_required(&self) -> Option<usize> {
        if !self.is_must_discard() {
            return None;
        }
        self.hand_size
            .map(|hand_size| hand_size.saturating_sub(HAND_LIMIT))
    }
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.reason, self.hand_size) {
            (Some(reason), Some(hand_size)) => write!(f, "{} (hand size {})", reason, hand_size),
            (Some(reason), None) => f.write_str(reason),
            (None, _) => f.write_str("unknown error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GameStatus;

    #[test]
    fn test_decode_server_events() {
        let chat = ServerEvent::decode(
            "chat_message",
            json!({"player_id": 3, "player_name": "Ripley", "message": "hi", "timestamp": "now"}),
        )
        .unwrap();
        assert!(matches!(chat, Some(ServerEvent::ChatMessage(ref m)) if m.player_id == "3"));

        let lobby = ServerEvent::decode(
            "lobby_updated",
            json!({"game": {"id": 9, "status": "lobby", "players": []}}),
        )
        .unwrap();
        assert!(matches!(lobby, Some(ServerEvent::LobbyUpdated(ref g)) if g.id == "9"));

        let started = ServerEvent::decode(
            "game_started",
            json!({"game": {"id": 9, "status": "active"}}),
        )
        .unwrap();
        assert!(matches!(
            started,
            Some(ServerEvent::GameStarted(ref g)) if g.status == GameStatus::Active
        ));

        assert_eq!(ServerEvent::decode("presence_diff", json!({})).unwrap(), None);
        assert!(ServerEvent::decode("game_state", json!({"bad": true})).is_err());
    }

    #[test]
    fn test_game_state_with_null_player_fields() {
        let mut payload: Value = serde_json::from_str(crate::fixtures::SNAPSHOT).unwrap();
        payload["players"][1]["role"] = Value::Null;
        payload["players"][1]["turn_order"] = Value::Null;

        let event = ServerEvent::decode("game_state", payload).unwrap();
        let snapshot = match event {
            Some(ServerEvent::GameState(snapshot)) => snapshot,
            other => panic!("expected game_state, got {:?}", other),
        };
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.players[1].turn_order, 0);
        assert_eq!(snapshot.players[0].role.as_str(), "combat_medic");
    }

    #[test]
    fn test_request_payloads() {
        let mut params = Map::new();
        params.insert("destination".to_string(), json!("Cryos"));
        let action = ClientRequest::PlayerAction {
            action: "move".to_string(),
            params,
        };
        assert_eq!(action.event(), "player_action");
        assert_eq!(
            action.payload(),
            json!({"action": "move", "params": {"destination": "Cryos"}})
        );

        let discard = ClientRequest::DiscardCards {
            card_ids: vec!["c1".to_string(), "c2".to_string()],
        };
        assert_eq!(discard.payload(), json!({"card_ids": ["c1", "c2"]}));
        assert_eq!(ClientRequest::EndTurn.payload(), json!({}));
        assert_eq!(ClientRequest::GetValidMoves.event(), "get_valid_moves");
    }

    #[test]
    fn test_valid_moves_alias() {
        let moves: ValidMoves = serde_json::from_value(
            json!({"planets": [{"name": "Cryos", "color": "blue"}]}),
        )
        .unwrap();
        assert!(moves.contains("Cryos"));
        assert!(!moves.contains("Avalon"));
    }

    #[test]
    fn test_discard_required() {
        let err = ChannelError::from_payload(json!({"reason": "must_discard", "hand_size": 9}));
        assert!(err.is_must_discard());
        assert_eq!(err.discard_required(), Some(2));

        let at_limit =
            ChannelError::from_payload(json!({"reason": "must_discard", "hand_size": 5}));
        assert_eq!(at_limit.discard_required(), Some(0));

        let other = ChannelError::from_payload(json!({"reason": "not_your_turn"}));
        assert_eq!(other.discard_required(), None);
        assert_eq!(other.to_string(), "not_your_turn");
    }

    #[test]
    fn test_error_payload_shapes() {
        assert_eq!(
            ChannelError::from_payload(json!("unauthorized")).reason.as_deref(),
            Some("unauthorized")
        );
        assert_eq!(ChannelError::from_payload(Value::Null), ChannelError::default());
        let detailed = ChannelError::from_payload(json!({"reason": "invalid", "field": "x"}));
        assert_eq!(detailed.details.get("field"), Some(&json!("x")));
    }
}
