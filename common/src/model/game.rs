use crate::model::id::{optional_string_or_number, string_or_number};
use crate::model::role::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MAX_PLAYERS: u32 = 4;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Lobby,
    #[serde(alias = "in_progress", alias = "playing")]
    Active,
    Won,
    Lost,
    #[serde(other)]
    Unknown,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Lobby => "lobby",
            GameStatus::Active => "active",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
            GameStatus::Unknown => "unknown",
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    #[serde(other)]
    Unknown,
}

impl Difficulty {
    pub const CHOICES: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Unknown => "unknown",
        }
    }

    pub fn from_choice(s: &str) -> Option<Difficulty> {
        Difficulty::CHOICES.into_iter().find(|d| d.as_str() == s)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LobbyPlayer {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub turn_order: Option<u32>,
}

impl LobbyPlayer {
    pub fn display_name(&self) -> String {
        match &self.username {
            Some(name) => name.clone(),
            None => format!("User #{}", self.user_id),
        }
    }
}

// A game as described by the REST API and by lobby pushes. Pushes may omit
// fields only the REST API carries (name, max players), see `merge_push`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GameInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(
        default,
        alias = "created_by_id",
        deserialize_with = "optional_string_or_number"
    )]
    pub creator_id: Option<String>,
    #[serde(default)]
    pub max_players: Option<u32>,
    #[serde(default)]
    pub players: Vec<LobbyPlayer>,
}

impl GameInfo {
    pub fn title(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("Game #{}", self.id),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.max_players.unwrap_or(DEFAULT_MAX_PLAYERS)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player_count_label(&self) -> String {
        format!("{}/{}", self.players.len(), self.capacity())
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.capacity() as usize
    }

    pub fn has_user(&self, user_id: &str) -> bool {
        self.players.iter().any(|p| p.user_id == user_id)
    }

    pub fn is_creator(&self, user_id: &str) -> bool {
        self.creator_id.as_deref() == Some(user_id)
    }

    pub fn join_label(&self) -> &'static str {
        if self.status == GameStatus::Lobby {
            "Join Game"
        } else {
            "View Game"
        }
    }

    // Lobby pushes are authoritative for the roster and status, the REST
    // response for everything a push leaves out.
    pub fn merge_push(&mut self, pushed: GameInfo) {
        self.status = pushed.status;
        self.difficulty = pushed.difficulty;
        self.players = pushed.players;
        if pushed.creator_id.is_some() {
            self.creator_id = pushed.creator_id;
        }
        if pushed.name.is_some() {
            self.name = pushed.name;
        }
        if pushed.max_players.is_some() {
            self.max_players = pushed.max_players;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lobby_game(players: usize) -> GameInfo {
        GameInfo {
            id: "12".to_string(),
            name: None,
            status: GameStatus::Lobby,
            difficulty: Difficulty::Normal,
            creator_id: Some("1".to_string()),
            max_players: None,
            players: (0..players)
                .map(|i| LobbyPlayer {
                    id: format!("p{}", i),
                    user_id: (i + 1).to_string(),
                    username: None,
                    role: None,
                    turn_order: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_deserialize_rest_game() {
        let json = r#"{
            "id": 12,
            "status": "lobby",
            "difficulty": "hard",
            "created_by_id": 5,
            "players": [{"id": 1, "user_id": 5, "role": null, "turn_order": null}]
        }"#;
        let game: GameInfo = serde_json::from_str(json).unwrap();
        assert_eq!(game.id, "12");
        assert_eq!(game.difficulty, Difficulty::Hard);
        assert_eq!(game.creator_id.as_deref(), Some("5"));
        assert_eq!(game.title(), "Game #12");
        assert_eq!(game.player_count_label(), "1/4");
        assert_eq!(game.join_label(), "Join Game");
    }

    #[test]
    fn test_unknown_status_and_difficulty() {
        let game: GameInfo = serde_json::from_str(
            r#"{"id": "1", "status": "paused", "difficulty": "nightmare"}"#,
        )
        .unwrap();
        assert_eq!(game.status, GameStatus::Unknown);
        assert_eq!(game.difficulty, Difficulty::Unknown);
        assert_eq!(game.join_label(), "View Game");
    }

    #[test]
    fn test_is_full() {
        assert!(!lobby_game(3).is_full());
        assert!(lobby_game(4).is_full());
        let mut small = lobby_game(2);
        small.max_players = Some(2);
        assert!(small.is_full());
    }

    #[test]
    fn test_merge_push_keeps_rest_only_fields() {
        let mut game = lobby_game(1);
        game.name = Some("Outer Rim".to_string());
        game.max_players = Some(3);
        let mut pushed = lobby_game(2);
        pushed.creator_id = None;
        game.merge_push(pushed);
        assert_eq!(game.players.len(), 2);
        assert_eq!(game.name.as_deref(), Some("Outer Rim"));
        assert_eq!(game.max_players, Some(3));
        assert_eq!(game.creator_id.as_deref(), Some("1"));
    }
}
