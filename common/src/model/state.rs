use crate::model::card::Sector;
use crate::model::game::{Difficulty, GameStatus};
use crate::model::id::{optional_string_or_number, string_or_number};
use crate::model::player::Player;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CureStatus {
    Cured,
    Eradicated,
    #[default]
    #[serde(other)]
    NotCured,
}

impl CureStatus {
    pub fn is_contained(&self) -> bool {
        matches!(self, CureStatus::Cured | CureStatus::Eradicated)
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoseReason {
    TooManyOutbreaks,
    InfestationSpread,
    TimeRanOut,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GameHeader {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub outbreak_count: u32,
    #[serde(default)]
    pub infection_rate_index: u32,
    #[serde(default)]
    pub lose_reason: Option<LoseReason>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct BoardState {
    #[serde(default)]
    pub infection_rate: u32,
    #[serde(default)]
    pub outbreak_count: u32,
    // Planets with a command base
    #[serde(default)]
    pub research_stations: Vec<String>,
    #[serde(default)]
    pub cure_markers: BTreeMap<Sector, CureStatus>,
    // Infestation markers left in the supply
    #[serde(default)]
    pub disease_cubes: BTreeMap<Sector, u32>,
    #[serde(default)]
    pub city_infections: BTreeMap<String, BTreeMap<Sector, u32>>,
}

impl BoardState {
    pub fn cure_status(&self, sector: Sector) -> CureStatus {
        self.cure_markers.get(&sector).copied().unwrap_or_default()
    }

    pub fn markers_remaining(&self, sector: Sector) -> u32 {
        self.disease_cubes.get(&sector).copied().unwrap_or(0)
    }

    pub fn has_command_base(&self, planet: &str) -> bool {
        self.research_stations.iter().any(|p| p == planet)
    }

    pub fn infestation(&self, planet: &str) -> Option<&BTreeMap<Sector, u32>> {
        self.city_infections.get(planet)
    }

    pub fn containments_achieved(&self) -> usize {
        self.cure_markers.values().filter(|s| s.is_contained()).count()
    }
}

// Full server-authoritative snapshot, pushed as `game_state` and returned
// by `get_state` and the REST state endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub game: GameHeader,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub state: BoardState,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub current_player_id: Option<String>,
    #[serde(default)]
    pub turn_number: u32,
}

impl GameSnapshot {
    pub fn current_player(&self) -> Option<&Player> {
        let current = self.current_player_id.as_deref()?;
        self.players.iter().find(|p| p.id == current)
    }

    pub fn player_for_user(&self, user_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn is_users_turn(&self, user_id: &str) -> bool {
        self.current_player()
            .map(|p| p.user_id == user_id)
            .unwrap_or(false)
    }
}
