use crate::model::card::Card;
use crate::model::id::{null_as_default, optional_string_or_number, string_or_number};
use crate::model::role::Role;
use crate::model::HAND_LIMIT;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Player {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_default")]
    pub turn_order: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions_remaining: u32,
    #[serde(
        default,
        alias = "current_planet_id",
        deserialize_with = "optional_string_or_number"
    )]
    pub current_city_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cards: Vec<Card>,
}

impl Player {
    // Seats are numbered from one on screen
    pub fn seat_label(&self) -> String {
        format!("Player {}", self.turn_order + 1)
    }

    pub fn location(&self) -> Option<&str> {
        self.current_city_id.as_deref()
    }

    pub fn hand_size(&self) -> usize {
        self.cards.len()
    }

    pub fn over_hand_limit(&self) -> bool {
        self.cards.len() > HAND_LIMIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_fields_take_defaults() {
        let player: Player = serde_json::from_value(json!({
            "id": 3,
            "user_id": 8,
            "role": null,
            "turn_order": null,
            "actions_remaining": null,
            "current_city_id": null,
            "cards": null,
        }))
        .unwrap();
        assert_eq!(player.role, Role::default());
        assert_eq!(player.turn_order, 0);
        assert_eq!(player.seat_label(), "Player 1");
        assert_eq!(player.location(), None);
        assert_eq!(player.hand_size(), 0);
        assert!(!player.over_hand_limit());
    }
}
