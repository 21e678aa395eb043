use crate::model::id::string_or_number;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
#[error("Unknown sector color: {0}")]
pub struct UnknownSector(pub String);

// The four infestation strains, one per galaxy sector
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Blue,
    Yellow,
    Black,
    Red,
}

impl Sector {
    pub const ALL: [Sector; 4] = [Sector::Blue, Sector::Yellow, Sector::Black, Sector::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Blue => "blue",
            Sector::Yellow => "yellow",
            Sector::Black => "black",
            Sector::Red => "red",
        }
    }

    pub fn sector_name(&self) -> &'static str {
        match self {
            Sector::Blue => "Orion",
            Sector::Yellow => "Hydra",
            Sector::Black => "Nebula",
            Sector::Red => "Phoenix",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Sector::Blue => "#3B82F6",
            Sector::Yellow => "#EAB308",
            Sector::Black => "#1F2937",
            Sector::Red => "#EF4444",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = UnknownSector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sector::ALL
            .into_iter()
            .find(|sector| sector.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSector(s.to_string()))
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    #[serde(alias = "planet")]
    City,
    // A "spread" event card
    Epidemic,
    #[serde(other)]
    Other,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Card {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    card_type: CardType,
    #[serde(default, alias = "planet_name")]
    city_name: Option<String>,
    #[serde(default, alias = "planet_color")]
    city_color: Option<Sector>,
}

impl Card {
    pub fn new(
        id: String,
        card_type: CardType,
        name: Option<String>,
        color: Option<Sector>,
    ) -> Self {
        Card {
            id,
            card_type,
            city_name: name,
            city_color: color,
        }
    }

    pub fn planet(id: &str, name: &str, color: Sector) -> Self {
        Card::new(id.to_string(), CardType::City, Some(name.to_string()), Some(color))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    pub fn planet_name(&self) -> Option<&str> {
        self.city_name.as_deref()
    }

    pub fn color(&self) -> Option<Sector> {
        self.city_color
    }

    pub fn is_spread(&self) -> bool {
        self.card_type == CardType::Epidemic
    }

    pub fn label(&self) -> String {
        if self.is_spread() {
            "SPREAD".to_string()
        } else {
            self.city_name.clone().unwrap_or_else(|| "Unknown".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sector() {
        assert_eq!("Blue".parse::<Sector>(), Ok(Sector::Blue));
        assert_eq!(" red ".parse::<Sector>(), Ok(Sector::Red));
        assert_eq!(
            "green".parse::<Sector>(),
            Err(UnknownSector("green".to_string()))
        );
    }

    #[test]
    fn test_deserialize_card_field_aliases() {
        let city: Card = serde_json::from_str(
            r#"{"id": 3, "card_type": "city", "city_name": "Cryos", "city_color": "blue"}"#,
        )
        .unwrap();
        let planet: Card = serde_json::from_str(
            r#"{"id": "3", "card_type": "planet", "planet_name": "Cryos", "planet_color": "blue"}"#,
        )
        .unwrap();
        assert_eq!(city, planet);
        assert_eq!(city.label(), "Cryos");
        assert_eq!(city.color(), Some(Sector::Blue));
    }

    #[test]
    fn test_spread_card_label() {
        let card: Card = serde_json::from_str(
            r#"{"id": "e1", "card_type": "epidemic", "city_name": null, "city_color": null}"#,
        )
        .unwrap();
        assert!(card.is_spread());
        assert_eq!(card.label(), "SPREAD");

        let odd: Card = serde_json::from_str(r#"{"id": "x", "card_type": "event"}"#).unwrap();
        assert_eq!(odd.card_type(), CardType::Other);
        assert_eq!(odd.label(), "Unknown");
    }
}
