use crate::messages::ClientRequest;
use crate::model::{Sector, UnknownSector};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Move,
    DirectFlight,
    Treat,
    Build,
    Cure,
    ShareKnowledge,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParamField {
    Destination,
    Color,
    Card,
    Cards,
    TargetPlayer,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Move,
        ActionKind::DirectFlight,
        ActionKind::Treat,
        ActionKind::Build,
        ActionKind::Cure,
        ActionKind::ShareKnowledge,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            ActionKind::Move => "move",
            ActionKind::DirectFlight => "direct_flight",
            ActionKind::Treat => "treat",
            ActionKind::Build => "build",
            ActionKind::Cure => "cure",
            ActionKind::ShareKnowledge => "share_knowledge",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Move => "Move",
            ActionKind::DirectFlight => "Direct Flight",
            ActionKind::Treat => "Treat Infestation",
            ActionKind::Build => "Build Command Base",
            ActionKind::Cure => "Discover Containment",
            ActionKind::ShareKnowledge => "Share Knowledge",
        }
    }

    pub fn fields(&self) -> &'static [ParamField] {
        match self {
            ActionKind::Move => &[ParamField::Destination],
            ActionKind::DirectFlight => &[ParamField::Destination, ParamField::Card],
            ActionKind::Treat => &[ParamField::Color],
            ActionKind::Build => &[],
            ActionKind::Cure => &[ParamField::Color, ParamField::Cards],
            ActionKind::ShareKnowledge => &[ParamField::TargetPlayer, ParamField::Card],
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ParamField {
    pub fn key(&self) -> &'static str {
        match self {
            ParamField::Destination => "destination",
            ParamField::Color => "color",
            ParamField::Card => "card_id",
            ParamField::Cards => "card_ids",
            ParamField::TargetPlayer => "target_player_id",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ParamField::Destination => "Destination planet",
            ParamField::Color => "Infestation color",
            ParamField::Card => "Card",
            ParamField::Cards => "Cards",
            ParamField::TargetPlayer => "Player",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("No action selected")]
    NoAction,
    #[error("{0} is not a parameter of this action")]
    NotApplicable(&'static str),
    #[error("Missing {0}")]
    Missing(&'static str),
    #[error(transparent)]
    Color(#[from] UnknownSector),
}

// Parameters for the action the player is about to submit. Choosing a new
// action type always starts from an empty form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionForm {
    kind: Option<ActionKind>,
    params: Map<String, Value>,
}

impl ActionForm {
    pub fn select(&mut self, kind: ActionKind) {
        self.kind = Some(kind);
        self.params.clear();
    }

    pub fn reset(&mut self) {
        self.kind = None;
        self.params.clear();
    }

    pub fn kind(&self) -> Option<ActionKind> {
        self.kind
    }

    pub fn fields(&self) -> &'static [ParamField] {
        self.kind.map(|k| k.fields()).unwrap_or(&[])
    }

    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn text(&self, field: ParamField) -> Option<&str> {
        self.params.get(field.key()).and_then(Value::as_str)
    }

    fn check_field(&self, field: ParamField) -> Result<(), FormError> {
        if self.kind.is_none() {
            return Err(FormError::NoAction);
        }
        if !self.fields().contains(&field) {
            return Err(FormError::NotApplicable(field.key()));
        }
        Ok(())
    }

    // Blank input clears the field
    pub fn set_text(&mut self, field: ParamField, value: &str) -> Result<(), FormError> {
        self.check_field(field)?;
        let value = value.trim();
        if value.is_empty() {
            self.params.remove(field.key());
            return Ok(());
        }
        let value = match field {
            ParamField::Color => value.parse::<Sector>()?.as_str().to_string(),
            _ => value.to_string(),
        };
        self.params.insert(field.key().to_string(), Value::String(value));
        Ok(())
    }

    pub fn toggle_card(&mut self, card_id: &str) -> Result<(), FormError> {
        self.check_field(ParamField::Cards)?;
        let mut cards = self.selected_cards();
        match cards.iter().position(|c| c == card_id) {
            Some(idx) => {
                cards.remove(idx);
            }
            None => cards.push(card_id.to_string()),
        }
        self.params.insert(
            ParamField::Cards.key().to_string(),
            Value::Array(cards.into_iter().map(Value::String).collect()),
        );
        Ok(())
    }

    pub fn selected_cards(&self) -> Vec<String> {
        self.params
            .get(ParamField::Cards.key())
            .and_then(Value::as_array)
            .map(|cards| {
                cards
                    .iter()
                    .filter_map(|c| c.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn missing(&self) -> Vec<ParamField> {
        self.fields()
            .iter()
            .copied()
            .filter(|field| match self.params.get(field.key()) {
                Some(Value::Array(items)) => items.is_empty(),
                Some(_) => false,
                None => true,
            })
            .collect()
    }

    pub fn is_ready(&self) -> bool {
        self.kind.is_some() && self.missing().is_empty()
    }

    pub fn submission(&self) -> Result<ClientRequest, FormError> {
        let kind = self.kind.ok_or(FormError::NoAction)?;
        if let Some(field) = self.missing().first() {
            return Err(FormError::Missing(field.label()));
        }
        Ok(ClientRequest::PlayerAction {
            action: kind.wire_name().to_string(),
            params: self.params.clone(),
        })
    }
}
