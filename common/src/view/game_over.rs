use crate::model::{Difficulty, GameSnapshot, GameStatus, LoseReason};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Outcome {
    Won,
    Lost(LoseReason),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Headline {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameOverSummary {
    pub outcome: Outcome,
    pub turn_number: u32,
    pub outbreak_count: u32,
    pub containments_achieved: usize,
    pub difficulty: Difficulty,
}

impl GameOverSummary {
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Option<GameOverSummary> {
        let outcome = match snapshot.game.status {
            GameStatus::Won => Outcome::Won,
            GameStatus::Lost => {
                Outcome::Lost(snapshot.game.lose_reason.unwrap_or(LoseReason::Unknown))
            }
            _ => return None,
        };
        Some(GameOverSummary {
            outcome,
            turn_number: snapshot.turn_number,
            outbreak_count: snapshot.state.outbreak_count,
            containments_achieved: snapshot.state.containments_achieved(),
            difficulty: snapshot.game.difficulty,
        })
    }

    pub fn is_victory(&self) -> bool {
        self.outcome == Outcome::Won
    }

    pub fn headline(&self) -> Headline {
        match self.outcome {
            Outcome::Won => Headline {
                title: "Victory!",
                description: "The galaxy has been saved!",
                icon: "🎉",
            },
            Outcome::Lost(LoseReason::TooManyOutbreaks) => Headline {
                title: "Too Many Outbreaks!",
                description: "The infestations have spread too rapidly. 8 outbreaks have occurred and the galaxy has fallen into chaos.",
                icon: "💥",
            },
            Outcome::Lost(LoseReason::InfestationSpread) => Headline {
                title: "Infestation Spread Too Fast!",
                description: "An infestation has spread beyond control. There are no more infestation markers available.",
                icon: "🦠",
            },
            Outcome::Lost(LoseReason::TimeRanOut) => Headline {
                title: "Time Ran Out!",
                description: "The team ran out of time. The player deck has been exhausted.",
                icon: "⏰",
            },
            Outcome::Lost(LoseReason::Unknown) => Headline {
                title: "Game Over",
                description: "The team was unable to save the galaxy.",
                icon: "❌",
            },
        }
    }
}
