pub mod api;
pub mod channel;
pub mod config;
pub mod messages;
pub mod model;
pub mod session;
pub mod view;

#[cfg(test)]
mod fixtures;

pub use config::ClientConfig;
pub use model::{
    Card, CardType, CureStatus, Difficulty, GameInfo, GameSnapshot, GameStatus, LobbyPlayer,
    LoseReason, Planet, Player, Role, Sector, HAND_LIMIT, OUTBREAK_LIMIT,
};
