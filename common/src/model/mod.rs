mod card;
mod game;
mod id;
mod planet;
mod player;
mod role;
mod state;

pub use card::{Card, CardType, Sector, UnknownSector};
pub use game::{Difficulty, GameInfo, GameStatus, LobbyPlayer, DEFAULT_MAX_PLAYERS};
pub use id::{optional_string_or_number, string_or_number};
pub use planet::{planet, planet_position, Planet, MAP_CENTER, PLANETS};
pub use player::Player;
pub use role::Role;
pub use state::{BoardState, CureStatus, GameHeader, GameSnapshot, LoseReason};

// Cards a player may hold at the end of their turn
pub const HAND_LIMIT: usize = 7;

// The game is lost once this many outbreaks have occurred
pub const OUTBREAK_LIMIT: u32 = 8;
