mod action;
mod board;
mod chat;
mod discard;
mod game_over;
mod lobby;

pub use action::{ActionForm, ActionKind, FormError, ParamField};
pub use board::{BoardView, Counters, Pawn, PlanetMarker};
pub use chat::{outgoing_message, ChatLog};
pub use discard::DiscardFlow;
pub use game_over::{GameOverSummary, Headline, Outcome};
pub use lobby::{sorted_games, LobbyView, Refresh, MIN_PLAYERS};
