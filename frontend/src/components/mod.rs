pub mod action_panel;
pub mod chat;
pub mod counters;
pub mod discard;
pub mod galaxy_map;
pub mod game_over;
pub mod player_card;
