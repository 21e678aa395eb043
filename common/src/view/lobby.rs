use crate::model::{GameInfo, GameStatus};

pub const MIN_PLAYERS: usize = 2;

// What the page has to fetch again after a push
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Refresh {
    Nothing,
    GameAndState,
}

// Reconciles the game fetched over REST with lobby pushes from the channel
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LobbyView {
    game: Option<GameInfo>,
}

impl LobbyView {
    pub fn load(&mut self, info: GameInfo) {
        self.game = Some(info);
    }

    // Fetches race the route: a reply for a game we've navigated away
    // from is dropped
    pub fn load_for(&mut self, game_id: &str, info: GameInfo) -> bool {
        if info.id != game_id {
            return false;
        }
        self.load(info);
        true
    }

    pub fn game(&self) -> Option<&GameInfo> {
        self.game.as_ref()
    }

    fn merge(&mut self, pushed: GameInfo) {
        match self.game.as_mut() {
            Some(game) if game.id == pushed.id => game.merge_push(pushed),
            // Nothing fetched yet, the push is all there is
            _ => self.game = Some(pushed),
        }
    }

    pub fn lobby_updated(&mut self, pushed: GameInfo) -> Refresh {
        self.merge(pushed);
        Refresh::Nothing
    }

    // The started game has roles, a board and a snapshot the push doesn't
    // carry, so both get fetched again.
    pub fn game_started(&mut self, pushed: GameInfo) -> Refresh {
        self.merge(pushed);
        if let Some(game) = &mut self.game {
            if game.status == GameStatus::Lobby {
                game.status = GameStatus::Active;
            }
        }
        Refresh::GameAndState
    }

    pub fn is_waiting(&self) -> bool {
        self.game
            .as_ref()
            .map(|g| g.status == GameStatus::Lobby)
            .unwrap_or(false)
    }

    pub fn can_start(&self, user_id: &str) -> bool {
        match &self.game {
            Some(game) => {
                game.status == GameStatus::Lobby
                    && game.is_creator(user_id)
                    && game.player_count() >= MIN_PLAYERS
            }
            None => false,
        }
    }

    pub fn can_join(&self, user_id: &str) -> bool {
        match &self.game {
            Some(game) => {
                game.status == GameStatus::Lobby && !game.is_full() && !game.has_user(user_id)
            }
            None => false,
        }
    }
}

// Open lobbies first, newest first within each group
pub fn sorted_games(mut games: Vec<GameInfo>) -> Vec<GameInfo> {
    games.sort_by(|a, b| {
        let closed = |g: &GameInfo| g.status != GameStatus::Lobby;
        closed(a)
            .cmp(&closed(b))
            .then_with(|| numeric_id(b).cmp(&numeric_id(a)))
            .then_with(|| b.id.cmp(&a.id))
    });
    games
}

fn numeric_id(game: &GameInfo) -> Option<u64> {
    game.id.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LobbyPlayer;

    fn game(players: &[&str]) -> GameInfo {
        GameInfo {
            id: "7".to_string(),
            name: Some("Outer Rim".to_string()),
            status: GameStatus::Lobby,
            difficulty: Default::default(),
            creator_id: Some("1".to_string()),
            max_players: Some(3),
            players: players
                .iter()
                .map(|user_id| LobbyPlayer {
                    id: format!("p{}", user_id),
                    user_id: user_id.to_string(),
                    username: Some(format!("user{}", user_id)),
                    role: None,
                    turn_order: None,
                })
                .collect(),
        }
    }

    fn pushed(players: &[&str]) -> GameInfo {
        let mut pushed = game(players);
        pushed.name = None;
        pushed.max_players = None;
        pushed
    }

    #[test]
    fn test_push_updates_roster() {
        let mut lobby = LobbyView::default();
        lobby.load(game(&["1"]));
        assert!(!lobby.can_start("1"));
        assert_eq!(lobby.lobby_updated(pushed(&["1", "2"])), Refresh::Nothing);
        let merged = lobby.game().unwrap();
        assert_eq!(merged.players.len(), 2);
        assert_eq!(merged.name.as_deref(), Some("Outer Rim"));
        assert_eq!(merged.player_count_label(), "2/3");
        assert!(lobby.can_start("1"));
        assert!(!lobby.can_start("2"));
    }

    #[test]
    fn test_push_before_fetch() {
        let mut lobby = LobbyView::default();
        lobby.lobby_updated(pushed(&["1", "2"]));
        assert_eq!(lobby.game().unwrap().player_count_label(), "2/4");
        lobby.load(game(&["1", "2"]));
        assert_eq!(lobby.game().unwrap().player_count_label(), "2/3");
    }

    #[test]
    fn test_push_for_other_game_replaces() {
        let mut lobby = LobbyView::default();
        lobby.load(game(&["1"]));
        let mut other = pushed(&["5"]);
        other.id = "8".to_string();
        lobby.lobby_updated(other);
        assert_eq!(lobby.game().unwrap().id, "8");
    }

    #[test]
    fn test_game_started_requests_refetch() {
        let mut lobby = LobbyView::default();
        lobby.load(game(&["1", "2"]));
        assert!(lobby.is_waiting());
        assert_eq!(
            lobby.game_started(pushed(&["1", "2"])),
            Refresh::GameAndState
        );
        assert!(!lobby.is_waiting());
        assert!(!lobby.can_start("1"));
    }

    #[test]
    fn test_stale_fetch_ignored() {
        let mut lobby = LobbyView::default();
        assert!(!lobby.load_for("8", game(&["1"])));
        assert!(lobby.game().is_none());
        assert!(lobby.load_for("7", game(&["1"])));
        assert_eq!(lobby.game().unwrap().id, "7");
    }

    #[test]
    fn test_can_join() {
        let mut lobby = LobbyView::default();
        assert!(!lobby.can_join("4"));
        lobby.load(game(&["1", "2"]));
        assert!(lobby.can_join("4"));
        assert!(!lobby.can_join("2"));
        lobby.lobby_updated(pushed(&["1", "2", "3"]));
        assert!(!lobby.can_join("4"));
    }

    #[test]
    fn test_sorted_games() {
        let mut started = game(&["1"]);
        started.id = "9".to_string();
        started.status = GameStatus::Active;
        let mut newer = game(&["1"]);
        newer.id = "12".to_string();
        let sorted = sorted_games(vec![game(&["1"]), started, newer]);
        let ids: Vec<&str> = sorted.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["12", "7", "9"]);
    }
}
