use crate::messages::ChatMessage;
use crate::model::{
    planet, planet_position, Card, CureStatus, GameSnapshot, Player, Sector, OUTBREAK_LIMIT,
    PLANETS,
};
use crate::view::chat::ChatLog;
use crate::view::game_over::GameOverSummary;
use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq)]
pub struct Counters {
    pub turn_number: u32,
    pub outbreaks: u32,
    pub outbreak_limit: u32,
    pub infestation_rate: u32,
    pub containment: Vec<(Sector, CureStatus)>,
    pub markers_remaining: Vec<(Sector, u32)>,
}

impl Counters {
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Counters {
        let state = &snapshot.state;
        Counters {
            turn_number: snapshot.turn_number,
            outbreaks: state.outbreak_count,
            outbreak_limit: OUTBREAK_LIMIT,
            infestation_rate: state.infection_rate,
            containment: Sector::ALL
                .into_iter()
                .map(|s| (s, state.cure_status(s)))
                .collect(),
            markers_remaining: Sector::ALL
                .into_iter()
                .map(|s| (s, state.markers_remaining(s)))
                .collect(),
        }
    }

    pub fn outbreak_label(&self) -> String {
        format!("{} / {}", self.outbreaks, self.outbreak_limit)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pawn {
    pub player_id: String,
    pub seat: u32,
    pub color: &'static str,
    pub is_current: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlanetMarker {
    pub name: String,
    pub sector: Option<Sector>,
    pub x: f32,
    pub y: f32,
    pub infestations: Vec<(Sector, u32)>,
    pub command_base: bool,
    pub pawns: Vec<Pawn>,
}

// Everything the game board page shows, rebuilt from whatever arrived last
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardView {
    snapshot: Option<GameSnapshot>,
    chat: ChatLog,
    connected: bool,
    error: Option<String>,
}

impl BoardView {
    pub fn apply_snapshot(&mut self, snapshot: GameSnapshot) {
        self.snapshot = Some(snapshot);
    }

    pub fn apply_snapshot_for(&mut self, game_id: &str, snapshot: GameSnapshot) -> bool {
        if snapshot.game.id != game_id {
            return false;
        }
        self.apply_snapshot(snapshot);
        true
    }

    pub fn push_chat(&mut self, message: ChatMessage) {
        self.chat.push(message);
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
        if connected {
            self.error = None;
        }
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.connected = false;
        self.error = Some(error.into());
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn counters(&self) -> Option<Counters> {
        self.snapshot.as_ref().map(Counters::from_snapshot)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.snapshot.as_ref()?.current_player()
    }

    pub fn is_viewer_turn(&self, user_id: &str) -> bool {
        self.snapshot
            .as_ref()
            .map(|s| s.is_users_turn(user_id))
            .unwrap_or(false)
    }

    pub fn viewer(&self, user_id: &str) -> Option<&Player> {
        self.snapshot.as_ref()?.player_for_user(user_id)
    }

    pub fn viewer_hand(&self, user_id: &str) -> &[Card] {
        self.viewer(user_id)
            .map(|p| p.cards.as_slice())
            .unwrap_or(&[])
    }

    pub fn players(&self) -> &[Player] {
        self.snapshot
            .as_ref()
            .map(|s| s.players.as_slice())
            .unwrap_or(&[])
    }

    pub fn players_at(&self, planet_name: &str) -> Vec<&Player> {
        self.players()
            .iter()
            .filter(|p| p.location() == Some(planet_name))
            .collect()
    }

    pub fn game_over(&self) -> Option<GameOverSummary> {
        self.snapshot.as_ref().and_then(GameOverSummary::from_snapshot)
    }

    // One marker per catalog planet, plus any planet the server mentions
    // that the catalog doesn't know
    pub fn markers(&self) -> Vec<PlanetMarker> {
        let snapshot = match &self.snapshot {
            Some(snapshot) => snapshot,
            None => return Vec::new(),
        };
        let state = &snapshot.state;
        let current = snapshot.current_player_id.as_deref();

        let mut extra: BTreeSet<&str> = BTreeSet::new();
        extra.extend(state.city_infections.keys().map(String::as_str));
        extra.extend(state.research_stations.iter().map(String::as_str));
        extra.extend(snapshot.players.iter().filter_map(|p| p.location()));
        extra.retain(|name| planet(name).is_none());

        PLANETS
            .iter()
            .map(|p| p.name)
            .chain(extra)
            .map(|name| {
                let (x, y) = planet_position(name);
                let infestations: Vec<(Sector, u32)> = state
                    .infestation(name)
                    .map(|counts| {
                        counts
                            .iter()
                            .filter(|(_, count)| **count > 0)
                            .map(|(sector, count)| (*sector, *count))
                            .collect()
                    })
                    .unwrap_or_default();
                let pawns: Vec<Pawn> = self
                    .players_at(name)
                    .into_iter()
                    .map(|p| Pawn {
                        player_id: p.id.clone(),
                        seat: p.turn_order + 1,
                        color: p.role.marker_color(),
                        is_current: Some(p.id.as_str()) == current,
                    })
                    .collect();
                PlanetMarker {
                    name: name.to_string(),
                    sector: planet(name).map(|p| p.sector),
                    x,
                    y,
                    infestations,
                    command_base: state.has_command_base(name),
                    pawns,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::snapshot;
    use crate::model::GameStatus;

    #[test]
    fn test_counters_match_snapshot() {
        let snapshot = snapshot();
        let mut view = BoardView::default();
        assert!(view.counters().is_none());
        view.apply_snapshot(snapshot.clone());
        let counters = view.counters().unwrap();
        assert_eq!(counters.outbreaks, snapshot.state.outbreak_count);
        assert_eq!(counters.infestation_rate, snapshot.state.infection_rate);
        assert_eq!(counters.turn_number, snapshot.turn_number);
        assert_eq!(counters.outbreak_label(), "3 / 8");
        for (sector, status) in &counters.containment {
            assert_eq!(*status, snapshot.state.cure_status(*sector));
        }
        assert_eq!(
            counters.containment,
            vec![
                (Sector::Blue, CureStatus::Cured),
                (Sector::Yellow, CureStatus::NotCured),
                (Sector::Black, CureStatus::Eradicated),
                (Sector::Red, CureStatus::NotCured),
            ]
        );
        assert_eq!(counters.markers_remaining[3], (Sector::Red, 22));
    }

    #[test]
    fn test_last_snapshot_wins() {
        let mut view = BoardView::default();
        view.apply_snapshot(snapshot());
        let mut later = snapshot();
        later.state.outbreak_count = 5;
        later.state.infection_rate = 4;
        later.turn_number = 8;
        view.apply_snapshot(later);
        let counters = view.counters().unwrap();
        assert_eq!(counters.outbreaks, 5);
        assert_eq!(counters.infestation_rate, 4);
        assert_eq!(counters.turn_number, 8);
    }

    #[test]
    fn test_snapshot_for_other_game_ignored() {
        let mut view = BoardView::default();
        assert!(!view.apply_snapshot_for("g2", snapshot()));
        assert!(view.counters().is_none());
        assert!(view.apply_snapshot_for("g1", snapshot()));
        assert!(view.counters().is_some());
    }

    #[test]
    fn test_viewer_turn_and_hand() {
        let mut view = BoardView::default();
        assert!(!view.is_viewer_turn("11"));
        view.apply_snapshot(snapshot());
        assert!(view.is_viewer_turn("11"));
        assert!(!view.is_viewer_turn("10"));
        assert_eq!(view.current_player().unwrap().seat_label(), "Player 2");
        assert_eq!(view.viewer_hand("10").len(), 2);
        assert!(view.viewer_hand("99").is_empty());
    }

    #[test]
    fn test_markers() {
        let mut view = BoardView::default();
        let mut snapshot = snapshot();
        snapshot
            .state
            .city_infections
            .insert("Earth".to_string(), [(Sector::Red, 0)].into_iter().collect());
        view.apply_snapshot(snapshot);
        let markers = view.markers();
        assert_eq!(markers.len(), PLANETS.len() + 1);

        let nova = markers.iter().find(|m| m.name == "Nova Haven").unwrap();
        assert!(nova.command_base);
        assert_eq!(nova.pawns.len(), 2);
        assert!(nova.pawns.iter().any(|p| p.is_current && p.seat == 2));

        let atlas = markers.iter().find(|m| m.name == "Atlas Base").unwrap();
        assert_eq!(atlas.infestations, vec![(Sector::Black, 1), (Sector::Red, 1)]);

        let earth = markers.iter().find(|m| m.name == "Earth").unwrap();
        assert_eq!((earth.x, earth.y), (50.0, 50.0));
        assert_eq!(earth.sector, None);
        assert!(earth.infestations.is_empty());
    }

    #[test]
    fn test_connection_banner() {
        let mut view = BoardView::default();
        view.set_error("WebSocket connection error");
        assert!(!view.is_connected());
        assert_eq!(view.error(), Some("WebSocket connection error"));
        view.set_connected(true);
        assert_eq!(view.error(), None);
    }

    #[test]
    fn test_game_over() {
        let mut view = BoardView::default();
        view.apply_snapshot(snapshot());
        assert!(view.game_over().is_none());
        let mut done = snapshot();
        done.game.status = GameStatus::Won;
        view.apply_snapshot(done);
        assert!(view.game_over().unwrap().is_victory());
    }
}
