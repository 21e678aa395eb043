use crate::model::GameSnapshot;

pub const SNAPSHOT: &str = r#"{
    "game": {
        "id": "g1",
        "status": "active",
        "difficulty": "normal",
        "outbreak_count": 3,
        "infection_rate_index": 2
    },
    "players": [
        {
            "id": "p1",
            "user_id": 10,
            "role": "combat_medic",
            "turn_order": 0,
            "actions_remaining": 4,
            "current_city_id": "Nova Haven",
            "cards": [
                {"id": "c1", "card_type": "city", "city_name": "Cryos", "city_color": "blue"},
                {"id": "c2", "card_type": "city", "city_name": "Avalon", "city_color": "blue"}
            ]
        },
        {
            "id": "p2",
            "user_id": 11,
            "role": "xenobiologist",
            "turn_order": 1,
            "actions_remaining": 0,
            "current_city_id": "Nova Haven",
            "cards": []
        }
    ],
    "state": {
        "infection_rate": 3,
        "outbreak_count": 3,
        "research_stations": ["Nova Haven"],
        "cure_markers": {"blue": "cured", "yellow": "not_cured", "black": "eradicated", "red": "not_cured"},
        "disease_cubes": {"blue": 20, "yellow": 18, "black": 24, "red": 22},
        "city_infections": {"Cryos": {"blue": 2}, "Atlas Base": {"black": 1, "red": 1}}
    },
    "current_player_id": "p2",
    "turn_number": 7
}"#;

pub fn snapshot() -> GameSnapshot {
    serde_json::from_str(SNAPSHOT).unwrap()
}
