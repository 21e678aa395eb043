use crate::model::{optional_string_or_number, string_or_number, Difficulty, GameInfo};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
}

impl Endpoint {
    fn get(path: String) -> Self {
        Endpoint {
            method: Method::Get,
            path,
        }
    }

    fn post(path: String) -> Self {
        Endpoint {
            method: Method::Post,
            path,
        }
    }

    pub fn register() -> Self {
        Self::post("/register".to_string())
    }

    pub fn login() -> Self {
        Self::post("/login".to_string())
    }

    pub fn create_game() -> Self {
        Self::post("/games".to_string())
    }

    pub fn list_games() -> Self {
        Self::get("/games".to_string())
    }

    pub fn game(game_id: &str) -> Self {
        Self::get(format!("/games/{}", game_id))
    }

    pub fn join_game(game_id: &str) -> Self {
        Self::post(format!("/games/{}/join", game_id))
    }

    pub fn start_game(game_id: &str) -> Self {
        Self::post(format!("/games/{}/start", game_id))
    }

    pub fn game_state(game_id: &str) -> Self {
        Self::get(format!("/games/{}/state", game_id))
    }

    pub fn create_invitation() -> Self {
        Self::post("/invitations".to_string())
    }

    pub fn accept_invitation() -> Self {
        Self::post("/invitations/accept".to_string())
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct RegisterRequest {
    pub user: NewUser,
}

// The backend accepts either a username or an email in `email`
#[derive(Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewGame {
    pub name: String,
    pub max_players: u32,
    pub difficulty: Difficulty,
}

#[derive(Serialize, Debug)]
pub struct CreateGameRequest {
    pub game: NewGame,
}

#[derive(Serialize, Debug)]
pub struct InvitationRequest {
    pub game_id: String,
    pub email: String,
}

#[derive(Serialize, Debug)]
pub struct AcceptInvitationRequest {
    pub token: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Invitation {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub id: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub game_id: String,
    #[serde(default)]
    pub token: Option<String>,
}

// Successful resource responses are wrapped in `{"data": ...}`
#[derive(Deserialize, Debug)]
pub struct Data<T> {
    pub data: T,
}

pub type GameList = Data<Vec<GameInfo>>;

#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

pub const MAX_PLAYER_CHOICES: [u32; 3] = [2, 3, 4];

impl NewGame {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(rejected_locally("Game name is required"));
        }
        if !MAX_PLAYER_CHOICES.contains(&self.max_players) {
            return Err(rejected_locally("Games hold between 2 and 4 players"));
        }
        Ok(())
    }
}

fn rejected_locally(message: &str) -> ApiError {
    ApiError::Rejected {
        status: 0,
        message: message.to_string(),
    }
}

// Turns a non-2xx response into an error. Uses the backend's `error` text
// when present and `fallback` otherwise.
pub fn error_from_response(status: u16, body: &str, fallback: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .error
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    if status == 401 {
        return ApiError::Unauthorized { message };
    }
    ApiError::Rejected { status, message }
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

pub fn decode<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeWrapped<T> {
    Wrapped(Data<T>),
    Bare(T),
}

// Accepts both `{"data": value}` and a bare value
pub fn decode_data<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, ApiError> {
    match decode::<MaybeWrapped<T>>(body)? {
        MaybeWrapped::Wrapped(data) => Ok(data.data),
        MaybeWrapped::Bare(value) => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(
            Endpoint::join_game("7").url("http://localhost:4000/api/"),
            "http://localhost:4000/api/games/7/join"
        );
        assert_eq!(Endpoint::game_state("7").path, "/games/7/state");
        assert_eq!(Endpoint::list_games().method, Method::Get);
        assert_eq!(Endpoint::accept_invitation().method, Method::Post);
    }

    #[test]
    fn test_request_bodies() {
        let register = RegisterRequest {
            user: NewUser {
                name: "ripley".to_string(),
                email: "ripley@example.com".to_string(),
                password: "hunter2".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&register).unwrap(),
            json!({
                "user": {"name": "ripley", "email": "ripley@example.com", "password": "hunter2"}
            })
        );
        let create = CreateGameRequest {
            game: NewGame {
                name: "Outer Rim".to_string(),
                max_players: 3,
                difficulty: Difficulty::Hard,
            },
        };
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            json!({"game": {"name": "Outer Rim", "max_players": 3, "difficulty": "hard"}})
        );
    }

    #[test]
    fn test_decode_game_list() {
        let list: GameList = decode(
            r#"{"data": [{"id": 1, "status": "lobby", "difficulty": "easy", "created_by_id": 2, "players": []}]}"#,
        )
        .unwrap();
        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].id, "1");
        assert!(matches!(decode::<GameList>("nope"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_error_from_response() {
        assert_eq!(
            error_from_response(422, r#"{"error": "Game is full"}"#, "Failed to join game"),
            ApiError::Rejected {
                status: 422,
                message: "Game is full".to_string()
            }
        );
        assert_eq!(
            error_from_response(500, "<html>", "Failed to join game").to_string(),
            "Failed to join game"
        );
        assert!(error_from_response(401, "{}", "Failed to join game").is_unauthorized());
    }

    #[test]
    fn test_unauthorized_keeps_message() {
        let err = error_from_response(
            401,
            r#"{"error": "Invalid email or password"}"#,
            "Login failed. Please check your credentials.",
        );
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid email or password");
        assert_eq!(
            error_from_response(401, "", "Login failed. Please check your credentials.")
                .to_string(),
            "Login failed. Please check your credentials."
        );
        assert!(!error_from_response(403, "{}", "Forbidden").is_unauthorized());
    }

    #[test]
    fn test_validate_new_game() {
        let mut game = NewGame {
            name: " ".to_string(),
            max_players: 2,
            difficulty: Difficulty::Normal,
        };
        assert!(game.validate().is_err());
        game.name = "Outer Rim".to_string();
        assert!(game.validate().is_ok());
        game.max_players = 6;
        assert!(game.validate().is_err());
    }

    #[test]
    fn test_decode_data_wrapped_or_bare() {
        let wrapped: Invitation = decode_data(r#"{"data": {"game_id": 3}}"#).unwrap();
        let bare: Invitation = decode_data(r#"{"game_id": "3", "token": "xyz"}"#).unwrap();
        assert_eq!(wrapped.game_id, "3");
        assert_eq!(bare.token.as_deref(), Some("xyz"));
        assert!(decode_data::<Invitation>("{}").is_err());
    }
}
