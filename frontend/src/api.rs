use common::api::{
    bearer, decode, decode_data, error_from_response, AcceptInvitationRequest, ApiError,
    AuthResponse, CreateGameRequest, Data, Endpoint, GameList, Invitation, InvitationRequest,
    LoginRequest, Method, NewGame, NewUser, RegisterRequest,
};
use common::session::Session;
use common::{ClientConfig, GameInfo, GameSnapshot};
use reqwasm::http::Request;
use serde::Serialize;
use tracing::{debug, warn};

// REST client for one session. Cheap to rebuild on every render.
#[derive(Clone, Debug, PartialEq)]
pub struct Api {
    base_url: String,
    token: Option<String>,
}

impl Api {
    pub fn new(config: &ClientConfig, session: Option<&Session>) -> Self {
        Api {
            base_url: config.api_url.clone(),
            token: session.map(|s| s.token.clone()),
        }
    }

    async fn fetch<B: Serialize>(
        &self,
        endpoint: Endpoint,
        body: Option<&B>,
        fallback: &str,
    ) -> Result<String, ApiError> {
        let url = endpoint.url(&self.base_url);
        let mut request = match endpoint.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        }
        .header("Content-Type", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", &bearer(token));
        }
        if let Some(body) = body {
            let json = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
            request = request.body(json);
        }
        debug!("{:?} {}", endpoint.method, endpoint.path);
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !(200..300).contains(&status) {
            let err = error_from_response(status, &text, fallback);
            warn!("{} failed with {}: {}", endpoint.path, status, err);
            return Err(err);
        }
        Ok(text)
    }

    pub async fn register(&self, user: NewUser) -> Result<Session, ApiError> {
        let body = RegisterRequest { user };
        let text = self
            .fetch(Endpoint::register(), Some(&body), "Registration failed")
            .await?;
        Ok(decode::<AuthResponse>(&text)?.into())
    }

    pub async fn login(&self, email: String, password: String) -> Result<Session, ApiError> {
        let body = LoginRequest { email, password };
        let text = self
            .fetch(
                Endpoint::login(),
                Some(&body),
                "Login failed. Please check your credentials.",
            )
            .await?;
        Ok(decode::<AuthResponse>(&text)?.into())
    }

    pub async fn create_game(&self, game: NewGame) -> Result<GameInfo, ApiError> {
        game.validate()?;
        let body = CreateGameRequest { game };
        let text = self
            .fetch(Endpoint::create_game(), Some(&body), "Failed to create game")
            .await?;
        Ok(decode::<Data<GameInfo>>(&text)?.data)
    }

    pub async fn list_games(&self) -> Result<Vec<GameInfo>, ApiError> {
        let text = self
            .fetch::<()>(Endpoint::list_games(), None, "Failed to load games")
            .await?;
        Ok(decode::<GameList>(&text)?.data)
    }

    pub async fn game(&self, game_id: &str) -> Result<GameInfo, ApiError> {
        let text = self
            .fetch::<()>(Endpoint::game(game_id), None, "Failed to load game")
            .await?;
        Ok(decode::<Data<GameInfo>>(&text)?.data)
    }

    pub async fn join_game(&self, game_id: &str) -> Result<(), ApiError> {
        self.fetch::<()>(Endpoint::join_game(game_id), None, "Failed to join game")
            .await?;
        Ok(())
    }

    pub async fn start_game(&self, game_id: &str) -> Result<(), ApiError> {
        self.fetch::<()>(Endpoint::start_game(game_id), None, "Failed to start game")
            .await?;
        Ok(())
    }

    pub async fn game_state(&self, game_id: &str) -> Result<GameSnapshot, ApiError> {
        let text = self
            .fetch::<()>(Endpoint::game_state(game_id), None, "Failed to load game state")
            .await?;
        decode_data(&text)
    }

    pub async fn create_invitation(
        &self,
        game_id: String,
        email: String,
    ) -> Result<Invitation, ApiError> {
        let body = InvitationRequest { game_id, email };
        let text = self
            .fetch(
                Endpoint::create_invitation(),
                Some(&body),
                "Failed to send invitation",
            )
            .await?;
        decode_data(&text)
    }

    pub async fn accept_invitation(&self, token: String) -> Result<Invitation, ApiError> {
        let body = AcceptInvitationRequest { token };
        let text = self
            .fetch(
                Endpoint::accept_invitation(),
                Some(&body),
                "Failed to accept invitation",
            )
            .await?;
        decode_data(&text)
    }
}
