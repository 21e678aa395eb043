use common::api::{ApiError, Invitation};
use common::channel::{ChannelEvent, PushError};
use common::messages::{ClientRequest, ServerEvent, ValidMoves};
use common::view::{
    ActionForm, ActionKind, BoardView, DiscardFlow, LobbyView, ParamField, Refresh,
};
use common::{ClientConfig, GameInfo, GameSnapshot, Player};
use serde_json::Value;
use std::fmt;
use tracing::{debug, error, info, warn};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::Api;
use crate::channel::{ChannelUpdate, GameConnection};
use crate::components::action_panel::ActionPanel;
use crate::components::chat::ChatPanel;
use crate::components::counters::CountersPanel;
use crate::components::discard::DiscardModal;
use crate::components::galaxy_map::GalaxyMap;
use crate::components::game_over::GameOverModal;
use crate::components::player_card::{CardBack, PlayerCard};
use crate::session::{check_unauthorized, SessionContext};
use crate::Route;

#[derive(Debug)]
pub enum Message {
    GameLoaded(String, Result<GameInfo, ApiError>),
    StateLoaded(String, Result<GameSnapshot, ApiError>),
    Channel(ChannelUpdate),
    ChannelState(Result<Value, PushError>),
    StartGame,
    JoinGame,
    LobbyRequestDone(Result<(), ApiError>),
    SelectAction(ActionKind),
    SetParam(ParamField, String),
    ToggleActionCard(String),
    SubmitAction,
    ActionReplied(Result<Value, PushError>),
    ValidMovesReplied(Result<Value, PushError>),
    EndTurn,
    EndTurnReplied(Result<Value, PushError>),
    ToggleDiscard(String),
    ConfirmDiscard,
    DiscardReplied(Result<Value, PushError>),
    SendChat(String),
    ChatReplied(Result<Value, PushError>),
    InviteEmail(String),
    SendInvite,
    InviteSent(Result<Invitation, ApiError>),
    CloseGameOver,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::GameLoaded(id, _) => write!(f, "GameLoaded: {}", id),
            Message::StateLoaded(id, _) => write!(f, "StateLoaded: {}", id),
            Message::Channel(update) => write!(f, "Channel: {:?}", update),
            Message::SelectAction(kind) => write!(f, "SelectAction: {}", kind),
            Message::SetParam(field, value) => write!(f, "SetParam: {:?} = {}", field, value),
            other => write!(f, "{:?}", other),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct GameProps {
    pub id: String,
}

pub struct GamePage {
    api: Api,
    config: ClientConfig,
    session: SessionContext,
    user_id: String,
    token: String,
    connection: Option<GameConnection>,
    lobby: LobbyView,
    board: BoardView,
    form: ActionForm,
    destinations: Option<ValidMoves>,
    discard: Option<DiscardFlow>,
    busy: bool,
    invite_email: String,
    invite_status: Option<String>,
    game_over_closed: bool,
}

fn alert(message: &str) {
    gloo::dialogs::alert(message);
}

impl GamePage {
    fn load(&self, ctx: &Context<Self>) {
        let id = ctx.props().id.clone();
        let api = self.api.clone();
        ctx.link().send_future(async move {
            let result = api.game(&id).await;
            Message::GameLoaded(id, result)
        });
        let id = ctx.props().id.clone();
        let api = self.api.clone();
        ctx.link().send_future(async move {
            let result = api.game_state(&id).await;
            Message::StateLoaded(id, result)
        });
    }

    fn connect(&mut self, ctx: &Context<Self>) {
        let on_update = ctx.link().callback(Message::Channel);
        match GameConnection::open(&self.config, &ctx.props().id, &self.token, on_update) {
            Ok(connection) => self.connection = Some(connection),
            Err(err) => {
                error!("could not open game connection: {:#}", err);
                self.board.set_error("WebSocket connection error");
            }
        }
    }

    fn disconnect(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            connection.teardown();
        }
    }

    fn reset(&mut self) {
        self.lobby = LobbyView::default();
        self.board = BoardView::default();
        self.form.reset();
        self.destinations = None;
        self.discard = None;
        self.busy = false;
        self.invite_status = None;
        self.game_over_closed = false;
    }

    fn push<F>(&self, ctx: &Context<Self>, request: ClientRequest, reply: F)
    where
        F: FnOnce(Result<Value, PushError>) -> Message + 'static,
    {
        match &self.connection {
            Some(connection) => {
                let pending = connection.push(&request);
                ctx.link().send_future(async move { reply(pending.await) });
            }
            None => ctx.link().send_message(reply(Err(PushError::NotConnected))),
        }
    }

    fn lobby_request<F, Fut>(&self, ctx: &Context<Self>, request: F)
    where
        F: FnOnce(Api, String) -> Fut,
        Fut: std::future::Future<Output = Result<(), ApiError>> + 'static,
    {
        let pending = request(self.api.clone(), ctx.props().id.clone());
        ctx.link()
            .send_future(async move { Message::LobbyRequestDone(pending.await) });
    }

    fn handle_channel(&mut self, ctx: &Context<Self>, update: ChannelUpdate) -> bool {
        match update {
            ChannelUpdate::Event(ChannelEvent::Joined) => {
                self.board.set_connected(true);
                self.push(ctx, ClientRequest::GetState, Message::ChannelState);
            }
            ChannelUpdate::Event(ChannelEvent::JoinRejected(err)) => {
                self.board
                    .set_error(err.reason.unwrap_or_else(|| "Failed to join game".to_string()));
            }
            ChannelUpdate::Event(ChannelEvent::Server(event)) => self.handle_server(ctx, event),
            ChannelUpdate::Event(ChannelEvent::Errored) => {
                self.board.set_error("Game channel error");
            }
            ChannelUpdate::Event(ChannelEvent::Closed) => self.board.set_connected(false),
            ChannelUpdate::Lost(message) => self.board.set_error(message),
        }
        true
    }

    fn handle_server(&mut self, ctx: &Context<Self>, event: ServerEvent) {
        match event {
            ServerEvent::GameState(snapshot) => self.board.apply_snapshot(*snapshot),
            ServerEvent::ChatMessage(message) => self.board.push_chat(message),
            ServerEvent::LobbyUpdated(game) => {
                self.lobby.lobby_updated(game);
            }
            ServerEvent::GameStarted(game) => {
                info!("game {} started", game.id);
                if self.lobby.game_started(game) == Refresh::GameAndState {
                    self.load(ctx);
                }
            }
        }
    }

    fn report_push(&self, what: &str, err: &PushError) {
        warn!("{} failed: {}", what, err);
        alert(&err.to_string());
    }

    fn report_api(&self, err: &ApiError) {
        check_unauthorized(&self.session, err);
        alert(&err.to_string());
    }
}

impl Component for GamePage {
    type Message = Message;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (session, _) = ctx
            .link()
            .context::<SessionContext>(Callback::noop())
            .expect("context to be set");
        let config = ctx
            .link()
            .context::<ClientConfig>(Callback::noop())
            .map(|(config, _)| config)
            .unwrap_or_default();
        let api = Api::new(&config, session.session.as_ref());
        let user_id = session.user().map(|u| u.id.clone()).unwrap_or_default();
        let token = session.token().unwrap_or_default().to_string();
        let mut page = Self {
            api,
            config,
            session,
            user_id,
            token,
            connection: None,
            lobby: LobbyView::default(),
            board: BoardView::default(),
            form: ActionForm::default(),
            destinations: None,
            discard: None,
            busy: false,
            invite_email: String::new(),
            invite_status: None,
            game_over_closed: false,
        };
        page.load(ctx);
        page.connect(ctx);
        page
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if old_props.id == ctx.props().id {
            return false;
        }
        self.disconnect();
        self.reset();
        self.load(ctx);
        self.connect(ctx);
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        debug!("game page: {}", msg);
        match msg {
            Message::GameLoaded(id, _) | Message::StateLoaded(id, _) if id != ctx.props().id => {
                debug!("dropping reply for game {}", id);
                return false;
            }
            Message::GameLoaded(id, Ok(game)) => {
                if !self.lobby.load_for(&id, game) {
                    warn!("game {} fetch returned a different game", id);
                }
            }
            Message::GameLoaded(_, Err(err)) => {
                error!("Failed to load game: {}", err);
                check_unauthorized(&self.session, &err);
                if let Some(navigator) = ctx.link().navigator() {
                    navigator.push(&Route::Games);
                }
            }
            Message::StateLoaded(id, Ok(snapshot)) => {
                if !self.board.apply_snapshot_for(&id, snapshot) {
                    warn!("state for game {} carried a different game", id);
                }
            }
            // No snapshot exists until the game starts
            Message::StateLoaded(_, Err(err)) => debug!("no state yet: {}", err),
            Message::Channel(update) => return self.handle_channel(ctx, update),
            Message::ChannelState(Ok(payload)) => {
                match serde_json::from_value::<GameSnapshot>(payload) {
                    Ok(snapshot) => self.board.apply_snapshot(snapshot),
                    Err(err) => debug!("get_state reply without a snapshot: {}", err),
                }
            }
            Message::ChannelState(Err(err)) => debug!("get_state failed: {}", err),
            Message::StartGame => {
                self.lobby_request(ctx, |api, id| async move { api.start_game(&id).await });
            }
            Message::JoinGame => {
                self.lobby_request(ctx, |api, id| async move { api.join_game(&id).await });
            }
            Message::LobbyRequestDone(Ok(())) => self.load(ctx),
            Message::LobbyRequestDone(Err(err)) => self.report_api(&err),
            Message::SelectAction(kind) => {
                self.form.select(kind);
                self.destinations = None;
                if kind.fields().contains(&ParamField::Destination) {
                    self.push(ctx, ClientRequest::GetValidMoves, Message::ValidMovesReplied);
                }
            }
            Message::SetParam(field, value) => {
                if let Err(err) = self.form.set_text(field, &value) {
                    debug!("ignoring {:?}: {}", field, err);
                }
            }
            Message::ToggleActionCard(card_id) => {
                if let Err(err) = self.form.toggle_card(&card_id) {
                    debug!("ignoring card {}: {}", card_id, err);
                }
            }
            Message::SubmitAction => match self.form.submission() {
                Ok(request) => {
                    self.busy = true;
                    self.push(ctx, request, Message::ActionReplied);
                }
                Err(err) => alert(&err.to_string()),
            },
            Message::ActionReplied(Ok(_)) => {
                self.busy = false;
                self.form.reset();
                self.destinations = None;
            }
            Message::ActionReplied(Err(err)) => {
                self.busy = false;
                self.report_push("Action", &err);
            }
            Message::ValidMovesReplied(Ok(payload)) => {
                match serde_json::from_value::<ValidMoves>(payload) {
                    Ok(moves) => self.destinations = Some(moves),
                    Err(err) => debug!("unexpected valid moves reply: {}", err),
                }
            }
            Message::ValidMovesReplied(Err(err)) => debug!("get_valid_moves failed: {}", err),
            Message::EndTurn => {
                self.busy = true;
                self.push(ctx, ClientRequest::EndTurn, Message::EndTurnReplied);
            }
            Message::EndTurnReplied(Ok(_)) => self.busy = false,
            Message::EndTurnReplied(Err(err)) => {
                self.busy = false;
                match err.rejection().and_then(DiscardFlow::from_rejection) {
                    Some(flow) => {
                        info!("hand over the limit, {} card(s) to discard", flow.required());
                        self.discard = Some(flow);
                    }
                    None => self.report_push("End turn", &err),
                }
            }
            Message::ToggleDiscard(card_id) => {
                if let Some(flow) = &mut self.discard {
                    flow.toggle(&card_id);
                }
            }
            Message::ConfirmDiscard => {
                if let Some(request) = self.discard.as_ref().and_then(DiscardFlow::request) {
                    self.busy = true;
                    self.push(ctx, request, Message::DiscardReplied);
                }
            }
            Message::DiscardReplied(Ok(_)) => {
                self.busy = false;
                self.discard = None;
            }
            Message::DiscardReplied(Err(err)) => {
                self.busy = false;
                self.report_push("Discard", &err);
            }
            Message::SendChat(message) => {
                self.push(
                    ctx,
                    ClientRequest::ChatMessage { message },
                    Message::ChatReplied,
                );
                return false;
            }
            Message::ChatReplied(Ok(_)) => return false,
            Message::ChatReplied(Err(err)) => warn!("chat message failed: {}", err),
            Message::InviteEmail(email) => self.invite_email = email,
            Message::SendInvite => {
                let email = self.invite_email.trim().to_string();
                if email.is_empty() {
                    return false;
                }
                let api = self.api.clone();
                let game_id = ctx.props().id.clone();
                ctx.link().send_future(async move {
                    Message::InviteSent(api.create_invitation(game_id, email).await)
                });
            }
            Message::InviteSent(Ok(_)) => {
                self.invite_status = Some(format!("Invitation sent to {}", self.invite_email));
                self.invite_email.clear();
            }
            Message::InviteSent(Err(err)) => {
                check_unauthorized(&self.session, &err);
                self.invite_status = Some(err.to_string());
            }
            Message::CloseGameOver => {
                self.game_over_closed = true;
                if let Some(navigator) = ctx.link().navigator() {
                    navigator.push(&Route::Games);
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let game = match self.lobby.game() {
            Some(game) => game,
            None => return html! { <div class={classes!("loading")}>{"Loading game..."}</div> },
        };
        let connected = self.board.is_connected();
        html! {
            <div class={classes!("game-page")}>
                <nav>
                    <h1>{game.title()}</h1>
                    <span class={classes!(if connected { "connected" } else { "disconnected" })}>
                        { if connected { "● Connected" } else { "○ Disconnected" } }
                    </span>
                    <Link<Route> to={Route::Games}>{"Back to Lobby"}</Link<Route>>
                </nav>
                if let Some(error) = self.board.error() {
                    <div class={classes!("error-banner")}>{error}</div>
                }
                {
                    if self.lobby.is_waiting() {
                        self.view_waiting_room(ctx, game)
                    } else {
                        self.view_board(ctx)
                    }
                }
                { self.view_modals(ctx) }
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.disconnect();
    }
}

impl GamePage {
    fn view_waiting_room(&self, ctx: &Context<Self>, game: &GameInfo) -> Html {
        let link = ctx.link();
        let oninput = link.callback(|e: InputEvent| {
            Message::InviteEmail(e.target_unchecked_into::<HtmlInputElement>().value())
        });
        let oninvite = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Message::SendInvite
        });
        html! {
            <div class={classes!("waiting-room")}>
                <h2>{"Waiting for Players"}</h2>
                <ul>
                    {
                        game.players.iter().map(|player| html! {
                            <li key={player.id.clone()}>{player.display_name()}</li>
                        }).collect::<Html>()
                    }
                </ul>
                <p>{format!("Players: {}", game.player_count_label())}</p>
                if self.lobby.can_join(&self.user_id) {
                    <button onclick={link.callback(|_: MouseEvent| Message::JoinGame)}>{"Join Game"}</button>
                }
                if self.lobby.can_start(&self.user_id) {
                    <button onclick={link.callback(|_: MouseEvent| Message::StartGame)}>{"Start Game"}</button>
                }
                <form class={classes!("invite")} onsubmit={oninvite}>
                    <input
                        type="email"
                        placeholder="Invite by email"
                        value={self.invite_email.clone()}
                        {oninput} />
                    <button type="submit">{"Send Invite"}</button>
                </form>
                if let Some(status) = &self.invite_status {
                    <p class={classes!("invite-status")}>{status.clone()}</p>
                }
            </div>
        }
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let turn = self.board.counters().map(|c| c.turn_number).unwrap_or_default();
        let viewer_turn = self.board.is_viewer_turn(&self.user_id);
        let hand = self.board.viewer_hand(&self.user_id).to_vec();
        let over_limit = self
            .board
            .viewer(&self.user_id)
            .map(|p| p.over_hand_limit())
            .unwrap_or(false);
        let picks_destination = self.form.fields().contains(&ParamField::Destination);
        let onselect_planet = if viewer_turn && picks_destination {
            Some(link.callback(|name: String| Message::SetParam(ParamField::Destination, name)))
        } else {
            None
        };
        html! {
            <div class={classes!("board-layout")}>
                <div class={classes!("board-main")}>
                    <div class={classes!("board-header")}>
                        <h2>{"Game Board"}</h2>
                        <div>{format!("Turn: {}", turn)}</div>
                    </div>
                    if let Some(current) = self.board.current_player() {
                        <div class={classes!("current-player")}>
                            {"Current Player: "}
                            <strong>{current.seat_label()}</strong>
                            {format!(" ({})", current.role.display_name())}
                            if viewer_turn {
                                {" - Your turn!"}
                            }
                        </div>
                    }
                    <GalaxyMap markers={self.board.markers()} onselect={onselect_planet} />
                    if let Some(counters) = self.board.counters() {
                        <CountersPanel {counters} />
                    }
                    if viewer_turn {
                        <ActionPanel
                            form={self.form.clone()}
                            hand={hand.clone()}
                            teammates={self.teammates()}
                            destinations={self.destinations.clone()}
                            busy={self.busy}
                            onselect={link.callback(Message::SelectAction)}
                            onparam={link.callback(|(field, value): (ParamField, String)| Message::SetParam(field, value))}
                            ontogglecard={link.callback(Message::ToggleActionCard)}
                            onsubmit={link.callback(|_: ()| Message::SubmitAction)}
                            onendturn={link.callback(|_: ()| Message::EndTurn)} />
                    }
                    <div class={classes!("hand")}>
                        <h3>
                            {"Your Hand"}
                            if over_limit {
                                <span class={classes!("badge", "warning")}>{"Over hand limit"}</span>
                            }
                        </h3>
                        { hand.iter().map(|card| html! {
                            <PlayerCard key={card.id().to_string()} card={card.clone()} show_details=true />
                        }).collect::<Html>() }
                    </div>
                    { self.view_players() }
                </div>
                <ChatPanel
                    messages={self.board.chat().messages().to_vec()}
                    onsend={link.callback(Message::SendChat)}
                    disabled={!connected_or_joined(self)} />
            </div>
        }
    }

    fn teammates(&self) -> Vec<Player> {
        self.board
            .players()
            .iter()
            .filter(|p| p.user_id != self.user_id)
            .cloned()
            .collect()
    }

    fn view_players(&self) -> Html {
        html! {
            <div class={classes!("players")}>
                <h3>{"Players"}</h3>
                {
                    self.board.players().iter().map(|player| {
                        let is_viewer = player.user_id == self.user_id;
                        html! {
                            <div key={player.id.clone()} class={classes!("player")}
                                style={format!("border-color: {}", player.role.marker_color())}>
                                <h4>{player.seat_label()}</h4>
                                <p>{player.role.display_name()}</p>
                                <span>{format!("@ {}", player.location().unwrap_or("N/A"))}</span>
                                <div>{format!("Actions: {}", player.actions_remaining)}</div>
                                if !is_viewer {
                                    <CardBack count={player.hand_size()} />
                                }
                            </div>
                        }
                    }).collect::<Html>()
                }
            </div>
        }
    }

    fn view_modals(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        if let Some(flow) = &self.discard {
            return html! {
                <DiscardModal
                    flow={flow.clone()}
                    hand={self.board.viewer_hand(&self.user_id).to_vec()}
                    ontoggle={link.callback(Message::ToggleDiscard)}
                    onconfirm={link.callback(|_: ()| Message::ConfirmDiscard)} />
            };
        }
        match self.board.game_over() {
            Some(summary) if !self.game_over_closed => html! {
                <GameOverModal {summary} onclose={link.callback(|_: ()| Message::CloseGameOver)} />
            },
            _ => html! {},
        }
    }
}

fn connected_or_joined(page: &GamePage) -> bool {
    page.board.is_connected()
        || page
            .connection
            .as_ref()
            .map(GameConnection::is_joined)
            .unwrap_or(false)
}
