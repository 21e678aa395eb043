use common::api::{NewGame, MAX_PLAYER_CHOICES};
use common::view::sorted_games;
use common::{Difficulty, GameInfo, GameStatus};
use tracing::error;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::{check_unauthorized, use_api, use_session, SessionAction};
use crate::Route;

#[function_component(GameList)]
pub fn game_list() -> Html {
    let games = use_state(Vec::<GameInfo>::new);
    let show_create = use_state(|| false);
    let session = use_session();
    let api = use_api();
    let navigator = use_navigator();

    {
        let games = games.clone();
        let api = api.clone();
        let session = session.clone();
        use_effect_with_deps(
            move |_| {
                wasm_bindgen_futures::spawn_local(async move {
                    match api.list_games().await {
                        Ok(list) => games.set(sorted_games(list)),
                        Err(err) => {
                            error!("Failed to load games: {}", err);
                            check_unauthorized(&session, &err);
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    let onlogout = {
        let session = session.clone();
        let navigator = navigator.clone();
        Callback::from(move |_| {
            session.dispatch(SessionAction::LoggedOut);
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };
    let onopen = {
        let show_create = show_create.clone();
        Callback::from(move |_| show_create.set(true))
    };
    let onclose = {
        let show_create = show_create.clone();
        Callback::from(move |_: ()| show_create.set(false))
    };
    let user_id = session.user().map(|u| u.id.clone()).unwrap_or_default();
    let welcome = session
        .user()
        .map(|u| format!("Welcome, {}", u.name))
        .unwrap_or_default();

    html! {
        <div class={classes!("lobby-page")}>
            <nav>
                <h1>{"Infestation"}</h1>
                <span>{welcome}</span>
                <button onclick={onlogout}>{"Logout"}</button>
            </nav>
            <div class={classes!("lobby-header")}>
                <h2>{"Game Lobby"}</h2>
                <button onclick={onopen}>{"Create New Game"}</button>
            </div>
            <div class={classes!("game-grid")}>
                { games.iter().map(|game| game_card(game, &user_id, navigator.clone())).collect::<Html>() }
                if games.is_empty() {
                    <div class={classes!("empty")}>{"No games available. Create one to get started!"}</div>
                }
            </div>
            if *show_create {
                <CreateGameModal {onclose} />
            }
        </div>
    }
}

fn game_card(game: &GameInfo, user_id: &str, navigator: Option<Navigator>) -> Html {
    let id = game.id.clone();
    let onclick = Callback::from(move |_| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Game { id: id.clone() });
        }
    });
    html! {
        <div key={game.id.clone()} class={classes!("game-card")}>
            <h3>{game.title()}</h3>
            <p>{format!("Players: {}", game.player_count_label())}</p>
            <p>{format!("Difficulty: {}", game.difficulty)}</p>
            <p>{format!("Status: {}", game.status)}</p>
            <button {onclick} disabled={game.status == GameStatus::Lobby && game.is_full() && !game.has_user(user_id)}>
                {game.join_label()}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CreateGameProps {
    onclose: Callback<()>,
}

#[function_component(CreateGameModal)]
fn create_game_modal(props: &CreateGameProps) -> Html {
    let name = use_state(String::new);
    let max_players = use_state(|| 2u32);
    let difficulty = use_state(Difficulty::default);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let session = use_session();
    let api = use_api();
    let navigator = use_navigator();

    let oninput_name = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            name.set(e.target_unchecked_into::<HtmlInputElement>().value())
        })
    };
    let onchange_players = {
        let max_players = max_players.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            if let Ok(n) = value.parse() {
                max_players.set(n);
            }
        })
    };
    let onchange_difficulty = {
        let difficulty = difficulty.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            if let Some(choice) = Difficulty::from_choice(&value) {
                difficulty.set(choice);
            }
        })
    };
    let oncancel = {
        let onclose = props.onclose.clone();
        Callback::from(move |_| onclose.emit(()))
    };
    let oncreate = {
        let name = name.clone();
        let max_players = max_players.clone();
        let difficulty = difficulty.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |_| {
            let game = NewGame {
                name: name.trim().to_string(),
                max_players: *max_players,
                difficulty: *difficulty,
            };
            let api = api.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let loading = loading.clone();
            error.set(None);
            loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api.create_game(game).await {
                    Ok(created) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Game { id: created.id });
                        }
                    }
                    Err(err) => {
                        check_unauthorized(&session, &err);
                        error.set(Some(err.to_string()));
                        loading.set(false);
                    }
                }
            });
        })
    };

    html! {
        <div class={classes!("modal-backdrop")}>
            <div class={classes!("modal")}>
                <h3>{"Create New Game"}</h3>
                if let Some(error) = (*error).clone() {
                    <div class={classes!("error-banner")}>{error}</div>
                }
                <label>
                    {"Game Name"}
                    <input type="text" value={(*name).clone()} oninput={oninput_name} placeholder="Enter game name" />
                </label>
                <label>
                    {"Max Players"}
                    <select onchange={onchange_players}>
                        {
                            MAX_PLAYER_CHOICES.into_iter().map(|n| html! {
                                <option value={n.to_string()} selected={n == *max_players}>
                                    {format!("{} Players", n)}
                                </option>
                            }).collect::<Html>()
                        }
                    </select>
                </label>
                <label>
                    {"Difficulty"}
                    <select onchange={onchange_difficulty}>
                        {
                            Difficulty::CHOICES.into_iter().map(|d| html! {
                                <option value={d.as_str()} selected={d == *difficulty}>{d.to_string()}</option>
                            }).collect::<Html>()
                        }
                    </select>
                </label>
                <div class={classes!("modal-buttons")}>
                    <button onclick={oncancel} disabled={*loading}>{"Cancel"}</button>
                    <button onclick={oncreate} disabled={*loading}>
                        { if *loading { "Creating..." } else { "Create Game" } }
                    </button>
                </div>
            </div>
        </div>
    }
}
