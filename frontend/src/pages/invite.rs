use tracing::info;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::{check_unauthorized, use_api, use_session};
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct InviteProps {
    pub token: String,
}

#[function_component(AcceptInvite)]
pub fn accept_invite(props: &InviteProps) -> Html {
    let error = use_state(|| None::<String>);
    let session = use_session();
    let api = use_api();
    let navigator = use_navigator();

    {
        let error = error.clone();
        use_effect_with_deps(
            move |token: &String| {
                let token = token.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match api.accept_invitation(token).await {
                        Ok(invitation) => {
                            info!("accepted invitation to game {}", invitation.game_id);
                            if let Some(navigator) = navigator {
                                navigator.replace(&Route::Game {
                                    id: invitation.game_id,
                                });
                            }
                        }
                        Err(err) => {
                            check_unauthorized(&session, &err);
                            error.set(Some(err.to_string()));
                        }
                    }
                });
                || ()
            },
            props.token.clone(),
        );
    }

    html! {
        <div class={classes!("invite-page")}>
            {
                match (*error).clone() {
                    Some(error) => html! {
                        <>
                            <div class={classes!("error-banner")}>{error}</div>
                            <Link<Route> to={Route::Games}>{"Back to Lobby"}</Link<Route>>
                        </>
                    },
                    None => html! { <div>{"Joining game..."}</div> },
                }
            }
        </div>
    }
}
