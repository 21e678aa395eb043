use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::{use_api, use_session, SessionAction};
use crate::Route;

#[function_component(Login)]
pub fn login() -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let session = use_session();
    let api = use_api();
    let navigator = use_navigator();

    let oninput_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            username.set(e.target_unchecked_into::<HtmlInputElement>().value())
        })
    };
    let oninput_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            password.set(e.target_unchecked_into::<HtmlInputElement>().value())
        })
    };
    let onsubmit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let loading = loading.clone();
            let email = (*username).clone();
            let pass = (*password).clone();
            error.set(None);
            loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api.login(email, pass).await {
                    Ok(signed_in) => {
                        session.dispatch(SessionAction::LoggedIn(signed_in));
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Games);
                        }
                    }
                    Err(err) => {
                        error.set(Some(err.to_string()));
                        loading.set(false);
                    }
                }
            });
        })
    };

    html! {
        <div class={classes!("auth-page")}>
            <div class={classes!("auth-box")}>
                <h1>{"Infestation"}</h1>
                <h2>{"Login to Play"}</h2>
                if let Some(error) = (*error).clone() {
                    <div class={classes!("error-banner")}>{error}</div>
                }
                <form {onsubmit}>
                    <label for="username">{"Username"}</label>
                    <input
                        id="username"
                        type="text"
                        required=true
                        value={(*username).clone()}
                        oninput={oninput_username}
                        disabled={*loading} />
                    <label for="password">{"Password"}</label>
                    <input
                        id="password"
                        type="password"
                        required=true
                        value={(*password).clone()}
                        oninput={oninput_password}
                        disabled={*loading} />
                    <button type="submit" disabled={*loading}>
                        { if *loading { "Logging in..." } else { "Login" } }
                    </button>
                </form>
                <p>
                    {"Don't have an account? "}
                    <Link<Route> to={Route::Register}>{"Register here"}</Link<Route>>
                </p>
            </div>
        </div>
    }
}
