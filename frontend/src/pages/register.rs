use common::api::NewUser;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::{use_api, use_session, SessionAction};
use crate::Route;

#[derive(Clone, Default, PartialEq)]
struct RegisterForm {
    name: String,
    email: String,
    password: String,
    confirm: String,
}

impl RegisterForm {
    fn check(&self) -> Result<NewUser, String> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err("Username and email are required".to_string());
        }
        if self.password != self.confirm {
            return Err("Passwords do not match".to_string());
        }
        Ok(NewUser {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

fn field_setter(
    form: &UseStateHandle<RegisterForm>,
    set: fn(&mut RegisterForm, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let mut next = (*form).clone();
        set(&mut next, e.target_unchecked_into::<HtmlInputElement>().value());
        form.set(next);
    })
}

#[function_component(Register)]
pub fn register() -> Html {
    let form = use_state(RegisterForm::default);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let session = use_session();
    let api = use_api();
    let navigator = use_navigator();

    let onsubmit = {
        let form = form.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let user = match form.check() {
                Ok(user) => user,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };
            let api = api.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let loading = loading.clone();
            error.set(None);
            loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api.register(user).await {
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
                <h2>{"Create an Account"}</h2>
                if let Some(error) = (*error).clone() {
                    <div class={classes!("error-banner")}>{error}</div>
                }
                <form {onsubmit}>
                    <label for="name">{"Username"}</label>
                    <input id="name" type="text" required=true value={form.name.clone()}
                        oninput={field_setter(&form, |f, v| f.name = v)} disabled={*loading} />
                    <label for="email">{"Email"}</label>
                    <input id="email" type="email" required=true value={form.email.clone()}
                        oninput={field_setter(&form, |f, v| f.email = v)} disabled={*loading} />
                    <label for="password">{"Password"}</label>
                    <input id="password" type="password" required=true value={form.password.clone()}
                        oninput={field_setter(&form, |f, v| f.password = v)} disabled={*loading} />
                    <label for="confirm">{"Confirm Password"}</label>
                    <input id="confirm" type="password" required=true value={form.confirm.clone()}
                        oninput={field_setter(&form, |f, v| f.confirm = v)} disabled={*loading} />
                    <button type="submit" disabled={*loading}>
                        { if *loading { "Creating account..." } else { "Register" } }
                    </button>
                </form>
                <p>
                    {"Already have an account? "}
                    <Link<Route> to={Route::Login}>{"Login here"}</Link<Route>>
                </p>
            </div>
        </div>
    }
}
