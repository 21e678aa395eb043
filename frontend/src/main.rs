use common::session::{guard, Access, Guard};
use common::ClientConfig;
use yew::prelude::*;
use yew_router::prelude::*;

mod api;
mod channel;
mod components;
mod logging;
mod pages;
mod session;

use session::{use_session, SessionContext, SessionState};

#[derive(Routable, Clone, Debug, PartialEq)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/games")]
    Games,
    #[at("/game/:id")]
    Game { id: String },
    #[at("/invite/:token")]
    Invite { token: String },
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn access(&self) -> Access {
        match self {
            Route::Games | Route::Game { .. } | Route::Invite { .. } => Access::Protected,
            Route::Login | Route::Register | Route::Home | Route::NotFound => Access::Public,
        }
    }
}

fn switch(route: Route) -> Html {
    let page = match route.clone() {
        Route::Login => html! { <pages::login::Login /> },
        Route::Register => html! { <pages::register::Register /> },
        Route::Games => html! { <pages::games::GameList /> },
        Route::Game { id } => html! { <pages::game::GamePage {id} /> },
        Route::Invite { token } => html! { <pages::invite::AcceptInvite {token} /> },
        Route::Home => html! { <Redirect<Route> to={Route::Games} /> },
        Route::NotFound => html! { <h1>{ "404" }</h1> },
    };
    html! { <Guarded access={route.access()}>{page}</Guarded> }
}

#[derive(Properties, PartialEq)]
struct GuardedProps {
    access: Access,
    children: Children,
}

#[function_component(Guarded)]
fn guarded(props: &GuardedProps) -> Html {
    let session = use_session();
    match guard(props.access, session.session.as_ref()) {
        Guard::Allow => html! { <>{ for props.children.iter() }</> },
        Guard::RedirectToLogin => html! { <Redirect<Route> to={Route::Login} /> },
    }
}

#[function_component(Main)]
fn app() -> Html {
    let config = use_memo(|_| ClientConfig::from_build_env(), ());
    let session = use_reducer(SessionState::restore);
    html! {
        <ContextProvider<ClientConfig> context={(*config).clone()}>
            <ContextProvider<SessionContext> context={session}>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </ContextProvider<SessionContext>>
        </ContextProvider<ClientConfig>>
    }
}

fn main() {
    logging::init();
    yew::Renderer::<Main>::new().render();
}
