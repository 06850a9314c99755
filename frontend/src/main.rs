mod api;
mod components;
mod routes;
mod session;

use yew::prelude::*;
use yew_router::prelude::*;

use components::feed_page::FeedPage;
use components::landing_page::LandingPage;
use components::login_page::LoginPage;
use components::navbar::Navbar;
use components::upload_page::UploadPage;
use routes::Route;
use session::{Session, SessionHandle};

#[function_component(App)]
fn app() -> Html {
    let session = use_state(Session::restore);

    let on_token_change = {
        let session = session.clone();
        Callback::from(move |token: Option<String>| {
            session.set(match token {
                Some(token) => Session::login(token),
                None => Session::logout(),
            });
        })
    };

    let handle = SessionHandle {
        session: (*session).clone(),
        on_token_change,
    };
    let authenticated = handle.session.is_authenticated();

    html! {
        <BrowserRouter>
            <ContextProvider<SessionHandle> context={handle}>
                { authenticated.then(|| html! { <Navbar /> }) }
                <main class={if authenticated { "with-navbar" } else { "" }}>
                    <Switch<Route> render={move |route| switch(route, authenticated)} />
                </main>
            </ContextProvider<SessionHandle>>
        </BrowserRouter>
    }
}

/// Route table: the landing and login views are public, upload and feed
/// require a session, anything unknown lands back on the landing view.
fn switch(route: Route, authenticated: bool) -> Html {
    match route {
        Route::Home => html! { <LandingPage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Upload if authenticated => html! { <UploadPage /> },
        Route::Feed if authenticated => html! { <FeedPage /> },
        Route::Upload | Route::Feed => html! { <Redirect<Route> to={Route::Login} /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<App>::new().render();
}
