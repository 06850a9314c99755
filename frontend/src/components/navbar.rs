use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;
use crate::session::SessionHandle;

/// Navigation bar shown only while a session exists.
#[function_component(Navbar)]
pub fn navbar() -> Html {
    let session = use_context::<SessionHandle>().expect("SessionHandle context missing");
    let navigator = use_navigator().expect("navigator missing");

    let handle_logout = {
        let on_token_change = session.on_token_change.clone();
        Callback::from(move |_| {
            on_token_change.emit(None);
            navigator.push(&Route::Home);
        })
    };

    html! {
        <nav class="navbar">
            <Link<Route> to={Route::Home} classes="brand">
                <i class="fa-solid fa-shield-halved"></i>
                {" Deepfake Guard"}
            </Link<Route>>
            <div class="nav-links">
                <Link<Route> to={Route::Upload}>
                    <i class="fa-solid fa-upload"></i>
                    {" Upload"}
                </Link<Route>>
                <Link<Route> to={Route::Feed}>
                    <i class="fa-solid fa-rss"></i>
                    {" Feed"}
                </Link<Route>>
                <button class="logout-button" onclick={handle_logout} title="Logout">
                    <i class="fa-solid fa-sign-out-alt"></i>
                    {" Logout"}
                </button>
            </div>
        </nav>
    }
}
