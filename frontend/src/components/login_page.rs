use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, SubmitEvent};
use yew::prelude::*;
use yew_router::prelude::*;

use shared::auth::{self, is_strong_password};

use crate::api;
use crate::routes::Route;
use crate::session::SessionHandle;

/// Email/password exchange with the auth gateway, with a register/login
/// mode toggle. The strong-password rule applies only when registering;
/// sign-in defers entirely to the gateway.
#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_context::<SessionHandle>().expect("SessionHandle context missing");
    let navigator = use_navigator().expect("navigator missing");

    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<&'static str>);
    let loading = use_state(|| false);
    let registering = use_state(|| false);

    let toggle_mode = {
        let registering = registering.clone();
        let error = error.clone();
        Callback::from(move |_| {
            registering.set(!*registering);
            error.set(None);
        })
    };

    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let registering = registering.clone();
        let on_token_change = session.on_token_change.clone();
        let navigator = navigator.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            error.set(None);

            if *registering && !is_strong_password(&password) {
                error.set(Some(auth::WEAK_PASSWORD_ERROR));
                return;
            }

            let endpoint = if *registering {
                api::REGISTER_ENDPOINT
            } else {
                api::LOGIN_ENDPOINT
            };

            loading.set(true);
            let email = (*email).clone();
            let password = (*password).clone();
            let error = error.clone();
            let loading = loading.clone();
            let on_token_change = on_token_change.clone();
            let navigator = navigator.clone();

            spawn_local(async move {
                match api::authenticate(endpoint, email, password).await {
                    Ok(token) => {
                        on_token_change.emit(Some(token));
                        navigator.push(&Route::Upload);
                    }
                    Err(message) => error.set(Some(message)),
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-welcome">
                    <h1>{ if *registering { "Welcome!" } else { "Welcome Back!" } }</h1>
                    <p>
                        { if *registering {
                            "A few clicks away from creating your account."
                        } else {
                            "Sign in to access your dashboard and continue your work."
                        }}
                    </p>
                    <p class="mode-hint">
                        { if *registering { "Already have an account?" } else { "Don't have an account?" } }
                    </p>
                    <button class="mode-toggle" onclick={toggle_mode}>
                        { if *registering { "Login Now" } else { "Create Account" } }
                    </button>
                </div>

                <div class="login-form-panel">
                    <h2>{ if *registering { "Create Account" } else { "Sign In" } }</h2>
                    <form onsubmit={on_submit}>
                        <input
                            type="email"
                            placeholder="Email"
                            required=true
                            value={(*email).clone()}
                            oninput={on_email}
                        />
                        <input
                            type="password"
                            placeholder="Password"
                            required=true
                            value={(*password).clone()}
                            oninput={on_password}
                        />
                        <button type="submit" class="submit-btn" disabled={*loading}>
                            { if *loading {
                                html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Processing..."}</> }
                            } else if *registering {
                                html! { "Register" }
                            } else {
                                html! { "Login" }
                            }}
                        </button>
                    </form>
                    { (*error).map(|message| html! {
                        <p class="auth-error">{ message }</p>
                    })}
                </div>
            </div>
        </div>
    }
}
