use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/upload")]
    Upload,
    #[at("/feed")]
    Feed,
    #[not_found]
    #[at("/404")]
    NotFound,
}
