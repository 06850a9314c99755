use futures::join;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::feed::{self, FEED_CATEGORIES, FEED_PAGE_SIZE, FeedBoard, MediaItem, MediaKind};
use shared::persona::RngPersonaSynth;
use shared::verdict::Verdict;

use crate::api;
use crate::components::utils::debounce;
use crate::session::SessionHandle;

pub enum Msg {
    // Refresh cycle
    Refresh,
    Installed(u64, Vec<MediaItem>),
    RefreshFailed(u64),

    // Moderation & presentation
    Hide(String),
    Unhide(String),
    ToggleProtection,
    ToggleShowHidden,
}

pub struct FeedPage {
    board: FeedBoard,
    loading: bool,
}

impl Component for FeedPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Refresh);
        Self {
            board: FeedBoard::new(),
            loading: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Refresh => self.handle_refresh(ctx),
            Msg::Installed(generation, items) => {
                if self.board.install(generation, items) {
                    self.loading = false;
                }
                true
            }
            Msg::RefreshFailed(generation) => {
                // Prior feed stays in place; the failure only ends the
                // loading state of the refresh that reported it.
                if self.board.is_current(generation) {
                    self.loading = false;
                }
                true
            }
            Msg::Hide(id) => {
                self.board.hide(&id);
                true
            }
            Msg::Unhide(id) => {
                self.board.unhide(&id);
                true
            }
            Msg::ToggleProtection => {
                self.board.toggle_protection();
                true
            }
            Msg::ToggleShowHidden => {
                self.board.toggle_show_hidden();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let visible: Vec<&MediaItem> = self.board.visible().collect();

        html! {
            <div class="feed-page">
                <header class="page-header">
                    <h2>{"Live Feed Protection"}</h2>
                    <p class="subtitle">{"Real-time content monitoring with AI deepfake detection."}</p>
                </header>

                { self.render_controls(ctx) }

                <div class="feed-list">
                    { if self.loading {
                        html! { for (0..5).map(|index| render_skeleton_card(index)) }
                    } else if visible.is_empty() {
                        render_empty_state()
                    } else {
                        html! { for visible.iter().map(|item| self.render_card(ctx, item)) }
                    }}
                </div>

                { self.render_summary() }
            </div>
        }
    }
}

// Handler methods
impl FeedPage {
    fn handle_refresh(&mut self, ctx: &Context<Self>) -> bool {
        let generation = self.board.begin_refresh();
        self.loading = true;

        let bearer = ctx
            .link()
            .context::<SessionHandle>(Callback::noop())
            .map(|(handle, _)| handle.session.bearer())
            .unwrap_or_default();

        let link = ctx.link().clone();
        spawn_local(async move {
            // Both category batches are fetched concurrently and joined;
            // either one failing fails the refresh as a unit.
            let batches = join!(
                api::fetch_feed_batch(FEED_CATEGORIES[0], FEED_PAGE_SIZE),
                api::fetch_feed_batch(FEED_CATEGORIES[1], FEED_PAGE_SIZE),
            );
            let (pictures, videos) = match batches {
                (Ok(pictures), Ok(videos)) => (pictures, videos),
                (pictures, videos) => {
                    for err in [pictures.err(), videos.err()].into_iter().flatten() {
                        log::error!("Feed refresh failed: {err}");
                    }
                    link.send_message(Msg::RefreshFailed(generation));
                    return;
                }
            };

            let mut synth = RngPersonaSynth::from_entropy();
            let mut items = feed::normalize_batches(pictures, videos, &mut synth);

            // Sequential on purpose: one outbound analysis at a time, and a
            // failing item downgrades to not-flagged without ending the batch.
            for item in items.iter_mut() {
                let Some((kind, url)) = item
                    .media_ref()
                    .map(|(kind, url)| (kind, url.to_string()))
                else {
                    continue;
                };
                let outcome = annotate(kind, &url, &bearer).await;
                if let Err(err) = &outcome {
                    log::warn!("Analysis failed for {url}: {err}");
                }
                feed::apply_verdict(item, outcome);
            }

            let mut rng = SmallRng::from_entropy();
            link.send_message(Msg::Installed(generation, feed::finalize_feed(items, &mut rng)));
        });
        true
    }
}

/// Downloads one item's media and runs it through the prediction service.
async fn annotate(kind: MediaKind, url: &str, bearer: &str) -> Result<Verdict, String> {
    let file = api::fetch_media_file(url, kind.upload_name()).await?;
    api::predict(kind.modality(), &file, bearer)
        .await
        .map_err(|err| err.to_string())
}

// Rendering methods
impl FeedPage {
    fn render_controls(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let protection_on = self.board.protection_on();
        let show_hidden = self.board.show_hidden();

        html! {
            <div class="feed-controls">
                <button
                    class={classes!("protection-toggle", protection_on.then_some("active"))}
                    onclick={link.callback(|_| Msg::ToggleProtection)}
                >
                    <i class={if protection_on { "fa-solid fa-shield-halved" } else { "fa-solid fa-shield" }}></i>
                    { format!(" Protection: {}", if protection_on { "ON" } else { "OFF" }) }
                </button>
                <button
                    class="show-hidden-toggle"
                    onclick={link.callback(|_| Msg::ToggleShowHidden)}
                >
                    <i class={if show_hidden { "fa-solid fa-eye-slash" } else { "fa-solid fa-eye" }}></i>
                    { if show_hidden { " Hide Removed" } else { " Show Removed" } }
                </button>
                <button
                    class="refresh-btn"
                    disabled={self.loading}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Refresh)
                    })}
                >
                    { if self.loading {
                        html! { <><i class="fa-solid fa-rotate fa-spin"></i>{" Refreshing..."}</> }
                    } else {
                        html! { <><i class="fa-solid fa-rotate"></i>{" Refresh Feed"}</> }
                    }}
                </button>
            </div>
        }
    }

    fn render_card(&self, ctx: &Context<Self>, item: &MediaItem) -> Html {
        let protection_on = self.board.protection_on();

        html! {
            <article
                key={item.id.clone()}
                class={classes!("feed-card", item.is_hidden.then_some("hidden-content"))}
            >
                { self.render_detection_banner(ctx, item) }
                { self.render_hidden_banner(ctx, item) }

                <div class="card-body">
                    <div class="card-author">
                        <img class="avatar" src={item.avatar_url.clone()} alt={item.author.clone()} />
                        <div class="author-details">
                            <div class="author-line">
                                <span class="author-name">{ format!("@{}", item.author) }</span>
                                { protection_on.then(|| html! {
                                    <span class={classes!(
                                        "verdict-badge",
                                        if item.is_flagged { "flagged" } else { "verified" }
                                    )}>
                                        { if item.is_flagged { "Flagged" } else { "Verified" } }
                                    </span>
                                })}
                            </div>
                            <span class="timestamp">{ &item.timestamp_label }</span>
                        </div>
                    </div>

                    <p class="card-content">{ &item.content }</p>

                    { if let Some(url) = &item.image_url {
                        html! { <img class="card-media" src={url.clone()} alt={item.content.clone()} /> }
                    } else if let Some(url) = &item.video_url {
                        html! { <video class="card-media" src={url.clone()} controls=true /> }
                    } else {
                        html! {}
                    }}

                    <a class="source-link" href={item.source_url.clone()} target="_blank" rel="noopener noreferrer">
                        { format!("Link: {}", item.source_url) }
                    </a>

                    <div class="engagement-row">
                        <span><i class="fa-solid fa-heart"></i>{ format!(" {}", item.like_count) }</span>
                        <span><i class="fa-solid fa-comment"></i>{ format!(" {}", item.comment_count) }</span>
                        <span><i class="fa-solid fa-share"></i>{ format!(" {}", item.share_count) }</span>
                    </div>
                </div>
            </article>
        }
    }

    fn render_detection_banner(&self, ctx: &Context<Self>, item: &MediaItem) -> Html {
        if !self.board.protection_on() || !item.is_flagged || item.is_hidden {
            return html! {};
        }
        let id = item.id.clone();
        html! {
            <div class="detection-banner">
                <i class="fa-solid fa-triangle-exclamation"></i>
                <div class="banner-text">
                    <strong>{"Deepfake Content Detected"}</strong>
                    <p>{ format!("{}% confidence - This content may be manipulated.", item.confidence) }</p>
                </div>
                <button
                    class="remove-btn"
                    onclick={ctx.link().callback(move |_| Msg::Hide(id.clone()))}
                >
                    {"Remove"}
                </button>
            </div>
        }
    }

    fn render_hidden_banner(&self, ctx: &Context<Self>, item: &MediaItem) -> Html {
        if !item.is_hidden {
            return html! {};
        }
        let id = item.id.clone();
        html! {
            <div class="hidden-banner">
                <strong>{"Content hidden for your protection."}</strong>
                <button
                    class="restore-btn"
                    onclick={ctx.link().callback(move |_| Msg::Unhide(id.clone()))}
                >
                    {"Restore"}
                </button>
            </div>
        }
    }

    fn render_summary(&self) -> Html {
        let summary = self.board.summary();
        html! {
            <footer class="protection-summary">
                <h3>{"Protection Summary"}</h3>
                <div class="summary-grid">
                    <div class="summary-stat detected">
                        <span class="stat-label">{"Threats Detected"}</span>
                        <span class="stat-value">{ summary.detected }</span>
                    </div>
                    <div class="summary-stat removed">
                        <span class="stat-label">{"Content Removed"}</span>
                        <span class="stat-value">{ summary.removed }</span>
                    </div>
                    <div class="summary-stat safe">
                        <span class="stat-label">{"Safe Content"}</span>
                        <span class="stat-value">{ summary.safe }</span>
                    </div>
                </div>
            </footer>
        }
    }
}

fn render_skeleton_card(index: usize) -> Html {
    html! {
        <div class="feed-card skeleton" key={index}>
            <div class="card-body">
                <div class="card-author">
                    <div class="avatar placeholder"></div>
                    <div class="author-details">
                        <div class="placeholder-line short"></div>
                        <div class="placeholder-line tiny"></div>
                    </div>
                </div>
                <div class="placeholder-line wide"></div>
                <div class="placeholder-block"></div>
            </div>
        </div>
    }
}

fn render_empty_state() -> Html {
    html! {
        <div class="feed-empty">
            <h3>{"All Clear!"}</h3>
            <p>{"No posts to show right now, or all detected threats have been hidden."}</p>
        </div>
    }
}
