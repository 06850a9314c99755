use gloo_events::EventListener;
use gloo_file::callbacks::{FileReader, read_as_data_url};
use gloo_file::{File as GlooFile, ObjectUrl};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use shared::modality::Modality;
use shared::upload::UploadWorkflow;
use shared::verdict::Verdict;

use crate::api;
use crate::components::utils::debounce;
use crate::session::SessionHandle;

/// Best-effort preview of the selected file; audio gets none. The video
/// variant holds a transient blob reference that is revoked on drop.
enum Preview {
    Image(String),
    Video(ObjectUrl),
}

pub enum Msg {
    // File operations
    ModalityChanged(Modality),
    FilePicked(GlooFile),
    PreviewReady(String),
    Clear,

    // Analysis operations
    Submit,
    Analyzed(Verdict),
    AnalysisFailed(String),

    // Input events
    SetDragging(bool),
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

pub struct UploadPage {
    workflow: UploadWorkflow<GlooFile>,
    preview: Option<Preview>,
    reader: Option<FileReader>,
    is_dragging: bool,
    paste_listener: Option<EventListener>,
}

impl Component for UploadPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let window = web_sys::window().expect("no global `window` exists");
        let listener = EventListener::new(&window, "paste", move |event| {
            if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                link.send_message(Msg::HandlePaste(clipboard_event.clone()));
            }
        });

        Self {
            workflow: UploadWorkflow::new(Modality::Video),
            preview: None,
            reader: None,
            is_dragging: false,
            paste_listener: Some(listener),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ModalityChanged(modality) => self.handle_modality_change(modality),
            Msg::FilePicked(file) => self.handle_file_picked(ctx, file),
            Msg::PreviewReady(data_url) => {
                self.preview = Some(Preview::Image(data_url));
                self.reader = None;
                true
            }
            Msg::Clear => {
                self.workflow.clear();
                self.drop_preview();
                true
            }
            Msg::Submit => self.handle_submit(ctx),
            Msg::Analyzed(verdict) => {
                self.workflow.complete_submission(verdict);
                true
            }
            Msg::AnalysisFailed(message) => {
                self.workflow.fail_submission(message);
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::HandleDrop(event) => self.handle_drop(ctx, event),
            Msg::HandlePaste(event) => self.handle_paste(ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="upload-page">
                <header class="page-header">
                    <h2>{"Media Analysis Engine"}</h2>
                    <p class="subtitle">{"Upload your media to detect and analyze its contents."}</p>
                </header>

                <div class="upload-card">
                    { self.render_modality_selector(ctx) }
                    { self.render_drop_zone(ctx) }
                    { self.render_selected_file() }
                    { self.render_action_buttons(ctx) }
                </div>

                { self.render_error_message() }
                { self.render_verdict_panel() }
            </div>
        }
    }
}

// Handler methods
impl UploadPage {
    fn handle_modality_change(&mut self, modality: Modality) -> bool {
        if self.workflow.set_modality(modality) {
            self.drop_preview();
            true
        } else {
            false
        }
    }

    fn drop_preview(&mut self) {
        self.preview = None;
        self.reader = None;
    }

    fn handle_file_picked(&mut self, ctx: &Context<Self>, file: GlooFile) -> bool {
        self.drop_preview();
        if self
            .workflow
            .select_file(file.name(), file.size(), file.clone())
            .is_err()
        {
            // Reason is already recorded inline; the candidate is discarded.
            return true;
        }

        match self.workflow.modality() {
            Modality::Image => {
                let link = ctx.link().clone();
                self.reader = Some(read_as_data_url(&file, move |result| match result {
                    Ok(data_url) => link.send_message(Msg::PreviewReady(data_url)),
                    Err(err) => log::warn!("Preview generation failed: {err:?}"),
                }));
            }
            Modality::Video => {
                self.preview = Some(Preview::Video(ObjectUrl::from(file)));
            }
            Modality::Audio => {}
        }
        true
    }

    fn handle_submit(&mut self, ctx: &Context<Self>) -> bool {
        let modality = match self.workflow.begin_submission() {
            Ok(modality) => modality,
            // The workflow holds the inline message; no request goes out.
            Err(_) => return true,
        };
        let Some(selected) = self.workflow.selected_file() else {
            return true;
        };
        let file = selected.handle.clone();
        let bearer = ctx
            .link()
            .context::<SessionHandle>(Callback::noop())
            .map(|(handle, _)| handle.session.bearer())
            .unwrap_or_default();

        let link = ctx.link().clone();
        spawn_local(async move {
            match api::predict(modality, &file, &bearer).await {
                Ok(verdict) => link.send_message(Msg::Analyzed(verdict)),
                Err(err) => {
                    log::error!("Prediction request failed: {err}");
                    link.send_message(Msg::AnalysisFailed(err.user_message()));
                }
            }
        });
        true
    }

    fn handle_drop(&mut self, ctx: &Context<Self>, event: DragEvent) -> bool {
        event.prevent_default();
        self.is_dragging = false;

        if let Some(data_transfer) = event.data_transfer() {
            if let Some(file_list) = data_transfer.files() {
                self.queue_first_file(ctx, file_list);
            }
        }
        true
    }

    fn handle_paste(&mut self, ctx: &Context<Self>, event: ClipboardEvent) -> bool {
        if let Some(data_transfer) = event.clipboard_data() {
            if let Some(file_list) = data_transfer.files() {
                event.prevent_default();
                self.queue_first_file(ctx, file_list);
                return true;
            }
        }
        false
    }

    fn queue_first_file(&self, ctx: &Context<Self>, file_list: FileList) {
        if let Some(file) = file_list.item(0) {
            ctx.link().send_message(Msg::FilePicked(GlooFile::from(file)));
        }
    }
}

// Rendering methods
impl UploadPage {
    fn render_modality_selector(&self, ctx: &Context<Self>) -> Html {
        let handle_change = ctx.link().callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::ModalityChanged(select.value().parse().unwrap_or(Modality::Video))
        });

        html! {
            <div class="modality-selector">
                <label for="modality">{"1. Select Media Type"}</label>
                <select id="modality" onchange={handle_change}>
                    { for Modality::ALL.iter().map(|modality| html! {
                        <option
                            value={modality.to_string()}
                            selected={*modality == self.workflow.modality()}
                        >
                            { modality.display_name() }
                        </option>
                    })}
                </select>
            </div>
        }
    }

    fn render_drop_zone(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let handle_change = link.batch_callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let file = input.files().and_then(|list| list.item(0));
            input.set_value("");
            file.map(|file| Msg::FilePicked(GlooFile::from(file)))
        });

        let handle_drag_over = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::SetDragging(true)
        });

        let handle_drag_leave = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::SetDragging(false)
        });

        let handle_drop = link.callback(Msg::HandleDrop);
        let trigger_file_input = Callback::from(|_| {
            if let Some(input) = web_sys::window()
                .unwrap()
                .document()
                .unwrap()
                .get_element_by_id("file-input")
            {
                if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                    html_input.click();
                }
            }
        });

        let modality = self.workflow.modality();

        html! {
            <div class="drop-zone-section">
                <label>{"2. Upload Your File"}</label>
                <input
                    type="file"
                    id="file-input"
                    accept={modality.accept_attr()}
                    style="display: none;"
                    onchange={handle_change}
                />
                <div
                    id="drop-zone"
                    class={classes!("upload-area", self.is_dragging.then_some("drag-over"))}
                    ondragover={handle_drag_over}
                    ondragleave={handle_drag_leave}
                    ondrop={handle_drop}
                    onclick={debounce(300, {
                        let trigger_file_input = trigger_file_input.clone();
                        move || trigger_file_input.emit(())
                    })}
                >
                    { self.render_preview(modality) }
                </div>
            </div>
        }
    }

    fn render_preview(&self, modality: Modality) -> Html {
        match &self.preview {
            Some(Preview::Image(data_url)) => html! {
                <img class="file-preview" src={data_url.clone()} alt="Preview" />
            },
            Some(Preview::Video(url)) => html! {
                <video class="file-preview" src={url.to_string()} controls=true />
            },
            None => {
                let icon = match modality {
                    Modality::Video => "fa-solid fa-video",
                    Modality::Image => "fa-solid fa-image",
                    Modality::Audio => "fa-solid fa-microphone",
                };
                html! {
                    <div class="upload-placeholder">
                        <i class={icon}></i>
                        <p>{"Drag & drop a file, paste, or "}<span class="browse-hint">{"click to browse"}</span></p>
                        <p class="file-types">
                            { format!("Supported: {} (Max 50MB)", modality.allowed_extensions().join(", ")) }
                        </p>
                    </div>
                }
            }
        }
    }

    fn render_selected_file(&self) -> Html {
        if let Some(selected) = self.workflow.selected_file() {
            html! {
                <div class="selected-file">
                    {"Selected file: "}<span class="file-name">{ &selected.name }</span>
                </div>
            }
        } else {
            html! {}
        }
    }

    fn render_action_buttons(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link().clone();
        let submitting = self.workflow.is_submitting();

        html! {
            <div class="button-container">
                <button
                    class="analyze-btn"
                    disabled={submitting || self.workflow.selected_file().is_none()}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Submit)
                    })}
                >
                    { if submitting {
                        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Processing..."}</> }
                    } else {
                        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Analyze File"}</> }
                    }}
                </button>
                <button
                    class="clear-btn"
                    disabled={submitting}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Clear)
                    })}
                >
                    {"Clear"}
                </button>
            </div>
        }
    }

    fn render_error_message(&self) -> Html {
        if let Some(error_msg) = self.workflow.error() {
            html! {
                <div class="error-message">
                    <i class="fa-solid fa-circle-exclamation"></i>
                    <strong>{"Error: "}</strong>
                    <p>{ error_msg }</p>
                </div>
            }
        } else {
            html! {}
        }
    }

    fn render_verdict_panel(&self) -> Html {
        if let Some(verdict) = self.workflow.verdict() {
            html! {
                <div class={classes!(
                    "verdict-panel",
                    if verdict.is_deepfake { "fake-detected" } else { "looks-real" }
                )}>
                    <strong>{"Prediction: "}</strong>
                    <span>{ &verdict.summary }</span>
                </div>
            }
        } else {
            html! {}
        }
    }
}
