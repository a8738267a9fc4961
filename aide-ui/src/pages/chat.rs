//! Chat Page
//!
//! Transcript, composer and file upload.

use aide::api::FileUpload;
use aide::bindings::{Trigger, CHAT_FORM};
use aide::view::{ChatMessage, TranscriptEntry};
use aide::Action;
use leptos::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

use crate::state::{use_app, AppContext};

#[component]
pub fn Chat() -> impl IntoView {
    let app = use_app();
    let typing = app.clone();
    let upload = app.clone();
    let transcript = app.ui.select(|state| state.transcript.entries().to_vec());
    let composer = app.ui.select(|state| state.composer.clone());
    let selection = app.ui.select(|state| state.file_selection.clone());

    view! {
        <div id="chat-history" class="chat-history">
            {move || {
                transcript
                    .get()
                    .into_iter()
                    .map(|entry| match entry {
                        TranscriptEntry::Message(message) => view! { <Message message=message /> }.into_view(),
                        TranscriptEntry::Thinking(_) => view! {
                            <div class="message agent thinking">
                                <p>"Thinking..."</p>
                            </div>
                        }
                        .into_view(),
                    })
                    .collect_view()
            }}
        </div>

        <form
            id=CHAT_FORM
            class="chat-form"
            on:submit=move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                app.fire(Trigger::Submit(CHAT_FORM));
            }
        >
            <label class="file-label" title="Upload a file">
                "📎"
                <input
                    type="file"
                    id="file-input"
                    class="hidden"
                    on:change=move |ev| {
                        let input = event_target::<HtmlInputElement>(&ev);
                        read_and_upload(upload.clone(), input);
                    }
                />
            </label>
            <span class="file-selection">
                {move || selection.get().unwrap_or_default()}
            </span>
            <input
                type="text"
                id="user-input"
                placeholder="Ask me anything..."
                autocomplete="off"
                prop:value=move || composer.get()
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    typing.edit(|state| state.composer = text);
                }
            />
            <button type="submit" class="send-btn">"Send"</button>
        </form>
    }
}

/// One bubble, one paragraph per line
#[component]
fn Message(message: ChatMessage) -> impl IntoView {
    view! {
        <div class=format!("message {}", message.sender.class())>
            {message
                .paragraphs
                .into_iter()
                .map(|line| view! { <p>{line}</p> })
                .collect_view()}
        </div>
    }
}

/// Read the picked file into memory and dispatch the upload. The picker is
/// cleared up front so the same file can be chosen again whatever happens.
fn read_and_upload(app: AppContext, input: HtmlInputElement) {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return;
    };

    let name = file.name();
    app.edit(|state| state.begin_upload(&name));
    input.set_value("");

    spawn_local(async move {
        let buffer = match JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => buffer,
            Err(e) => {
                let reason = format!("{:?}", e);
                app.edit(|state| state.fail_upload_read(&name, &reason));
                return;
            }
        };
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

        let mut upload = FileUpload::new(name, bytes);
        let content_type = file.type_();
        if !content_type.is_empty() {
            upload.content_type = Some(content_type);
        }

        app.controller.dispatch(Action::UploadFile(upload)).await;
    });
}
