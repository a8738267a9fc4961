//! HTTP API Client
//!
//! `gloo-net` implementation of [`Backend`] for the assistant endpoints.

use aide::api::*;
use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::JsValue;

/// localStorage key holding the backend base URL
const API_URL_KEY: &str = "aide_api_url";

/// Get the API base URL from local storage, or same-origin when unset
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_default();
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

fn transport(e: gloo_net::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

fn js_error(e: JsValue) -> ApiError {
    ApiError::Transport(format!("{:?}", e))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    if !response.ok() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: response.status(),
            message,
        });
    }

    let text = response.text().await.map_err(transport)?;
    Ok(serde_json::from_str(&text)?)
}

/// Backend reached through the browser's `fetch`
pub struct GlooBackend {
    base_url: String,
}

impl GlooBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Backend at the URL saved in local storage
    pub fn from_storage() -> Self {
        Self::new(get_api_base())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = Request::get(&self.url(path)).send().await.map_err(transport)?;
        read_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = Request::post(&self.url(path))
            .json(body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }
}

/// Multipart body with the file under the `file` field
fn file_form(file: &FileUpload) -> ApiResult<web_sys::FormData> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);

    let options = web_sys::BlobPropertyBag::new();
    if let Some(content_type) = &file.content_type {
        options.set_type(content_type);
    }
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(js_error)?;

    let form = web_sys::FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("file", &blob, &file.name)
        .map_err(js_error)?;
    Ok(form)
}

#[async_trait(?Send)]
impl Backend for GlooBackend {
    async fn chat(&self, request: &ChatRequest) -> ApiResult<ChatReply> {
        self.post_json(endpoints::CHAT, request).await
    }

    async fn upload(&self, file: &FileUpload) -> ApiResult<UploadReply> {
        let form = file_form(file)?;
        let response = Request::post(&self.url(endpoints::UPLOAD))
            .body(form)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    async fn events(&self) -> ApiResult<Vec<CalendarEvent>> {
        let response: EventsResponse = self.get_json(endpoints::EVENTS).await?;
        Ok(response.events)
    }

    async fn mark_event_complete(&self, event_id: &str, summary: &str) -> ApiResult<bool> {
        let ack: Ack = self
            .post_json(endpoints::MARK_EVENT_COMPLETE, &MarkCompleteRequest { event_id, summary })
            .await?;
        Ok(ack.ok)
    }

    async fn delete_calendar_event(&self, event_id: &str) -> ApiResult<bool> {
        let ack: Ack = self
            .post_json(endpoints::DELETE_CALENDAR_EVENT, &DeleteEventRequest { event_id })
            .await?;
        Ok(ack.ok)
    }

    async fn sessions(&self) -> ApiResult<Vec<Session>> {
        self.get_json(endpoints::SESSIONS).await
    }

    async fn delete_session(&self, id: &SessionId) -> ApiResult<()> {
        let response = Request::delete(&self.url(&endpoints::delete_session(id)))
            .send()
            .await
            .map_err(transport)?;
        if !response.ok() {
            return Err(ApiError::Status {
                status: response.status(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }

    async fn history(&self, id: &SessionId) -> ApiResult<Vec<HistoryMessage>> {
        self.get_json(&endpoints::history(id)).await
    }

    async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.get_json(endpoints::DASHBOARD_STATS).await
    }

    async fn manual_tasks(&self) -> ApiResult<Vec<ManualTask>> {
        let response: TasksResponse = self.get_json(endpoints::TASKS).await?;
        Ok(response.tasks)
    }

    async fn add_manual_task(&self, text: &str) -> ApiResult<bool> {
        let ack: Ack = self.post_json(endpoints::TASKS, &NewTaskRequest { text }).await?;
        Ok(ack.ok)
    }

    async fn uploads(&self) -> ApiResult<Vec<UploadedFile>> {
        let response: UploadsResponse = self.get_json(endpoints::LIST_UPLOADS).await?;
        Ok(response.files)
    }

    async fn generate_quiz(&self, request: &QuizRequest) -> ApiResult<Quiz> {
        self.post_json(endpoints::GENERATE_QUIZ, request).await
    }
}
