//! Backend REST Client
//!
//! reqwest implementation of [`Backend`] used by the terminal front end.

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Serialize};

use super::dto::*;
use super::{endpoints, ApiError, ApiResult, Backend, FileUpload};
use crate::config::BackendConfig;

/// HTTP client for the assistant backend
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for the configured backend
    pub fn new(config: &BackendConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL every endpoint path is appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        tracing::debug!(path, "GET");
        let response = self.client.get(self.url(path)).send().await?;
        read_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "POST");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        read_json(response).await
    }
}

/// Decode a JSON body, turning non-success statuses into [`ApiError::Status`]
async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn chat(&self, request: &ChatRequest) -> ApiResult<ChatReply> {
        self.post_json(endpoints::CHAT, request).await
    }

    async fn upload(&self, file: &FileUpload) -> ApiResult<UploadReply> {
        let mut part = multipart::Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        if let Some(content_type) = &file.content_type {
            part = part.mime_str(content_type)?;
        }
        let form = multipart::Form::new().part("file", part);

        tracing::debug!(path = endpoints::UPLOAD, file = %file.name, "POST multipart");
        let response = self
            .client
            .post(self.url(endpoints::UPLOAD))
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }

    async fn events(&self) -> ApiResult<Vec<CalendarEvent>> {
        let response: EventsResponse = self.get_json(endpoints::EVENTS).await?;
        Ok(response.events)
    }

    async fn mark_event_complete(&self, event_id: &str, summary: &str) -> ApiResult<bool> {
        let ack: Ack = self
            .post_json(
                endpoints::MARK_EVENT_COMPLETE,
                &MarkCompleteRequest { event_id, summary },
            )
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
        let path = endpoints::delete_session(id);
        tracing::debug!(path = %path, "DELETE");
        let response = self.client.delete(self.url(&path)).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            })
        }
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
        let ack: Ack = self
            .post_json(endpoints::TASKS, &NewTaskRequest { text })
            .await?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Multipart, Path},
        http::StatusCode,
        routing::{delete, get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    /// Serve a router on an ephemeral port and return its base URL
    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(url: &str) -> HttpBackend {
        HttpBackend::new(&BackendConfig {
            url: format!("{}/", url),
            request_timeout_secs: Some(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_chat_round_trip() {
        let router = Router::new().route(
            "/chat",
            post(|Json(body): Json<Value>| async move {
                assert!(body["session_id"].is_null());
                Json(json!({
                    "session_id": "s-42",
                    "response": format!("echo: {}", body["message"].as_str().unwrap_or_default()),
                }))
            }),
        );
        let backend = client_for(&spawn_backend(router).await);

        let reply = backend
            .chat(&ChatRequest {
                message: "hello".to_string(),
                session_id: None,
            })
            .await
            .unwrap();

        assert_eq!(reply.session_id, Some(SessionId::new("s-42")));
        assert_eq!(reply.response.as_deref(), Some("echo: hello"));
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_is_trimmed() {
        let backend = client_for("http://127.0.0.1:5000");
        assert_eq!(backend.base_url(), "http://127.0.0.1:5000");
    }

    #[tokio::test]
    async fn test_events_and_history() {
        let router = Router::new()
            .route(
                "/events",
                get(|| async {
                    Json(json!({"events": [
                        {"id": "e1", "summary": "Standup", "start": {"dateTime": "2026-10-18T09:00:00Z"}},
                        {"id": "e2", "summary": "Holiday", "start": {"date": "2026-10-19"}}
                    ]}))
                }),
            )
            .route(
                "/history/:id",
                get(|Path(id): Path<String>| async move {
                    Json(json!([
                        {"role": "user", "content": format!("opened {id}")},
                        {"role": "model", "content": "hi"}
                    ]))
                }),
            );
        let backend = client_for(&spawn_backend(router).await);

        let events = backend.events().await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].start.as_ref().unwrap().date.as_deref(), Some("2026-10-19"));

        let history = backend.history(&SessionId::new("s 1")).await.unwrap();
        assert_eq!(history[0].content, "opened s 1");
        assert!(history[1].is_agent());
    }

    #[tokio::test]
    async fn test_mutations_report_ack() {
        let router = Router::new()
            .route(
                "/mark_event_complete",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({"ok": body["event_id"] == "e1" && body["summary"] == "Gym"}))
                }),
            )
            .route(
                "/delete_calendar_event",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({"ok": body["event_id"] == "keep-me"}))
                }),
            )
            .route(
                "/tasks",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({"ok": body["text"] == "Buy milk"}))
                }),
            );
        let backend = client_for(&spawn_backend(router).await);

        assert!(backend.mark_event_complete("e1", "Gym").await.unwrap());
        assert!(!backend.delete_calendar_event("other").await.unwrap());
        assert!(backend.add_manual_task("Buy milk").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_session_uses_delete_method() {
        let router = Router::new().route(
            "/delete_session/:id",
            delete(|Path(id): Path<String>| async move {
                if id == "s-1" {
                    StatusCode::NO_CONTENT
                } else {
                    StatusCode::NOT_FOUND
                }
            }),
        );
        let backend = client_for(&spawn_backend(router).await);

        backend.delete_session(&SessionId::new("s-1")).await.unwrap();
        let err = backend.delete_session(&SessionId::new("s-2")).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_file_field() {
        let router = Router::new().route(
            "/upload",
            post(|mut multipart: Multipart| async move {
                let field = multipart.next_field().await.unwrap().unwrap();
                let name = field.name().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await.unwrap();
                Json(json!({
                    "success": name.as_deref() == Some("file")
                        && file_name.as_deref() == Some("notes.txt")
                        && &data[..] == b"hello",
                }))
            }),
        );
        let backend = client_for(&spawn_backend(router).await);

        let reply = backend
            .upload(&FileUpload::new("notes.txt", b"hello".to_vec()))
            .await
            .unwrap();
        assert!(reply.success);
    }

    #[tokio::test]
    async fn test_error_status_and_bad_body() {
        let router = Router::new()
            .route(
                "/dashboard_stats",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/sessions", get(|| async { "not json" }));
        let backend = client_for(&spawn_backend(router).await);

        let err = backend.dashboard_stats().await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                message: "boom".to_string()
            }
        );

        let err = backend.sessions().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = client_for(&format!("http://{}", addr));
        let err = backend.events().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn test_generate_quiz_and_uploads() {
        let router = Router::new()
            .route(
                "/list_uploads",
                get(|| async { Json(json!({"files": [{"name": "resume.pdf"}]})) }),
            )
            .route(
                "/generate_quiz",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({
                        "questions": [{"question": format!("About {}?", body["filename"].as_str().unwrap_or("?"))}],
                        "topics": ["docs"]
                    }))
                }),
            );
        let backend = client_for(&spawn_backend(router).await);

        let files = backend.uploads().await.unwrap();
        assert_eq!(files[0].name, "resume.pdf");

        let quiz = backend
            .generate_quiz(&QuizRequest::upload("resume.pdf"))
            .await
            .unwrap();
        assert_eq!(quiz.questions[0].question, "About resume.pdf?");
    }
}
