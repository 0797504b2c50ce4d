use crate::models::{
    LoginRequest, Note, NoteInput, ShareLink, ShareRequest, SignupRequest, TokenResponse,
};
use leptos::logging::warn;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Failure of a backend call, classified by how views react to it.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unauthorized")]
    Unauthorized { detail: Option<String> },

    #[error("not found")]
    NotFound { detail: Option<String> },

    #[error("request failed ({status})")]
    Http { status: u16, detail: Option<String> },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn decode(e: impl std::fmt::Display) -> Self {
        Self::Decode(e.to_string())
    }

    /// Classify a non-success response from its status and raw body.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            401 => Self::Unauthorized { detail },
            404 => Self::NotFound { detail },
            _ => Self::Http { status, detail },
        }
    }

    /// Server-provided detail message, if the response carried one.
    pub(crate) fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail }
            | Self::NotFound { detail }
            | Self::Http { detail, .. } => detail.as_deref(),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Text shown to the user: the server detail when present, else `fallback`.
    pub(crate) fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }

    pub(crate) fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Pull a human-readable message out of a `{"detail": ...}` error body.
///
/// `detail` is either a plain string or, for request validation failures,
/// a list of objects carrying a `msg` field.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|i| i.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let mut candidates: Vec<Option<String>> = Vec::new();
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        candidates.push(
                            js_sys::Reflect::get(&env, &key.into())
                                .ok()
                                .and_then(|v| v.as_string()),
                        );
                    }
                }
            }
        }
        Self::from_candidates(candidates)
    }

    /// First non-blank candidate wins (`API_URL`, then `api_url`), else the default.
    pub(crate) fn from_candidates(candidates: impl IntoIterator<Item = Option<String>>) -> Self {
        let url = candidates
            .into_iter()
            .flatten()
            .find(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::with_api_url(&url)
    }

    pub(crate) fn with_api_url(url: &str) -> Self {
        Self {
            api_url: url.trim().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Thin REST client for the notes backend.
///
/// Cheap to clone; views build one from the session right before a call.
#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn get_auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    fn authed(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.request(method, path);
        if let Some(header) = self.get_auth_header() {
            req = req.header("Authorization", header);
        }
        req
    }

    async fn send(req: RequestBuilder) -> ApiResult<reqwest::Response> {
        let res = req.send().await.map_err(ApiError::network)?;
        if res.status().is_success() {
            Ok(res)
        } else {
            Err(Self::error_from_response(res).await)
        }
    }

    async fn error_from_response(res: reqwest::Response) -> ApiError {
        let status: StatusCode = res.status();
        let body = res.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body);
        warn!("[api] {} {}: {}", status, error_kind(&err), body);
        err
    }

    async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> ApiResult<T> {
        let res = Self::send(req).await?;
        res.json().await.map_err(ApiError::decode)
    }

    /// For endpoints whose success body carries nothing we need.
    async fn send_discard(req: RequestBuilder) -> ApiResult<()> {
        Self::send(req).await.map(|_| ())
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<TokenResponse> {
        let req = self.request(Method::POST, "/auth/login").json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        });
        Self::send_json(req).await
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> ApiResult<TokenResponse> {
        let req = self.request(Method::POST, "/auth/signup").json(&SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        });
        Self::send_json(req).await
    }

    pub async fn list_notes(&self) -> ApiResult<Vec<Note>> {
        let data: Vec<serde_json::Value> =
            Self::send_json(self.authed(Method::GET, "/notes")).await?;
        Ok(Self::parse_note_list_response(data))
    }

    pub async fn get_note(&self, id: &str) -> ApiResult<Note> {
        Self::send_json(self.authed(Method::GET, &note_path(id))).await
    }

    /// Returns the identifier of the created note when the response names one.
    ///
    /// Any 2xx means the note exists, so an odd body never turns into an error.
    pub async fn create_note(&self, input: &NoteInput) -> ApiResult<Option<String>> {
        let res = Self::send(self.authed(Method::POST, "/notes").json(input)).await?;
        let data: serde_json::Value = res.json().await.unwrap_or_default();
        Ok(Self::parse_created_id(&data))
    }

    pub async fn update_note(&self, id: &str, input: &NoteInput) -> ApiResult<()> {
        Self::send_discard(self.authed(Method::PUT, &note_path(id)).json(input)).await
    }

    pub async fn delete_note(&self, id: &str) -> ApiResult<()> {
        Self::send_discard(self.authed(Method::DELETE, &note_path(id))).await
    }

    pub async fn share_note(&self, id: &str) -> ApiResult<ShareLink> {
        let path = format!("{}/share", note_path(id));
        let req = self
            .authed(Method::POST, &path)
            .json(&ShareRequest::default());
        Self::send_json(req).await
    }

    /// Resolve a share token. No credential is attached.
    pub async fn get_shared_note(&self, token: &str) -> ApiResult<Note> {
        let path = format!("/shared/{}", urlencoding::encode(token));
        Self::send_json(self.request(Method::GET, &path)).await
    }

    /// Decode list entries one by one, dropping those that do not carry a usable id.
    pub(crate) fn parse_note_list_response(items: Vec<serde_json::Value>) -> Vec<Note> {
        let mut out: Vec<Note> = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<Note>(item) {
                Ok(note) if !note.id.trim().is_empty() => out.push(note),
                Ok(_) => warn!("[api] dropping note without id"),
                Err(e) => warn!("[api] dropping malformed note: {}", e),
            }
        }
        out
    }

    pub(crate) fn parse_created_id(data: &serde_json::Value) -> Option<String> {
        let id = data
            .get("_id")
            .or_else(|| data.get("id"))
            .and_then(|v| v.as_str())?;

        if id.trim().is_empty() {
            warn!("[api] create note response carries a blank id");
            return None;
        }
        Some(id.to_string())
    }
}

fn note_path(id: &str) -> String {
    format!("/notes/{}", urlencoding::encode(id))
}

fn error_kind(err: &ApiError) -> &'static str {
    match err {
        ApiError::Unauthorized { .. } => "unauthorized",
        ApiError::NotFound { .. } => "not found",
        _ => "request failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8000".to_string())
    }

    #[test]
    fn test_api_client_new_has_no_token() {
        let c = client();
        assert_eq!(c.base_url, "http://localhost:8000");
        assert!(c.token.is_none());
        assert!(c.get_auth_header().is_none());
    }

    #[test]
    fn test_api_client_auth_header_with_token() {
        let c = client().with_token(Some("my-jwt-token".to_string()));
        let header = c.get_auth_header().expect("should have auth header");
        assert_eq!(header, "Bearer my-jwt-token");
    }

    #[test]
    fn test_env_config_strips_trailing_slash() {
        let cfg = EnvConfig::with_api_url("https://api.example.com/ ");
        assert_eq!(cfg.api_url, "https://api.example.com");
    }

    #[test]
    fn test_env_config_skips_blank_values() {
        let cfg = EnvConfig::from_candidates([Some("".to_string()), Some("http://api.local/".to_string())]);
        assert_eq!(cfg.api_url, "http://api.local");

        let cfg = EnvConfig::from_candidates([Some("  ".to_string()), None]);
        assert_eq!(cfg.api_url, DEFAULT_API_URL);

        let cfg = EnvConfig::from_candidates([Some("https://a.example".to_string()), Some("https://b.example".to_string())]);
        assert_eq!(cfg.api_url, "https://a.example");
    }

    #[test]
    fn test_note_path_encodes_segment() {
        assert_eq!(note_path("abc"), "/notes/abc");
        assert_eq!(note_path("a/b c"), "/notes/a%2Fb%20c");
    }

    #[test]
    fn test_extract_detail_string() {
        let body = r#"{"detail": "Note not found"}"#;
        assert_eq!(extract_detail(body).as_deref(), Some("Note not found"));
    }

    #[test]
    fn test_extract_detail_validation_list() {
        let body = r#"{"detail": [
            {"loc": ["body", "title"], "msg": "field required", "type": "value_error.missing"},
            {"loc": ["body", "content"], "msg": "field required", "type": "value_error.missing"}
        ]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("field required; field required")
        );
    }

    #[test]
    fn test_extract_detail_absent_or_not_json() {
        assert!(extract_detail("Internal Server Error").is_none());
        assert!(extract_detail(r#"{"message": "x"}"#).is_none());
        assert!(extract_detail(r#"{"detail": ""}"#).is_none());
        assert!(extract_detail("").is_none());
    }

    #[test]
    fn test_from_status_classification() {
        let e = ApiError::from_status(404, r#"{"detail": "Shared link not found or expired"}"#);
        assert_eq!(
            e,
            ApiError::NotFound {
                detail: Some("Shared link not found or expired".to_string())
            }
        );

        let e = ApiError::from_status(401, r#"{"detail": "Could not validate credentials"}"#);
        assert!(e.is_unauthorized());

        let e = ApiError::from_status(500, "oops");
        assert_eq!(
            e,
            ApiError::Http {
                status: 500,
                detail: None
            }
        );
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let e = ApiError::from_status(400, r#"{"detail": "Invalid note ID"}"#);
        assert_eq!(e.user_message("Failed to save note"), "Invalid note ID");

        let e = ApiError::Network("connection refused".to_string());
        assert_eq!(e.user_message("Failed to save note"), "Failed to save note");

        let e = ApiError::from_status(502, "<html>bad gateway</html>");
        assert_eq!(e.user_message("Failed to save note"), "Failed to save note");
    }

    #[test]
    fn test_parse_note_list_drops_unusable_entries() {
        let items = vec![
            serde_json::json!({"_id": "1", "title": "a", "content": "x", "tags": ["t"]}),
            serde_json::json!({"_id": "  ", "title": "b", "content": "y"}),
            serde_json::json!({"title": "c", "content": "z"}),
            serde_json::json!({"_id": "4", "title": "d", "content": "w"}),
        ];
        let notes = ApiClient::parse_note_list_response(items);
        let ids: Vec<&str> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_parse_created_id_shapes() {
        let id = ApiClient::parse_created_id(&serde_json::json!({"_id": "abc"}));
        assert_eq!(id.as_deref(), Some("abc"));

        let id = ApiClient::parse_created_id(&serde_json::json!({"id": "def", "title": "t"}));
        assert_eq!(id.as_deref(), Some("def"));
    }

    #[test]
    fn test_created_note_without_id_is_not_an_error() {
        // The server already stored the note; the form must still treat this as saved.
        assert_eq!(ApiClient::parse_created_id(&serde_json::json!({"message": "ok"})), None);
        assert_eq!(ApiClient::parse_created_id(&serde_json::json!({"_id": "  "})), None);
        assert_eq!(ApiClient::parse_created_id(&serde_json::Value::Null), None);
    }
}
