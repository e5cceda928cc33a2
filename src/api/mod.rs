use crate::config::EnvConfig;
use crate::models::{NewNote, Note, NoteTag, NotesPage};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    #[error("{context} ({status}): {body}")]
    Server {
        status: u16,
        body: String,
        context: &'static str,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Rejected before any I/O.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn decode(e: impl std::fmt::Display) -> Self {
        Self::Decode(e.to_string())
    }

    pub(crate) fn is_not_found(&self) -> bool {
        matches!(self, Self::Server { status: 404, .. })
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Parameters of one listing request.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FetchNotesParams {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
    pub tag: Option<NoteTag>,
}

impl FetchNotesParams {
    pub(crate) fn validate(&self) -> ApiResult<()> {
        if self.page < 1 {
            return Err(ApiError::InvalidRequest("page must be >= 1".to_string()));
        }
        if self.per_page == 0 {
            return Err(ApiError::InvalidRequest("perPage must be > 0".to_string()));
        }
        Ok(())
    }

    /// Query string pairs; empty search and missing tag are omitted.
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("page", self.page.to_string()),
            ("perPage", self.per_page.to_string()),
        ];
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            out.push(("search", search.to_string()));
        }
        if let Some(tag) = self.tag {
            out.push(("tag", tag.to_string()));
        }
        out
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_env(env: &EnvConfig) -> Self {
        Self::new(env.api_url.clone(), env.api_token.clone())
    }

    fn get_auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&impl Serialize>,
        context: &'static str,
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let mut req = client.request(method.clone(), self.url(path));
        if let Some(header) = self.get_auth_header() {
            req = req.header("Authorization", header);
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        tracing::debug!(%method, path, ?query, "notes api request");

        let res = req.send().await.map_err(|e| {
            tracing::warn!(path, error = %e, "notes api request failed to send");
            ApiError::network(e)
        })?;

        let status = res.status();
        if status.is_success() {
            res.json().await.map_err(ApiError::decode)
        } else {
            let body = res.text().await.unwrap_or_default();
            tracing::warn!(path, status = status.as_u16(), "notes api returned an error");
            Err(ApiError::Server {
                status: status.as_u16(),
                body,
                context,
            })
        }
    }

    pub async fn fetch_notes(&self, params: &FetchNotesParams) -> ApiResult<NotesPage> {
        params.validate()?;
        self.request(
            Method::GET,
            "/notes",
            &params.query_pairs(),
            None::<&()>,
            "Failed to fetch notes",
        )
        .await
    }

    pub async fn create_note(&self, note: &NewNote) -> ApiResult<Note> {
        note.validate().map_err(ApiError::InvalidRequest)?;
        self.request(
            Method::POST,
            "/notes",
            &[],
            Some(note),
            "Failed to create note",
        )
        .await
    }

    pub async fn fetch_note_by_id(&self, id: &str) -> ApiResult<Note> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidRequest("note id is empty".to_string()));
        }
        self.request(
            Method::GET,
            &note_path(id),
            &[],
            None::<&()>,
            "Failed to fetch note",
        )
        .await
    }
}

pub(crate) fn note_path(id: &str) -> String {
    format!("/notes/{}", urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: u32, per_page: u32) -> FetchNotesParams {
        FetchNotesParams {
            page,
            per_page,
            search: None,
            tag: None,
        }
    }

    #[test]
    fn test_fetch_params_validation() {
        assert!(params(1, 10).validate().is_ok());
        assert!(matches!(
            params(0, 10).validate(),
            Err(ApiError::InvalidRequest(_))
        ));
        assert!(matches!(
            params(1, 0).validate(),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_query_pairs_omit_empty_search_and_missing_tag() {
        let mut p = params(2, 10);
        p.search = Some(String::new());
        assert_eq!(
            p.query_pairs(),
            vec![("page", "2".to_string()), ("perPage", "10".to_string())]
        );

        p.search = Some("lunch".to_string());
        p.tag = Some(NoteTag::Meeting);
        let pairs = p.query_pairs();
        assert!(pairs.contains(&("search", "lunch".to_string())));
        assert!(pairs.contains(&("tag", "Meeting".to_string())));
    }

    #[test]
    fn test_api_client_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:3000/api/".to_string(), None);
        assert_eq!(client.url("/notes"), "http://localhost:3000/api/notes");
        assert!(client.get_auth_header().is_none());
    }

    #[test]
    fn test_api_client_auth_header_with_token() {
        let client = ApiClient::new("http://x".to_string(), Some("tok".to_string()));
        assert_eq!(client.get_auth_header().as_deref(), Some("Bearer tok"));
    }

    #[test]
    fn test_note_path_encodes_id() {
        assert_eq!(note_path("a b"), "/notes/a%20b");
    }

    #[test]
    fn test_server_error_display() {
        let e = ApiError::Server {
            status: 404,
            body: "missing".to_string(),
            context: "Failed to fetch note",
        };
        assert_eq!(e.to_string(), "Failed to fetch note (404): missing");
        assert!(e.is_not_found());
    }
}
