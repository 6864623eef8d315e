//! Request and response media
//!
//! "Media" is the deserialized body of a message. The traits here are the
//! only thing the validators need from a request or response, so any host
//! type can be validated by implementing them. [`MediaRequest`] and
//! [`MediaResponse`] are the implementations used with axum.

use super::error::MediaError;
use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use serde_json::Value;

/// Synchronous access to request media
pub trait RequestMedia {
    /// Deserialize the body (at most once) and return it
    fn media(&mut self) -> Result<&Value, MediaError>;
}

/// Asynchronous access to request media
///
/// Used by asynchronous responders, where retrieving the body may need to
/// wait on the connection.
#[async_trait]
pub trait AsyncRequestMedia: Send {
    /// Retrieve and deserialize the body (at most once) and return it
    async fn get_media(&mut self) -> Result<&Value, MediaError>;
}

/// Access to response media
pub trait ResponseMedia {
    /// The media set by the handler, if any
    fn media(&self) -> Option<&Value>;
}

/// Deserialize a JSON body
pub fn parse_media(body: &[u8]) -> Result<Value, MediaError> {
    if body.is_empty() {
        return Err(MediaError::Missing);
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Failed to deserialize JSON media");
        MediaError::Malformed {
            message: e.to_string(),
        }
    })
}

/// A buffered HTTP request with lazily deserialized media
#[derive(Debug, Clone)]
pub struct MediaRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    body: Bytes,
    media: Option<Result<Value, MediaError>>,
}

impl MediaRequest {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            method,
            uri,
            headers,
            body: body.into(),
            media: None,
        }
    }

    /// Build a POST request carrying `media` as its JSON body
    pub fn from_json(uri: Uri, media: &Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self::new(Method::POST, uri, headers, media.to_string())
    }

    /// The raw body bytes
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    fn cached_media(&mut self) -> Result<&Value, MediaError> {
        self.media
            .get_or_insert_with(|| parse_media(&self.body))
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl RequestMedia for MediaRequest {
    fn media(&mut self) -> Result<&Value, MediaError> {
        self.cached_media()
    }
}

#[async_trait]
impl AsyncRequestMedia for MediaRequest {
    async fn get_media(&mut self) -> Result<&Value, MediaError> {
        // The body is buffered by the extractor, nothing left to await
        self.cached_media()
    }
}

/// The response a responder fills in
#[derive(Debug, Clone)]
pub struct MediaResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub media: Option<Value>,
}

impl MediaResponse {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            media: None,
        }
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn set_media(&mut self, media: Value) {
        self.media = Some(media);
    }

    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }
}

impl Default for MediaResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseMedia for MediaResponse {
    fn media(&self) -> Option<&Value> {
        self.media.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_is_parsed_once_and_cached() {
        let mut req = MediaRequest::from_json(Uri::from_static("/users"), &json!({ "name": "x" }));
        assert_eq!(req.media().unwrap(), &json!({ "name": "x" }));
        assert!(req.media.is_some());
        assert_eq!(req.media().unwrap()["name"], "x");
    }

    #[test]
    fn test_from_json_keeps_uri_and_sets_content_type() {
        let uri: Uri = "/users?page=2".parse().unwrap();
        let req = MediaRequest::from_json(uri, &json!({ "name": "x" }));
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.uri.path(), "/users");
        assert_eq!(req.uri.query(), Some("page=2"));
        assert_eq!(req.headers[CONTENT_TYPE], "application/json");
        assert_eq!(&req.body()[..], br#"{"name":"x"}"#);
    }

    #[test]
    fn test_empty_body_is_missing_media() {
        let mut req = MediaRequest::new(Method::POST, Uri::default(), HeaderMap::new(), "");
        assert_eq!(req.media().unwrap_err(), MediaError::Missing);
    }

    #[test]
    fn test_malformed_body_error_is_cached() {
        let mut req = MediaRequest::new(Method::POST, Uri::default(), HeaderMap::new(), "{nope");
        let first = req.media().unwrap_err();
        let second = req.media().unwrap_err();
        assert!(matches!(first, MediaError::Malformed { .. }));
        assert_eq!(first, second);
    }

    #[test]
    fn test_get_media_matches_sync_media() {
        let mut req = MediaRequest::from_json(Uri::from_static("/users"), &json!([1, 2, 3]));
        let media = tokio_test::block_on(req.get_media()).unwrap().clone();
        assert_eq!(media, json!([1, 2, 3]));
    }

    #[test]
    fn test_response_defaults() {
        let mut resp = MediaResponse::default();
        assert_eq!(resp.status, StatusCode::OK);
        assert!(ResponseMedia::media(&resp).is_none());

        resp.set_media(json!({ "id": 1 }));
        resp.set_status(StatusCode::CREATED);
        assert_eq!(ResponseMedia::media(&resp), Some(&json!({ "id": 1 })));
        assert_eq!(resp.status, StatusCode::CREATED);
    }
}
