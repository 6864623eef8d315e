//! Axum extractor and response conversion for media

use crate::core::error::{GuardError, MediaError};
use crate::core::media::{MediaRequest, MediaResponse};
use axum::{
    Json,
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Buffers the request body; media is deserialized on first access
///
/// The body limit configured on the router (`DefaultBodyLimit`) applies.
impl<S> FromRequest<S> for MediaRequest
where
    S: Send + Sync,
{
    type Rejection = GuardError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let method = req.method().clone();
        let uri = req.uri().clone();
        let headers = req.headers().clone();

        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                MediaError::TooLarge
            } else {
                MediaError::Unreadable {
                    message: rejection.body_text(),
                }
            }
        })?;

        Ok(MediaRequest::new(method, uri, headers, body))
    }
}

/// Renders media as a JSON body, or an empty body when no media was set
///
/// Media is dropped for statuses that cannot carry a body (1xx, 204, 304).
impl IntoResponse for MediaResponse {
    fn into_response(self) -> Response {
        let mut response = match self.media {
            Some(media) if allows_body(self.status) => Json(media).into_response(),
            _ => Body::empty().into_response(),
        };

        *response.status_mut() = self.status;
        response.headers_mut().extend(self.headers);
        response
    }
}

fn allows_body(status: StatusCode) -> bool {
    !(status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::media::RequestMedia;
    use axum::http::{HeaderValue, header};
    use serde_json::json;

    #[tokio::test]
    async fn test_extracts_method_uri_and_media() {
        let req = Request::builder()
            .method("PUT")
            .uri("/users/1")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"x"}"#))
            .unwrap();

        let mut media_req = MediaRequest::from_request(req, &()).await.unwrap();
        assert_eq!(media_req.method, "PUT");
        assert_eq!(media_req.uri.path(), "/users/1");
        assert_eq!(media_req.media().unwrap(), &json!({ "name": "x" }));
    }

    #[tokio::test]
    async fn test_response_with_media_is_json() {
        let mut resp = MediaResponse::new();
        resp.set_status(StatusCode::CREATED);
        resp.set_header(header::LOCATION, HeaderValue::from_static("/users/1"));
        resp.set_media(json!({ "id": 1 }));

        let response = resp.into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/users/1");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"id":1}"#);
    }

    #[tokio::test]
    async fn test_response_without_media_is_empty() {
        let response = MediaResponse::new().into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_bodyless_status_drops_media() {
        for status in [StatusCode::NO_CONTENT, StatusCode::NOT_MODIFIED] {
            let mut resp = MediaResponse::new();
            resp.set_status(status);
            resp.set_media(json!({ "id": 1 }));

            let response = resp.into_response();
            assert_eq!(response.status(), status);
            assert!(response.headers().get(header::CONTENT_TYPE).is_none());

            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert!(body.is_empty());
        }
    }
}
