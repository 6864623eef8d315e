//! Tower layer validating the media of any axum route
//!
//! Unlike [`into_handler`](super::into_handler), the layer works with plain
//! axum handlers: it buffers the request body, validates it, and hands the
//! same bytes on to the handler; then it buffers and validates the body of a
//! successful response. Non-2xx responses are passed through untouched, the
//! handler having already signalled an error.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/users", post(create_user))
//!     .route_layer(validator.layer());
//! ```

use crate::core::error::{GuardError, MediaError, ValidationError};
use crate::core::media::parse_media;
use crate::core::validation::MediaValidator;
use axum::{
    body::{Body, Bytes},
    extract::Request,
    response::{IntoResponse, Response},
};
use futures::future::BoxFuture;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::task::{Context, Poll};
use tower::{Layer, Service};

impl MediaValidator {
    /// Build a tower layer applying this validator to a route
    pub fn layer(&self) -> MediaValidationLayer {
        MediaValidationLayer {
            validator: self.clone(),
        }
    }
}

/// Layer created by [`MediaValidator::layer`]
#[derive(Debug, Clone)]
pub struct MediaValidationLayer {
    validator: MediaValidator,
}

impl<S> Layer<S> for MediaValidationLayer {
    type Service = MediaValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MediaValidationService {
            inner,
            validator: self.validator.clone(),
        }
    }
}

/// Service wrapping an inner service with media validation
#[derive(Debug, Clone)]
pub struct MediaValidationService<S> {
    inner: S,
    validator: MediaValidator,
}

impl<S> Service<Request> for MediaValidationService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        // The clone may not be ready; keep the one poll_ready was called on
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let validator = self.validator.clone();

        Box::pin(async move {
            let req = match check_request(&validator, req).await {
                Ok(req) => req,
                Err(e) => return Ok(e.into_response()),
            };

            let response = inner.call(req).await?;

            Ok(check_response(&validator, response)
                .await
                .unwrap_or_else(IntoResponse::into_response))
        })
    }
}

async fn check_request(validator: &MediaValidator, req: Request) -> Result<Request, GuardError> {
    if validator.request_schema().is_none() {
        return Ok(req);
    }

    let (parts, body) = req.into_parts();
    let bytes = read_body(body, validator.body_limit()).await?;
    let media = parse_media(&bytes)?;
    validator.validate_request(&media)?;

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

async fn check_response(
    validator: &MediaValidator,
    response: Response,
) -> Result<Response, GuardError> {
    if validator.response_schema().is_none() || !response.status().is_success() {
        return Ok(response);
    }

    let (parts, body) = response.into_parts();
    let bytes = read_body(body, validator.body_limit())
        .await
        .map_err(withhold_response_error)?;

    let media = if bytes.is_empty() {
        None
    } else {
        Some(parse_media(&bytes).map_err(withhold_response_error)?)
    };
    validator.validate_response(media.as_ref())?;

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, MediaError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => Err(MediaError::TooLarge),
        Err(e) => Err(MediaError::Unreadable {
            message: e.to_string(),
        }),
    }
}

fn withhold_response_error(err: MediaError) -> GuardError {
    tracing::warn!(error = %err, "Response media could not be read for validation");
    ValidationError::Response.into()
}
