//! Adapters from responders to axum handlers
//!
//! A responder receives `(req, resp, args)`; axum handlers receive extractors
//! and return a response. These adapters extract the pass-through arguments
//! (`A`, any `FromRequestParts` type such as `Path` or `State`) and the
//! [`MediaRequest`], run the responder against a fresh [`MediaResponse`], and
//! render either the response or the error.
//!
//! # Example
//!
//! ```rust,ignore
//! let validator = validate(Some(&user_schema), Some(&user_schema))?;
//!
//! let app = Router::new()
//!     .route("/users", post(into_handler(validator.wrap(CreateUser))))
//!     .route("/users/{id}", get(into_handler(validator.wrap(GetUser))));
//! ```

use crate::core::media::{MediaRequest, MediaResponse};
use crate::core::responder::{AsyncResponder, Responder};
use axum::response::{IntoResponse, Response};
use futures::FutureExt;
use futures::future::{self, BoxFuture};
use std::sync::Arc;

/// Turn an asynchronous responder into an axum handler
pub fn into_handler<H, A>(
    responder: H,
) -> impl Fn(A, MediaRequest) -> BoxFuture<'static, Response> + Clone + Send + Sync + 'static
where
    H: AsyncResponder<MediaRequest, MediaResponse, A> + 'static,
    H::Error: IntoResponse,
    A: Send + 'static,
{
    let responder = Arc::new(responder);

    move |args: A, mut req: MediaRequest| {
        let responder = Arc::clone(&responder);

        async move {
            let mut resp = MediaResponse::new();
            match responder.respond_async(&mut req, &mut resp, args).await {
                Ok(_) => resp.into_response(),
                Err(e) => e.into_response(),
            }
        }
        .boxed()
    }
}

/// Turn a synchronous responder into an axum handler
///
/// The responder runs on the task polling the request; keep it short.
pub fn into_sync_handler<H, A>(
    responder: H,
) -> impl Fn(A, MediaRequest) -> BoxFuture<'static, Response> + Clone + Send + Sync + 'static
where
    H: Responder<MediaRequest, MediaResponse, A> + Send + Sync + 'static,
    H::Error: IntoResponse,
    A: Send + 'static,
{
    let responder = Arc::new(responder);

    move |args: A, mut req: MediaRequest| {
        let mut resp = MediaResponse::new();
        let response = match responder.respond(&mut req, &mut resp, args) {
            Ok(_) => resp.into_response(),
            Err(e) => e.into_response(),
        };
        future::ready(response).boxed()
    }
}
