//! Responder traits
//!
//! A responder handles one kind of request. It receives its own context
//! (`&self`), the request, the response to fill in, and any pass-through
//! arguments extracted by the host (path parameters, state, ...).
//!
//! Synchronous and asynchronous responders are distinct traits; the
//! validation wrapper picks the matching flavour from the trait a responder
//! implements.

use super::error::GuardError;
use async_trait::async_trait;
use std::marker::PhantomData;

/// A synchronous request handler
pub trait Responder<Req, Resp, A = ()> {
    /// Value returned by the handler on success
    type Output;

    /// Error returned by the handler; validation failures convert into it
    type Error: From<GuardError>;

    fn respond(&self, req: &mut Req, resp: &mut Resp, args: A) -> Result<Self::Output, Self::Error>;
}

/// An asynchronous request handler
///
/// # Example
///
/// ```rust,ignore
/// struct CreateUser;
///
/// #[async_trait]
/// impl AsyncResponder<MediaRequest, MediaResponse> for CreateUser {
///     type Output = ();
///     type Error = GuardError;
///
///     async fn respond_async(
///         &self,
///         req: &mut MediaRequest,
///         resp: &mut MediaResponse,
///         _args: (),
///     ) -> Result<(), GuardError> {
///         let name = req.get_media().await?["name"].clone();
///         resp.set_media(json!({ "name": name }));
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait AsyncResponder<Req, Resp, A = ()>: Send + Sync
where
    Req: Send,
    Resp: Send,
    A: Send + 'static,
{
    type Output: Send;
    type Error: From<GuardError> + Send;

    async fn respond_async(
        &self,
        req: &mut Req,
        resp: &mut Resp,
        args: A,
    ) -> Result<Self::Output, Self::Error>;
}

/// A [`Responder`] backed by a closure
///
/// Built with [`responder_fn`].
pub struct FnResponder<F, R, E> {
    f: F,
    _marker: PhantomData<fn() -> (R, E)>,
}

/// Turn a closure into a synchronous [`Responder`]
///
/// ```rust,ignore
/// let echo = responder_fn(|req: &mut MediaRequest, resp: &mut MediaResponse, _: ()| {
///     let media = req.media()?.clone();
///     resp.set_media(media);
///     Ok::<_, GuardError>(())
/// });
/// ```
pub fn responder_fn<F, R, E, Req, Resp, A>(f: F) -> FnResponder<F, R, E>
where
    F: Fn(&mut Req, &mut Resp, A) -> Result<R, E>,
{
    FnResponder {
        f,
        _marker: PhantomData,
    }
}

impl<F, R, E, Req, Resp, A> Responder<Req, Resp, A> for FnResponder<F, R, E>
where
    F: Fn(&mut Req, &mut Resp, A) -> Result<R, E>,
    E: From<GuardError>,
{
    type Output = R;
    type Error = E;

    fn respond(&self, req: &mut Req, resp: &mut Resp, args: A) -> Result<R, E> {
        (self.f)(req, resp, args)
    }
}

impl<F: Clone, R, E> Clone for FnResponder<F, R, E> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}
