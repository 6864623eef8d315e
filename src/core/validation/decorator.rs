//! Validated responders
//!
//! [`Validated`] runs the wrapped responder between request and response
//! validation. The order is fixed: retrieve and validate request media, run
//! the handler, validate response media. A handler error skips response
//! validation and is returned unchanged.

use super::validator::MediaValidator;
use crate::core::error::GuardError;
use crate::core::media::{AsyncRequestMedia, RequestMedia, ResponseMedia};
use crate::core::responder::{AsyncResponder, Responder};
use async_trait::async_trait;

/// A responder wrapped with media validation
///
/// Created by [`MediaValidator::wrap`].
#[derive(Debug, Clone)]
pub struct Validated<H> {
    handler: H,
    validator: MediaValidator,
}

impl<H> Validated<H> {
    pub fn new(handler: H, validator: MediaValidator) -> Self {
        Self { handler, validator }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn validator(&self) -> &MediaValidator {
        &self.validator
    }

    pub fn into_inner(self) -> H {
        self.handler
    }
}

impl<H, Req, Resp, A> Responder<Req, Resp, A> for Validated<H>
where
    H: Responder<Req, Resp, A>,
    Req: RequestMedia,
    Resp: ResponseMedia,
{
    type Output = H::Output;
    type Error = H::Error;

    fn respond(&self, req: &mut Req, resp: &mut Resp, args: A) -> Result<H::Output, H::Error> {
        if self.validator.request_schema().is_some() {
            let media = req.media().map_err(GuardError::from)?;
            self.validator.validate_request(media)?;
        }

        let result = self.handler.respond(req, resp, args)?;

        self.validator.validate_response(resp.media())?;

        Ok(result)
    }
}

#[async_trait]
impl<H, Req, Resp, A> AsyncResponder<Req, Resp, A> for Validated<H>
where
    H: AsyncResponder<Req, Resp, A>,
    Req: AsyncRequestMedia + Send,
    Resp: ResponseMedia + Send,
    A: Send + 'static,
{
    type Output = H::Output;
    type Error = H::Error;

    async fn respond_async(
        &self,
        req: &mut Req,
        resp: &mut Resp,
        args: A,
    ) -> Result<H::Output, H::Error> {
        if self.validator.request_schema().is_some() {
            let media = req.get_media().await.map_err(GuardError::from)?;
            self.validator.validate_request(media)?;
        }

        let result = self.handler.respond_async(req, resp, args).await?;

        self.validator.validate_response(resp.media())?;

        Ok(result)
    }
}
