//! # Handler chain
//!
//! Runs every registered [`Handler`] for one message in three phases:
//!
//! 1. `before` on each handler in registration order; the first `false` aborts with `Stop`.
//! 2. `handle` in order until one returns `Stop` or `Reply`; `Continue` and `Ignore` pass on.
//! 3. `after` on each handler in reverse order, with the final response.
//!
//! An error from any phase is returned immediately and skips the remaining phases.

use std::sync::Arc;

use dbot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

fn handler_name(handler: &Arc<dyn Handler>) -> &'static str {
    std::any::type_name_of_val(handler.as_ref())
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler after the existing ones.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the three phases for `message`; returns the first `Stop`/`Reply`, else `Continue`.
    #[instrument(
        skip(self, message),
        fields(user_id = message.user.id, message_type = message.message_type())
    )]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !self.run_before(message).await? {
            return Ok(HandlerResponse::Stop);
        }

        let response = self.run_handle(message).await?;
        self.run_after(message, &response).await?;

        info!(
            message_id = %message.id,
            response = %response_kind(&response),
            "step: handler_chain finished"
        );
        Ok(response)
    }

    async fn run_before(&self, message: &Message) -> Result<bool> {
        for handler in &self.handlers {
            if !handler.before(message).await? {
                info!(
                    handler = handler_name(handler),
                    "step: before returned false, chain stopped"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn run_handle(&self, message: &Message) -> Result<HandlerResponse> {
        for handler in &self.handlers {
            let response = handler.handle(message).await?;
            debug!(
                handler = handler_name(handler),
                response = %response_kind(&response),
                "step: handle done"
            );
            if matches!(response, HandlerResponse::Stop | HandlerResponse::Reply(_)) {
                return Ok(response);
            }
        }
        Ok(HandlerResponse::Continue)
    }

    async fn run_after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        for handler in self.handlers.iter().rev() {
            handler.after(message, response).await?;
        }
        Ok(())
    }
}

/// Response without the reply body, for logs.
fn response_kind(response: &HandlerResponse) -> &'static str {
    match response {
        HandlerResponse::Continue => "Continue",
        HandlerResponse::Stop => "Stop",
        HandlerResponse::Ignore => "Ignore",
        HandlerResponse::Reply(_) => "Reply",
    }
}
