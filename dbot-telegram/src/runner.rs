//! Long-polling loop. Every update becomes a [`dbot_core::Message`] and runs through the
//! [`HandlerChain`] on its own task, so one slow model call never holds up other chats.

use anyhow::Result;
use dbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use tracing::{error, info, instrument, warn};

use crate::adapters::TelegramMessageWrapper;

fn dispatch(chain: HandlerChain, msg: &teloxide::types::Message) {
    let message = TelegramMessageWrapper(msg).to_core();
    info!(
        user_id = message.user.id,
        chat_id = message.chat.id,
        message_type = message.message_type(),
        "Update received"
    );

    tokio::spawn(async move {
        if let Err(e) = chain.handle(&message).await {
            error!(error = %e, user_id = message.user.id, "Handler chain failed");
        }
    });
}

/// Polls until the process receives Ctrl+C. A leftover webhook would make polling fail, so it
/// is deleted first together with any updates queued while the bot was down.
#[instrument(skip_all)]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.delete_webhook().drop_pending_updates(true).await {
        Ok(_) => info!("Webhook cleared, pending updates dropped"),
        Err(e) => warn!(error = %e, "Could not delete webhook"),
    }

    match bot.get_me().await {
        Ok(me) => info!(username = me.user.username.as_deref().unwrap_or(""), "Polling started"),
        Err(e) => warn!(error = %e, "getMe failed"),
    }

    teloxide::repl(bot, move |msg: teloxide::types::Message| {
        dispatch(handler_chain.clone(), &msg);
        async { respond(()) }
    })
    .await;

    info!("Polling stopped");
    Ok(())
}
