//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use std::sync::Arc;

use anyhow::Result;
use dbot_core::{Bot, MediaSource};
use dbot_telegram::TelegramBotAdapter;
use handler_chain::HandlerChain;
use llm_client::{CompletionGateway, OpenAILlmClient, Transcriber};
use storage::{HistoryStore, JsonHistoryStore};
use tracing::{info, instrument};

use super::config::BotConfig;
use super::handlers::{ConversationService, DocumentHandler, PhotoHandler, TextHandler, VoiceHandler};

/// Services the handlers depend on. Tests fill this with mocks.
#[derive(Clone)]
pub struct BotServices {
    pub bot: Arc<dyn Bot>,
    pub media: Arc<dyn MediaSource>,
    pub gateway: Arc<dyn CompletionGateway>,
    pub transcriber: Arc<dyn Transcriber>,
    pub history: Arc<dyn HistoryStore>,
}

/// Core dependencies for run_bot; produced by the component factory.
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub services: BotServices,
}

/// Builds the teloxide bot, the OpenAI client and the history store from config.
#[instrument(skip(config))]
pub fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let teloxide_bot = config.base.telegram.build_bot()?;
    let adapter = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    let llm = Arc::new(OpenAILlmClient::from_config(&config.llm));

    let history = JsonHistoryStore::load_with_max_turns(
        config.base.history_path.clone(),
        config.base.history_max_turns,
    );
    info!(
        history_path = %config.base.history_path.display(),
        conversations = history.conversation_count(),
        chat_model = %config.llm.chat_model,
        vision_model = %config.llm.vision_model,
        voice_enabled = config.voice.enabled,
        "Components initialized"
    );

    Ok(BotComponents {
        teloxide_bot,
        services: BotServices {
            bot: adapter.clone(),
            media: adapter,
            gateway: llm.clone(),
            transcriber: llm,
            history: Arc::new(history),
        },
    })
}

/// Builds the handler chain: text → voice → photo → document.
pub fn build_handler_chain(config: &BotConfig, services: &BotServices) -> HandlerChain {
    let conversation = Arc::new(ConversationService::new(
        services.history.clone(),
        services.gateway.clone(),
    ));

    let text = TextHandler::new(services.bot.clone(), conversation.clone());
    let voice = VoiceHandler::new(
        services.bot.clone(),
        services.media.clone(),
        services.transcriber.clone(),
        conversation.clone(),
        config.voice.enabled,
        config.llm.transcription_language.clone(),
        config.base.temp_dir.clone(),
    )
    .with_ffmpeg(config.voice.ffmpeg_path.clone());
    let photo = PhotoHandler::new(
        services.bot.clone(),
        services.media.clone(),
        services.gateway.clone(),
        config.llm.vision_model.clone(),
    );
    let document = DocumentHandler::new(
        services.bot.clone(),
        services.media.clone(),
        conversation,
        config.base.temp_dir.clone(),
    );

    HandlerChain::new()
        .add_handler(Arc::new(text))
        .add_handler(Arc::new(voice))
        .add_handler(Arc::new(photo))
        .add_handler(Arc::new(document))
}
