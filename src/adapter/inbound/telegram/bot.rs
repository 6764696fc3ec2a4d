//! Long-polling Telegram bot.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{debug, error, info, warn};

use super::command::bot_commands;
use super::control::TelegramControl;
use crate::port::Replier;

/// Sends replies to the chat a command came from.
#[derive(Clone)]
pub struct ChatReplier {
    bot: Bot,
    chat_id: ChatId,
}

impl ChatReplier {
    #[must_use]
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl Replier for ChatReplier {
    async fn reply(&self, text: &str) {
        if let Err(e) = self.bot.send_message(self.chat_id, text).await {
            error!(chat_id = self.chat_id.0, error = %e, "Failed to send Telegram reply");
        }
    }
}

/// Bot that dispatches every text message to a [`TelegramControl`].
pub struct TelegramBot {
    bot: Bot,
    control: TelegramControl,
    register_commands: bool,
}

impl TelegramBot {
    #[must_use]
    pub fn new(token: &str, control: TelegramControl, register_commands: bool) -> Self {
        Self {
            bot: Bot::new(token),
            control,
            register_commands,
        }
    }

    /// Poll for updates until interrupted.
    ///
    /// Each message is handled on its own task, so a launch that polls for
    /// a minute does not hold up `/status` or `/stop`.
    pub async fn run(self) {
        if self.register_commands {
            if let Err(e) = register_bot_commands(&self.bot).await {
                warn!(error = %e, "Failed to register bot commands with Telegram");
            }
        }

        info!("Telegram bot listening for commands");

        let control = self.control;
        teloxide::repl(self.bot, move |bot: Bot, msg: Message| {
            let control = control.clone();
            async move {
                let Some(text) = msg.text().map(str::to_owned) else {
                    return respond(());
                };
                debug!(chat_id = msg.chat.id.0, text = %text, "Received message");

                let replier = ChatReplier::new(bot, msg.chat.id);
                tokio::spawn(async move {
                    control.handle(&text, &replier).await;
                });

                respond(())
            }
        })
        .await;

        info!("Telegram bot stopped");
    }
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
