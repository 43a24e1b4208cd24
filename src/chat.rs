use crate::commands::Bot;
use crate::config::{BotConfig, Cli};
use crate::wire::ChatWireMessage;
use chrono::Local;
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use nba_api::StatsProvider;
use std::sync::Arc;
use tokio::time::{Duration, sleep};
use tokio_tungstenite::{connect_async, tungstenite::Message};

const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// The command text of a message addressed to the bot.
fn command_line<'a>(body: &'a str, prefix: &str) -> Option<&'a str> {
    body.strip_prefix(prefix).map(str::trim)
}

/// Sits in one room of the relay and answers commands, reconnecting
/// whenever the connection drops.
pub struct BotWorker<P> {
    cli: Cli,
    bot: Bot<P>,
    sent: u64,
}

impl<P: StatsProvider> BotWorker<P> {
    pub fn new(cli: Cli, bot: Bot<P>) -> Self {
        Self { cli, bot, sent: 0 }
    }

    /// The relay URL for our room; the relay only forwards that room's frames.
    fn room_url(&self) -> String {
        format!("{}/{}", self.cli.chat_ws.trim_end_matches('/'), self.cli.room)
    }

    pub async fn run(mut self) {
        let url = self.room_url();
        loop {
            match connect_async(url.as_str()).await {
                Ok((stream, _)) => {
                    info!("Joined {url} as {}", self.cli.nick);
                    let (mut write, mut read) = stream.split();

                    'session: loop {
                        match read.next().await {
                            Some(Ok(Message::Text(text))) => {
                                let msg = match serde_json::from_str::<ChatWireMessage>(&text) {
                                    Ok(msg) => msg,
                                    Err(e) => {
                                        warn!("Chat parse error: {e}");
                                        continue;
                                    }
                                };
                                for body in self.handle(&msg).await {
                                    let payload = self.reply(body);
                                    if let Err(e) = send_message(&mut write, &payload).await {
                                        error!("Chat send failed: {e}");
                                        break 'session;
                                    }
                                }
                            }
                            Some(Ok(Message::Close(_))) | None => {
                                warn!("Chat connection closed");
                                break;
                            }
                            Some(Ok(_)) => {}
                            Some(Err(e)) => {
                                error!("Chat read failed: {e}");
                                break;
                            }
                        }
                    }
                }
                Err(e) => error!("Chat connect to {url} failed: {e}"),
            }
            sleep(RECONNECT_DELAY).await;
        }
    }

    /// Lines to post in answer to `msg`. Other rooms and the bot's own
    /// messages get none.
    async fn handle(&mut self, msg: &ChatWireMessage) -> Vec<String> {
        if msg.room != self.cli.room || msg.author == self.cli.nick {
            return Vec::new();
        }
        let Some(line) = command_line(&msg.body, &self.bot.config().prefix) else {
            return Vec::new();
        };
        debug!("{}: {line}", msg.author);
        if line == "reload" {
            return self.reload(&msg.author).into_iter().collect();
        }
        self.bot.respond(line).await
    }

    /// Rereads the settings file for an admin; ignored for anyone else.
    fn reload(&mut self, author: &str) -> Option<String> {
        if !self.bot.config().is_admin(author) {
            warn!("Ignoring reload from {author}");
            return None;
        }
        match BotConfig::from_cli(&self.cli) {
            Ok(config) => {
                self.bot.set_config(Arc::new(config));
                info!("Settings reloaded by {author}");
                Some("Settings reloaded.".to_string())
            }
            Err(e) => {
                error!("Reload failed: {e}");
                Some(format!("Error: {e}"))
            }
        }
    }

    fn reply(&mut self, body: String) -> ChatWireMessage {
        self.sent += 1;
        ChatWireMessage {
            id: format!("{}-{}", self.cli.nick, self.sent),
            room: self.cli.room.clone(),
            author: self.cli.nick.clone(),
            body,
            timestamp: Local::now().format("%H:%M").to_string(),
        }
    }
}

async fn send_message<S>(write: &mut S, payload: &ChatWireMessage) -> Result<(), String>
where
    S: futures_util::sink::Sink<Message, Error = tokio_tungstenite::tungstenite::Error> + Unpin,
{
    let text = serde_json::to_string(payload).map_err(|e| e.to_string())?;
    write
        .send(Message::Text(text.into()))
        .await
        .map_err(|e| e.to_string())
}
