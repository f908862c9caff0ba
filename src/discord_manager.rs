use std::sync::Arc;

use serenity::{
    async_trait,
    model::{channel::Message, gateway::Ready},
    prelude::*,
};
use tracing::{debug, error, info};

use crate::support::Support;


struct Handler {
    support: Arc<Support>,
}


#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, context: Context, msg: Message) {
        // Ignore bot's own messages
        if msg.author.bot {
            return;
        }

        // The form only runs in direct messages
        if msg.guild_id.is_some() {
            return;
        }

        debug!(user = %msg.author.id, author = %msg.author.name, "Direct message received");

        let reply = match self.support.process(msg.author.id.0, &msg.content).await {
            Ok(reply) => reply,
            Err(why) => {
                error!(user = %msg.author.id, error = %why, "Dropping message, session store failed");
                return;
            }
        };

        let response = self.support.render(&reply);
        if let Err(why) = msg.channel_id.say(&context.http, &response).await {
            error!(user = %msg.author.id, error = ?why, "Error sending message");
        }
    }

    async fn ready(&self, _: Context, ready: Ready) {
        info!(bot = %ready.user.name, "Connected to Discord");
    }
}


pub struct DiscordManager {
    discord_client: Client,
}


impl DiscordManager {
    pub async fn new(token: &str, support: Arc<Support>) -> Result<Self, serenity::Error> {
        let intents = GatewayIntents::DIRECT_MESSAGES | GatewayIntents::MESSAGE_CONTENT;
        let discord_client = Client::builder(token, intents)
            .event_handler(Handler { support })
            .await?;

        Ok(Self { discord_client })
    }

    pub async fn start(&mut self) -> Result<(), serenity::Error> {
        self.discord_client.start().await
    }
}
