use std::time::Duration;
use serenity::{
    client::Context,
    model::{
        gateway::Ready,
        id::GuildId
    }
};
use tracing::{error, info};
use crate::{Data, Error};
use super::presence;

pub async fn ready(ctx: &Context, ready: &Ready, framework: &poise::Framework<Data, Error>, data: Data) -> Result<Data, Error> {
    info!("Logged in as {}", ready.user.name);

    let guild_id = GuildId(data.config.guild_id);
    match poise::builtins::register_in_guild(&ctx.http, &framework.options().commands, guild_id).await {
        Ok(_) => info!("Registered {} commands in {}", framework.options().commands.len(), guild_id),
        Err(ex) => error!("Failed to register slash commands: {}", ex)
    }

    let period = Duration::from_secs(data.config.presence_interval_secs.max(1));

    // Runs for the life of the process, nothing joins it.
    #[allow(clippy::let_underscore_future)]
    let _ = tokio::task::spawn(presence::report_presence(ctx.clone(), guild_id, period));

    Ok(data)
}
