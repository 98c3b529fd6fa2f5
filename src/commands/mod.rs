pub mod authorization;
pub mod dispatch;
mod blacklist;
mod general;
mod lookup;

use serenity::model::id::{ChannelId, GuildId, RoleId};
use tracing::error;

use crate::{Data, FinderContext, Error};
use crate::models::invocation::{Invocation, Invoker};
use crate::services::gateway::SerenityGuild;
use crate::services::interaction_handler::AutoResponse;
use dispatch::{dispatch, Services};

/// Shared tail of every slash command: wire up the guild, dispatch, answer.
pub(crate) async fn run(ctx: FinderContext<'_>, invocation: Invocation) -> Result<(), Error> {
    let data = ctx.data();
    let serenity_ctx = ctx.serenity_context();

    let guild = SerenityGuild {
        http: serenity_ctx.http.clone(),
        cache: serenity_ctx.cache.clone(),
        guild_id: ctx.guild_id().unwrap_or(GuildId(data.config.guild_id)),
        blacklist_role: RoleId(data.config.blacklist_role_id),
        log_channel: ChannelId(data.config.log_channel_id)
    };

    let services = Services {
        store: &data.store,
        guild: &guild,
        geo: data.geo.as_ref(),
        audit: data.audit.as_ref(),
        privileged_role: &data.config.privileged_role,
        check_image: data.config.check_image.as_deref()
    };

    let invoker = Invoker {
        id: ctx.author().id.to_string(),
        tag: ctx.author().tag()
    };

    dispatch(&services, &invoker, invocation).await.respond(ctx).await
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Command /{} failed: {}", ctx.command().name, error);
        }
        other => {
            if let Err(ex) = poise::builtins::on_error(other).await {
                error!("Failed to handle framework error: {}", ex);
            }
        }
    }
}

pub fn get_framework() -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands: vec![
            lookup::check(),
            lookup::ip(),
            blacklist::blacklist(),
            general::ban(),
            general::unban()
        ],
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    }
}
