use tracing::{error, info};
use crate::{FinderContext, Error};
use crate::commands::authorization::require_moderator;
use crate::commands::dispatch::Services;
use crate::commands::run;
use crate::models::invocation::{BanOptions, Invocation, Invoker, UnbanOptions};
use crate::models::reply::Reply;

/// Banea a un usuario por ID con un motivo
#[poise::command(
    slash_command,
    guild_only,
    default_member_permissions = "BAN_MEMBERS",
    description_localized("en-US", "Ban a user by ID with a reason.")
)]
pub async fn ban(
    ctx: FinderContext<'_>,
    #[description = "ID del usuario a banear"] user_id: String,
    #[description = "Motivo del baneo"] reason: String)
-> Result<(), Error> {
    run(ctx, Invocation::Ban(BanOptions { user_id, reason })).await
}

/// Desbanea a un usuario por ID
#[poise::command(
    slash_command,
    guild_only,
    default_member_permissions = "BAN_MEMBERS",
    description_localized("en-US", "Unban a user by ID.")
)]
pub async fn unban(
    ctx: FinderContext<'_>,
    #[description = "ID del usuario a desbanear"] user_id: String)
-> Result<(), Error> {
    run(ctx, Invocation::Unban(UnbanOptions { user_id })).await
}

pub(crate) async fn ban_member(services: &Services<'_>, invoker: &Invoker, options: &BanOptions) -> Reply {
    if let Some(denied) = require_moderator(services, invoker, "❌ No tienes permisos para banear usuarios.").await {
        return denied;
    }

    match services.guild.ban(&options.user_id, &options.reason).await {
        Ok(tag) => {
            info!("{} banned {} ({})", invoker.id, options.user_id, options.reason);
            let entry = format!("🚨 El usuario **{}** (`{}`) fue **baneado** por {}.\n📝 Motivo: `{}`",
                tag, options.user_id, invoker.mention(), options.reason);
            if let Err(ex) = services.guild.audit_log(&entry).await {
                error!("Failed to mirror ban to the log channel: {}", ex);
            }
            Reply::private(format!("✅ Usuario {} ha sido baneado. Motivo: {}", tag, options.reason))
        }
        Err(ex) => {
            error!("Failed to ban {}: {}", options.user_id, ex);
            Reply::private("❌ No se pudo banear al usuario. Puede que no exista o no esté en el servidor.")
        }
    }
}

pub(crate) async fn unban_member(services: &Services<'_>, invoker: &Invoker, options: &UnbanOptions) -> Reply {
    if let Some(denied) = require_moderator(services, invoker, "❌ No tienes permisos para desbanear usuarios.").await {
        return denied;
    }

    match services.guild.unban(&options.user_id).await {
        Ok(_) => {
            info!("{} unbanned {}", invoker.id, options.user_id);
            let entry = format!("✅ El usuario con ID `{}` fue **desbaneado** por {}.", options.user_id, invoker.mention());
            if let Err(ex) = services.guild.audit_log(&entry).await {
                error!("Failed to mirror unban to the log channel: {}", ex);
            }
            Reply::private(format!("✅ Usuario con ID {} ha sido desbaneado.", options.user_id))
        }
        Err(ex) => {
            error!("Failed to unban {}: {}", options.user_id, ex);
            Reply::private("❌ No se pudo desbanear al usuario. Puede que no exista o no esté baneado.")
        }
    }
}
